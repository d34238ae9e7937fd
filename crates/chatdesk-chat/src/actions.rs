use chatdesk_types::ConversationId;

/// What a click inside the sidebar asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListAction {
    Open(ConversationId),
    Delete(ConversationId),
}

impl ListAction {
    /// Resolve a delegated click from the nearest `data-action` and
    /// `data-conversation-id` attributes of its target.
    pub fn resolve(action: Option<&str>, conversation_id: Option<&str>) -> Option<Self> {
        let id = conversation_id.map(str::trim).filter(|id| !id.is_empty())?;
        let id = ConversationId::parse(id);

        match action {
            None | Some("open") => Some(ListAction::Open(id)),
            Some("delete") => Some(ListAction::Delete(id)),
            Some(other) => {
                log::warn!("Unknown conversation action: {}", other);
                None
            }
        }
    }
}
