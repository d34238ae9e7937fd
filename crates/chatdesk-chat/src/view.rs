use std::time::Duration;

use chatdesk_types::{ConversationId, ConversationSummary, Exchange};

/// Identifies a notice so it can be removed once its lifetime ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoticeId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    Success,
}

impl NoticeKind {
    /// CSS class of the banner element
    pub fn class_name(&self) -> &'static str {
        match self {
            NoticeKind::Error => "error-message",
            NoticeKind::Success => "success-message",
        }
    }
}

/// Transient banner shown in the transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    pub lifetime: Duration,
}

/// Surface the controller renders into.
///
/// The browser binds this to page elements, the terminal to stdout. All
/// calls are synchronous; the controller never holds state borrowed
/// across them.
pub trait ChatView {
    /// Disable (or re-enable) the input and the submit control
    fn set_busy(&self, busy: bool);
    fn clear_input(&self);
    fn focus_input(&self);
    fn set_typing(&self, visible: bool);
    fn set_welcome_visible(&self, visible: bool);

    /// Append user line, bot line and optional summary for one exchange
    fn append_exchange(&self, exchange: &Exchange);
    /// Remove every rendered exchange; notices and the welcome block stay
    fn clear_transcript(&self);
    fn set_title(&self, title: &str);

    /// Replace the sidebar; an empty slice shows the "no conversations" placeholder
    fn render_conversations(&self, conversations: &[ConversationSummary], active: Option<&ConversationId>);
    fn mark_active(&self, active: Option<&ConversationId>);
    fn remove_conversation(&self, id: &ConversationId);

    fn show_notice(&self, id: NoticeId, notice: &Notice);
    /// Remove a notice if it is still displayed
    fn dismiss_notice(&self, id: NoticeId);

    /// Blocking yes/no question
    fn confirm(&self, question: &str) -> bool;
}
