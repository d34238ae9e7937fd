use std::time::Duration;

use chatdesk_types::{CURRENT_CONVERSATION_KEY, DEFAULT_TITLE};

/// Tunables of [`crate::ChatClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    /// Title placeholder shown until a conversation is named
    pub default_title: String,
    /// Storage key mirroring the current conversation id
    pub storage_key: String,
    /// Delay before the sidebar is refreshed after a send, so the server
    /// can settle the new conversation's title
    pub refresh_delay: Duration,
    pub error_lifetime: Duration,
    pub success_lifetime: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            default_title: DEFAULT_TITLE.to_string(),
            storage_key: CURRENT_CONVERSATION_KEY.to_string(),
            refresh_delay: Duration::from_millis(1000),
            error_lifetime: Duration::from_millis(5000),
            success_lifetime: Duration::from_millis(3000),
        }
    }
}
