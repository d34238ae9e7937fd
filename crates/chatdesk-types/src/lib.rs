//! Core types and wire contract for chatdesk
//!
//! This crate provides the data model shared by every chatdesk front-end,
//! the JSON/HTTP contract with the conversation backend, and the error
//! taxonomy used when that contract is not honoured.

pub mod csrf;
pub mod error;
pub mod model;
pub mod protocol;

pub use csrf::{token_from_cookies, CSRF_COOKIE_NAME, CSRF_HEADER};
pub use error::ClientError;
pub use model::{
    title_from_first_message, Conversation, ConversationId, ConversationSummary, Exchange,
};
pub use protocol::{ChatReply, ChatRequest, HttpMethod, Route};

// ============================================================================
// Constants
// ============================================================================

/// Local storage key holding the current conversation id
pub const CURRENT_CONVERSATION_KEY: &str = "currentConversationId";

/// Title shown while no conversation has been named yet
pub const DEFAULT_TITLE: &str = "ChatGPT";

/// Number of characters of the first message kept in a derived title
pub const TITLE_MAX_CHARS: usize = 30;
