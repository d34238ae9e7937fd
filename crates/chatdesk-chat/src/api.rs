use async_trait::async_trait;

use chatdesk_types::{ChatReply, ChatRequest, ClientError, Conversation, ConversationId, ConversationSummary};

/// Conversation backend - one method per endpoint of the HTTP contract.
///
/// Implementations run on a single-threaded event loop (the browser, or a
/// tokio `LocalSet`), so the futures are not required to be `Send`.
#[async_trait(?Send)]
pub trait ChatApi {
    /// `POST /api/chat/`
    async fn send_message(&self, request: &ChatRequest) -> Result<ChatReply, ClientError>;

    /// `GET /api/conversations/`
    async fn list_conversations(&self) -> Result<Vec<ConversationSummary>, ClientError>;

    /// `GET /api/conversations/{id}/`
    async fn get_conversation(&self, id: &ConversationId) -> Result<Conversation, ClientError>;

    /// `DELETE /api/conversations/{id}/delete/`
    async fn delete_conversation(&self, id: &ConversationId) -> Result<(), ClientError>;
}
