//! JSON/HTTP contract with the conversation backend.
//!
//! Transports only move bytes: they build the request from a [`Route`],
//! then hand the status code and body text back to the `decode_*`
//! functions here, so every front-end applies the same schema and the
//! same error mapping.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;
use crate::model::{Conversation, ConversationId, ConversationSummary};

pub const CHAT_PATH: &str = "/api/chat/";
pub const CONVERSATIONS_PATH: &str = "/api/conversations/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// The four backend operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    SendMessage,
    ListConversations,
    GetConversation(&'a ConversationId),
    DeleteConversation(&'a ConversationId),
}

impl Route<'_> {
    pub fn method(&self) -> HttpMethod {
        match self {
            Route::SendMessage => HttpMethod::Post,
            Route::ListConversations | Route::GetConversation(_) => HttpMethod::Get,
            Route::DeleteConversation(_) => HttpMethod::Delete,
        }
    }

    /// Path relative to the backend origin
    pub fn path(&self) -> String {
        match self {
            Route::SendMessage => CHAT_PATH.to_string(),
            Route::ListConversations => CONVERSATIONS_PATH.to_string(),
            Route::GetConversation(id) => {
                format!("{}{}/", CONVERSATIONS_PATH, urlencoding::encode(id.as_str()))
            }
            Route::DeleteConversation(id) => {
                format!("{}{}/delete/", CONVERSATIONS_PATH, urlencoding::encode(id.as_str()))
            }
        }
    }

    /// Full URL under `base_url`; an empty base yields an origin-relative path
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path())
    }

    /// Whether the CSRF header must accompany the call
    pub fn is_mutating(&self) -> bool {
        !matches!(self.method(), HttpMethod::Get)
    }

    /// Short name used in logs and malformed-response errors
    pub fn name(&self) -> &'static str {
        match self {
            Route::SendMessage => "send message",
            Route::ListConversations => "list conversations",
            Route::GetConversation(_) => "get conversation",
            Route::DeleteConversation(_) => "delete conversation",
        }
    }
}

// ============================================================================
// Request / response bodies
// ============================================================================

/// Body of `POST /api/chat/`. `conversation_id` is sent as `null` for a new chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub conversation_id: Option<ConversationId>,
}

/// Successful reply to `POST /api/chat/`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(default)]
    pub context_summary: Option<String>,
    pub conversation_id: ConversationId,
}

#[derive(Debug, Deserialize)]
struct ConversationListEnvelope {
    conversations: Vec<ConversationSummary>,
}

#[derive(Debug, Deserialize)]
struct ConversationEnvelope {
    conversation: Conversation,
}

/// Error body sent with non-2xx responses
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<String>,
}

// ============================================================================
// Decoding
// ============================================================================

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Map a non-2xx response to [`ClientError::Api`]
pub fn api_error(status: u16, body: &str) -> ClientError {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| format!("HTTP {}: Network error", status));
    ClientError::Api { status, message }
}

fn decode<T: DeserializeOwned>(route: Route<'_>, status: u16, body: &str) -> Result<T, ClientError> {
    if !is_success(status) {
        return Err(api_error(status, body));
    }
    serde_json::from_str(body).map_err(|e| ClientError::Malformed {
        endpoint: route.name(),
        detail: e.to_string(),
    })
}

pub fn decode_chat_reply(status: u16, body: &str) -> Result<ChatReply, ClientError> {
    decode(Route::SendMessage, status, body)
}

pub fn decode_conversation_list(
    status: u16,
    body: &str,
) -> Result<Vec<ConversationSummary>, ClientError> {
    decode::<ConversationListEnvelope>(Route::ListConversations, status, body)
        .map(|envelope| envelope.conversations)
}

pub fn decode_conversation(
    id: &ConversationId,
    status: u16,
    body: &str,
) -> Result<Conversation, ClientError> {
    decode::<ConversationEnvelope>(Route::GetConversation(id), status, body)
        .map(|envelope| envelope.conversation)
}

/// The delete endpoint's body is ignored on success
pub fn check_delete(status: u16, body: &str) -> Result<(), ClientError> {
    if is_success(status) {
        Ok(())
    } else {
        Err(api_error(status, body))
    }
}
