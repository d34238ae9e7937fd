//! Native HTTP transport for the conversation backend
//!
//! [`HttpChatApi`] implements [`chatdesk_chat::ChatApi`] over `reqwest`.
//! Status handling and schema checks live in `chatdesk_types::protocol`;
//! this crate only moves requests and bodies.

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, COOKIE};

use chatdesk_chat::ChatApi;
use chatdesk_types::protocol::{self, Route};
use chatdesk_types::{
    token_from_cookies, ChatReply, ChatRequest, ClientError, Conversation, ConversationId,
    ConversationSummary, HttpMethod, CSRF_COOKIE_NAME, CSRF_HEADER,
};

/// Where the backend lives and which credentials to relay
#[derive(Debug, Clone, Default)]
pub struct HttpConfig {
    /// Origin of the backend, e.g. `http://127.0.0.1:8000`
    pub base_url: String,
    /// Raw `Cookie` header forwarded on every request (session + CSRF cookies)
    pub cookie: Option<String>,
    /// Explicit CSRF token; falls back to the `csrftoken` cookie
    pub csrf_token: Option<String>,
}

/// Conversation backend reached with reqwest
pub struct HttpChatApi {
    config: HttpConfig,
    client: reqwest::Client,
}

impl HttpChatApi {
    pub fn new(config: HttpConfig) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    pub fn with_client(config: HttpConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Token echoed in the CSRF header; empty when none is known
    pub fn csrf_token(&self) -> String {
        self.config
            .csrf_token
            .clone()
            .or_else(|| {
                self.config
                    .cookie
                    .as_deref()
                    .and_then(|cookie| token_from_cookies(cookie, CSRF_COOKIE_NAME))
            })
            .unwrap_or_default()
    }

    /// Perform one call and return the status code with the body text
    async fn execute(
        &self,
        route: Route<'_>,
        body: Option<&ChatRequest>,
    ) -> Result<(u16, String), ClientError> {
        let url = route.url(&self.config.base_url);
        let mut request = match route.method() {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        if let Some(cookie) = &self.config.cookie {
            request = request.header(COOKIE, cookie);
        }
        if route.is_mutating() {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .header(CSRF_HEADER, self.csrf_token());
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        log::debug!("{} {}", route.method().as_str(), url);
        let response = request.send().await.map_err(ClientError::transport)?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(ClientError::transport)?;
        log::debug!("{} {} -> {}", route.method().as_str(), url, status);

        Ok((status, text))
    }
}

#[async_trait(?Send)]
impl ChatApi for HttpChatApi {
    async fn send_message(&self, request: &ChatRequest) -> Result<ChatReply, ClientError> {
        let (status, body) = self.execute(Route::SendMessage, Some(request)).await?;
        protocol::decode_chat_reply(status, &body)
    }

    async fn list_conversations(&self) -> Result<Vec<ConversationSummary>, ClientError> {
        let (status, body) = self.execute(Route::ListConversations, None).await?;
        protocol::decode_conversation_list(status, &body)
    }

    async fn get_conversation(&self, id: &ConversationId) -> Result<Conversation, ClientError> {
        let (status, body) = self.execute(Route::GetConversation(id), None).await?;
        protocol::decode_conversation(id, status, &body)
    }

    async fn delete_conversation(&self, id: &ConversationId) -> Result<(), ClientError> {
        let (status, body) = self.execute(Route::DeleteConversation(id), None).await?;
        protocol::check_delete(status, &body)
    }
}
