use async_trait::async_trait;
use gloo_net::http::Request;
use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

use chatdesk_chat::ChatApi;
use chatdesk_types::protocol::{self, Route};
use chatdesk_types::{
    token_from_cookies, ChatReply, ChatRequest, ClientError, Conversation, ConversationId,
    ConversationSummary, HttpMethod, CSRF_HEADER,
};

/// Backend reached with `fetch`; cookies ride along same-origin
pub struct FetchApi {
    base_url: String,
    csrf_cookie: String,
}

impl FetchApi {
    pub fn new(base_url: impl Into<String>, csrf_cookie: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            csrf_cookie: csrf_cookie.into(),
        }
    }

    /// Read fresh on every call since the server may rotate it
    fn csrf_token(&self) -> String {
        let cookies = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.dyn_into::<HtmlDocument>().ok())
            .and_then(|d| d.cookie().ok())
            .unwrap_or_default();

        token_from_cookies(&cookies, &self.csrf_cookie).unwrap_or_default()
    }

    async fn execute(
        &self,
        route: Route<'_>,
        body: Option<&ChatRequest>,
    ) -> Result<(u16, String), ClientError> {
        let url = route.url(&self.base_url);
        let mut builder = match route.method() {
            HttpMethod::Get => Request::get(&url),
            HttpMethod::Post => Request::post(&url),
            HttpMethod::Delete => Request::delete(&url),
        };

        if route.is_mutating() {
            builder = builder
                .header("Content-Type", "application/json")
                .header(CSRF_HEADER, &self.csrf_token());
        }

        let request = match body {
            Some(body) => builder.json(body),
            None => builder.build(),
        }
        .map_err(ClientError::transport)?;

        log::debug!("{} {}", route.method().as_str(), url);
        let response = request.send().await.map_err(ClientError::transport)?;
        let status = response.status();
        let text = response.text().await.map_err(ClientError::transport)?;

        Ok((status, text))
    }
}

#[async_trait(?Send)]
impl ChatApi for FetchApi {
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
