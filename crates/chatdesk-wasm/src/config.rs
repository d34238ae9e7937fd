use serde::Deserialize;

use chatdesk_chat::ClientOptions;
use chatdesk_types::{CSRF_COOKIE_NAME, DEFAULT_TITLE};

/// Element ids and settings the page is bound with.
///
/// Defaults match the stock chat page; JS may override any subset by
/// passing a JSON object with camelCase keys to `mountWithConfig`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MountConfig {
    pub messages_id: String,
    pub input_id: String,
    pub send_button_id: String,
    pub form_id: String,
    pub typing_indicator_id: String,
    pub new_chat_button_id: String,
    pub conversation_list_id: String,
    pub welcome_id: String,
    pub title_id: String,
    /// Cookie the CSRF token is read from
    pub csrf_cookie: String,
    /// Backend origin; empty means same origin as the page
    pub api_base: String,
    pub default_title: String,
    /// Maximum height in pixels the input grows to while typing
    pub input_max_height: i32,
}

impl Default for MountConfig {
    fn default() -> Self {
        Self {
            messages_id: "chatMessages".to_string(),
            input_id: "messageInput".to_string(),
            send_button_id: "sendButton".to_string(),
            form_id: "chatForm".to_string(),
            typing_indicator_id: "typingIndicator".to_string(),
            new_chat_button_id: "newChatBtn".to_string(),
            conversation_list_id: "conversationsList".to_string(),
            welcome_id: "welcomeMessage".to_string(),
            title_id: "currentChatTitle".to_string(),
            csrf_cookie: CSRF_COOKIE_NAME.to_string(),
            api_base: String::new(),
            default_title: DEFAULT_TITLE.to_string(),
            input_max_height: 200,
        }
    }
}

impl MountConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            default_title: self.default_title.clone(),
            ..ClientOptions::default()
        }
    }
}
