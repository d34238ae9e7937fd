use std::rc::Rc;

use js_sys::Promise;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

use chatdesk_chat::ChatClient;

mod config;
mod dom;
mod events;
mod http;
mod runtime;
mod storage;
mod view;

pub use config::MountConfig;

/// Initialize the WASM application
/// This sets up panic hooks and logging
#[wasm_bindgen(start)]
pub fn init() {
    // Set panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    wasm_logger::init(wasm_logger::Config::default());

    log::info!("chatdesk WASM initialized");
}

/// Bind the chat page using the default element ids
#[wasm_bindgen]
pub fn mount() -> Result<ChatPage, JsValue> {
    mount_page(MountConfig::default())
}

/// Bind the chat page with a JSON object overriding the default ids
#[wasm_bindgen(js_name = mountWithConfig)]
pub fn mount_with_config(config_json: &str) -> Result<ChatPage, JsValue> {
    let config = MountConfig::from_json(config_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid mount config: {}", e)))?;
    mount_page(config)
}

fn mount_page(config: MountConfig) -> Result<ChatPage, JsValue> {
    let document = document()?;
    let view = Rc::new(view::DomView::bind(&document, &config)?);

    let client = ChatClient::new(
        Rc::new(http::FetchApi::new(config.api_base.clone(), config.csrf_cookie.clone())),
        view.clone(),
        Rc::new(storage::LocalStore::open()),
        Rc::new(runtime::BrowserRuntime),
        config.client_options(),
    );

    events::wire(&document, &config, &client, &view)?;
    log::info!("Chat page mounted");

    let starter = client.clone();
    wasm_bindgen_futures::spawn_local(async move { starter.start().await });

    Ok(ChatPage { client })
}

/// Handle returned to JS for the mounted page
#[wasm_bindgen]
pub struct ChatPage {
    client: ChatClient,
}

#[wasm_bindgen]
impl ChatPage {
    /// Reload the sidebar; resolves once it is rendered
    #[wasm_bindgen(js_name = refreshList)]
    pub fn refresh_list(&self) -> Promise {
        let client = self.client.clone();
        wasm_bindgen_futures::future_to_promise(async move {
            client.refresh_list().await;
            Ok(JsValue::UNDEFINED)
        })
    }

    #[wasm_bindgen(js_name = newChat)]
    pub fn new_chat(&self) {
        self.client.new_chat();
    }

    /// Current conversation id as text, if one is open
    #[wasm_bindgen(js_name = currentConversationId)]
    pub fn current_conversation_id(&self) -> Option<String> {
        self.client
            .current_conversation_id()
            .map(|id| id.as_str().to_string())
    }

    #[wasm_bindgen(js_name = isSending)]
    pub fn is_sending(&self) -> bool {
        self.client.is_sending()
    }
}

/// Get the window object
fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("No window object"))
}

/// Get the document object
fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("No document object"))
}
