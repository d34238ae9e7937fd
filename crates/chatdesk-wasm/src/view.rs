use std::cell::RefCell;
use std::collections::HashMap;

use wasm_bindgen::JsValue;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlTextAreaElement};

use chatdesk_chat::render;
use chatdesk_chat::{ChatView, Notice, NoticeId};
use chatdesk_types::{ConversationId, ConversationSummary, Exchange};

use crate::config::MountConfig;
use crate::dom;

const SEND_LABEL: &str = "Send";
const SENDING_LABEL: &str = "Sending...";

/// The chat page's elements
pub struct DomView {
    document: Document,
    messages: Element,
    input: HtmlTextAreaElement,
    send_button: HtmlButtonElement,
    typing: HtmlElement,
    welcome: Option<HtmlElement>,
    title: Element,
    list: Element,
    input_max_height: i32,
    notices: RefCell<HashMap<NoticeId, Element>>,
}

impl DomView {
    /// Look up every element; the welcome block is optional
    pub fn bind(document: &Document, config: &MountConfig) -> Result<Self, JsValue> {
        Ok(Self {
            document: document.clone(),
            messages: dom::get_element_by_id(document, &config.messages_id)?,
            input: dom::get_textarea_by_id(document, &config.input_id)?,
            send_button: dom::get_button_by_id(document, &config.send_button_id)?,
            typing: dom::get_html_element_by_id(document, &config.typing_indicator_id)?,
            welcome: dom::get_html_element_by_id(document, &config.welcome_id).ok(),
            title: dom::get_element_by_id(document, &config.title_id)?,
            list: dom::get_element_by_id(document, &config.conversation_list_id)?,
            input_max_height: config.input_max_height,
            notices: RefCell::new(HashMap::new()),
        })
    }

    pub fn input(&self) -> &HtmlTextAreaElement {
        &self.input
    }

    pub fn list(&self) -> &Element {
        &self.list
    }

    /// Grow the input with its content up to the configured height
    pub fn resize_input(&self) {
        let style = self.input.style();
        let _ = style.set_property("height", "auto");
        let height = self.input.scroll_height().min(self.input_max_height);
        let _ = style.set_property("height", &format!("{}px", height));
    }
}

impl ChatView for DomView {
    fn set_busy(&self, busy: bool) {
        self.send_button.set_disabled(busy);
        self.input.set_disabled(busy);
        self.send_button
            .set_text_content(Some(if busy { SENDING_LABEL } else { SEND_LABEL }));
    }

    fn clear_input(&self) {
        self.input.set_value("");
        self.resize_input();
    }

    fn focus_input(&self) {
        let _ = self.input.focus();
    }

    fn set_typing(&self, visible: bool) {
        dom::set_display(&self.typing, if visible { "block" } else { "none" });
        if visible {
            dom::scroll_to_bottom(&self.messages);
        }
    }

    fn set_welcome_visible(&self, visible: bool) {
        if let Some(welcome) = &self.welcome {
            dom::set_display(welcome, if visible { "flex" } else { "none" });
        }
    }

    fn append_exchange(&self, exchange: &Exchange) {
        if let Err(e) = self
            .messages
            .insert_adjacent_html("beforeend", &render::exchange(exchange))
        {
            log::error!("Failed to append message: {:?}", e);
        }
        dom::scroll_to_bottom(&self.messages);
    }

    fn clear_transcript(&self) {
        if let Err(e) = dom::remove_all(&self.messages, ".message") {
            log::error!("Failed to clear messages: {:?}", e);
        }
    }

    fn set_title(&self, title: &str) {
        self.title.set_text_content(Some(title));
    }

    fn render_conversations(&self, conversations: &[ConversationSummary], active: Option<&ConversationId>) {
        self.list
            .set_inner_html(&render::conversation_list(conversations, active));
    }

    fn mark_active(&self, active: Option<&ConversationId>) {
        let items = match dom::select_all(&self.list, ".conversation-item") {
            Ok(items) => items,
            Err(e) => {
                log::error!("Failed to query conversation list: {:?}", e);
                return;
            }
        };

        for item in items {
            let is_active = match (active, item.get_attribute("data-conversation-id")) {
                (Some(active), Some(id)) => active.as_str() == id,
                _ => false,
            };
            let _ = item.class_list().toggle_with_force("active", is_active);
        }
    }

    fn remove_conversation(&self, id: &ConversationId) {
        let Ok(items) = dom::select_all(&self.list, ".conversation-item") else {
            return;
        };

        for item in items {
            if item.get_attribute("data-conversation-id").as_deref() == Some(id.as_str()) {
                item.remove();
            }
        }
    }

    fn show_notice(&self, id: NoticeId, notice: &Notice) {
        let element = match self.document.create_element("div") {
            Ok(element) => element,
            Err(e) => {
                log::error!("Failed to create notice: {:?}", e);
                return;
            }
        };
        element.set_class_name(notice.kind.class_name());
        element.set_text_content(Some(&notice.text));

        if let Err(e) = self.messages.append_child(&element) {
            log::error!("Failed to show notice: {:?}", e);
            return;
        }
        dom::scroll_to_bottom(&self.messages);
        self.notices.borrow_mut().insert(id, element);
    }

    fn dismiss_notice(&self, id: NoticeId) {
        let element = self.notices.borrow_mut().remove(&id);
        if let Some(element) = element {
            element.remove();
        }
    }

    fn confirm(&self, question: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(question).ok())
            .unwrap_or(false)
    }
}
