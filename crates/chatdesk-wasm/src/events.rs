use std::rc::Rc;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, KeyboardEvent};

use chatdesk_chat::{ChatClient, ListAction};

use crate::config::MountConfig;
use crate::dom;
use crate::view::DomView;

/// Attach every page listener to `client`
pub fn wire(
    document: &Document,
    config: &MountConfig,
    client: &ChatClient,
    view: &Rc<DomView>,
) -> Result<(), JsValue> {
    setup_form(document, config, client, view)?;
    setup_input(client, view)?;
    setup_new_chat_button(document, config, client)?;
    setup_conversation_list(client, view)?;
    Ok(())
}

fn submit_input(client: &ChatClient, view: &DomView) {
    let text = view.input().value();
    let client = client.clone();
    wasm_bindgen_futures::spawn_local(async move {
        let outcome = client.submit(&text).await;
        log::debug!("Submit finished: {:?}", outcome);
    });
}

fn setup_form(
    document: &Document,
    config: &MountConfig,
    client: &ChatClient,
    view: &Rc<DomView>,
) -> Result<(), JsValue> {
    let form = dom::get_element_by_id(document, &config.form_id)?;
    let client = client.clone();
    let view = Rc::clone(view);

    dom::add_listener(&form, "submit", move |event: Event| {
        event.prevent_default();
        submit_input(&client, &view);
    })
}

fn setup_input(client: &ChatClient, view: &Rc<DomView>) -> Result<(), JsValue> {
    // Enter sends, Shift+Enter inserts a newline
    {
        let client = client.clone();
        let key_view = Rc::clone(view);
        dom::add_listener(view.input(), "keydown", move |event: KeyboardEvent| {
            if event.key() == "Enter" && !event.shift_key() {
                event.prevent_default();
                submit_input(&client, &key_view);
            }
        })?;
    }

    let resize_view = Rc::clone(view);
    dom::add_listener(view.input(), "input", move |_event: Event| {
        resize_view.resize_input();
    })
}

fn setup_new_chat_button(
    document: &Document,
    config: &MountConfig,
    client: &ChatClient,
) -> Result<(), JsValue> {
    let button = dom::get_element_by_id(document, &config.new_chat_button_id)?;
    let client = client.clone();

    dom::add_listener(&button, "click", move |event: Event| {
        event.prevent_default();
        client.new_chat();
    })
}

/// One delegated listener for every entry, present or re-rendered later
fn setup_conversation_list(client: &ChatClient, view: &Rc<DomView>) -> Result<(), JsValue> {
    let client = client.clone();

    dom::add_listener(view.list(), "click", move |event: Event| {
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };

        let action = dom::closest_attribute(&target, "data-action");
        let id = dom::closest_attribute(&target, "data-conversation-id");
        let Some(action) = ListAction::resolve(action.as_deref(), id.as_deref()) else {
            return;
        };

        event.prevent_default();
        let client = client.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match action {
                ListAction::Open(id) => {
                    let outcome = client.open(id).await;
                    log::debug!("Open finished: {:?}", outcome);
                }
                ListAction::Delete(id) => {
                    let outcome = client.delete(id).await;
                    log::debug!("Delete finished: {:?}", outcome);
                }
            }
        });
    })
}
