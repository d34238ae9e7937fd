use std::cell::{Cell, RefCell};
use std::rc::Rc;

use chatdesk_types::{title_from_first_message, ChatReply, ChatRequest, ClientError, ConversationId, Exchange};

use crate::api::ChatApi;
use crate::options::ClientOptions;
use crate::runtime::Runtime;
use crate::store::SessionStore;
use crate::view::{ChatView, Notice, NoticeId, NoticeKind};

pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this conversation?";
pub const LOAD_FAILED: &str = "Failed to load conversation";
pub const DELETE_FAILED: &str = "Failed to delete conversation";
pub const DELETE_SUCCEEDED: &str = "Conversation deleted";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Another submission is still outstanding; this one was dropped
    Busy,
    /// Nothing but whitespace was entered
    Empty,
    Delivered { conversation_id: ConversationId },
    Failed(ClientError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    AlreadyOpen,
    Opened,
    Failed(ClientError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Cancelled,
    Deleted,
    Failed(ClientError),
}

struct Session {
    current: Option<ConversationId>,
    title: String,
}

struct Inner {
    api: Rc<dyn ChatApi>,
    view: Rc<dyn ChatView>,
    store: Rc<dyn SessionStore>,
    runtime: Rc<dyn Runtime>,
    options: ClientOptions,
    session: RefCell<Session>,
    is_sending: Cell<bool>,
    next_notice: Cell<u64>,
}

/// Controller for one chat page.
///
/// Cloning is cheap and yields a handle to the same session, which is how
/// timers and event handlers call back into it.
#[derive(Clone)]
pub struct ChatClient {
    inner: Rc<Inner>,
}

impl ChatClient {
    pub fn new(
        api: Rc<dyn ChatApi>,
        view: Rc<dyn ChatView>,
        store: Rc<dyn SessionStore>,
        runtime: Rc<dyn Runtime>,
        options: ClientOptions,
    ) -> Self {
        let session = Session {
            current: None,
            title: options.default_title.clone(),
        };

        Self {
            inner: Rc::new(Inner {
                api,
                view,
                store,
                runtime,
                options,
                session: RefCell::new(session),
                is_sending: Cell::new(false),
                next_notice: Cell::new(0),
            }),
        }
    }

    /// Page-load initialisation: load the sidebar and focus the input.
    ///
    /// A conversation id persisted by an earlier page is not resumed; every
    /// page starts on a blank chat.
    pub async fn start(&self) {
        if let Some(stale) = self.persisted_conversation_id() {
            log::debug!("Not resuming persisted conversation {}", stale);
        }
        self.inner.view.focus_input();
        self.refresh_list().await;
    }

    pub fn current_conversation_id(&self) -> Option<ConversationId> {
        self.inner.session.borrow().current.clone()
    }

    /// Conversation id as mirrored in durable storage
    pub fn persisted_conversation_id(&self) -> Option<ConversationId> {
        self.inner
            .store
            .get(&self.inner.options.storage_key)
            .map(ConversationId::parse)
    }

    pub fn is_sending(&self) -> bool {
        self.inner.is_sending.get()
    }

    pub fn title(&self) -> String {
        self.inner.session.borrow().title.clone()
    }

    pub fn options(&self) -> &ClientOptions {
        &self.inner.options
    }

    /// Send `text` to the backend and render the exchange.
    ///
    /// Dropped without any effect while another submission is outstanding
    /// or when `text` is blank.
    pub async fn submit(&self, text: &str) -> SubmitOutcome {
        let inner = &self.inner;
        if inner.is_sending.get() {
            log::debug!("Message already being sent, ignoring duplicate request");
            return SubmitOutcome::Busy;
        }

        let message = text.trim();
        if message.is_empty() {
            return SubmitOutcome::Empty;
        }

        inner.is_sending.set(true);
        let view = &inner.view;
        view.set_welcome_visible(false);
        view.clear_input();
        view.set_busy(true);
        view.set_typing(true);

        let request = ChatRequest {
            message: message.to_string(),
            conversation_id: self.current_conversation_id(),
        };
        let result = inner.api.send_message(&request).await;
        view.set_typing(false);

        let outcome = match result {
            Ok(reply) => self.deliver(message, reply),
            Err(err) => {
                log::error!("Chat error: {}", err);
                self.notify(NoticeKind::Error, format!("Error: {}", err));
                SubmitOutcome::Failed(err)
            }
        };

        view.set_busy(false);
        inner.is_sending.set(false);
        view.focus_input();
        outcome
    }

    fn deliver(&self, message: &str, reply: ChatReply) -> SubmitOutcome {
        let conversation_id = reply.conversation_id;
        self.set_current(Some(conversation_id.clone()));

        let exchange = Exchange {
            user_message: message.to_string(),
            bot_response: reply.response,
            context_summary: reply.context_summary,
            timestamp: None,
        };
        self.inner.view.append_exchange(&exchange);

        // Only a title still showing the placeholder is replaced
        if self.title() == self.inner.options.default_title {
            self.set_title(&title_from_first_message(message));
        }

        self.schedule_refresh();
        SubmitOutcome::Delivered { conversation_id }
    }

    /// Reload the sidebar. Failures degrade to the empty placeholder.
    pub async fn refresh_list(&self) {
        let conversations = match self.inner.api.list_conversations().await {
            Ok(conversations) => conversations,
            Err(err) => {
                log::warn!("Failed to load conversations: {}", err);
                Vec::new()
            }
        };
        log::debug!("Displaying {} conversations", conversations.len());

        let current = self.current_conversation_id();
        self.inner
            .view
            .render_conversations(&conversations, current.as_ref());
    }

    /// Switch the transcript to a stored conversation
    pub async fn open(&self, id: ConversationId) -> OpenOutcome {
        if self.current_conversation_id().as_ref() == Some(&id) {
            return OpenOutcome::AlreadyOpen;
        }

        let conversation = match self.inner.api.get_conversation(&id).await {
            Ok(conversation) => conversation,
            Err(err) => {
                log::error!("Error loading conversation {}: {}", id, err);
                self.notify(NoticeKind::Error, LOAD_FAILED.to_string());
                return OpenOutcome::Failed(err);
            }
        };

        self.set_current(Some(id.clone()));

        let view = &self.inner.view;
        view.mark_active(Some(&id));
        view.clear_transcript();
        view.set_welcome_visible(false);
        for exchange in &conversation.messages {
            view.append_exchange(exchange);
        }
        self.set_title(&conversation.title);
        view.focus_input();

        OpenOutcome::Opened
    }

    /// Delete a stored conversation after the user confirms
    pub async fn delete(&self, id: ConversationId) -> DeleteOutcome {
        if !self.inner.view.confirm(DELETE_CONFIRMATION) {
            return DeleteOutcome::Cancelled;
        }

        if let Err(err) = self.inner.api.delete_conversation(&id).await {
            log::error!("Error deleting conversation {}: {}", id, err);
            self.notify(NoticeKind::Error, DELETE_FAILED.to_string());
            return DeleteOutcome::Failed(err);
        }

        self.inner.view.remove_conversation(&id);
        if self.current_conversation_id().as_ref() == Some(&id) {
            self.new_chat();
        }
        self.notify(NoticeKind::Success, DELETE_SUCCEEDED.to_string());

        DeleteOutcome::Deleted
    }

    /// Back to the blank welcome state. Does not call the server.
    pub fn new_chat(&self) {
        self.set_current(None);

        let view = &self.inner.view;
        view.clear_transcript();
        view.set_welcome_visible(true);
        self.set_title(&self.inner.options.default_title);
        view.mark_active(None);
        view.focus_input();
    }

    fn set_current(&self, id: Option<ConversationId>) {
        let key = &self.inner.options.storage_key;
        let stored = match &id {
            Some(id) => self.inner.store.set(key, id.as_str()),
            None => self.inner.store.remove(key),
        };
        if let Err(err) = stored {
            log::warn!("Could not persist current conversation: {}", err);
        }
        self.inner.session.borrow_mut().current = id;
    }

    fn set_title(&self, title: &str) {
        self.inner.session.borrow_mut().title = title.to_string();
        self.inner.view.set_title(title);
    }

    fn schedule_refresh(&self) {
        let client = self.clone();
        let delay = self.inner.runtime.sleep(self.inner.options.refresh_delay);
        self.inner.runtime.spawn(Box::pin(async move {
            delay.await;
            client.refresh_list().await;
        }));
    }

    fn notify(&self, kind: NoticeKind, text: String) {
        let inner = &self.inner;
        let id = NoticeId(inner.next_notice.get());
        inner.next_notice.set(id.0 + 1);

        let lifetime = match kind {
            NoticeKind::Error => inner.options.error_lifetime,
            NoticeKind::Success => inner.options.success_lifetime,
        };
        inner.view.show_notice(id, &Notice { kind, text, lifetime });

        let view = inner.view.clone();
        let expiry = inner.runtime.sleep(lifetime);
        inner.runtime.spawn(Box::pin(async move {
            expiry.await;
            view.dismiss_notice(id);
        }));
    }
}
