#![allow(dead_code)]

use async_trait::async_trait;
use futures::future::LocalBoxFuture;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;

use chatdesk_chat::types::{
    ChatReply, ChatRequest, ClientError, Conversation, ConversationId, ConversationSummary, Exchange,
};
use chatdesk_chat::{
    ChatApi, ChatClient, ChatView, ClientOptions, MemoryStore, Notice, NoticeId, Runtime,
};

/// Scripted backend that records every call
#[derive(Default)]
pub struct FakeApi {
    pub replies: RefCell<VecDeque<Result<ChatReply, ClientError>>>,
    pub list: RefCell<Option<Result<Vec<ConversationSummary>, ClientError>>>,
    pub conversations: RefCell<HashMap<ConversationId, Conversation>>,
    pub delete_error: RefCell<Option<ClientError>>,
    pub sent: RefCell<Vec<ChatRequest>>,
    pub list_calls: Cell<usize>,
    pub get_calls: RefCell<Vec<ConversationId>>,
    pub delete_calls: RefCell<Vec<ConversationId>>,
    /// Suspend once inside `send_message` so overlapping submits can be observed
    pub yield_on_send: Cell<bool>,
}

impl FakeApi {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn reply_with(&self, response: &str, id: i64) {
        self.replies.borrow_mut().push_back(Ok(ChatReply {
            response: response.to_string(),
            context_summary: None,
            conversation_id: ConversationId::from(id),
        }));
    }

    pub fn fail_send(&self, err: ClientError) {
        self.replies.borrow_mut().push_back(Err(err));
    }

    pub fn set_list(&self, list: Result<Vec<ConversationSummary>, ClientError>) {
        *self.list.borrow_mut() = Some(list);
    }

    pub fn add_conversation(&self, id: i64, title: &str, messages: Vec<Exchange>) {
        let conversation = Conversation {
            id: ConversationId::from(id),
            title: title.to_string(),
            messages,
            created_at: None,
            updated_at: None,
            message_count: None,
        };
        self.conversations
            .borrow_mut()
            .insert(conversation.id.clone(), conversation);
    }
}

#[async_trait(?Send)]
impl ChatApi for FakeApi {
    async fn send_message(&self, request: &ChatRequest) -> Result<ChatReply, ClientError> {
        self.sent.borrow_mut().push(request.clone());
        if self.yield_on_send.get() {
            tokio::task::yield_now().await;
        }
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::Transport("no scripted reply".to_string())))
    }

    async fn list_conversations(&self) -> Result<Vec<ConversationSummary>, ClientError> {
        self.list_calls.set(self.list_calls.get() + 1);
        self.list.borrow().clone().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn get_conversation(&self, id: &ConversationId) -> Result<Conversation, ClientError> {
        self.get_calls.borrow_mut().push(id.clone());
        self.conversations
            .borrow()
            .get(id)
            .cloned()
            .ok_or(ClientError::Api {
                status: 404,
                message: "Conversation not found".to_string(),
            })
    }

    async fn delete_conversation(&self, id: &ConversationId) -> Result<(), ClientError> {
        self.delete_calls.borrow_mut().push(id.clone());
        match self.delete_error.borrow().clone() {
            Some(err) => Err(err),
            None => {
                self.conversations.borrow_mut().remove(id);
                Ok(())
            }
        }
    }
}

/// In-memory stand-in for the page
pub struct RecordingView {
    pub transcript: RefCell<Vec<Exchange>>,
    pub title: RefCell<String>,
    pub title_changes: Cell<usize>,
    pub welcome_visible: Cell<bool>,
    pub busy: Cell<bool>,
    pub busy_history: RefCell<Vec<bool>>,
    pub typing: Cell<bool>,
    pub input_cleared: Cell<usize>,
    pub focused: Cell<usize>,
    pub list: RefCell<Option<Vec<ConversationSummary>>>,
    pub active: RefCell<Option<ConversationId>>,
    pub notices: RefCell<Vec<(NoticeId, Notice)>>,
    pub confirm_answer: Cell<bool>,
    pub confirm_questions: RefCell<Vec<String>>,
}

impl RecordingView {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            transcript: RefCell::new(Vec::new()),
            title: RefCell::new(chatdesk_chat::types::DEFAULT_TITLE.to_string()),
            title_changes: Cell::new(0),
            welcome_visible: Cell::new(true),
            busy: Cell::new(false),
            busy_history: RefCell::new(Vec::new()),
            typing: Cell::new(false),
            input_cleared: Cell::new(0),
            focused: Cell::new(0),
            list: RefCell::new(None),
            active: RefCell::new(None),
            notices: RefCell::new(Vec::new()),
            confirm_answer: Cell::new(true),
            confirm_questions: RefCell::new(Vec::new()),
        })
    }

    pub fn notice_texts(&self) -> Vec<String> {
        self.notices.borrow().iter().map(|(_, n)| n.text.clone()).collect()
    }

    pub fn list_ids(&self) -> Vec<String> {
        self.list
            .borrow()
            .as_ref()
            .map(|list| list.iter().map(|s| s.id.to_string()).collect())
            .unwrap_or_default()
    }
}

impl ChatView for RecordingView {
    fn set_busy(&self, busy: bool) {
        self.busy.set(busy);
        self.busy_history.borrow_mut().push(busy);
    }

    fn clear_input(&self) {
        self.input_cleared.set(self.input_cleared.get() + 1);
    }

    fn focus_input(&self) {
        self.focused.set(self.focused.get() + 1);
    }

    fn set_typing(&self, visible: bool) {
        self.typing.set(visible);
    }

    fn set_welcome_visible(&self, visible: bool) {
        self.welcome_visible.set(visible);
    }

    fn append_exchange(&self, exchange: &Exchange) {
        self.transcript.borrow_mut().push(exchange.clone());
    }

    fn clear_transcript(&self) {
        self.transcript.borrow_mut().clear();
    }

    fn set_title(&self, title: &str) {
        *self.title.borrow_mut() = title.to_string();
        self.title_changes.set(self.title_changes.get() + 1);
    }

    fn render_conversations(&self, conversations: &[ConversationSummary], active: Option<&ConversationId>) {
        *self.list.borrow_mut() = Some(conversations.to_vec());
        *self.active.borrow_mut() = active.cloned();
    }

    fn mark_active(&self, active: Option<&ConversationId>) {
        *self.active.borrow_mut() = active.cloned();
    }

    fn remove_conversation(&self, id: &ConversationId) {
        if let Some(list) = self.list.borrow_mut().as_mut() {
            list.retain(|s| &s.id != id);
        }
    }

    fn show_notice(&self, id: NoticeId, notice: &Notice) {
        self.notices.borrow_mut().push((id, notice.clone()));
    }

    fn dismiss_notice(&self, id: NoticeId) {
        self.notices.borrow_mut().retain(|(n, _)| *n != id);
    }

    fn confirm(&self, question: &str) -> bool {
        self.confirm_questions.borrow_mut().push(question.to_string());
        self.confirm_answer.get()
    }
}

/// Runtime whose timers fire only when the test says so
#[derive(Default)]
pub struct ManualRuntime {
    pub tasks: RefCell<Vec<LocalBoxFuture<'static, ()>>>,
    pub sleeps: RefCell<Vec<Duration>>,
}

impl ManualRuntime {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Let every scheduled timer elapse and run what it triggers
    pub async fn run_pending(&self) {
        loop {
            let tasks: Vec<_> = self.tasks.borrow_mut().drain(..).collect();
            if tasks.is_empty() {
                break;
            }
            for task in tasks {
                task.await;
            }
        }
    }
}

impl Runtime for ManualRuntime {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        self.tasks.borrow_mut().push(task);
    }

    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        self.sleeps.borrow_mut().push(duration);
        Box::pin(async {})
    }
}

pub struct Harness {
    pub api: Rc<FakeApi>,
    pub view: Rc<RecordingView>,
    pub store: Rc<MemoryStore>,
    pub runtime: Rc<ManualRuntime>,
    pub client: ChatClient,
}

impl Harness {
    pub fn new() -> Self {
        let api = FakeApi::new();
        let view = RecordingView::new();
        let store = Rc::new(MemoryStore::new());
        let runtime = ManualRuntime::new();
        let client = ChatClient::new(
            api.clone(),
            view.clone(),
            store.clone(),
            runtime.clone(),
            ClientOptions::default(),
        );

        Self {
            api,
            view,
            store,
            runtime,
            client,
        }
    }
}
