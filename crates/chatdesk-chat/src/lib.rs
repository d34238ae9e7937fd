//! Conversation controller shared by the browser and terminal front-ends.
//!
//! [`ChatClient`] owns the client-side session (current conversation,
//! in-flight guard, displayed title) and drives a surface through the
//! [`ChatView`] seam. The backend, durable storage and the task runtime
//! are injected the same way, so nothing here touches a global.

pub mod actions;
pub mod api;
pub mod client;
pub mod options;
pub mod render;
pub mod runtime;
pub mod store;
pub mod view;

pub use actions::ListAction;
pub use api::ChatApi;
pub use client::{ChatClient, DeleteOutcome, OpenOutcome, SubmitOutcome};
pub use options::ClientOptions;
pub use runtime::Runtime;
pub use store::{MemoryStore, SessionStore, StoreError};
pub use view::{ChatView, Notice, NoticeId, NoticeKind};

pub use chatdesk_types as types;
