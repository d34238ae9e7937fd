use futures::future::LocalBoxFuture;
use std::time::Duration;

use chatdesk_chat::Runtime;

/// Tasks go to the surrounding `tokio::task::LocalSet`
pub struct TokioRuntime;

impl Runtime for TokioRuntime {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        tokio::task::spawn_local(task);
    }

    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        Box::pin(tokio::time::sleep(duration))
    }
}
