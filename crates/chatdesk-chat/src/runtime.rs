use futures::future::LocalBoxFuture;
use std::time::Duration;

/// Timers and background tasks for the controller.
///
/// Used for the delayed sidebar refresh after a send and for removing
/// notices once their lifetime is over.
pub trait Runtime {
    /// Run `task` to completion in the background on the current thread
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);

    /// Future that resolves after `duration`
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;
}
