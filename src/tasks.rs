//! Background fetches owned by a screen.
//!
//! A [`ScreenTasks`] owns one cancellation token. Every task spawned through
//! it races its work against that token, and dropping the owner cancels the
//! token. When a browser disconnects, axum drops the handler future, the
//! owner goes with it, and the outstanding fetches stop instead of running
//! to completion for nobody.

use std::future::Future;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Default)]
pub struct ScreenTasks {
    token: CancellationToken,
}

impl ScreenTasks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn<F>(&self, name: &'static str, work: F) -> ScreenTask<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        let token = self.token.clone();
        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    tracing::debug!(task = name, "Screen task cancelled");
                    None
                }
                output = work => Some(output),
            }
        });
        ScreenTask { name, handle }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for ScreenTasks {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

pub struct ScreenTask<T> {
    name: &'static str,
    handle: JoinHandle<Option<T>>,
}

impl<T> ScreenTask<T> {
    /// `None` when the task was cancelled or panicked.
    pub async fn outcome(self) -> Option<T> {
        match self.handle.await {
            Ok(output) => output,
            Err(e) => {
                tracing::error!(task = self.name, "Screen task failed: {}", e);
                None
            }
        }
    }
}
