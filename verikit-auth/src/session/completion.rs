use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;

use crate::models::LoginResponse;

pub type ResultCallback = Box<dyn FnOnce(LoginResponse) + Send>;

/// Single-use completion handle owned by a session.
///
/// The first [`complete`](Self::complete) runs the callback; later calls
/// are no-ops and return `false`.
pub struct CompletionHandle {
    callback: Option<ResultCallback>,
}

impl CompletionHandle {
    pub fn new<F>(callback: F) -> Self
    where
        F: FnOnce(LoginResponse) + Send + 'static,
    {
        Self {
            callback: Some(Box::new(callback)),
        }
    }

    /// A handle whose response arrives on the returned [`PendingLogin`].
    pub fn channel() -> (Self, PendingLogin) {
        let (tx, rx) = oneshot::channel();
        let handle = Self::new(move |response| {
            // Receiver gone means nobody is waiting any more.
            let _ = tx.send(response);
        });
        (handle, PendingLogin { rx })
    }

    /// Run `hook` right before the callback, when the handle fires.
    pub fn on_complete<F>(mut self, hook: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        if let Some(callback) = self.callback.take() {
            self.callback = Some(Box::new(move |response| {
                hook();
                callback(response);
            }));
        }
        self
    }

    pub fn complete(&mut self, response: LoginResponse) -> bool {
        match self.callback.take() {
            Some(callback) => {
                callback(response);
                true
            }
            None => false,
        }
    }

    pub fn is_spent(&self) -> bool {
        self.callback.is_none()
    }
}

impl std::fmt::Debug for CompletionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionHandle")
            .field("spent", &self.is_spent())
            .finish()
    }
}

/// Future side of [`CompletionHandle::channel`].
///
/// Resolves to the session's response. If the handle is dropped unspent,
/// which a session never does, it resolves to an error response.
#[derive(Debug)]
pub struct PendingLogin {
    rx: oneshot::Receiver<LoginResponse>,
}

impl PendingLogin {
    /// Non-blocking check, for hosts that poll from their event loop.
    pub fn try_response(&mut self) -> Option<LoginResponse> {
        self.rx.try_recv().ok()
    }
}

impl Future for PendingLogin {
    type Output = LoginResponse;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx).poll(cx).map(|result| {
            result.unwrap_or_else(|_| LoginResponse::error("login session ended without a result"))
        })
    }
}
