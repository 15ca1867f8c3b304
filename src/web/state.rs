//! Shared state handed to every request handler.

use std::sync::Arc;

use tokio::sync::oneshot;

use crate::continuation::ContinuationRegistry;
use crate::interact::{InteractionChannel, Page};
use crate::question::QuestionTypeRegistry;
use crate::quiz::Quiz;
use crate::web::error::WebError;
use crate::workflow;

/// Cloneable application state: the continuation registry plus the
/// registered question types.
#[derive(Clone)]
pub struct WebAppState {
    registry: Arc<ContinuationRegistry>,
    types: Arc<QuestionTypeRegistry>,
}

impl WebAppState {
    pub fn new(max_continuations: usize) -> Self {
        Self {
            registry: Arc::new(ContinuationRegistry::new(max_continuations)),
            types: Arc::new(QuestionTypeRegistry::standard()),
        }
    }

    pub fn registry(&self) -> &Arc<ContinuationRegistry> {
        &self.registry
    }

    /// Spawn a fresh session task and wait for its first page. `quiz` is
    /// `Some` for the import path.
    pub async fn start_session(&self, quiz: Option<Quiz>) -> Result<Page, WebError> {
        let (tx, rx) = oneshot::channel();
        let channel = InteractionChannel::new(self.registry.clone(), tx);
        tokio::spawn(workflow::run_session(channel, self.types.clone(), quiz));
        rx.await
            .map_err(|_| WebError::Internal("session task ended before its first page".into()))
    }
}
