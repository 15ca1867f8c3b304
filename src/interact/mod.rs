//! The suspend/resume primitive sessions are written against.
//!
//! A session task calls [`InteractionChannel::suspend`] with a closure that
//! builds the outbound [`Page`] around a fresh resumption token. The channel
//! answers the HTTP request currently in flight with that page, then parks
//! the task until the token is resumed with the follow-up [`Input`].

use std::collections::HashMap;

use serde_json::Value;
use tokio::sync::oneshot;

use crate::continuation::{ContinuationRegistry, Token};
use std::sync::Arc;

/// Form fields delivered by a resumption. Missing fields read as empty
/// strings; marking logic then naturally scores them as wrong answers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Input {
    fields: HashMap<String, String>,
}

impl Input {
    pub fn new(fields: HashMap<String, String>) -> Self {
        Self { fields }
    }

    /// Field value, or `""` when absent.
    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Input {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Outbound message: a template name plus its structured context, and the
/// token the next form submission should target. The transport decides how
/// the token becomes a URL; nothing in the core builds one.
#[derive(Debug)]
pub struct Page {
    pub template: &'static str,
    pub context: Value,
    pub resume: Option<Token>,
}

impl Page {
    pub fn new(template: &'static str, context: Value, resume: Token) -> Self {
        Self {
            template,
            context,
            resume: Some(resume),
        }
    }
}

/// Everything a follow-up request carries into a paused session: its form
/// fields plus the oneshot its own HTTP response is waiting on.
#[derive(Debug)]
pub struct Resumption {
    pub input: Input,
    pub responder: oneshot::Sender<Page>,
}

/// The session's suspension went away without a resumption: the registry
/// evicted it at capacity, or the process is shutting down.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("continuation was evicted before resumption")]
pub struct ChannelClosed;

/// Per-session handle over the shared registry. Holds the responder of the
/// request currently being handled so the next `suspend` can answer it.
pub struct InteractionChannel {
    registry: Arc<ContinuationRegistry>,
    responder: Option<oneshot::Sender<Page>>,
}

impl InteractionChannel {
    /// A channel whose first suspension answers `responder`, the request
    /// that started this session.
    pub fn new(registry: Arc<ContinuationRegistry>, responder: oneshot::Sender<Page>) -> Self {
        Self {
            registry,
            responder: Some(responder),
        }
    }

    /// Emit one page and wait for its resumption.
    ///
    /// Mints a token, registers the wakeup under it, builds the page via
    /// `emit(token)`, delivers it to the in-flight request, and parks until
    /// the token is consumed. Returns the resumption's input; the new
    /// request's responder is adopted for the next suspension.
    pub async fn suspend<F>(&mut self, emit: F) -> Result<Input, ChannelClosed>
    where
        F: FnOnce(Token) -> Page,
    {
        let token = self.registry.create();
        let (tx, rx) = oneshot::channel();
        self.registry.attach(token, tx);

        self.deliver(emit(token));

        let resumption = rx.await.map_err(|_| ChannelClosed)?;
        self.responder = Some(resumption.responder);
        Ok(resumption.input)
    }

    fn deliver(&mut self, page: Page) {
        match self.responder.take() {
            Some(responder) => {
                if responder.send(page).is_err() {
                    // Client went away before we answered; the suspension
                    // stays live and resumable from another tab.
                    tracing::debug!("dropping page; requester already gone");
                }
            }
            None => tracing::warn!(template = page.template, "no pending request to answer"),
        }
    }
}
