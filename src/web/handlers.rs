//! Flow handlers: session start, resumption intake, quiz import.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::response::Html;
use axum::Form;
use tokio::sync::oneshot;

use crate::continuation::Token;
use crate::interact::{Input, Resumption};
use crate::quiz::codec;
use crate::web::error::WebError;
use crate::web::render;
use crate::web::state::WebAppState;

/// `GET /`: start a fresh authoring session and answer with its first page.
pub async fn start_session(State(state): State<WebAppState>) -> Result<Html<String>, WebError> {
    let page = state.start_session(None).await?;
    Ok(render::page(&page))
}

/// `POST /k/{token}`: resumption intake. Anything that isn't a live token
/// (garbage, consumed, evicted) gets the expired notice.
pub async fn resume_session(
    State(state): State<WebAppState>,
    Path(token): Path<String>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Html<String>, WebError> {
    let token: Token = token.parse().map_err(|_| WebError::SessionExpired)?;

    let (tx, rx) = oneshot::channel();
    let resumption = Resumption {
        input: Input::new(fields),
        responder: tx,
    };
    if !state.registry().resume(token, resumption) {
        return Err(WebError::SessionExpired);
    }

    // The session answers through `tx` at its next suspension.
    let page = rx
        .await
        .map_err(|_| WebError::Internal("session ended while handling the request".into()))?;
    Ok(render::page(&page))
}

/// `POST /import`: validate an exported quiz and start a session on it.
pub async fn import_quiz(
    State(state): State<WebAppState>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Html<String>, WebError> {
    let raw = fields.get("quiz").map(String::as_str).unwrap_or("");
    let quiz = codec::import(raw).map_err(|e| WebError::BadRequest(e.to_string()))?;

    tracing::info!(title = %quiz.title, questions = quiz.questions.len(), "imported quiz");
    let page = state.start_session(Some(quiz)).await?;
    Ok(render::page(&page))
}
