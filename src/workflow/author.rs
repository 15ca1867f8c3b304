//! The authoring procedure: title prompt, then the overview loop.

use serde_json::json;

use crate::interact::{ChannelClosed, InteractionChannel, Page};
use crate::question::QuestionTypeRegistry;
use crate::quiz::{codec, Quiz};

/// Prompt for a title and seed an empty quiz.
pub(super) async fn new_quiz(channel: &mut InteractionChannel) -> Result<Quiz, ChannelClosed> {
    let input = channel
        .suspend(|token| Page::new("quiz_new", json!({}), token))
        .await?;
    Ok(Quiz::new(input.field("title")))
}

/// Show the overview until the author asks to play.
///
/// Each round trip either appends a question (running the variant's
/// creation sub-dialog), hands off to play, or re-shows the overview;
/// an unknown action or kind is just an idle refresh.
pub(super) async fn overview_loop(
    channel: &mut InteractionChannel,
    types: &QuestionTypeRegistry,
    quiz: &mut Quiz,
) -> Result<(), ChannelClosed> {
    loop {
        let context = overview_context(types, quiz);
        let input = channel
            .suspend(|token| Page::new("quiz_overview", context, token))
            .await?;

        match input.field("action") {
            "add" => {
                let kind = input.field("kind");
                match types.get(kind) {
                    Some(behavior) => {
                        let question = behavior.create(channel).await?;
                        quiz.questions.push(question);
                    }
                    None => {
                        tracing::warn!(kind, "ignoring add for unregistered question kind");
                    }
                }
            }
            "play" => return Ok(()),
            _ => {}
        }
    }
}

fn overview_context(types: &QuestionTypeRegistry, quiz: &Quiz) -> serde_json::Value {
    let questions: Vec<String> = quiz
        .questions
        .iter()
        .map(|q| match types.for_question(q) {
            Some(behavior) => behavior.overview(q),
            None => q.kind().to_string(),
        })
        .collect();
    let kinds: Vec<_> = types
        .all()
        .iter()
        .map(|t| json!({ "name": t.name(), "label": t.label() }))
        .collect();

    json!({
        "title": quiz.title,
        "questions": questions,
        "kinds": kinds,
        "export": codec::export(quiz),
    })
}
