//! The play procedure: question, feedback, question, ... summary.

use std::time::Instant;

use serde_json::json;

use crate::interact::{ChannelClosed, InteractionChannel, Page};
use crate::question::{QuestionTypeRegistry, ANSWER_FIELD};
use crate::quiz::{PlayStats, QuestionResult, Quiz};

/// Play the quiz until the player asks for the overview. Any other
/// response to the summary replays the same quiz from the start.
pub(super) async fn play_loop(
    channel: &mut InteractionChannel,
    types: &QuestionTypeRegistry,
    quiz: &Quiz,
) -> Result<(), ChannelClosed> {
    loop {
        let stats = play_once(channel, types, quiz).await?;

        let context = json!({
            "title": quiz.title,
            "total_questions": quiz.questions.len(),
            "answers_correct": stats.answers_correct(),
            "total_secs": stats.total_elapsed().as_secs_f64(),
        });
        let input = channel
            .suspend(|token| Page::new("play_summary", context, token))
            .await?;
        // Stats are dropped here; nothing about a play-through persists.

        if input.field("action") == "overview" {
            return Ok(());
        }
    }
}

async fn play_once(
    channel: &mut InteractionChannel,
    types: &QuestionTypeRegistry,
    quiz: &Quiz,
) -> Result<PlayStats, ChannelClosed> {
    let mut stats = PlayStats::default();
    let total = quiz.questions.len();

    for (index, question) in quiz.questions.iter().enumerate() {
        let Some(behavior) = types.for_question(question) else {
            // Imports are validated against the registered kinds, so this
            // question can only come from a behavior unregistered at runtime.
            tracing::warn!(kind = question.kind(), "skipping question of unknown kind");
            continue;
        };

        let context = json!({
            "index": index + 1,
            "total": total,
            "question": question,
        });
        let started = Instant::now();
        let input = channel
            .suspend(|token| Page::new(behavior.present(question), context, token))
            .await?;
        let elapsed = started.elapsed();

        let submitted = input.field(ANSWER_FIELD).to_string();
        let correct = behavior.mark(question, &submitted);
        let overview = behavior.overview(question);

        let feedback = json!({
            "index": index + 1,
            "total": total,
            "correct": correct,
            "elapsed_secs": elapsed.as_secs_f64(),
            "submitted": &submitted,
            "expected": &overview,
        });
        stats.record(QuestionResult {
            overview,
            submitted,
            correct,
            elapsed,
        });
        channel
            .suspend(|token| Page::new("feedback", feedback, token))
            .await?;
    }

    Ok(stats)
}
