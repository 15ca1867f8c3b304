//! Multiple-choice questions: pick one choice by index.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{Question, QuestionType, RenderTarget, ANSWER_FIELD};
use crate::interact::{ChannelClosed, InteractionChannel, Page};

pub(super) const KIND: &str = "multiple_choice";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultipleChoiceQuestion {
    pub prompt: String,
    pub choices: Vec<String>,
    /// Index into `choices`.
    pub answer: usize,
}

pub struct MultipleChoiceType;

#[async_trait]
impl QuestionType for MultipleChoiceType {
    fn name(&self) -> &'static str {
        KIND
    }

    fn label(&self) -> &'static str {
        "Multiple choice"
    }

    /// Two-step sub-dialog: the prompt first, then the choices and the
    /// index of the correct one. The choices form is re-shown until it
    /// describes a playable question; import enforces the same invariants,
    /// so every authored quiz's export round-trips.
    async fn create(&self, channel: &mut InteractionChannel) -> Result<Question, ChannelClosed> {
        let input = channel
            .suspend(|token| Page::new("create_multiple_choice_prompt", json!({}), token))
            .await?;
        let prompt = input.field("prompt").to_string();

        let mut error = "";
        loop {
            let context = json!({ "prompt": &prompt, "error": error });
            let input = channel
                .suspend(|token| Page::new("create_multiple_choice_choices", context, token))
                .await?;

            let choices: Vec<String> = input
                .field("choices")
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect();
            if choices.is_empty() {
                error = "Enter at least one choice.";
                continue;
            }
            let Ok(answer) = input.field(ANSWER_FIELD).parse::<usize>() else {
                error = "The correct choice must be a number.";
                continue;
            };
            if answer >= choices.len() {
                error = "The correct choice number is out of range.";
                continue;
            }

            return Ok(Question::MultipleChoice(MultipleChoiceQuestion {
                prompt,
                choices,
                answer,
            }));
        }
    }

    fn present(&self, _question: &Question) -> RenderTarget {
        "play_multiple_choice"
    }

    fn mark(&self, question: &Question, submitted: &str) -> bool {
        let Question::MultipleChoice(q) = question else {
            return false;
        };
        submitted.parse::<usize>() == Ok(q.answer)
    }

    fn overview(&self, question: &Question) -> String {
        let Question::MultipleChoice(q) = question else {
            return String::new();
        };
        let correct = q
            .choices
            .get(q.answer)
            .map(String::as_str)
            .unwrap_or("<missing>");
        format!(
            "{} [{}] (answer: {})",
            q.prompt,
            q.choices.join(" | "),
            correct
        )
    }
}
