//! Free-text questions: type the answer, matched case-insensitively.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{Question, QuestionType, RenderTarget, ANSWER_FIELD};
use crate::interact::{ChannelClosed, InteractionChannel, Page};

pub(super) const KIND: &str = "free_text";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeTextQuestion {
    pub prompt: String,
    pub answer: String,
}

pub struct FreeTextType;

#[async_trait]
impl QuestionType for FreeTextType {
    fn name(&self) -> &'static str {
        KIND
    }

    fn label(&self) -> &'static str {
        "Free text"
    }

    async fn create(&self, channel: &mut InteractionChannel) -> Result<Question, ChannelClosed> {
        let input = channel
            .suspend(|token| Page::new("create_free_text", json!({}), token))
            .await?;

        Ok(Question::FreeText(FreeTextQuestion {
            prompt: input.field("prompt").to_string(),
            answer: input.field(ANSWER_FIELD).to_string(),
        }))
    }

    fn present(&self, _question: &Question) -> RenderTarget {
        "play_free_text"
    }

    fn mark(&self, question: &Question, submitted: &str) -> bool {
        let Question::FreeText(q) = question else {
            return false;
        };
        q.answer.to_lowercase() == submitted.to_lowercase()
    }

    fn overview(&self, question: &Question) -> String {
        let Question::FreeText(q) = question else {
            return String::new();
        };
        format!("{} (answer: {})", q.prompt, q.answer)
    }
}
