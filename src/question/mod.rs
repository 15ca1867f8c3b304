//! Question variants and the registry that makes them pluggable.
//!
//! Every variant implements [`QuestionType`]; the orchestrator only ever
//! talks to that trait, so adding a question kind means implementing the
//! four operations and registering it. No orchestrator changes needed.

mod free_text;
mod multiple_choice;

pub use free_text::{FreeTextQuestion, FreeTextType};
pub use multiple_choice::{MultipleChoiceQuestion, MultipleChoiceType};

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::interact::{ChannelClosed, InteractionChannel};

/// Form field carrying the player's submission.
pub const ANSWER_FIELD: &str = "answer";

/// Identifies how a question should be displayed; consumed by the rendering
/// collaborator, opaque to everything else.
pub type RenderTarget = &'static str;

/// A quiz question, tagged with its variant kind for (de)serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Question {
    FreeText(FreeTextQuestion),
    MultipleChoice(MultipleChoiceQuestion),
}

impl Question {
    /// The serde tag, used to look the variant's behavior back up.
    pub fn kind(&self) -> &'static str {
        match self {
            Question::FreeText(_) => free_text::KIND,
            Question::MultipleChoice(_) => multiple_choice::KIND,
        }
    }
}

/// The uniform capability set every question variant exposes.
#[async_trait]
pub trait QuestionType: Send + Sync {
    /// Stable kind identifier; must match the variant's serde tag.
    fn name(&self) -> &'static str;

    /// Human-readable label for the authoring screen.
    fn label(&self) -> &'static str;

    /// Run the authoring sub-dialog (one or more suspensions) and return
    /// the fully populated question.
    async fn create(&self, channel: &mut InteractionChannel) -> Result<Question, ChannelClosed>;

    /// Template used to play this question.
    fn present(&self, question: &Question) -> RenderTarget;

    /// Decide correctness of a submitted answer. Pure; an empty or
    /// malformed submission is simply wrong.
    fn mark(&self, question: &Question, submitted: &str) -> bool;

    /// One-line description for the authoring review screen.
    fn overview(&self, question: &Question) -> String;
}

/// Ordered mapping from kind name to variant behavior.
pub struct QuestionTypeRegistry {
    types: Vec<Arc<dyn QuestionType>>,
}

impl QuestionTypeRegistry {
    /// Registry with the built-in variants.
    pub fn standard() -> Self {
        let mut registry = Self { types: Vec::new() };
        registry.register(Arc::new(FreeTextType));
        registry.register(Arc::new(MultipleChoiceType));
        registry
    }

    /// Add a variant. Extension point: nothing else needs to change to
    /// support a new question kind.
    pub fn register(&mut self, question_type: Arc<dyn QuestionType>) {
        self.types.push(question_type);
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn QuestionType>> {
        self.types.iter().find(|t| t.name() == name)
    }

    /// Behavior for an existing question, looked up by its kind tag.
    pub fn for_question(&self, question: &Question) -> Option<&Arc<dyn QuestionType>> {
        self.get(question.kind())
    }

    pub fn all(&self) -> &[Arc<dyn QuestionType>] {
        &self.types
    }
}
