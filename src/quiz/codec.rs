//! Quiz export/import as JSON.
//!
//! Import validates structure before the quiz reaches the authoring flow:
//! serde enforces field presence and types (unknown `kind` tags fail the
//! tagged-enum parse), and a bounds pass rejects multiple-choice questions
//! whose answer index points outside their choices.

use crate::question::Question;
use crate::quiz::Quiz;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("quiz is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("quiz is malformed: {0}")]
    Invalid(String),
}

/// Serialize a quiz for download / re-import.
pub fn export(quiz: &Quiz) -> String {
    // Serialization of these plain data types cannot fail.
    serde_json::to_string_pretty(quiz).unwrap_or_default()
}

/// Parse and validate an externally supplied quiz.
pub fn import(raw: &str) -> Result<Quiz, ImportError> {
    let quiz: Quiz = serde_json::from_str(raw)?;
    for (index, question) in quiz.questions.iter().enumerate() {
        validate(index, question)?;
    }
    Ok(quiz)
}

fn validate(index: usize, question: &Question) -> Result<(), ImportError> {
    if let Question::MultipleChoice(q) = question {
        if q.choices.is_empty() {
            return Err(ImportError::Invalid(format!(
                "question {} has no choices",
                index + 1
            )));
        }
        if q.answer >= q.choices.len() {
            return Err(ImportError::Invalid(format!(
                "question {} answer index {} is out of range (have {} choices)",
                index + 1,
                q.answer,
                q.choices.len()
            )));
        }
    }
    Ok(())
}
