pub mod continuation;
pub mod interact;
pub mod question;
pub mod quiz;
pub mod web;
pub mod workflow;

pub use continuation::{ContinuationRegistry, Token, MAX_CONTINUATIONS};
pub use interact::{ChannelClosed, Input, InteractionChannel, Page, Resumption};
pub use question::{Question, QuestionType, QuestionTypeRegistry};
pub use quiz::{PlayStats, Quiz};
pub use web::{run_server, ServerConfig, WebAppState};
pub use workflow::run_session;
