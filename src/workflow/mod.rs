//! The two session procedures (authoring and play), written as straight-line
//! async code over [`InteractionChannel::suspend`]. One spawned task per
//! session; each external round trip advances it by exactly one suspension.

mod author;
mod play;

use std::sync::Arc;

use crate::interact::{ChannelClosed, InteractionChannel};
use crate::question::QuestionTypeRegistry;
use crate::quiz::Quiz;

/// Body of a session task. `quiz` is `Some` on the import path, which skips
/// the title prompt and lands on the overview.
///
/// Authoring and play alternate in a flat loop over the same quiz, so
/// arbitrarily long edit/play cycles never grow the stack.
pub async fn run_session(
    channel: InteractionChannel,
    types: Arc<QuestionTypeRegistry>,
    quiz: Option<Quiz>,
) {
    // The only exit is eviction (or shutdown); that's the reclamation path
    // for abandoned sessions, not a failure.
    if let Err(ChannelClosed) = drive(channel, types, quiz).await {
        tracing::debug!("session ended without resumption");
    }
}

async fn drive(
    mut channel: InteractionChannel,
    types: Arc<QuestionTypeRegistry>,
    quiz: Option<Quiz>,
) -> Result<(), ChannelClosed> {
    let mut quiz = match quiz {
        Some(quiz) => quiz,
        None => author::new_quiz(&mut channel).await?,
    };
    loop {
        author::overview_loop(&mut channel, &types, &mut quiz).await?;
        play::play_loop(&mut channel, &types, &quiz).await?;
    }
}
