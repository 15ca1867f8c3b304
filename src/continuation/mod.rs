//! Continuation registry: one-shot resumption tokens for suspended sessions.
//!
//! Every time a session suspends, it mints a [`Token`] here and parks a
//! oneshot sender under it. The follow-up request consumes the token via
//! [`ContinuationRegistry::resume`], which fires the sender exactly once.
//! Abandoned sessions are reclaimed by FIFO eviction once the registry
//! exceeds its capacity.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::str::FromStr;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use uuid::Uuid;

use crate::interact::Resumption;

/// Default capacity for [`ContinuationRegistry::new`] callers that don't
/// configure one.
pub const MAX_CONTINUATIONS: usize = 256;

/// Opaque resumption token. Minted once per suspension, consumed by the
/// first successful resume or by eviction, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(Uuid);

impl Token {
    fn mint() -> Self {
        Token(Uuid::new_v4())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for Token {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Token(Uuid::parse_str(s)?))
    }
}

/// Registry of pending resumptions, shared by every session task and the
/// HTTP intake. All mutation happens under one mutex; the working set is
/// bounded by `capacity` so contention is negligible.
pub struct ContinuationRegistry {
    capacity: usize,
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    /// Live tokens, oldest first. Invariant: contents match `pending`'s keys.
    order: VecDeque<Token>,
    /// `None` between `create` and `attach`; tokens only escape to the
    /// outside world after `attach`, so external resumes always see `Some`.
    pending: HashMap<Token, Option<oneshot::Sender<Resumption>>>,
}

impl ContinuationRegistry {
    /// Create a registry holding at most `capacity` live continuations.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Mint a fresh token and record it as the newest live entry, evicting
    /// the oldest entries while over capacity. An evicted entry's sender is
    /// dropped, which wakes its suspended session with a closed channel.
    pub fn create(&self) -> Token {
        let token = Token::mint();
        let mut inner = self.inner.lock();
        inner.order.push_back(token);
        inner.pending.insert(token, None);
        while inner.pending.len() > self.capacity {
            if let Some(oldest) = inner.order.pop_front() {
                inner.pending.remove(&oldest);
                tracing::debug!(token = %oldest, "evicted continuation at capacity");
            }
        }
        token
    }

    /// Store the callback to fire on resumption. A no-op if the entry was
    /// already evicted; the caller's receiver then reports closure.
    pub fn attach(&self, token: Token, sender: oneshot::Sender<Resumption>) {
        let mut inner = self.inner.lock();
        if let Some(slot) = inner.pending.get_mut(&token) {
            *slot = Some(sender);
        }
    }

    /// Consume `token` and fire its callback with `resumption`. Returns
    /// `false`, with no other effect, when the token never existed, was
    /// already resumed, was evicted, or its session task is gone.
    pub fn resume(&self, token: Token, resumption: Resumption) -> bool {
        let sender = {
            let mut inner = self.inner.lock();
            match inner.pending.get(&token) {
                Some(Some(_)) => {}
                // Unknown, consumed, or created-but-not-attached: leave
                // untouched so a pending attach still lands.
                _ => return false,
            }
            let Some(sender) = inner.pending.remove(&token).flatten() else {
                return false;
            };
            inner.order.retain(|t| *t != token);
            sender
        };
        // Send outside the lock. Failure means the session task is gone;
        // the caller treats that like an expired token.
        sender.send(resumption).is_ok()
    }

    /// Number of live (unresumed, unevicted) continuations.
    pub fn len(&self) -> usize {
        self.inner.lock().pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ContinuationRegistry {
    fn default() -> Self {
        Self::new(MAX_CONTINUATIONS)
    }
}
