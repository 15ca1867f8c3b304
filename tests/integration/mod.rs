//! Integration tests for popquiz
//!
//! These tests drive the full HTTP surface: session start, suspension,
//! resumption, and the quiz flows built on top.

pub mod quiz_flow;
