//! HTTP transport and rendering: the collaborator surface around the core.

pub mod error;
pub mod handlers;
pub mod render;
pub mod server;
pub mod state;

pub use error::WebError;
pub use server::{run_server, ServerConfig};
pub use state::WebAppState;
