//! Text-generation backends
//!
//! The pipeline treats a backend as an opaque `complete(system, user) -> text`
//! service whose output is untrusted. [`OllamaBackend`] talks to a local
//! Ollama server; [`StaticBackend`] replays scripted replies for offline use.

pub mod mock;
pub mod ollama;

pub use mock::StaticBackend;
pub use ollama::OllamaBackend;

use crate::error::BackendError;
use async_trait::async_trait;

/// A single blocking text completion, no streaming
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Send a system instruction and user content, return the raw reply
    async fn complete(&self, system: &str, user: &str) -> Result<String, BackendError>;
}
