use crate::error::BackendError;
use crate::llm::CompletionBackend;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// One scripted backend reply
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    Text(String),
    /// Simulates an unreachable backend
    Failure(String),
}

/// A backend that replays scripted replies in order
///
/// Once the script runs out the last reply is repeated; an empty script
/// answers with an empty string. Every request is recorded so callers can
/// check what was sent.
#[derive(Debug, Default)]
pub struct StaticBackend {
    replies: Mutex<VecDeque<ScriptedReply>>,
    last: Mutex<Option<ScriptedReply>>,
    requests: Mutex<Vec<(String, String)>>,
}

impl StaticBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend that always answers `text`
    pub fn replying(text: impl Into<String>) -> Self {
        Self::new().then_reply(text)
    }

    /// Backend whose every call fails
    pub fn failing(message: impl Into<String>) -> Self {
        Self::new().then_fail(message)
    }

    pub fn then_reply(self, text: impl Into<String>) -> Self {
        self.push(ScriptedReply::Text(text.into()))
    }

    pub fn then_fail(self, message: impl Into<String>) -> Self {
        self.push(ScriptedReply::Failure(message.into()))
    }

    fn push(self, reply: ScriptedReply) -> Self {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(reply);
        }
        self
    }

    /// `(system, user)` pairs received so far
    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.requests().len()
    }

    fn next_reply(&self) -> Option<ScriptedReply> {
        let mut replies = self.replies.lock().ok()?;
        let mut last = self.last.lock().ok()?;
        if let Some(reply) = replies.pop_front() {
            *last = Some(reply);
        }
        last.clone()
    }
}

#[async_trait]
impl CompletionBackend for StaticBackend {
    async fn complete(&self, system: &str, user: &str) -> Result<String, BackendError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push((system.to_string(), user.to_string()));
        }

        match self.next_reply() {
            Some(ScriptedReply::Text(text)) => Ok(text),
            Some(ScriptedReply::Failure(message)) => Err(BackendError::Status {
                status: 503,
                body: message,
            }),
            None => Ok(String::new()),
        }
    }
}
