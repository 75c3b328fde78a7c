use crate::oracle::{Oracle, OracleError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Deterministic stand-in for a real model. Answers every prompt the same way.
pub struct CannedOracle {
    reply: Result<String, String>,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl CannedOracle {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self::with(Ok(reply.into()))
    }

    /// Every consult fails as if the service were malformed or down.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self::with(Err(reason.into()))
    }

    fn with(reply: Result<String, String>) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().ok().and_then(|p| p.clone())
    }
}

#[async_trait]
impl Oracle for CannedOracle {
    async fn consult(&self, prompt: &str) -> Result<String, OracleError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut last) = self.last_prompt.lock() {
            *last = Some(prompt.to_string());
        }
        self.reply.clone().map_err(OracleError::Malformed)
    }
}
