//! Mock backend for testing
//!
//! Scripted implementation of the ChatBackend trait for unit tests only.
//! Not available in production builds.

#![cfg(test)]

use super::errors::{LlmError, LlmResult};
use super::provider::ChatBackend;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Scripted mock backend
#[derive(Clone)]
pub struct MockBackend {
    model: String,
    responses: Arc<Mutex<Vec<LlmResult<String>>>>,
    call_history: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockBackend {
    /// Create a mock with no scripted responses; calls return a canned reply
    pub fn new() -> Self {
        Self {
            model: "mock-model".to_string(),
            responses: Arc::new(Mutex::new(Vec::new())),
            call_history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock that returns the given responses in order
    pub fn with_responses(responses: Vec<&str>) -> Self {
        let mock = Self::new();
        {
            let mut queue = mock.responses.lock().unwrap();
            // stored in reverse so pop() yields them in order
            for response in responses.into_iter().rev() {
                queue.push(Ok(response.to_string()));
            }
        }
        mock
    }

    /// Queue an error for the next call
    pub fn push_error(&self, error: LlmError) {
        self.responses.lock().unwrap().insert(0, Err(error));
    }

    /// Number of invocations so far
    pub fn calls(&self) -> usize {
        self.call_history.lock().unwrap().len()
    }

    /// The (system, user) pairs this mock has seen
    pub fn history(&self) -> Vec<(String, String)> {
        self.call_history.lock().unwrap().clone()
    }
}

/// Mock backend that fails every call, for totality tests
pub struct FailingBackend;

#[async_trait]
impl ChatBackend for FailingBackend {
    fn name(&self) -> &str {
        "failing"
    }

    fn model(&self) -> &str {
        "unreachable"
    }

    async fn invoke(&self, _system: &str, _user: &str) -> LlmResult<String> {
        Err(LlmError::network("connection refused"))
    }
}

#[async_trait]
impl ChatBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn invoke(&self, system: &str, user: &str) -> LlmResult<String> {
        self.call_history.lock().unwrap().push((system.to_string(), user.to_string()));

        match self.responses.lock().unwrap().pop() {
            Some(scripted) => scripted,
            None => Ok("Mock response".to_string()),
        }
    }
}
