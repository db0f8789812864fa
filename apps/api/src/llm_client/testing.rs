//! Scripted `CompletionBackend` for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{CompletionBackend, CompletionRequest, LlmError, ResponseMode};

/// Owned copy of a request the backend received.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub model: String,
    pub prompt: String,
    pub mode: ResponseMode,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Replays canned responses in order and records every request.
/// Once the script runs out every call fails with a 500 `Api` error.
pub struct ScriptedBackend {
    responses: Mutex<VecDeque<Result<String, LlmError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedBackend {
    pub fn new(responses: Vec<Result<String, LlmError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

/// Shorthand for a provider failure in scripts.
pub fn api_error(status: u16) -> LlmError {
    LlmError::Api {
        status,
        message: format!("scripted failure {status}"),
    }
}

#[async_trait]
impl CompletionBackend for ScriptedBackend {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            model: request.model.to_string(),
            prompt: request.prompt.to_string(),
            mode: request.mode,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(api_error(500)))
    }
}
