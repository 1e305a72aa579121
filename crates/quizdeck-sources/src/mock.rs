//! Mock question source for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use quizdeck_core::model::Question;
use quizdeck_core::traits::{GenerateRequest, QuestionSource};
use quizdeck_core::validate;

/// Canned payload returned when no topic matches.
const DEFAULT_PAYLOAD: &str = r#"[
    {"text": "Which planet is known as the red planet?", "type": "single",
     "options": ["Venus", "Mars", "Jupiter", "Mercury"], "correctAnswers": [1]},
    {"text": "Which of these are prime numbers?", "type": "multiple",
     "options": ["2", "4", "5", "9"], "correctAnswers": [0, 2]}
]"#;

/// A mock question source for exercising flows without real API calls.
///
/// Returns configurable payloads based on topic substring matching; every
/// payload still goes through the normal validation contract.
pub struct MockSource {
    /// Map of topic substring → raw generated payload.
    responses: HashMap<String, String>,
    /// Payload used when no topic matches.
    default_payload: String,
    /// Number of calls made.
    call_count: AtomicU32,
    /// Last request received.
    last_request: Mutex<Option<GenerateRequest>>,
}

impl MockSource {
    /// Create a mock with the given topic→payload mappings.
    pub fn new(responses: HashMap<String, String>) -> Self {
        Self {
            responses,
            default_payload: DEFAULT_PAYLOAD.to_string(),
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Create a mock that always returns the same payload.
    pub fn with_fixed_payload(payload: &str) -> Self {
        Self {
            responses: HashMap::new(),
            default_payload: payload.to_string(),
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Get the number of calls made to this source.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Get the last request made to this source.
    pub fn last_request(&self) -> Option<GenerateRequest> {
        self.last_request
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl Default for MockSource {
    fn default() -> Self {
        Self::new(HashMap::new())
    }
}

#[async_trait]
impl QuestionSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, request: &GenerateRequest) -> anyhow::Result<Vec<Question>> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self
            .last_request
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(request.clone());

        let payload = self
            .responses
            .iter()
            .find(|(key, _)| request.topic.contains(key.as_str()))
            .map(|(_, v)| v.clone())
            .unwrap_or_else(|| self.default_payload.clone());

        Ok(validate::parse_candidates(&payload))
    }
}
