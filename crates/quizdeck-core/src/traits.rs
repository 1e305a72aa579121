//! Core trait definitions for question sources and durable storage.
//!
//! These traits are implemented by the `quizdeck-sources` and
//! `quizdeck-store` crates respectively; the core only consumes them.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::{Question, Quiz, Submission, User};

// ---------------------------------------------------------------------------
// Question source trait
// ---------------------------------------------------------------------------

/// How many questions a generation request asks for by default.
pub const DEFAULT_QUESTION_COUNT: usize = 5;

/// Trait for backends that generate candidate questions from a topic.
///
/// Implementations must run every returned item through the validation
/// contract in [`crate::validate`] before handing it back; callers receive
/// only accepted questions.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Human-readable source name (e.g. "gemini").
    fn name(&self) -> &str;

    /// Generate validated questions for a topic.
    async fn generate(&self, request: &GenerateRequest) -> anyhow::Result<Vec<Question>>;
}

/// Request for generated questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Subject to generate questions about.
    pub topic: String,
    /// How many questions to ask for.
    pub count: usize,
}

/// Standard generation prompt shared by question sources.
pub fn generation_prompt(request: &GenerateRequest) -> String {
    format!(
        "Generate {} high-quality quiz questions about \"{}\". \
         Include a mix of single-choice and multiple-choice questions.",
        request.count, request.topic
    )
}

// ---------------------------------------------------------------------------
// Catalog / Ledger traits
// ---------------------------------------------------------------------------

/// Durable storage of quizzes and the current user.
pub trait Catalog: Send + Sync {
    /// Fetch a quiz by identifier. `Ok(None)` when it does not resolve.
    fn get_quiz(&self, id: &str) -> anyhow::Result<Option<Quiz>>;

    /// All stored quizzes, newest first.
    fn list_quizzes(&self) -> anyhow::Result<Vec<Quiz>>;

    /// Store a newly authored quiz. Quizzes are immutable afterwards.
    fn add_quiz(&mut self, quiz: Quiz) -> anyhow::Result<()>;

    /// The current fixed-identity user.
    fn current_user(&self) -> anyhow::Result<User>;

    /// Replace the current user (role switch).
    fn set_current_user(&mut self, user: User) -> anyhow::Result<()>;
}

/// Append-only storage of submissions.
pub trait Ledger: Send + Sync {
    /// Append a completed submission. Each call appends exactly once.
    fn append_submission(&mut self, submission: Submission) -> anyhow::Result<()>;

    /// All submissions referencing a quiz, in no guaranteed order.
    fn list_submissions(&self, quiz_id: &str) -> anyhow::Result<Vec<Submission>>;

    /// Every stored submission, in no guaranteed order.
    fn all_submissions(&self) -> anyhow::Result<Vec<Submission>>;

    /// Fetch a submission by identifier. `Ok(None)` when it does not resolve.
    fn get_submission(&self, id: &str) -> anyhow::Result<Option<Submission>>;
}
