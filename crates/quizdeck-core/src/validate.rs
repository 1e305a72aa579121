//! Domain invariant checks and untrusted-payload validation.
//!
//! Generated question payloads are external input and go through
//! parse-or-reject handling: an item that fails to parse or validate is
//! discarded with a warning, and a payload that is not a JSON array at all
//! degrades to an empty batch. Missing required fields are never filled in
//! with defaults.

use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::model::{Question, QuestionKind, Quiz};

/// Option count required of generated questions. Authored questions may use
/// any count; the generation contract is fixed at four.
pub const GENERATED_OPTION_COUNT: usize = 4;

/// Why a question or quiz failed validation.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("question text is empty")]
    EmptyText,

    #[error("expected exactly {expected} options, got {got}")]
    WrongOptionCount { expected: usize, got: usize },

    #[error("correct-answer index {index} out of range for {len} options")]
    IndexOutOfRange { index: usize, len: usize },

    /// Every question needs at least one correct answer; otherwise an
    /// unattempted question would grade correct under exact set equality.
    #[error("question has no correct answers")]
    NoCorrectAnswers,

    #[error("single-answer question must have exactly one correct answer, got {0}")]
    SingleNotExactlyOne(usize),

    #[error("duplicate correct-answer index {0}")]
    DuplicateCorrectIndex(usize),

    #[error("quiz title is empty")]
    EmptyTitle,

    #[error("quiz has no questions")]
    NoQuestions,

    #[error("quiz duration must be positive")]
    ZeroDuration,
}

/// A generated question before acceptance into the domain model.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateQuestion {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub options: Vec<String>,
    pub correct_answers: Vec<usize>,
}

fn check_correct_answers(
    kind: QuestionKind,
    option_count: usize,
    correct_answers: &[usize],
) -> Result<(), ValidationError> {
    if correct_answers.is_empty() {
        return Err(ValidationError::NoCorrectAnswers);
    }
    let mut seen = std::collections::HashSet::new();
    for &index in correct_answers {
        if index >= option_count {
            return Err(ValidationError::IndexOutOfRange {
                index,
                len: option_count,
            });
        }
        if !seen.insert(index) {
            return Err(ValidationError::DuplicateCorrectIndex(index));
        }
    }
    if kind == QuestionKind::Single && correct_answers.len() != 1 {
        return Err(ValidationError::SingleNotExactlyOne(correct_answers.len()));
    }
    Ok(())
}

/// Validate a generated candidate against the generation contract.
pub fn validate_candidate(candidate: &CandidateQuestion) -> Result<(), ValidationError> {
    if candidate.text.trim().is_empty() {
        return Err(ValidationError::EmptyText);
    }
    if candidate.options.len() != GENERATED_OPTION_COUNT {
        return Err(ValidationError::WrongOptionCount {
            expected: GENERATED_OPTION_COUNT,
            got: candidate.options.len(),
        });
    }
    check_correct_answers(candidate.kind, candidate.options.len(), &candidate.correct_answers)
}

/// Validate an authored question's invariants.
pub fn validate_question(question: &Question) -> Result<(), ValidationError> {
    check_correct_answers(
        question.kind,
        question.options.len(),
        &question.correct_answers,
    )
}

/// Whether a quiz is usable for taking: non-empty title, positive duration,
/// at least one question, and every question valid.
pub fn validate_quiz(quiz: &Quiz) -> Result<(), ValidationError> {
    if quiz.title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    if quiz.duration_minutes == 0 {
        return Err(ValidationError::ZeroDuration);
    }
    if quiz.questions.is_empty() {
        return Err(ValidationError::NoQuestions);
    }
    for question in &quiz.questions {
        validate_question(question)?;
    }
    Ok(())
}

/// Accept the valid items of a generated batch, assigning fresh identifiers.
/// Invalid items are discarded one by one rather than failing the batch.
pub fn accept_candidates(items: &[serde_json::Value]) -> Vec<Question> {
    items
        .iter()
        .filter_map(|item| {
            let candidate: CandidateQuestion = match serde_json::from_value(item.clone()) {
                Ok(c) => c,
                Err(e) => {
                    tracing::warn!("discarding malformed generated question: {e}");
                    return None;
                }
            };
            if let Err(e) = validate_candidate(&candidate) {
                tracing::warn!("discarding invalid generated question: {e}");
                return None;
            }
            Some(Question {
                id: Uuid::new_v4().to_string(),
                text: candidate.text,
                kind: candidate.kind,
                options: candidate.options,
                correct_answers: candidate.correct_answers,
            })
        })
        .collect()
}

/// Parse a raw generated payload. Anything that is not a JSON array
/// degrades to an empty batch.
pub fn parse_candidates(payload: &str) -> Vec<Question> {
    let items: Vec<serde_json::Value> = match serde_json::from_str(payload) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!("generated payload is not a JSON array, dropping it: {e}");
            return Vec::new();
        }
    };
    accept_candidates(&items)
}
