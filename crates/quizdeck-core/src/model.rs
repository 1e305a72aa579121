//! Core data model types for quizdeck.
//!
//! These are the fundamental types that the entire quizdeck system uses to
//! represent quizzes, questions, submissions, and users. Serialized field
//! names are camelCase to match the persisted record shapes.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a question accepts answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    /// Exactly one option is correct and at most one may be selected.
    Single,
    /// Any subset of the options may be correct.
    Multiple,
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionKind::Single => write!(f, "single"),
            QuestionKind::Multiple => write!(f, "multiple"),
        }
    }
}

impl FromStr for QuestionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "single" => Ok(QuestionKind::Single),
            "multiple" => Ok(QuestionKind::Multiple),
            other => Err(format!("unknown question type: {other}")),
        }
    }
}

/// A single multiple-choice question.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Unique identifier within a quiz.
    pub id: String,
    /// The question text shown to the learner.
    pub text: String,
    /// Answer mode.
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    /// Ordered option labels. The authoring UI uses four, but the engine
    /// never assumes a fixed count.
    pub options: Vec<String>,
    /// Indices into `options` that are correct.
    pub correct_answers: Vec<usize>,
}

/// An authored assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    /// Unique identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Subject area, also fed to question generation.
    pub topic: String,
    /// Time limit for one attempt, in minutes. Must be positive.
    pub duration_minutes: u32,
    /// When the quiz stops being offered.
    pub due_date: DateTime<Utc>,
    /// When the quiz was authored.
    pub created_at: DateTime<Utc>,
    /// Questions in display and scoring order.
    pub questions: Vec<Question>,
    /// Identifier of the authoring instructor.
    pub created_by: String,
}

impl Quiz {
    /// Look up a question by identifier.
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Whether the due date has passed.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.due_date < now
    }
}

/// One learner's graded attempt at a quiz. Immutable once `completed`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    /// Unique identifier.
    pub id: String,
    /// The quiz this submission references (never owns).
    pub quiz_id: String,
    /// Identifier of the learner.
    pub student_id: String,
    /// Display name of the learner at submission time.
    pub student_name: String,
    /// Question id to selected option indices. A question absent from the
    /// map was never touched; an empty entry was selected and then cleared.
    /// Both grade as incorrect.
    pub answers: HashMap<String, Vec<usize>>,
    /// Count of questions graded correct.
    pub score: u32,
    /// Question count of the quiz at grading time.
    pub total_possible: u32,
    /// Wall-clock time the attempt finished.
    pub timestamp: DateTime<Utc>,
    /// Set once grading has run; the record is append-only afterwards.
    pub completed: bool,
}

impl Submission {
    /// Score as a rounded percentage of the total possible.
    pub fn percentage(&self) -> u32 {
        if self.total_possible == 0 {
            return 0;
        }
        (f64::from(self.score) * 100.0 / f64::from(self.total_possible)).round() as u32
    }
}

/// The acting role of the current user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Instructor,
    Learner,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Instructor => write!(f, "instructor"),
            UserRole::Learner => write!(f, "learner"),
        }
    }
}

/// The current fixed-identity user. One identity exists per role.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: UserRole,
}
