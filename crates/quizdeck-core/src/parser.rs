//! TOML quiz authoring parser.
//!
//! Loads authored quiz files and assigns identifiers and timestamps.
//! Validation against the domain invariants is a separate step
//! ([`crate::validate::validate_quiz`]) so callers can merge generated
//! questions into a parsed quiz before checking it.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::model::{Question, Quiz};

/// Intermediate TOML structure for parsing quiz files.
#[derive(Debug, Deserialize)]
struct TomlQuizFile {
    quiz: TomlQuizHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuizHeader {
    title: String,
    #[serde(default)]
    topic: String,
    #[serde(default = "default_duration")]
    duration_minutes: u32,
    /// RFC 3339 timestamp. Defaults to 24 hours from parse time.
    #[serde(default)]
    due_date: Option<String>,
}

fn default_duration() -> u32 {
    30
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    text: String,
    #[serde(rename = "type", default = "default_kind")]
    kind: String,
    options: Vec<String>,
    correct_answers: Vec<usize>,
}

fn default_kind() -> String {
    "single".to_string()
}

/// Parse a quiz authoring file into a `Quiz`.
pub fn parse_quiz_file(path: &Path, author: &str) -> Result<Quiz> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read quiz file: {}", path.display()))?;
    parse_quiz_str(&content, author)
}

/// Parse a quiz authoring TOML string (useful for testing).
pub fn parse_quiz_str(content: &str, author: &str) -> Result<Quiz> {
    let parsed: TomlQuizFile = toml::from_str(content).context("failed to parse quiz TOML")?;

    let due_date = match &parsed.quiz.due_date {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .with_context(|| format!("invalid due_date: {raw}"))?
            .with_timezone(&Utc),
        None => Utc::now() + Duration::hours(24),
    };

    let questions = parsed
        .questions
        .into_iter()
        .map(|q| {
            let kind = q
                .kind
                .parse()
                .map_err(|e: String| anyhow::anyhow!("{}", e))?;
            Ok(Question {
                id: Uuid::new_v4().to_string(),
                text: q.text,
                kind,
                options: q.options,
                correct_answers: q.correct_answers,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Quiz {
        id: Uuid::new_v4().to_string(),
        title: parsed.quiz.title,
        topic: parsed.quiz.topic,
        duration_minutes: parsed.quiz.duration_minutes,
        due_date,
        created_at: Utc::now(),
        questions,
        created_by: author.to_string(),
    })
}
