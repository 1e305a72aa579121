//! The `quizdeck take` command.
//!
//! Runs one timed session end to end: construct the session, start the
//! countdown, apply the learner's selections, finish early, and append the
//! graded submission to the ledger.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Deserialize;
use tokio::sync::Mutex;

use quizdeck_core::model::UserRole;
use quizdeck_core::session::{Countdown, TimedSession};
use quizdeck_core::traits::{Catalog, Ledger};
use quizdeck_core::validate;

use super::{open_store, render_review, resolve_quiz};

/// Selections keyed by 1-based question and option numbers, the way a
/// person counts them off the quiz sheet.
#[derive(Debug, Deserialize)]
struct AnswersFile {
    #[serde(default)]
    answers: Vec<AnswerEntry>,
}

#[derive(Debug, Deserialize)]
struct AnswerEntry {
    question: usize,
    select: Vec<usize>,
}

pub async fn execute(
    quiz_selector: String,
    answers_path: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (_config, mut store) = open_store(config_path.as_deref(), data_dir)?;

    let user = store.current_user()?;
    anyhow::ensure!(
        user.role == UserRole::Learner,
        "only the learner takes quizzes, run `quizdeck role --switch` first"
    );

    let Some(quiz) = resolve_quiz(&store, &quiz_selector)? else {
        println!("Quiz not found.");
        return Ok(());
    };
    validate::validate_quiz(&quiz).context("quiz is not usable for taking")?;

    let already_completed = store
        .list_submissions(&quiz.id)?
        .iter()
        .any(|s| s.student_id == user.id && s.completed);
    anyhow::ensure!(
        !already_completed,
        "'{}' has already been completed",
        quiz.title
    );
    if quiz.is_overdue(Utc::now()) {
        eprintln!("Warning: '{}' is past its due date", quiz.title);
    }

    let question_ids: Vec<String> = quiz.questions.iter().map(|q| q.id.clone()).collect();
    let session = Arc::new(Mutex::new(TimedSession::new(
        quiz.clone(),
        &user.id,
        &user.name,
    )));
    let countdown = Countdown::spawn(Arc::clone(&session));

    if let Some(path) = &answers_path {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read answers file: {}", path.display()))?;
        let parsed: AnswersFile =
            toml::from_str(&content).context("failed to parse answers TOML")?;

        let mut session = session.lock().await;
        for entry in parsed.answers {
            let Some(question_id) = entry
                .question
                .checked_sub(1)
                .and_then(|i| question_ids.get(i))
            else {
                tracing::warn!("answers file references unknown question {}", entry.question);
                continue;
            };
            for option in entry.select {
                let Some(option_index) = option.checked_sub(1) else {
                    tracing::warn!("option numbers start at 1, ignoring 0");
                    continue;
                };
                session.select(question_id, option_index);
            }
        }
        println!(
            "Applied selections to {} of {} questions",
            session.attempted_count(),
            question_ids.len()
        );
    }

    let submission = session
        .lock()
        .await
        .finish()
        .context("session already finished")?;
    countdown.cancel();

    store.append_submission(submission.clone())?;

    render_review(&quiz, &submission);
    println!("Submission id: {}", submission.id);
    Ok(())
}
