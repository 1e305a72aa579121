//! Subcommand implementations and shared helpers.

pub mod analytics;
pub mod create;
pub mod generate;
pub mod init;
pub mod list;
pub mod result;
pub mod role;
pub mod take;

use std::path::{Path, PathBuf};

use anyhow::Result;

use quizdeck_core::grading;
use quizdeck_core::model::{Quiz, Submission};
use quizdeck_core::traits::Catalog;
use quizdeck_sources::config::load_config_from;
use quizdeck_sources::QuizdeckConfig;
use quizdeck_store::JsonStore;

/// Load config and open the store, honoring a `--data-dir` override.
pub(crate) fn open_store(
    config_path: Option<&Path>,
    data_dir: Option<PathBuf>,
) -> Result<(QuizdeckConfig, JsonStore)> {
    let config = load_config_from(config_path)?;
    let dir = data_dir.unwrap_or_else(|| config.data_dir.clone());
    let store = JsonStore::open(&dir)?;
    Ok((config, store))
}

/// Resolve a quiz by id, falling back to an exact title match.
pub(crate) fn resolve_quiz(store: &JsonStore, selector: &str) -> Result<Option<Quiz>> {
    if let Some(quiz) = store.get_quiz(selector)? {
        return Ok(Some(quiz));
    }
    let mut matches: Vec<Quiz> = store
        .list_quizzes()?
        .into_iter()
        .filter(|q| q.title == selector)
        .collect();
    match matches.len() {
        0 | 1 => Ok(matches.pop()),
        n => anyhow::bail!("'{selector}' matches {n} quizzes, use the id instead"),
    }
}

/// Format an optional percentage, rendering absence as "N/A" rather than 0.
pub(crate) fn fmt_pct(pct: Option<f64>) -> String {
    match pct {
        Some(p) => format!("{}%", p.round() as i64),
        None => "N/A".to_string(),
    }
}

/// Print the result review for one submission: overall score plus a
/// per-question breakdown with selected and correct options marked.
pub(crate) fn render_review(quiz: &Quiz, submission: &Submission) {
    // Verdicts are recomputed from the stored answers, same as the grader.
    let report = grading::grade(&quiz.questions, &submission.answers);

    println!("Quiz Result — {}", quiz.title);
    println!(
        "Score: {}/{} ({}%)",
        submission.score,
        submission.total_possible,
        submission.percentage()
    );
    println!(
        "{} correct, {} incorrect",
        submission.score,
        submission.total_possible - submission.score
    );
    println!();

    for (index, (question, verdict)) in quiz
        .questions
        .iter()
        .zip(report.verdicts.iter())
        .enumerate()
    {
        let mark = if verdict.correct { "correct" } else { "incorrect" };
        println!("Q{}: {} — {}", index + 1, question.text, mark);
        for (option_index, option) in question.options.iter().enumerate() {
            let selected = verdict.selected.contains(&option_index);
            let correct = question.correct_answers.contains(&option_index);
            let note = match (selected, correct) {
                (true, true) => "  (selected, correct)",
                (true, false) => "  (selected, wrong)",
                (false, true) => "  (correct answer)",
                (false, false) => "",
            };
            let bullet = if selected { ">" } else { " " };
            println!("  {bullet} {option}{note}");
        }
        println!();
    }
}
