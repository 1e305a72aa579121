//! The `quizdeck analytics` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizdeck_core::analytics::analyze;
use quizdeck_core::model::UserRole;
use quizdeck_core::traits::{Catalog, Ledger};

use super::{fmt_pct, open_store, resolve_quiz};

pub fn execute(
    quiz_selector: String,
    data_dir: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (_config, store) = open_store(config_path.as_deref(), data_dir)?;

    let user = store.current_user()?;
    anyhow::ensure!(
        user.role == UserRole::Instructor,
        "analytics are an instructor view, run `quizdeck role --switch` first"
    );

    let Some(quiz) = resolve_quiz(&store, &quiz_selector)? else {
        println!("Quiz not found.");
        return Ok(());
    };

    let submissions = store.list_submissions(&quiz.id)?;
    let analytics = analyze(&quiz, &submissions);

    println!("{} Analytics", quiz.title);
    println!("{} students responded", analytics.submission_count);
    println!("Average score: {}", fmt_pct(analytics.average_score_pct));

    let mut table = Table::new();
    table.set_header(vec![
        "#",
        "Question",
        "Attempted",
        "Correct",
        "Incorrect",
        "Accuracy",
    ]);
    for (index, stats) in analytics.question_stats.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(truncate(&stats.text, 20)),
            Cell::new(stats.attempted),
            Cell::new(stats.correct),
            Cell::new(stats.incorrect),
            Cell::new(format!("{:.0}%", stats.accuracy_pct)),
        ]);
    }
    println!("\n{table}");

    if analytics.leaderboard.is_empty() {
        println!("\nNo submissions yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Student", "Score", "Submission"]);
    for entry in &analytics.leaderboard {
        table.add_row(vec![
            Cell::new(&entry.student_name),
            Cell::new(format!("{}/{}", entry.score, entry.total_possible)),
            Cell::new(&entry.submission_id),
        ]);
    }
    println!("\n{table}");
    Ok(())
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let prefix: String = text.chars().take(max_chars).collect();
    format!("{prefix}...")
}
