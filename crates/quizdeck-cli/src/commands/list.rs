//! The `quizdeck list` command — the dashboard for the current role.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use comfy_table::{Cell, Table};

use quizdeck_core::analytics;
use quizdeck_core::model::{Quiz, Submission, User, UserRole};
use quizdeck_core::traits::{Catalog, Ledger};

use super::{fmt_pct, open_store};

pub fn execute(data_dir: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let (_config, store) = open_store(config_path.as_deref(), data_dir)?;

    let user = store.current_user()?;
    let quizzes = store.list_quizzes()?;
    let submissions = store.all_submissions()?;

    match user.role {
        UserRole::Instructor => instructor_view(&quizzes, &submissions),
        UserRole::Learner => learner_view(&user, &quizzes, &submissions),
    }
    Ok(())
}

fn instructor_view(quizzes: &[Quiz], submissions: &[Submission]) {
    println!("Instructor Dashboard");
    println!("Total quizzes: {}", quizzes.len());
    println!("Total submissions: {}", submissions.len());
    println!(
        "Average class score: {}",
        fmt_pct(analytics::class_average(submissions))
    );

    if quizzes.is_empty() {
        println!("\nNo quizzes yet. Author one with `quizdeck create`.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Title", "Topic", "Duration", "Due", "Submissions", "Id"]);
    for quiz in quizzes {
        let count = submissions.iter().filter(|s| s.quiz_id == quiz.id).count();
        table.add_row(vec![
            Cell::new(&quiz.title),
            Cell::new(&quiz.topic),
            Cell::new(format!("{} min", quiz.duration_minutes)),
            Cell::new(quiz.due_date.format("%Y-%m-%d %H:%M").to_string()),
            Cell::new(count),
            Cell::new(&quiz.id),
        ]);
    }
    println!("\n{table}");
}

fn learner_view(user: &User, quizzes: &[Quiz], submissions: &[Submission]) {
    let available = analytics::available_for(quizzes, submissions, &user.id);
    let completed: Vec<&Submission> = submissions
        .iter()
        .filter(|s| s.student_id == user.id)
        .collect();

    println!("Learner Dashboard — {}", user.name);
    println!("Pending quizzes: {}", available.len());
    println!("Completed: {}", completed.len());
    println!(
        "Success rate: {}",
        fmt_pct(analytics::success_rate(submissions, &user.id))
    );

    if available.is_empty() {
        println!("\nAll caught up! No pending quizzes.");
    } else {
        let now = Utc::now();
        let mut table = Table::new();
        table.set_header(vec!["Title", "Topic", "Duration", "Due", "Status", "Id"]);
        for quiz in &available {
            let status = if quiz.is_overdue(now) { "Overdue" } else { "Active" };
            table.add_row(vec![
                Cell::new(&quiz.title),
                Cell::new(&quiz.topic),
                Cell::new(format!("{} min", quiz.duration_minutes)),
                Cell::new(quiz.due_date.format("%Y-%m-%d %H:%M").to_string()),
                Cell::new(status),
                Cell::new(&quiz.id),
            ]);
        }
        println!("\n{table}");
    }

    if !completed.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["Quiz", "Score", "When", "Submission"]);
        for submission in completed {
            // A quiz removed from the catalog still shows by id; the ledger
            // never loses history.
            let title = quizzes
                .iter()
                .find(|q| q.id == submission.quiz_id)
                .map_or(submission.quiz_id.as_str(), |q| q.title.as_str());
            table.add_row(vec![
                Cell::new(title),
                Cell::new(format!(
                    "{}/{}",
                    submission.score, submission.total_possible
                )),
                Cell::new(submission.timestamp.format("%Y-%m-%d %H:%M").to_string()),
                Cell::new(&submission.id),
            ]);
        }
        println!("\n{table}");
    }
}
