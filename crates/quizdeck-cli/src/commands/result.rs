//! The `quizdeck result` command.

use std::path::PathBuf;

use anyhow::Result;

use quizdeck_core::traits::{Catalog, Ledger};

use super::{open_store, render_review};

pub fn execute(
    submission_id: String,
    data_dir: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (_config, store) = open_store(config_path.as_deref(), data_dir)?;

    let Some(submission) = store.get_submission(&submission_id)? else {
        println!("Result not found.");
        return Ok(());
    };
    let Some(quiz) = store.get_quiz(&submission.quiz_id)? else {
        println!("Result not found.");
        return Ok(());
    };

    render_review(&quiz, &submission);
    Ok(())
}
