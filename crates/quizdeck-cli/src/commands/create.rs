//! The `quizdeck create` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use quizdeck_core::model::UserRole;
use quizdeck_core::traits::{Catalog, GenerateRequest};
use quizdeck_core::{parser, validate};
use quizdeck_sources::create_source;

use super::open_store;

pub async fn execute(
    file: PathBuf,
    ai: Option<usize>,
    source_name: Option<String>,
    data_dir: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (config, mut store) = open_store(config_path.as_deref(), data_dir)?;

    let user = store.current_user()?;
    anyhow::ensure!(
        user.role == UserRole::Instructor,
        "only the instructor authors quizzes, run `quizdeck role --switch` first"
    );

    let mut quiz = parser::parse_quiz_file(&file, &user.id)?;

    if let Some(count) = ai {
        let name = source_name.unwrap_or_else(|| config.default_source.clone());
        let Some(source_config) = config.sources.get(&name) else {
            anyhow::bail!(
                "source '{}' not found in config. Available: {:?}",
                name,
                config.sources.keys().collect::<Vec<_>>()
            );
        };
        let source = create_source(&name, source_config)?;
        let request = GenerateRequest {
            topic: quiz.topic.clone(),
            count,
        };
        // A failed or empty generation keeps the authored questions intact.
        match source.generate(&request).await {
            Ok(generated) => {
                println!("Generated {} questions via {name}", generated.len());
                quiz.questions.extend(generated);
            }
            Err(e) => {
                eprintln!("Warning: question generation failed, keeping authored questions only: {e:#}");
            }
        }
    }

    validate::validate_quiz(&quiz).context("quiz failed validation")?;

    store.add_quiz(quiz.clone())?;
    println!(
        "Created quiz '{}' ({} questions)",
        quiz.title,
        quiz.questions.len()
    );
    println!("Quiz id: {}", quiz.id);
    Ok(())
}
