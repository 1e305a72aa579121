//! The `quizdeck generate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

use quizdeck_core::model::Question;
use quizdeck_core::traits::GenerateRequest;
use quizdeck_sources::config::load_config_from;
use quizdeck_sources::create_source;

pub async fn execute(
    topic: String,
    count: Option<usize>,
    source_name: Option<String>,
    out: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

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
        topic,
        count: count.unwrap_or(config.question_count),
    };
    // Transport failures degrade to an empty batch; the error is surfaced,
    // nothing crashes.
    let questions = match source.generate(&request).await {
        Ok(questions) => questions,
        Err(e) => {
            eprintln!("Warning: question generation failed: {e:#}");
            Vec::new()
        }
    };

    println!("Accepted {} questions from {name}", questions.len());
    if questions.is_empty() {
        return Ok(());
    }

    let rendered = render_questions_toml(&questions)?;
    match out {
        Some(path) => {
            std::fs::write(&path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        None => println!("\n{rendered}"),
    }
    Ok(())
}

/// Render accepted questions as `[[questions]]` blocks ready to paste into
/// a quiz authoring file.
fn render_questions_toml(questions: &[Question]) -> Result<String> {
    #[derive(Serialize)]
    struct Rendered<'a> {
        questions: Vec<RenderedQuestion<'a>>,
    }

    #[derive(Serialize)]
    struct RenderedQuestion<'a> {
        text: &'a str,
        #[serde(rename = "type")]
        kind: String,
        options: &'a [String],
        correct_answers: &'a [usize],
    }

    let rendered = Rendered {
        questions: questions
            .iter()
            .map(|q| RenderedQuestion {
                text: &q.text,
                kind: q.kind.to_string(),
                options: &q.options,
                correct_answers: &q.correct_answers,
            })
            .collect(),
    };
    toml::to_string_pretty(&rendered).context("failed to render questions as TOML")
}
