//! Source configuration and factory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizdeck_core::traits::{QuestionSource, DEFAULT_QUESTION_COUNT};

use crate::gemini::GeminiSource;
use crate::mock::MockSource;

/// Configuration for a single question source.
///
/// Note: Custom Debug impl masks API keys to prevent accidental exposure in
/// logs.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceConfig {
    Gemini {
        api_key: String,
        #[serde(default)]
        base_url: Option<String>,
        #[serde(default)]
        model: Option<String>,
    },
    Mock,
}

impl std::fmt::Debug for SourceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceConfig::Gemini {
                api_key: _,
                base_url,
                model,
            } => f
                .debug_struct("Gemini")
                .field("api_key", &"***")
                .field("base_url", base_url)
                .field("model", model)
                .finish(),
            SourceConfig::Mock => f.debug_struct("Mock").finish(),
        }
    }
}

/// Top-level quizdeck configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizdeckConfig {
    /// Source configurations keyed by name.
    #[serde(default)]
    pub sources: HashMap<String, SourceConfig>,
    /// Default source to use for generation.
    #[serde(default = "default_source")]
    pub default_source: String,
    /// How many questions a generation request asks for.
    #[serde(default = "default_question_count")]
    pub question_count: usize,
    /// Directory holding the JSON store.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_source() -> String {
    "gemini".to_string()
}
fn default_question_count() -> usize {
    DEFAULT_QUESTION_COUNT
}
fn default_data_dir() -> PathBuf {
    PathBuf::from("./quizdeck-data")
}

impl Default for QuizdeckConfig {
    fn default() -> Self {
        Self {
            sources: HashMap::new(),
            default_source: default_source(),
            question_count: default_question_count(),
            data_dir: default_data_dir(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Resolve env vars in a source config.
fn resolve_source_config(config: &SourceConfig) -> SourceConfig {
    match config {
        SourceConfig::Gemini {
            api_key,
            base_url,
            model,
        } => SourceConfig::Gemini {
            api_key: resolve_env_vars(api_key),
            base_url: base_url.as_ref().map(|u| resolve_env_vars(u)),
            model: model.clone(),
        },
        SourceConfig::Mock => SourceConfig::Mock,
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizdeck.toml` in the current directory
/// 2. `~/.config/quizdeck/config.toml`
///
/// Environment variable override: `QUIZDECK_GEMINI_KEY`.
pub fn load_config() -> Result<QuizdeckConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizdeckConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizdeck.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<QuizdeckConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizdeckConfig::default(),
    };

    // Apply env var overrides
    if let Ok(key) = std::env::var("QUIZDECK_GEMINI_KEY") {
        config
            .sources
            .entry("gemini".into())
            .or_insert(SourceConfig::Gemini {
                api_key: String::new(),
                base_url: None,
                model: None,
            });
        if let Some(SourceConfig::Gemini { api_key, .. }) = config.sources.get_mut("gemini") {
            *api_key = key;
        }
    }

    // Resolve env vars in all source configs
    let resolved: HashMap<String, SourceConfig> = config
        .sources
        .iter()
        .map(|(k, v)| (k.clone(), resolve_source_config(v)))
        .collect();
    config.sources = resolved;

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizdeck"))
}

/// Create a source instance from its configuration.
pub fn create_source(name: &str, config: &SourceConfig) -> Result<Box<dyn QuestionSource>> {
    match config {
        SourceConfig::Gemini {
            api_key,
            base_url,
            model,
        } => {
            anyhow::ensure!(!api_key.is_empty(), "source '{name}' has no API key");
            Ok(Box::new(GeminiSource::new(
                api_key,
                base_url.clone(),
                model.clone(),
            )))
        }
        SourceConfig::Mock => Ok(Box::new(MockSource::default())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_QUIZDECK_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_QUIZDECK_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_QUIZDECK_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        std::env::remove_var("_QUIZDECK_TEST_VAR");
    }

    #[test]
    fn default_config() {
        let config = QuizdeckConfig::default();
        assert_eq!(config.default_source, "gemini");
        assert_eq!(config.question_count, 5);
        assert_eq!(config.data_dir, PathBuf::from("./quizdeck-data"));
    }

    #[test]
    fn parse_source_config() {
        let toml_str = r#"
default_source = "gemini"
question_count = 8

[sources.gemini]
type = "gemini"
api_key = "sk-test"
model = "gemini-3-pro-preview"

[sources.mock]
type = "mock"
"#;
        let config: QuizdeckConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.sources.len(), 2);
        assert_eq!(config.question_count, 8);
        assert!(matches!(
            config.sources.get("gemini"),
            Some(SourceConfig::Gemini { .. })
        ));
    }

    #[test]
    fn create_source_requires_api_key() {
        let config = SourceConfig::Gemini {
            api_key: String::new(),
            base_url: None,
            model: None,
        };
        assert!(create_source("gemini", &config).is_err());
    }

    #[test]
    fn debug_masks_api_key() {
        let config = SourceConfig::Gemini {
            api_key: "super-secret".into(),
            base_url: None,
            model: None,
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("***"));
    }
}
