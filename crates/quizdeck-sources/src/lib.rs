//! quizdeck-sources — Question generation backends.
//!
//! Implements the `QuestionSource` trait for the Gemini API and for a mock
//! backend used in tests, plus configuration loading and a source factory.

pub mod config;
pub mod gemini;
pub mod mock;

pub use config::{create_source, load_config, QuizdeckConfig, SourceConfig};
pub use quizdeck_core::error::SourceError;
