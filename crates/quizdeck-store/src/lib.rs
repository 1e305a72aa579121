//! quizdeck-store — JSON file realization of the Catalog and Ledger.
//!
//! Quizzes, submissions, and the current user live as three JSON blobs under
//! a data directory. The whole store is loaded at open and each mutation is
//! written back immediately, so the load/save boundaries are explicit and no
//! state lives in ambient globals.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

use quizdeck_core::model::{Quiz, Submission, User, UserRole};
use quizdeck_core::traits::{Catalog, Ledger};

const USER_FILE: &str = "user.json";
const QUIZZES_FILE: &str = "quizzes.json";
const SUBMISSIONS_FILE: &str = "submissions.json";

/// The identity used before anyone has switched roles.
fn default_user() -> User {
    User {
        id: "u1".into(),
        name: "Dr. Smith".into(),
        role: UserRole::Instructor,
    }
}

/// File-backed store for quizzes, submissions, and the current user.
#[derive(Debug)]
pub struct JsonStore {
    dir: PathBuf,
    user: User,
    quizzes: Vec<Quiz>,
    submissions: Vec<Submission>,
}

impl JsonStore {
    /// Open (or initialize) a store in the given directory. Missing files
    /// mean empty collections and the default user.
    pub fn open(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create data directory {}", dir.display()))?;

        let user = load_json(&dir.join(USER_FILE))?.unwrap_or_else(default_user);
        let quizzes = load_json(&dir.join(QUIZZES_FILE))?.unwrap_or_default();
        let submissions = load_json(&dir.join(SUBMISSIONS_FILE))?.unwrap_or_default();

        Ok(Self {
            dir: dir.to_path_buf(),
            user,
            quizzes,
            submissions,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(Some(value))
}

fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize store data")?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

impl Catalog for JsonStore {
    fn get_quiz(&self, id: &str) -> Result<Option<Quiz>> {
        Ok(self.quizzes.iter().find(|q| q.id == id).cloned())
    }

    fn list_quizzes(&self) -> Result<Vec<Quiz>> {
        Ok(self.quizzes.clone())
    }

    fn add_quiz(&mut self, quiz: Quiz) -> Result<()> {
        // Newest quiz first, matching the dashboard ordering.
        self.quizzes.insert(0, quiz);
        save_json(&self.dir.join(QUIZZES_FILE), &self.quizzes)
    }

    fn current_user(&self) -> Result<User> {
        Ok(self.user.clone())
    }

    fn set_current_user(&mut self, user: User) -> Result<()> {
        self.user = user;
        save_json(&self.dir.join(USER_FILE), &self.user)
    }
}

impl Ledger for JsonStore {
    fn append_submission(&mut self, submission: Submission) -> Result<()> {
        self.submissions.push(submission);
        save_json(&self.dir.join(SUBMISSIONS_FILE), &self.submissions)
    }

    fn list_submissions(&self, quiz_id: &str) -> Result<Vec<Submission>> {
        Ok(self
            .submissions
            .iter()
            .filter(|s| s.quiz_id == quiz_id)
            .cloned()
            .collect())
    }

    fn all_submissions(&self) -> Result<Vec<Submission>> {
        Ok(self.submissions.clone())
    }

    fn get_submission(&self, id: &str) -> Result<Option<Submission>> {
        Ok(self.submissions.iter().find(|s| s.id == id).cloned())
    }
}
