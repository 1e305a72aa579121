//! Timed attempt sessions.
//!
//! A [`TimedSession`] is the state machine for one learner's attempt at one
//! quiz: it holds the working answer map, counts the time limit down, and
//! triggers grading exactly once. The countdown itself is driven by a
//! cancellable background task ([`Countdown`]); the session object holds no
//! background resources of its own.
//!
//! State machine: `Active` (countdown running, answers mutable) →
//! `Finalizing` (grading, answers frozen) → `Finished` (terminal, a
//! [`Submission`] has been produced). Both [`TimedSession::finish`] and
//! [`TimedSession::expire`] guard on `Active` and move to `Finalizing`
//! before grading, so whichever fires first wins and the loser is a silent
//! no-op. With the session shared behind a mutex, the guard and the
//! transition happen under one lock acquisition, which preserves the
//! at-most-one-grading guarantee on a multithreaded runtime.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use uuid::Uuid;

use crate::grading;
use crate::model::{QuestionKind, Quiz, Submission};

/// Cadence of the countdown driver.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Lifecycle phase of an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Countdown running, answers mutable.
    Active,
    /// Grading in progress, answers frozen.
    Finalizing,
    /// Terminal; a submission has been produced and handed off.
    Finished,
}

/// One learner's timed pass through one quiz.
pub struct TimedSession {
    quiz: Quiz,
    student_id: String,
    student_name: String,
    state: SessionState,
    remaining_secs: u64,
    answers: HashMap<String, Vec<usize>>,
}

impl TimedSession {
    /// Start an attempt: `Active`, countdown at the full time limit, empty
    /// answer map.
    pub fn new(quiz: Quiz, student_id: &str, student_name: &str) -> Self {
        let remaining_secs = u64::from(quiz.duration_minutes) * 60;
        Self {
            quiz,
            student_id: student_id.to_string(),
            student_name: student_name.to_string(),
            state: SessionState::Active,
            remaining_secs,
            answers: HashMap::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    /// Current selection for a question (empty if untouched).
    pub fn selected(&self, question_id: &str) -> &[usize] {
        self.answers.get(question_id).map_or(&[], Vec::as_slice)
    }

    /// Count of questions with a non-empty selection.
    pub fn attempted_count(&self) -> usize {
        self.answers.values().filter(|sel| !sel.is_empty()).count()
    }

    /// Record an interaction with an option.
    ///
    /// Single-answer questions replace the selection; multiple-answer
    /// questions toggle membership. Outside `Active`, or for an unknown
    /// question or out-of-range index, this is a silent no-op — a stray
    /// late click must not fail just because the countdown expired in the
    /// same tick.
    pub fn select(&mut self, question_id: &str, option_index: usize) {
        if self.state != SessionState::Active {
            return;
        }
        let Some(question) = self.quiz.question(question_id) else {
            return;
        };
        if option_index >= question.options.len() {
            return;
        }
        let kind = question.kind;

        let selection = self.answers.entry(question_id.to_string()).or_default();
        match kind {
            QuestionKind::Single => {
                selection.clear();
                selection.push(option_index);
            }
            QuestionKind::Multiple => {
                if let Some(pos) = selection.iter().position(|&i| i == option_index) {
                    selection.remove(pos);
                } else {
                    selection.push(option_index);
                }
            }
        }
    }

    /// Advance the countdown by one second; fires [`Self::expire`] on zero.
    pub fn tick(&mut self) -> Option<Submission> {
        if self.state != SessionState::Active {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            return self.expire();
        }
        None
    }

    /// Countdown reached zero. Grades the attempt if still `Active`.
    pub fn expire(&mut self) -> Option<Submission> {
        self.finalize()
    }

    /// Learner-initiated early submission. Grades the attempt if still
    /// `Active`.
    pub fn finish(&mut self) -> Option<Submission> {
        self.finalize()
    }

    fn finalize(&mut self) -> Option<Submission> {
        if self.state != SessionState::Active {
            return None;
        }
        self.state = SessionState::Finalizing;

        let report = grading::grade(&self.quiz.questions, &self.answers);
        let submission = Submission {
            id: Uuid::new_v4().to_string(),
            quiz_id: self.quiz.id.clone(),
            student_id: self.student_id.clone(),
            student_name: self.student_name.clone(),
            answers: self.answers.clone(),
            score: report.score,
            total_possible: report.total_possible,
            timestamp: Utc::now(),
            completed: true,
        };

        self.state = SessionState::Finished;
        Some(submission)
    }
}

/// Cancellable background task driving a session's countdown.
///
/// Ticks the shared session once per period and resolves with the expiry
/// submission, or with `None` when the session finished through another
/// path. Dropping (or [`Countdown::cancel`]-ing) the handle aborts the task,
/// so discarding an in-progress session leaves no orphaned periodic work.
pub struct Countdown {
    handle: JoinHandle<Option<Submission>>,
}

impl Countdown {
    /// Drive the session at the standard one-second cadence.
    pub fn spawn(session: Arc<Mutex<TimedSession>>) -> Self {
        Self::spawn_with_period(session, TICK_PERIOD)
    }

    /// Drive the session at a custom cadence.
    pub fn spawn_with_period(session: Arc<Mutex<TimedSession>>, period: Duration) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first interval tick completes immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                let mut session = session.lock().await;
                if let Some(submission) = session.tick() {
                    return Some(submission);
                }
                if session.state() != SessionState::Active {
                    return None;
                }
            }
        });
        Self { handle }
    }

    /// Stop ticking without finishing the session.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// Wait for the countdown to resolve. `None` when the session finished
    /// early or the countdown was cancelled.
    pub async fn join(mut self) -> Option<Submission> {
        (&mut self.handle).await.unwrap_or(None)
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
