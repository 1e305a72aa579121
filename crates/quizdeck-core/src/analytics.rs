//! Aggregate performance analytics.
//!
//! Pure, read-only computations over a quiz and the submissions referencing
//! it. Correctness is recomputed from the stored answer maps with the same
//! exact-set rule the grading engine uses — never read back from a cached
//! verdict.

use serde::{Deserialize, Serialize};

use crate::grading;
use crate::model::{Quiz, Submission};

/// Per-question accuracy breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionStats {
    /// The question this row describes.
    pub question_id: String,
    /// Question text, for display.
    pub text: String,
    /// Submissions with a non-empty selection for this question.
    pub attempted: u32,
    /// Submissions whose selection matched the correct set exactly.
    pub correct: u32,
    /// `submission_count - correct`: an unattempted question still counts
    /// against accuracy.
    pub incorrect: u32,
    /// `100 * correct / submission_count`, 0 when there are no submissions.
    pub accuracy_pct: f64,
}

/// A row of the instructor's submission listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub submission_id: String,
    pub student_name: String,
    pub score: u32,
    pub total_possible: u32,
}

/// Everything the instructor analytics view needs for one quiz.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAnalytics {
    /// How many submissions the breakdown covers.
    pub submission_count: usize,
    /// One row per question, in quiz order.
    pub question_stats: Vec<QuestionStats>,
    /// Mean of `100 * score / total_possible` across submissions. `None`
    /// when there are no submissions — a missing average is not the same
    /// thing as a real zero average.
    pub average_score_pct: Option<f64>,
    /// Submissions sorted by descending score (display convenience).
    pub leaderboard: Vec<LeaderboardEntry>,
}

/// Summarize all submissions for one quiz.
pub fn analyze(quiz: &Quiz, submissions: &[Submission]) -> QuizAnalytics {
    let submission_count = submissions.len();

    let question_stats = quiz
        .questions
        .iter()
        .map(|question| {
            let mut attempted = 0u32;
            let mut correct = 0u32;
            for submission in submissions {
                let selected = submission
                    .answers
                    .get(&question.id)
                    .map_or(&[][..], Vec::as_slice);
                if !selected.is_empty() {
                    attempted += 1;
                }
                if grading::is_correct(question, selected) {
                    correct += 1;
                }
            }
            let accuracy_pct = if submission_count == 0 {
                0.0
            } else {
                f64::from(correct) * 100.0 / submission_count as f64
            };
            QuestionStats {
                question_id: question.id.clone(),
                text: question.text.clone(),
                attempted,
                correct,
                incorrect: submission_count as u32 - correct,
                accuracy_pct,
            }
        })
        .collect();

    let mut leaderboard: Vec<LeaderboardEntry> = submissions
        .iter()
        .map(|s| LeaderboardEntry {
            submission_id: s.id.clone(),
            student_name: s.student_name.clone(),
            score: s.score,
            total_possible: s.total_possible,
        })
        .collect();
    leaderboard.sort_by(|a, b| b.score.cmp(&a.score));

    QuizAnalytics {
        submission_count,
        question_stats,
        average_score_pct: mean_score_pct(submissions.iter()),
        leaderboard,
    }
}

/// Class-wide average score percentage across any set of submissions.
/// `None` when there are none.
pub fn class_average(submissions: &[Submission]) -> Option<f64> {
    mean_score_pct(submissions.iter())
}

/// One learner's average score percentage over their own submissions.
pub fn success_rate(submissions: &[Submission], student_id: &str) -> Option<f64> {
    mean_score_pct(submissions.iter().filter(|s| s.student_id == student_id))
}

/// Quizzes the learner has not yet completed a submission for.
pub fn available_for<'a>(
    quizzes: &'a [Quiz],
    submissions: &[Submission],
    student_id: &str,
) -> Vec<&'a Quiz> {
    quizzes
        .iter()
        .filter(|quiz| {
            !submissions
                .iter()
                .any(|s| s.quiz_id == quiz.id && s.student_id == student_id && s.completed)
        })
        .collect()
}

fn mean_score_pct<'a>(submissions: impl Iterator<Item = &'a Submission>) -> Option<f64> {
    let mut total = 0.0;
    let mut count = 0usize;
    for submission in submissions {
        total += f64::from(submission.score) * 100.0 / f64::from(submission.total_possible);
        count += 1;
    }
    if count == 0 {
        None
    } else {
        Some(total / count as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Question, QuestionKind};
    use chrono::Utc;

    fn quiz() -> Quiz {
        Quiz {
            id: "quiz-1".into(),
            title: "Analytics".into(),
            topic: "aggregation".into(),
            duration_minutes: 30,
            due_date: Utc::now(),
            created_at: Utc::now(),
            questions: vec![
                Question {
                    id: "q1".into(),
                    text: "single".into(),
                    kind: QuestionKind::Single,
                    options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                    correct_answers: vec![1],
                },
                Question {
                    id: "q2".into(),
                    text: "multiple".into(),
                    kind: QuestionKind::Multiple,
                    options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                    correct_answers: vec![0, 2],
                },
            ],
            created_by: "u1".into(),
        }
    }

    fn submission(
        id: &str,
        student: &str,
        answers: &[(&str, &[usize])],
        score: u32,
        total: u32,
    ) -> Submission {
        Submission {
            id: id.into(),
            quiz_id: "quiz-1".into(),
            student_id: student.into(),
            student_name: student.to_uppercase(),
            answers: answers
                .iter()
                .map(|(q, sel)| (q.to_string(), sel.to_vec()))
                .collect(),
            score,
            total_possible: total,
            timestamp: Utc::now(),
            completed: true,
        }
    }

    #[test]
    fn per_question_counts_add_up() {
        let quiz = quiz();
        let submissions = vec![
            submission("s1", "u2", &[("q1", &[1]), ("q2", &[0, 2])], 2, 2),
            submission("s2", "u3", &[("q1", &[0]), ("q2", &[0])], 0, 2),
            submission("s3", "u4", &[("q2", &[0, 2])], 1, 2),
        ];

        let analytics = analyze(&quiz, &submissions);
        assert_eq!(analytics.submission_count, 3);

        let q1 = &analytics.question_stats[0];
        assert_eq!(q1.attempted, 2, "unattempted q1 in s3");
        assert_eq!(q1.correct, 1);
        assert_eq!(q1.incorrect, 2, "unattempted still counts incorrect");
        assert_eq!(q1.correct + q1.incorrect, 3);

        let q2 = &analytics.question_stats[1];
        assert_eq!(q2.attempted, 3);
        assert_eq!(q2.correct, 2);
        assert_eq!(q2.correct + q2.incorrect, 3);
        assert!((q2.accuracy_pct - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn verdicts_are_recomputed_from_answers_not_scores() {
        let quiz = quiz();
        // Stored score claims full marks, but the stored answers are wrong.
        let submissions = vec![submission("s1", "u2", &[("q1", &[0])], 2, 2)];

        let analytics = analyze(&quiz, &submissions);
        assert_eq!(analytics.question_stats[0].correct, 0);
    }

    #[test]
    fn average_of_three_submissions() {
        let quiz = quiz();
        let submissions = vec![
            submission("s1", "u2", &[], 3, 5),
            submission("s2", "u3", &[], 4, 5),
            submission("s3", "u4", &[], 5, 5),
        ];
        let analytics = analyze(&quiz, &submissions);
        let avg = analytics.average_score_pct.unwrap();
        assert!((avg - 80.0).abs() < 1e-9, "(60+80+100)/3 = 80, got {avg}");
    }

    #[test]
    fn zero_submissions_yield_no_average_and_zero_accuracy() {
        let quiz = quiz();
        let analytics = analyze(&quiz, &[]);
        assert_eq!(analytics.submission_count, 0);
        assert!(analytics.average_score_pct.is_none(), "N/A, not 0");
        for stats in &analytics.question_stats {
            assert_eq!(stats.accuracy_pct, 0.0, "never NaN");
            assert_eq!(stats.correct + stats.incorrect, 0);
        }
    }

    #[test]
    fn leaderboard_sorted_by_descending_score() {
        let quiz = quiz();
        let submissions = vec![
            submission("s1", "u2", &[], 1, 2),
            submission("s2", "u3", &[], 2, 2),
            submission("s3", "u4", &[], 0, 2),
        ];
        let analytics = analyze(&quiz, &submissions);
        let scores: Vec<u32> = analytics.leaderboard.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![2, 1, 0]);
    }

    #[test]
    fn dashboard_rollups() {
        let quizzes = vec![quiz()];
        let submissions = vec![
            submission("s1", "u2", &[], 1, 2),
            submission("s2", "u3", &[], 2, 2),
        ];

        assert!((class_average(&submissions).unwrap() - 75.0).abs() < 1e-9);
        assert!((success_rate(&submissions, "u2").unwrap() - 50.0).abs() < 1e-9);
        assert!(success_rate(&submissions, "nobody").is_none());

        assert!(available_for(&quizzes, &submissions, "u2").is_empty());
        assert_eq!(available_for(&quizzes, &submissions, "u9").len(), 1);
    }
}
