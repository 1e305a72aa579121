//! The grading engine.
//!
//! A pure, deterministic mapping from (question sequence, answer map) to
//! per-question verdicts and an aggregate score. No hidden state, no side
//! effects: identical inputs always produce identical output.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::model::Question;

/// Per-question correctness outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    /// The question this verdict is for.
    pub question_id: String,
    /// Whether the selection matched the correct set exactly.
    pub correct: bool,
    /// The option indices the learner had selected (empty if unattempted).
    pub selected: Vec<usize>,
}

/// The full outcome of grading one attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeReport {
    /// Verdicts in quiz question order.
    pub verdicts: Vec<Verdict>,
    /// Count of questions graded correct.
    pub score: u32,
    /// Count of questions in the quiz at grading time.
    pub total_possible: u32,
}

impl GradeReport {
    /// Score as a rounded percentage of the total possible.
    pub fn percentage(&self) -> u32 {
        if self.total_possible == 0 {
            return 0;
        }
        (f64::from(self.score) * 100.0 / f64::from(self.total_possible)).round() as u32
    }
}

/// Exact-set correctness: the selection matches iff it has the same size as
/// the correct-answer set and every selected index is a member of it.
///
/// Strict equality, not subset or superset — selecting one correct option
/// plus one wrong extra marks the question incorrect. An unattempted
/// question is an empty selection and goes through the same rule. Selections
/// are compared as sets, so duplicates and ordering are irrelevant.
pub fn is_correct(question: &Question, selected: &[usize]) -> bool {
    let selected: HashSet<usize> = selected.iter().copied().collect();
    let correct: HashSet<usize> = question.correct_answers.iter().copied().collect();
    selected.len() == correct.len() && selected.is_subset(&correct)
}

/// Grade an attempt: one verdict per question, score = count correct,
/// total possible = question count.
pub fn grade(questions: &[Question], answers: &HashMap<String, Vec<usize>>) -> GradeReport {
    static NO_SELECTION: &[usize] = &[];

    let verdicts: Vec<Verdict> = questions
        .iter()
        .map(|q| {
            let selected = answers.get(&q.id).map_or(NO_SELECTION, Vec::as_slice);
            Verdict {
                question_id: q.id.clone(),
                correct: is_correct(q, selected),
                selected: selected.to_vec(),
            }
        })
        .collect();

    let score = verdicts.iter().filter(|v| v.correct).count() as u32;

    GradeReport {
        score,
        total_possible: questions.len() as u32,
        verdicts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionKind;

    fn question(id: &str, kind: QuestionKind, correct: &[usize]) -> Question {
        Question {
            id: id.into(),
            text: format!("question {id}"),
            kind,
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct_answers: correct.to_vec(),
        }
    }

    fn answers(entries: &[(&str, &[usize])]) -> HashMap<String, Vec<usize>> {
        entries
            .iter()
            .map(|(id, sel)| (id.to_string(), sel.to_vec()))
            .collect()
    }

    #[test]
    fn single_correct_iff_selection_equals_sole_index() {
        let q = question("q1", QuestionKind::Single, &[1]);
        assert!(is_correct(&q, &[1]));
        assert!(!is_correct(&q, &[0]));
        assert!(!is_correct(&q, &[]));
    }

    #[test]
    fn multiple_requires_exact_set_equality() {
        let q = question("q1", QuestionKind::Multiple, &[0, 2]);
        assert!(is_correct(&q, &[0, 2]));
        assert!(is_correct(&q, &[2, 0]), "order must not matter");
        assert!(!is_correct(&q, &[0]), "subset is incorrect");
        assert!(!is_correct(&q, &[0, 1, 2]), "superset is incorrect");
        assert!(!is_correct(&q, &[1, 3]));
    }

    #[test]
    fn duplicate_selections_compare_as_a_set() {
        let q = question("q1", QuestionKind::Multiple, &[0, 1]);
        assert!(!is_correct(&q, &[0, 0]), "{{0}} is not {{0,1}}");
        assert!(is_correct(&q, &[0, 1, 1, 0]));
    }

    #[test]
    fn worked_scenario_from_the_design() {
        // Q1 single correct={1}, Q2 multiple correct={0,2}.
        let questions = vec![
            question("q1", QuestionKind::Single, &[1]),
            question("q2", QuestionKind::Multiple, &[0, 2]),
        ];

        let full = grade(&questions, &answers(&[("q1", &[1]), ("q2", &[0, 2])]));
        assert_eq!(full.score, 2);
        assert_eq!(full.total_possible, 2);

        let wrong = grade(&questions, &answers(&[("q1", &[0]), ("q2", &[0])]));
        assert_eq!(wrong.score, 0);

        let partial = grade(&questions, &answers(&[("q2", &[0, 2])]));
        assert_eq!(partial.score, 1, "unattempted Q1 grades incorrect");
        assert!(!partial.verdicts[0].correct);
        assert!(partial.verdicts[1].correct);
    }

    #[test]
    fn grading_is_deterministic_and_key_order_independent() {
        let questions = vec![
            question("q1", QuestionKind::Single, &[0]),
            question("q2", QuestionKind::Multiple, &[1, 2]),
            question("q3", QuestionKind::Single, &[3]),
        ];
        let a = answers(&[("q1", &[0]), ("q2", &[2, 1]), ("q3", &[3])]);
        let b = answers(&[("q3", &[3]), ("q1", &[0]), ("q2", &[1, 2])]);

        let first = grade(&questions, &a);
        let again = grade(&questions, &a);
        let reordered = grade(&questions, &b);

        assert_eq!(first.score, 3);
        assert_eq!(first.score, again.score);
        assert_eq!(first.score, reordered.score);
        for (x, y) in first.verdicts.iter().zip(reordered.verdicts.iter()) {
            assert_eq!(x.question_id, y.question_id);
            assert_eq!(x.correct, y.correct);
        }
    }

    #[test]
    fn score_bounded_by_total_possible() {
        let questions: Vec<Question> = (0..5)
            .map(|i| question(&format!("q{i}"), QuestionKind::Single, &[0]))
            .collect();
        let all = answers(&[
            ("q0", &[0]),
            ("q1", &[0]),
            ("q2", &[1]),
            ("q3", &[0]),
            ("q4", &[2]),
        ]);
        let report = grade(&questions, &all);
        assert_eq!(report.total_possible, 5);
        assert!(report.score <= report.total_possible);
        assert_eq!(report.score, 3);
    }

    #[test]
    fn empty_entry_and_missing_entry_both_grade_incorrect() {
        let questions = vec![question("q1", QuestionKind::Single, &[0])];
        let cleared = grade(&questions, &answers(&[("q1", &[])]));
        let untouched = grade(&questions, &HashMap::new());
        assert_eq!(cleared.score, 0);
        assert_eq!(untouched.score, 0);
        assert!(untouched.verdicts[0].selected.is_empty());
    }

    #[test]
    fn report_percentage() {
        let questions = vec![
            question("q1", QuestionKind::Single, &[0]),
            question("q2", QuestionKind::Single, &[0]),
            question("q3", QuestionKind::Single, &[0]),
        ];
        let report = grade(&questions, &answers(&[("q1", &[0]), ("q2", &[0])]));
        assert_eq!(report.percentage(), 67);
    }
}
