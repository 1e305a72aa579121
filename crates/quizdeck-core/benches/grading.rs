use std::collections::HashMap;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use chrono::Utc;
use quizdeck_core::analytics::analyze;
use quizdeck_core::grading::grade;
use quizdeck_core::model::{Question, QuestionKind, Quiz, Submission};

fn make_questions(count: usize) -> Vec<Question> {
    (0..count)
        .map(|i| Question {
            id: format!("q{i}"),
            text: format!("question {i}"),
            kind: if i % 2 == 0 {
                QuestionKind::Single
            } else {
                QuestionKind::Multiple
            },
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct_answers: if i % 2 == 0 { vec![1] } else { vec![0, 2] },
        })
        .collect()
}

fn make_answers(questions: &[Question]) -> HashMap<String, Vec<usize>> {
    questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let selection = if i % 3 == 0 {
                q.correct_answers.clone()
            } else {
                vec![3]
            };
            (q.id.clone(), selection)
        })
        .collect()
}

fn make_submissions(quiz: &Quiz, count: usize) -> Vec<Submission> {
    (0..count)
        .map(|i| {
            let answers = make_answers(&quiz.questions);
            let report = grade(&quiz.questions, &answers);
            Submission {
                id: format!("s{i}"),
                quiz_id: quiz.id.clone(),
                student_id: format!("u{i}"),
                student_name: format!("student {i}"),
                answers,
                score: report.score,
                total_possible: report.total_possible,
                timestamp: Utc::now(),
                completed: true,
            }
        })
        .collect()
}

fn bench_grade(c: &mut Criterion) {
    let mut group = c.benchmark_group("grade");

    for count in [10usize, 50, 200] {
        let questions = make_questions(count);
        let answers = make_answers(&questions);
        group.bench_function(format!("questions={count}"), |b| {
            b.iter(|| grade(black_box(&questions), black_box(&answers)))
        });
    }

    group.finish();
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");

    let quiz = Quiz {
        id: "bench".into(),
        title: "Benchmark".into(),
        topic: "benchmarking".into(),
        duration_minutes: 30,
        due_date: Utc::now(),
        created_at: Utc::now(),
        questions: make_questions(20),
        created_by: "u1".into(),
    };

    for count in [10usize, 100, 500] {
        let submissions = make_submissions(&quiz, count);
        group.bench_function(format!("submissions={count}"), |b| {
            b.iter(|| analyze(black_box(&quiz), black_box(&submissions)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_grade, bench_analyze);
criterion_main!(benches);
