//! The `quizdeck init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create quizdeck.toml
    if std::path::Path::new("quizdeck.toml").exists() {
        println!("quizdeck.toml already exists, skipping.");
    } else {
        std::fs::write("quizdeck.toml", SAMPLE_CONFIG)?;
        println!("Created quizdeck.toml");
    }

    // Create example quiz file
    std::fs::create_dir_all("quizzes")?;
    let example_path = std::path::Path::new("quizzes/sample.toml");
    if example_path.exists() {
        println!("quizzes/sample.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_QUIZ)?;
        println!("Created quizzes/sample.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit quizdeck.toml with your API key");
    println!("  2. Run: quizdeck create --file quizzes/sample.toml");
    println!("  3. Run: quizdeck list");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizdeck configuration

default_source = "gemini"
question_count = 5
data_dir = "./quizdeck-data"

[sources.gemini]
type = "gemini"
api_key = "${GEMINI_API_KEY}"

[sources.mock]
type = "mock"
"#;

const EXAMPLE_QUIZ: &str = r#"[quiz]
title = "Modern Web Development Midterm"
topic = "React Hooks"
duration_minutes = 30
due_date = "2026-12-31T23:59:00Z"

[[questions]]
text = "Which hook manages local component state?"
type = "single"
options = ["useState", "useRef", "useMemo", "useId"]
correct_answers = [0]

[[questions]]
text = "Which hooks accept a dependency array?"
type = "multiple"
options = ["useEffect", "useState", "useMemo", "useContext"]
correct_answers = [0, 2]

[[questions]]
text = "What does useRef return?"
type = "single"
options = ["A state tuple", "A mutable ref object", "A memoized value", "A context value"]
correct_answers = [1]
"#;
