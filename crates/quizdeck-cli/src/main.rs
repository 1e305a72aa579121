//! quizdeck CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "quizdeck", version, about = "Timed quiz authoring, taking, and analytics")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Author a quiz from a TOML file
    Create {
        /// Path to the quiz authoring file
        #[arg(long)]
        file: PathBuf,

        /// Also generate this many questions about the quiz topic
        #[arg(long)]
        ai: Option<usize>,

        /// Question source to use for --ai (defaults to the configured one)
        #[arg(long)]
        source: Option<String>,

        /// Data directory override
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Generate candidate questions for a topic
    Generate {
        /// Topic to generate questions about
        #[arg(long)]
        topic: String,

        /// How many questions to ask for
        #[arg(long)]
        count: Option<usize>,

        /// Question source to use (defaults to the configured one)
        #[arg(long)]
        source: Option<String>,

        /// Write the questions to this TOML file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Take a quiz as the current learner
    Take {
        /// Quiz id or exact title
        #[arg(long)]
        quiz: String,

        /// TOML file with the selections to apply
        #[arg(long)]
        answers: Option<PathBuf>,

        /// Data directory override
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show the dashboard for the current role
    List {
        /// Data directory override
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Per-question accuracy and submissions for a quiz
    Analytics {
        /// Quiz id or exact title
        #[arg(long)]
        quiz: String,

        /// Data directory override
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Review a graded submission
    Result {
        /// Submission id
        #[arg(long)]
        submission: String,

        /// Data directory override
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show or switch the current role
    Role {
        /// Switch between the instructor and learner identities
        #[arg(long)]
        switch: bool,

        /// Data directory override
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and an example quiz file
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizdeck=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Create {
            file,
            ai,
            source,
            data_dir,
            config,
        } => commands::create::execute(file, ai, source, data_dir, config).await,
        Commands::Generate {
            topic,
            count,
            source,
            out,
            config,
        } => commands::generate::execute(topic, count, source, out, config).await,
        Commands::Take {
            quiz,
            answers,
            data_dir,
            config,
        } => commands::take::execute(quiz, answers, data_dir, config).await,
        Commands::List { data_dir, config } => commands::list::execute(data_dir, config),
        Commands::Analytics {
            quiz,
            data_dir,
            config,
        } => commands::analytics::execute(quiz, data_dir, config),
        Commands::Result {
            submission,
            data_dir,
            config,
        } => commands::result::execute(submission, data_dir, config),
        Commands::Role {
            switch,
            data_dir,
            config,
        } => commands::role::execute(switch, data_dir, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
