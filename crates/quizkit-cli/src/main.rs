//! quizkit CLI: import, export, and grade quiz questions.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod fs;

#[derive(Parser)]
#[command(name = "quizkit", version, about = "Quiz question bank toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a CSV or JSON import file without saving anything
    Validate {
        /// Path to the .csv or .json file
        #[arg(long)]
        file: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Import a CSV or JSON file into a question bank
    Import {
        /// Path to the .csv or .json file
        #[arg(long)]
        file: PathBuf,

        /// Topic the questions belong to
        #[arg(long)]
        topic: String,

        /// Author recorded on every imported question
        #[arg(long, default_value = "quizkit")]
        created_by: String,

        /// Question bank JSON to write
        #[arg(long, default_value = "questions.json")]
        output: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Export a question bank as CSV or JSON
    Export {
        /// Question bank JSON produced by `import`
        #[arg(long)]
        bank: PathBuf,

        /// Output format: csv, json
        #[arg(long, default_value = "csv")]
        format: String,

        /// Output file or directory
        #[arg(long, default_value = ".")]
        output: PathBuf,
    },

    /// Write the CSV import template
    Template {
        /// Output file or directory
        #[arg(long, default_value = ".")]
        output: PathBuf,
    },

    /// Grade a learner's answers against a question bank
    Grade {
        /// Question bank JSON produced by `import`
        #[arg(long)]
        bank: PathBuf,

        /// Answers JSON: {"<question id>": [option indices]}
        #[arg(long)]
        answers: PathBuf,

        /// Passing threshold in percent (default from config)
        #[arg(long)]
        threshold: Option<u8>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print an empty question of the given type as JSON
    New {
        /// Question type: single_choice, multiple_choice, true_false, code
        #[arg(long = "type", default_value = "single_choice")]
        question_type: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("quizkit=info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { file, config } => commands::validate::execute(file, config),
        Commands::Import {
            file,
            topic,
            created_by,
            output,
            config,
        } => commands::import::execute(file, topic, created_by, output, config),
        Commands::Export {
            bank,
            format,
            output,
        } => commands::export::execute(bank, format, output),
        Commands::Template { output } => commands::template::execute(output),
        Commands::Grade {
            bank,
            answers,
            threshold,
            format,
            config,
        } => commands::grade::execute(bank, answers, threshold, format, config),
        Commands::New {
            question_type,
            config,
        } => commands::new::execute(question_type, config),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
