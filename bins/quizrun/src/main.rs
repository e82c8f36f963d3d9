mod call;
mod engine;
mod evaluator;
mod executor;
mod extractor;
mod injector;


use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use executor::Executor;
use quizrun_common::config::{GraderConfig, DEFAULT_CONFIG_PATH};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "quizrun")]
#[command(about = "quizrun - Grade a submitted function against a stored question", long_about = None)]
struct Cli {
    /// Path to the grader configuration (defaults apply when the file is missing)
    #[arg(long, global = true, env = "QUIZRUN_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a submission against a question and print Pass or Fail
    Run {
        /// Question name (directory under the questions root)
        question: String,

        /// Submission file, relative to the input directory unless absolute
        submission: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only the verdict
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = GraderConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config {}", cli.config.display()))?;

    info!(
        questions = %config.questions_dir.display(),
        scratch = %config.scratch_dir.display(),
        runtime = %config.runtime.command,
        "quizrun configured"
    );

    match cli.command {
        Commands::Run { question, submission } => {
            let executor = Executor::new(&config)?;
            let verdict = executor
                .grade(&question, &submission)
                .await
                .with_context(|| format!("Grading of question '{}' aborted", question))?;

            println!("{}", verdict);
        }
    }

    Ok(())
}
