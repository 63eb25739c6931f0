//! spam-rs: Naive Bayes spam filter CLI
//!
//! # Usage
//!
//! ```bash
//! # Train on a labeled corpus and write !prediction.txt into the test corpus
//! spam-rs run corpus/train corpus/test
//!
//! # Train, then label a single message
//! spam-rs classify corpus/train message.eml
//!
//! # Compare a corpus' !prediction.txt with its !truth.txt
//! spam-rs evaluate corpus/test
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use spam_rs::config::LoggingConfig;
use spam_rs::corpus::CorpusDir;
use spam_rs::evaluation::Confusion;
use spam_rs::{FilterConfig, SpamFilter};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "spam-rs")]
#[command(about = "Naive Bayes spam filter", long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train on a corpus and write predictions for another
    Run {
        /// Training corpus with a truth manifest
        train_dir: PathBuf,
        /// Corpus to classify
        test_dir: PathBuf,
        /// Print training statistics as JSON
        #[arg(long)]
        json: bool,
    },
    /// Train on a corpus and label a single message
    Classify {
        /// Training corpus with a truth manifest
        train_dir: PathBuf,
        /// Message file
        message: PathBuf,
    },
    /// Score a corpus' predictions against its truth manifest
    Evaluate {
        /// Corpus with both truth and prediction files
        dir: PathBuf,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct EvaluationReport {
    #[serde(flatten)]
    confusion: Confusion,
    accuracy: f64,
    quality: f64,
}

fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("spam_rs={}", config.level).into());
    let registry = tracing_subscriber::registry().with(filter);

    match config.format.as_str() {
        "json" => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        "compact" => registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .init(),
        _ => registry
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => FilterConfig::from_file(path)?,
        None => FilterConfig::default(),
    };

    init_logging(&config.logging);
    info!("Starting spam-rs v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Run {
            train_dir,
            test_dir,
            json,
        } => {
            let mut filter = SpamFilter::new(&config)?;
            let stats = filter.train(&train_dir).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            }

            let predictions = filter.test(&test_dir).await?;
            let spam = predictions.iter().filter(|(_, l)| l.is_spam()).count();
            println!(
                "Classified {} messages: {} SPAM, {} OK",
                predictions.len(),
                spam,
                predictions.len() - spam
            );
        }
        Commands::Classify { train_dir, message } => {
            let mut filter = SpamFilter::new(&config)?;
            filter.train(&train_dir).await?;

            let bytes = tokio::fs::read(&message)
                .await
                .with_context(|| format!("Failed to read {}", message.display()))?;
            let label = filter.classify(&String::from_utf8_lossy(&bytes))?;
            println!("{}", label);
        }
        Commands::Evaluate { dir, json } => {
            let corpus = CorpusDir::new(dir, config.corpus.clone());
            let truth = corpus.read_truth().await?;
            let predictions = corpus.read_predictions().await?;

            let confusion = Confusion::compare(&truth, &predictions);
            let report = EvaluationReport {
                confusion,
                accuracy: confusion.accuracy(),
                quality: confusion.quality(config.evaluation.false_positive_weight),
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Evaluated: {} messages", confusion.total());
                println!("  True positives:  {}", confusion.true_positives);
                println!("  False positives: {}", confusion.false_positives);
                println!("  True negatives:  {}", confusion.true_negatives);
                println!("  False negatives: {}", confusion.false_negatives);
                println!("Accuracy: {:.4}", report.accuracy);
                println!("Quality:  {:.4}", report.quality);
            }
        }
    }

    Ok(())
}
