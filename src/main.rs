use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::info;

use sitelabel::training::{ModelArtifact, Trainer};
use sitelabel::{
    Category, Config, Corpus, Error, Fetcher, HeuristicClassifier, HttpFetcher, HttpTranslator,
    LabelRecord, Normalizer, Predictor, TrainerConfig,
};

#[derive(Parser)]
#[command(name = "sitelabel", about = "Website category classifier")]
struct Cli {
    /// Label corpus CSV (overrides SITELABEL_LABELS)
    #[arg(long, global = true)]
    labels: Option<PathBuf>,
    /// Model artifact JSON (overrides SITELABEL_MODEL)
    #[arg(long, global = true)]
    model: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify URLs with keyword rules and prior labels
    Predict {
        urls: Vec<String>,
        /// Read URLs from a file, one per line
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Confirm a label and append it to the corpus
    Label {
        url: String,
        #[arg(short, long)]
        category: String,
        #[arg(short, long)]
        business: bool,
        /// Comma-separated tags
        #[arg(short, long, default_value = "")]
        tags: String,
    },
    /// Build the dataset, evaluate heuristics and train the model
    Train,
    /// Classify URLs with the trained model
    ModelPredict {
        urls: Vec<String>,
        /// Read URLs from a file, one per line
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// List every category
    Categories,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env();
    if let Some(labels) = cli.labels {
        config.corpus_path = labels;
    }
    if let Some(model) = cli.model {
        config.artifact_path = model;
    }

    let fetcher = HttpFetcher::from_config(&config);
    let normalizer =
        Normalizer::new(HttpTranslator::from_config(&config)).with_max_chars(config.snippet_chars);

    match cli.command {
        Commands::Predict { urls, file } => {
            let urls = collect_urls(urls, file.as_deref())?;
            let corpus = Corpus::load(&config.corpus_path);
            let predictor = Predictor::new(Box::new(fetcher), normalizer, corpus);
            for url in urls {
                let prediction = predictor.predict(&url);
                println!("{}", serde_json::to_string(&prediction)?);
            }
        }
        Commands::Label {
            url,
            category,
            business,
            tags,
        } => {
            let category: Category = category.parse()?;
            let page = fetcher.fetch(&url);
            let record = LabelRecord::new(
                url,
                page.status,
                business,
                category,
                sitelabel::corpus::parse_tags(&tags),
            );
            Corpus::append(&config.corpus_path, &record)
                .with_context(|| format!("appending to {}", config.corpus_path.display()))?;
            println!("{}", serde_json::to_string(&record)?);
        }
        Commands::Train => {
            let corpus = Corpus::load_required(&config.corpus_path)?;
            let classifier = HeuristicClassifier::new();
            let trainer = Trainer::new(&fetcher, &normalizer, &classifier, TrainerConfig::default());

            match trainer.run(&corpus, &config.artifact_path) {
                Ok(summary) => {
                    match &summary.heuristic {
                        Some(report) => {
                            println!("Heuristic accuracy: {:.4}", report.accuracy);
                            println!("{report}");
                        }
                        None => println!("Heuristic evaluation: no examples"),
                    }
                    println!("Model accuracy: {:.4}", summary.model.accuracy);
                    println!("{}", summary.model);
                    println!("Model saved to {}", config.artifact_path.display());
                }
                Err(Error::NoTrainingData) => {
                    println!("No training data found in {}", config.corpus_path.display());
                }
                Err(e) => return Err(e.into()),
            }
        }
        Commands::ModelPredict { urls, file } => {
            let urls = collect_urls(urls, file.as_deref())?;
            let artifact = ModelArtifact::load(&config.artifact_path)
                .with_context(|| format!("loading {}", config.artifact_path.display()))?;
            info!(terms = artifact.vectorizer.len(), "loaded model");

            for url in urls {
                let page = fetcher.fetch(&url);
                let normalized = normalizer.normalize_page(&page);
                let (category, confidence) = if normalized.is_empty() {
                    (Category::Other, 0.0)
                } else {
                    artifact.predict(&normalized.text)
                };
                println!(
                    "{}",
                    serde_json::json!({
                        "url": url,
                        "status": page.status,
                        "category": category,
                        "confidence": confidence,
                    })
                );
            }
        }
        Commands::Categories => {
            for category in Category::ALL {
                println!("{category}");
            }
        }
    }

    Ok(())
}

/// URLs from the command line and `--file`, or from stdin when neither
/// gives any. Blank lines and `#` comments are skipped.
fn collect_urls(mut urls: Vec<String>, file: Option<&Path>) -> anyhow::Result<Vec<String>> {
    if let Some(path) = file {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        urls.extend(url_lines(&raw));
    }
    if urls.is_empty() {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        urls.extend(url_lines(&buffer));
    }

    if urls.is_empty() {
        bail!("no URLs given");
    }
    Ok(urls)
}

fn url_lines(raw: &str) -> impl Iterator<Item = String> + '_ {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
}
