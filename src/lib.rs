//! Sitelabel - Website category classifier
//!
//! Assigns a business flag, a category and a set of descriptive tags to a
//! website from its rendered text.
//!
//! # Architecture
//!
//! Live predictions run a short pipeline:
//! 1. Fetch the page and normalize it to lowercase visible text
//! 2. Keyword heuristics (business flag, first-match category rules, tags)
//! 3. Prior-label reranking against the confirmed label corpus
//!
//! Separately, the [`training`] module turns the label corpus into a dataset,
//! scores the heuristics against it and fits a TF-IDF + logistic regression
//! model that is persisted as a single artifact.
//!
//! # Example
//!
//! ```no_run
//! use sitelabel::{Config, Corpus, HttpFetcher, Normalizer, Predictor};
//!
//! let config = Config::default();
//! let fetcher = HttpFetcher::from_config(&config);
//! let corpus = Corpus::load(&config.corpus_path);
//! let predictor = Predictor::new(Box::new(fetcher), Normalizer::new(None), corpus);
//!
//! let prediction = predictor.predict("https://example.com");
//! println!("Category: {}", prediction.category);
//! println!("Business: {}", prediction.business);
//! ```

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

pub use category::Category;
pub use config::{Config, TrainerConfig};
pub use corpus::{Corpus, LabelRecord};
pub use error::Error;
pub use fetch::{FetchStatus, Fetcher, HttpFetcher, Page, PageCache};
pub use heuristic::{HeuristicClassifier, HeuristicResult};
pub use normalize::{NormalizedPage, Normalizer};
pub use rerank::{RerankOutcome, Reranker};
pub use translate::{HttpTranslator, Translator};

mod category;
mod config;

// Confirmed label corpus (CSV record store)
pub mod corpus;

// Page retrieval
pub mod fetch;

// Keyword rule engine
pub mod heuristic;

// Markup to token stream
pub mod normalize;

// Prior-label category vote
pub mod rerank;

// Dataset building, evaluation and model training
pub mod training;

// Optional translation capability
pub mod translate;

mod error {
    use std::path::PathBuf;

    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum Error {
        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),
        #[error("CSV error: {0}")]
        Csv(#[from] csv::Error),
        #[error("JSON error: {0}")]
        Json(#[from] serde_json::Error),
        #[error("HTTP error: {0}")]
        Http(String),
        #[error("Translation error: {0}")]
        Translation(String),
        #[error("Unknown category: {0}")]
        UnknownCategory(String),
        #[error("Malformed label record: {0}")]
        MalformedRecord(String),
        #[error("Label corpus not found at {}", .0.display())]
        MissingCorpus(PathBuf),
        #[error("No trainable data in label corpus")]
        NoTrainingData,
        #[error("Not enough examples to split for training: {0}")]
        NotEnoughExamples(usize),
        #[error("Model error: {0}")]
        Model(String),
    }
}

/// What decided a prediction's category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionSource {
    /// Keyword rules, left as is by the reranker
    Rules,
    /// Prior labels overrode the keyword rules
    PriorLabels,
    /// Nothing to classify, so the fallback category
    Fallback,
}

impl PredictionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionSource::Rules => "rules",
            PredictionSource::PriorLabels => "prior_labels",
            PredictionSource::Fallback => "fallback",
        }
    }
}

/// Live classification result for one URL
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    /// The URL that was classified
    pub url: String,
    /// Outcome of the page fetch
    pub status: FetchStatus,
    /// Whether the page looks like a commercial site
    pub business: bool,
    /// Final category after reranking
    pub category: Category,
    /// Category chosen by the keyword rules alone
    pub heuristic_category: Category,
    /// Descriptive tags
    pub tags: BTreeSet<String>,
    /// What decided the category
    pub source: PredictionSource,
}

/// Live predictor: fetch → normalize → heuristics → prior-label reranking
pub struct Predictor {
    fetcher: Box<dyn Fetcher>,
    normalizer: Normalizer,
    classifier: HeuristicClassifier,
    corpus: Corpus,
}

impl Predictor {
    /// Create a predictor with the default keyword rules.
    pub fn new(fetcher: Box<dyn Fetcher>, normalizer: Normalizer, corpus: Corpus) -> Self {
        Self::with_classifier(fetcher, normalizer, HeuristicClassifier::new(), corpus)
    }

    pub fn with_classifier(
        fetcher: Box<dyn Fetcher>,
        normalizer: Normalizer,
        classifier: HeuristicClassifier,
        corpus: Corpus,
    ) -> Self {
        Self {
            fetcher,
            normalizer,
            classifier,
            corpus,
        }
    }

    /// The label corpus used for reranking
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Fetch and classify a URL. Never fails: unreachable pages come back as
    /// an `unavailable` prediction with the fallback category.
    pub fn predict(&self, url: &str) -> Prediction {
        let page = self.fetcher.fetch(url);
        self.predict_page(url, &page)
    }

    /// Classify already-fetched content.
    pub fn predict_page(&self, url: &str, page: &Page) -> Prediction {
        let normalized = self.normalizer.normalize_page(page);
        let heuristic = self.classifier.classify(&normalized);
        let outcome = Reranker::new(&self.corpus).rerank(&normalized.tokens, heuristic.category);

        let source = if normalized.is_empty() {
            PredictionSource::Fallback
        } else if outcome.overridden {
            PredictionSource::PriorLabels
        } else {
            PredictionSource::Rules
        };

        debug!(
            url,
            status = page.status.as_str(),
            heuristic = heuristic.category.as_str(),
            category = outcome.category.as_str(),
            source = source.as_str(),
            "classified page"
        );

        Prediction {
            url: url.to_string(),
            status: page.status,
            business: heuristic.business,
            category: outcome.category,
            heuristic_category: heuristic.category,
            tags: heuristic.tags,
            source,
        }
    }
}
