//! Offline training from the label corpus.
//!
//! A run has four steps:
//! 1. Build the dataset: re-fetch every confirmed `ok` record
//! 2. Score the keyword heuristics against the dataset
//! 3. Fit TF-IDF + logistic regression on a seeded train/test split
//! 4. Persist the vectorizer and classifier as one artifact
//!
//! Steps 1 and 2 share a [`PageCache`] so each URL is fetched once per run.

pub mod artifact;
pub mod dataset;
mod evaluate;
pub mod logistic;
pub mod metrics;
mod split;
pub mod tfidf;

pub use artifact::ModelArtifact;
pub use dataset::{DatasetBuilder, TrainingExample};
pub use evaluate::evaluate_heuristics;
pub use metrics::EvaluationReport;
pub use split::train_test_split;

use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::{
    Category, Corpus, Error, Fetcher, HeuristicClassifier, Normalizer, PageCache, TrainerConfig,
};
use logistic::LogisticRegression;
use tfidf::{SparseVector, TfidfVectorizer};

/// A fitted model with its held-out evaluation.
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub artifact: ModelArtifact,
    pub report: EvaluationReport,
    pub train_size: usize,
    pub test_size: usize,
}

/// Everything a training run reports.
#[derive(Debug, Clone, Serialize)]
pub struct TrainingSummary {
    pub examples: usize,
    pub vocabulary: usize,
    pub train_size: usize,
    pub test_size: usize,
    /// Keyword heuristics scored on the whole dataset
    pub heuristic: Option<EvaluationReport>,
    /// Model scored on the held-out split
    pub model: EvaluationReport,
}

/// Fit the vectorizer on every example, then the classifier on the train
/// partition, and score it on the test partition.
pub fn train_model(
    examples: &[TrainingExample],
    config: &TrainerConfig,
) -> Result<TrainingOutcome, Error> {
    if examples.is_empty() {
        return Err(Error::NoTrainingData);
    }
    let (train_idx, test_idx) = train_test_split(examples.len(), config.test_fraction, config.seed)?;

    let texts: Vec<&str> = examples.iter().map(|e| e.text.as_str()).collect();
    let mut vectorizer = TfidfVectorizer::from_config(config);
    let rows = vectorizer.fit_transform(&texts);

    let train_rows: Vec<SparseVector> = train_idx.iter().map(|&i| rows[i].clone()).collect();
    let train_labels: Vec<Category> = train_idx.iter().map(|&i| examples[i].category).collect();

    let classifier = LogisticRegression::fit(&train_rows, &train_labels, vectorizer.len(), config)?;

    let pairs = test_idx
        .iter()
        .map(|&i| (examples[i].category, classifier.predict(&rows[i]).0));
    let report = EvaluationReport::from_pairs(pairs)
        .ok_or(Error::NotEnoughExamples(examples.len()))?;

    info!(
        train = train_idx.len(),
        test = test_idx.len(),
        terms = vectorizer.len(),
        classes = classifier.classes().len(),
        accuracy = report.accuracy,
        "trained model"
    );

    Ok(TrainingOutcome {
        artifact: ModelArtifact::new(vectorizer, classifier),
        report,
        train_size: train_idx.len(),
        test_size: test_idx.len(),
    })
}

/// Runs the full training pipeline against one fetcher.
pub struct Trainer<'a> {
    fetcher: &'a dyn Fetcher,
    normalizer: &'a Normalizer,
    classifier: &'a HeuristicClassifier,
    config: TrainerConfig,
}

impl<'a> Trainer<'a> {
    pub fn new(
        fetcher: &'a dyn Fetcher,
        normalizer: &'a Normalizer,
        classifier: &'a HeuristicClassifier,
        config: TrainerConfig,
    ) -> Self {
        Self {
            fetcher,
            normalizer,
            classifier,
            config,
        }
    }

    /// Build, evaluate, train and save to `artifact_path`.
    ///
    /// Fails with [`Error::NoTrainingData`] when no record survives the
    /// dataset builder; nothing is written in that case.
    pub fn run<P: AsRef<Path>>(
        &self,
        corpus: &Corpus,
        artifact_path: P,
    ) -> Result<TrainingSummary, Error> {
        let cache = PageCache::new(self.fetcher);

        let examples = DatasetBuilder::new(&cache, self.normalizer).build(corpus);
        info!(records = corpus.len(), examples = examples.len(), "built dataset");
        if examples.is_empty() {
            return Err(Error::NoTrainingData);
        }

        let heuristic = evaluate_heuristics(&examples, &cache, self.normalizer, self.classifier);
        if let Some(report) = &heuristic {
            info!(accuracy = report.accuracy, "evaluated heuristics");
        }

        let outcome = train_model(&examples, &self.config)?;
        outcome.artifact.save(artifact_path)?;

        Ok(TrainingSummary {
            examples: examples.len(),
            vocabulary: outcome.artifact.vectorizer.len(),
            train_size: outcome.train_size,
            test_size: outcome.test_size,
            heuristic,
            model: outcome.report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example(text: &str, category: Category) -> TrainingExample {
        TrainingExample {
            url: format!("https://{}.test", text.replace(' ', "-")),
            text: text.to_string(),
            category,
        }
    }

    #[test]
    fn test_empty_examples() {
        let result = train_model(&[], &TrainerConfig::default());
        assert!(matches!(result, Err(Error::NoTrainingData)));
    }

    #[test]
    fn test_single_example_cannot_split() {
        let result = train_model(&[example("menu", Category::Restaurant)], &TrainerConfig::default());
        assert!(matches!(result, Err(Error::NotEnoughExamples(1))));
    }

    #[test]
    fn test_split_sizes_reported() {
        let examples: Vec<TrainingExample> = (0..10)
            .map(|i| {
                let category = if i % 2 == 0 { Category::Cafe } else { Category::Bar };
                example(&format!("sample {i} words"), category)
            })
            .collect();
        let outcome = train_model(&examples, &TrainerConfig::default()).unwrap();
        assert_eq!(outcome.train_size, 8);
        assert_eq!(outcome.test_size, 2);
        assert_eq!(outcome.report.total, 2);
    }
}
