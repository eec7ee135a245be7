use tracing::debug;

use super::dataset::TrainingExample;
use super::metrics::EvaluationReport;
use crate::{Category, Fetcher, HeuristicClassifier, Normalizer};

/// Score the keyword heuristics alone (no reranking) against the gold
/// categories of `examples`. Pages that come back empty predict `Other`.
///
/// Returns `None` for an empty dataset.
pub fn evaluate_heuristics(
    examples: &[TrainingExample],
    fetcher: &dyn Fetcher,
    normalizer: &Normalizer,
    classifier: &HeuristicClassifier,
) -> Option<EvaluationReport> {
    let pairs = examples.iter().map(|example| {
        let page = fetcher.fetch(&example.url);
        let predicted = if page.is_empty() {
            Category::Other
        } else {
            classifier.classify(&normalizer.normalize_page(&page)).category
        };
        debug!(
            url = %example.url,
            gold = example.category.as_str(),
            predicted = predicted.as_str(),
            "heuristic evaluation"
        );
        (example.category, predicted)
    });

    EvaluationReport::from_pairs(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FetchStatus, Page};

    struct Pages;

    impl Fetcher for Pages {
        fn fetch(&self, url: &str) -> Page {
            match url {
                "https://diner.test" => Page::new("<p>See our dinner menu</p>", FetchStatus::Ok),
                "https://pub.test" => Page::new("<p>Weekly quiz night</p>", FetchStatus::Ok),
                _ => Page::unavailable(),
            }
        }
    }

    fn example(url: &str, category: Category) -> TrainingExample {
        TrainingExample {
            url: url.to_string(),
            text: String::new(),
            category,
        }
    }

    #[test]
    fn test_empty_dataset_is_none() {
        let report = evaluate_heuristics(
            &[],
            &Pages,
            &Normalizer::new(None),
            &HeuristicClassifier::new(),
        );
        assert!(report.is_none());
    }

    #[test]
    fn test_scores_heuristics() {
        let examples = vec![
            example("https://diner.test", Category::Restaurant),
            example("https://pub.test", Category::Bar),
            example("https://gone.test", Category::Cafe),
        ];
        let report = evaluate_heuristics(
            &examples,
            &Pages,
            &Normalizer::new(None),
            &HeuristicClassifier::new(),
        )
        .unwrap();

        assert_eq!(report.total, 3);
        assert_eq!(report.correct, 1);
        assert_eq!(report.class(Category::Restaurant).unwrap().recall, 1.0);
        assert_eq!(report.class(Category::Bar).unwrap().recall, 0.0);
        // two misses predicted Other
        assert_eq!(report.class(Category::Other).unwrap().support, 0);
        assert_eq!(report.class(Category::Other).unwrap().precision, 0.0);
    }
}
