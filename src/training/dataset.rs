//! Corpus → training examples.

use serde::Serialize;
use tracing::debug;

use crate::{Category, Corpus, FetchStatus, Fetcher, Normalizer};

/// One trainable example.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainingExample {
    pub url: String,
    /// Normalized page text
    pub text: String,
    /// Gold category from the corpus
    pub category: Category,
}

/// Re-fetches every confirmed `ok` record and keeps the ones that are still
/// reachable and non-empty.
pub struct DatasetBuilder<'a> {
    fetcher: &'a dyn Fetcher,
    normalizer: &'a Normalizer,
}

impl<'a> DatasetBuilder<'a> {
    pub fn new(fetcher: &'a dyn Fetcher, normalizer: &'a Normalizer) -> Self {
        Self {
            fetcher,
            normalizer,
        }
    }

    pub fn build(&self, corpus: &Corpus) -> Vec<TrainingExample> {
        let mut examples = Vec::new();

        for record in corpus {
            if record.status != FetchStatus::Ok {
                debug!(url = %record.url, status = record.status.as_str(), "skipping record");
                continue;
            }

            let page = self.fetcher.fetch(&record.url);
            if page.status != FetchStatus::Ok || page.is_empty() {
                debug!(url = %record.url, status = page.status.as_str(), "dropping unreachable page");
                continue;
            }

            let normalized = self.normalizer.normalize_page(&page);
            if normalized.is_empty() {
                debug!(url = %record.url, "dropping page without text");
                continue;
            }

            examples.push(TrainingExample {
                url: record.url.clone(),
                text: normalized.text,
                category: record.category,
            });
        }

        examples
    }
}
