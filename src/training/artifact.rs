//! Persisted model: vectorizer and classifier in one JSON file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::logistic::LogisticRegression;
use super::tfidf::TfidfVectorizer;
use crate::{Category, Error};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub vectorizer: TfidfVectorizer,
    pub classifier: LogisticRegression,
}

impl ModelArtifact {
    pub fn new(vectorizer: TfidfVectorizer, classifier: LogisticRegression) -> Self {
        Self {
            vectorizer,
            classifier,
        }
    }

    /// Write the artifact, replacing any previous one.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        let json = serde_json::to_vec(self)?;
        fs::write(path, json)?;
        info!(path = %path.display(), terms = self.vectorizer.len(), "saved model");
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let bytes = fs::read(path.as_ref())?;
        let artifact: Self = serde_json::from_slice(&bytes)?;

        artifact.vectorizer.check()?;
        artifact.classifier.check()?;
        if artifact.classifier.n_features() != artifact.vectorizer.len() {
            return Err(Error::Model(format!(
                "classifier expects {} features, vectorizer has {}",
                artifact.classifier.n_features(),
                artifact.vectorizer.len()
            )));
        }
        Ok(artifact)
    }

    /// Predict the category of normalized text, with its probability.
    pub fn predict(&self, text: &str) -> (Category, f64) {
        let row = self.vectorizer.transform(text);
        self.classifier.predict(&row)
    }
}
