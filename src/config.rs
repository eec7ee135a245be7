//! Runtime settings.
//!
//! Defaults can be overridden through `SITELABEL_*` environment variables;
//! the binary applies CLI flags on top.

use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

/// Default location of the label corpus.
pub const DEFAULT_CORPUS_PATH: &str = "labels.csv";
/// Default location of the persisted model artifact.
pub const DEFAULT_ARTIFACT_PATH: &str = "model.json";

/// Pipeline settings shared by the live and training paths.
#[derive(Debug, Clone)]
pub struct Config {
    /// CSV file holding confirmed labels
    pub corpus_path: PathBuf,
    /// Where the trained model bundle is written
    pub artifact_path: PathBuf,
    /// Per-request timeout for page fetches
    pub fetch_timeout: Duration,
    /// Redirect hops followed before a fetch is given up
    pub max_redirects: usize,
    /// Character budget of the text snippet handed to translation and rules
    pub snippet_chars: usize,
    /// Base URL of a LibreTranslate-compatible service; `None` disables translation
    pub translate_url: Option<String>,
    pub translate_api_key: Option<String>,
    pub translate_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            corpus_path: PathBuf::from(DEFAULT_CORPUS_PATH),
            artifact_path: PathBuf::from(DEFAULT_ARTIFACT_PATH),
            fetch_timeout: Duration::from_secs(10),
            max_redirects: 5,
            snippet_chars: 5000,
            translate_url: None,
            translate_api_key: None,
            translate_timeout: Duration::from_secs(15),
        }
    }
}

impl Config {
    /// Build settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup. Unparseable values keep
    /// the default and log a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let number = |key: &str| get(key).and_then(|v| parse_or_warn::<u64>(&v, key));

        if let Some(path) = get("SITELABEL_LABELS") {
            config.corpus_path = PathBuf::from(path);
        }
        if let Some(path) = get("SITELABEL_MODEL") {
            config.artifact_path = PathBuf::from(path);
        }
        if let Some(secs) = number("SITELABEL_FETCH_TIMEOUT_SECS") {
            config.fetch_timeout = Duration::from_secs(secs);
        }
        if let Some(hops) = number("SITELABEL_MAX_REDIRECTS") {
            config.max_redirects = hops as usize;
        }
        if let Some(chars) = number("SITELABEL_SNIPPET_CHARS") {
            config.snippet_chars = chars as usize;
        }
        config.translate_url = get("SITELABEL_TRANSLATE_URL");
        config.translate_api_key = get("SITELABEL_TRANSLATE_API_KEY");
        if let Some(secs) = number("SITELABEL_TRANSLATE_TIMEOUT_SECS") {
            config.translate_timeout = Duration::from_secs(secs);
        }

        config
    }
}

fn parse_or_warn<T: std::str::FromStr>(value: &str, key: &str) -> Option<T> {
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!(key, value, "ignoring unparseable setting");
            None
        }
    }
}

/// Settings of a model training run.
#[derive(Debug, Clone)]
pub struct TrainerConfig {
    /// Vocabulary cap of the TF-IDF vectorizer
    pub max_features: usize,
    /// Smallest and largest n-gram length
    pub ngram_range: (usize, usize),
    /// Share of examples held out for evaluation
    pub test_fraction: f64,
    /// Seed of the train/test permutation
    pub seed: u64,
    /// Gradient descent iteration cap
    pub max_iter: usize,
    /// Inverse L2 regularization strength
    pub c: f64,
    /// Stop once the largest gradient component falls below this
    pub tolerance: f64,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            max_features: 10_000,
            ngram_range: (1, 2),
            test_fraction: 0.2,
            seed: 42,
            max_iter: 1000,
            c: 1.0,
            tolerance: 1e-4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config.corpus_path, PathBuf::from("labels.csv"));
        assert_eq!(config.artifact_path, PathBuf::from("model.json"));
        assert_eq!(config.fetch_timeout, Duration::from_secs(10));
        assert_eq!(config.snippet_chars, 5000);
        assert!(config.translate_url.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("SITELABEL_LABELS", "/tmp/l.csv"),
            ("SITELABEL_FETCH_TIMEOUT_SECS", "3"),
            ("SITELABEL_TRANSLATE_URL", "http://localhost:5000"),
        ]));
        assert_eq!(config.corpus_path, PathBuf::from("/tmp/l.csv"));
        assert_eq!(config.fetch_timeout, Duration::from_secs(3));
        assert_eq!(config.translate_url.as_deref(), Some("http://localhost:5000"));
    }

    #[test]
    fn test_bad_values_keep_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("SITELABEL_SNIPPET_CHARS", "lots"),
            ("SITELABEL_TRANSLATE_URL", "  "),
        ]));
        assert_eq!(config.snippet_chars, 5000);
        assert!(config.translate_url.is_none());
    }

    #[test]
    fn test_trainer_defaults() {
        let config = TrainerConfig::default();
        assert_eq!(config.max_features, 10_000);
        assert_eq!(config.ngram_range, (1, 2));
        assert_eq!(config.seed, 42);
    }
}
