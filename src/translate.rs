//! Best-effort translation to English.
//!
//! Translation is an optional capability handed to the [`Normalizer`]; when it
//! is absent or fails, the untranslated text is used.
//!
//! [`Normalizer`]: crate::Normalizer

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use url::Url;

use crate::{Config, Error};

/// Translates free text to English.
pub trait Translator {
    fn translate(&self, text: &str) -> Result<String, Error>;
}

/// Client for a LibreTranslate-compatible `/translate` endpoint.
pub struct HttpTranslator {
    agent: ureq::Agent,
    endpoint: String,
    api_key: Option<String>,
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

impl HttpTranslator {
    /// Create a client for the service rooted at `base_url`.
    pub fn new(base_url: &str, timeout: Duration, api_key: Option<String>) -> Result<Self, Error> {
        let base = Url::parse(base_url)
            .map_err(|e| Error::Translation(format!("invalid endpoint {base_url}: {e}")))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(Error::Translation(format!(
                "unsupported endpoint scheme: {}",
                base.scheme()
            )));
        }
        let endpoint = format!("{}/translate", base.as_str().trim_end_matches('/'));
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();

        Ok(Self {
            agent,
            endpoint,
            api_key,
        })
    }

    /// Build the optional translation capability from settings.
    ///
    /// Returns `None` when no endpoint is configured or the client cannot be
    /// set up; translation is then skipped everywhere.
    pub fn from_config(config: &Config) -> Option<Box<dyn Translator>> {
        let base_url = config.translate_url.as_deref()?;
        match Self::new(
            base_url,
            config.translate_timeout,
            config.translate_api_key.clone(),
        ) {
            Ok(translator) => {
                info!(endpoint = %translator.endpoint, "translation enabled");
                Some(Box::new(translator))
            }
            Err(e) => {
                warn!(error = %e, "translation disabled");
                None
            }
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Translator for HttpTranslator {
    fn translate(&self, text: &str) -> Result<String, Error> {
        let request = TranslateRequest {
            q: text,
            source: "auto",
            target: "en",
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        let response: TranslateResponse = self
            .agent
            .post(&self.endpoint)
            .send_json(&request)
            .map_err(|e| Error::Translation(e.to_string()))?
            .into_json()
            .map_err(|e| Error::Translation(e.to_string()))?;

        Ok(response.translated_text)
    }
}
