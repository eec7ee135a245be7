//! Markup normalization.
//!
//! Turns raw page markup into lowercase visible text and the token set the
//! keyword rules and the reranker match against.

use std::collections::HashSet;

use html2text::render::TrivialDecorator;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::{FetchStatus, Page, Translator};

/// Character budget of the text snippet kept per page.
pub const SNIPPET_CHARS: usize = 5000;

// Wide enough that html2text never wraps lines.
const EXTRACT_WIDTH: usize = 100_000;

// Blocks that never render as visible text
static HIDDEN_BLOCKS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?is)<script\b.*?</script\s*>|<style\b.*?</style\s*>|<noscript\b.*?</noscript\s*>|<!--.*?-->",
    )
    .unwrap()
});

/// Normalized page text and its token set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedPage {
    /// Lowercase visible text
    pub text: String,
    /// Distinct lowercase alphanumeric tokens of `text`
    pub tokens: HashSet<String>,
}

impl NormalizedPage {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Normalize already-extracted text (lowercase + tokenize).
    pub fn from_text(text: &str) -> Self {
        let text = text.to_lowercase();
        let tokens = tokenize(&text);
        Self { text, tokens }
    }

    /// True when the page is unclassifiable.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }
}

/// Split lowercase text into its distinct alphanumeric tokens.
pub fn tokenize(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Extract visible text from markup, with whitespace collapsed.
///
/// Link targets and image sources are not rendered, only their text.
pub fn visible_text(markup: &str) -> String {
    let stripped = HIDDEN_BLOCKS.replace_all(markup, " ");
    let rendered = html2text::config::with_decorator(TrivialDecorator::new())
        .string_from_read(stripped.as_bytes(), EXTRACT_WIDTH)
        .unwrap_or_else(|_| stripped.to_string());
    rendered.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Longest prefix of `text` holding at most `max_chars` characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Raw markup → normalized page, with optional translation.
pub struct Normalizer {
    translator: Option<Box<dyn Translator>>,
    max_chars: usize,
}

impl Normalizer {
    /// Create a normalizer; `None` means pages are never translated.
    pub fn new(translator: Option<Box<dyn Translator>>) -> Self {
        Self {
            translator,
            max_chars: SNIPPET_CHARS,
        }
    }

    /// Override the snippet character budget.
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    pub fn has_translator(&self) -> bool {
        self.translator.is_some()
    }

    /// Normalize raw markup.
    ///
    /// Empty markup and unavailable pages yield an empty page.
    pub fn normalize(&self, markup: &str, status: FetchStatus) -> NormalizedPage {
        if status == FetchStatus::Unavailable || markup.trim().is_empty() {
            return NormalizedPage::empty();
        }

        let text = visible_text(markup);
        let snippet = truncate_chars(&text, self.max_chars);
        let english = self.translate(snippet);
        NormalizedPage::from_text(&english)
    }

    pub fn normalize_page(&self, page: &Page) -> NormalizedPage {
        self.normalize(&page.content, page.status)
    }

    fn translate(&self, snippet: &str) -> String {
        let Some(translator) = &self.translator else {
            return snippet.to_string();
        };
        if snippet.is_empty() {
            return String::new();
        }

        match translator.translate(snippet) {
            Ok(translated) if !translated.trim().is_empty() => translated,
            Ok(_) => {
                debug!("translator returned empty text, keeping untranslated text");
                snippet.to_string()
            }
            Err(e) => {
                warn!(error = %e, "translation failed, keeping untranslated text");
                snippet.to_string()
            }
        }
    }
}
