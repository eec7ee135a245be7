//! Core types for the keyword rule engine.

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

use crate::Category;

/// One entry of the ordered category rule list.
#[derive(Debug, Clone, Copy)]
pub struct CategoryRule {
    /// Category assigned when the rule fires
    pub category: Category,
    /// Fires when any of these tokens is on the page
    pub keywords: &'static [&'static str],
}

impl CategoryRule {
    pub const fn new(category: Category, keywords: &'static [&'static str]) -> Self {
        Self { category, keywords }
    }

    pub fn matches(&self, tokens: &HashSet<String>) -> bool {
        self.keywords.iter().any(|k| tokens.contains(*k))
    }
}

/// A tag rule. Every tag rule is evaluated independently.
#[derive(Debug, Clone, Copy)]
pub struct TagRule {
    pub tag: &'static str,
    pub keywords: &'static [&'static str],
}

impl TagRule {
    pub const fn new(tag: &'static str, keywords: &'static [&'static str]) -> Self {
        Self { tag, keywords }
    }

    pub fn matches(&self, tokens: &HashSet<String>) -> bool {
        self.keywords.iter().any(|k| tokens.contains(*k))
    }
}

/// Output of the keyword rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeuristicResult {
    pub business: bool,
    pub category: Category,
    pub tags: BTreeSet<String>,
}

impl HeuristicResult {
    /// The result for a page with nothing to classify.
    pub fn unclassifiable() -> Self {
        Self {
            business: false,
            category: Category::Other,
            tags: BTreeSet::new(),
        }
    }
}
