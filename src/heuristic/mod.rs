//! Keyword heuristic classifier.
//!
//! Maps a normalized page to a business flag, a single category and a set of
//! tags. The three decisions are independent:
//!
//! - `business` fires on any business keyword
//! - `category` comes from an ordered rule list where the first match wins
//! - `tags` collects every tag rule that matches
//!
//! # Example
//!
//! ```
//! use sitelabel::{Category, HeuristicClassifier};
//!
//! let classifier = HeuristicClassifier::new();
//! let result = classifier.classify_text("Welcome to our shop! Buy now.");
//!
//! assert!(result.business);
//! assert_eq!(result.category, Category::Retail);
//! assert!(result.tags.contains("shop"));
//! ```

pub mod rules;
mod types;

pub use types::{CategoryRule, HeuristicResult, TagRule};

use std::collections::HashSet;

use crate::normalize::NormalizedPage;
use crate::Category;

/// Stateless keyword rule engine.
pub struct HeuristicClassifier {
    business_keywords: HashSet<&'static str>,
    category_rules: Vec<CategoryRule>,
    tag_rules: Vec<TagRule>,
}

impl HeuristicClassifier {
    /// Create a classifier with the default keyword tables.
    pub fn new() -> Self {
        Self::with_rules(
            rules::BUSINESS_KEYWORDS,
            rules::CATEGORY_RULES.to_vec(),
            rules::TAG_RULES.to_vec(),
        )
    }

    /// Create a classifier with custom rules. `category_rules` is evaluated
    /// in the given order.
    pub fn with_rules(
        business_keywords: &[&'static str],
        category_rules: Vec<CategoryRule>,
        tag_rules: Vec<TagRule>,
    ) -> Self {
        Self {
            business_keywords: business_keywords.iter().copied().collect(),
            category_rules,
            tag_rules,
        }
    }

    /// The category rules, in evaluation order.
    pub fn category_rules(&self) -> &[CategoryRule] {
        &self.category_rules
    }

    /// Classify a normalized page.
    pub fn classify(&self, page: &NormalizedPage) -> HeuristicResult {
        if page.is_empty() {
            return HeuristicResult::unclassifiable();
        }
        let tokens = &page.tokens;

        let business = self
            .business_keywords
            .iter()
            .any(|k| tokens.contains(*k));

        let category = self
            .category_rules
            .iter()
            .find(|rule| rule.matches(tokens))
            .map(|rule| rule.category)
            .unwrap_or(Category::Other);

        let tags = self
            .tag_rules
            .iter()
            .filter(|rule| rule.matches(tokens))
            .map(|rule| rule.tag.to_string())
            .collect();

        HeuristicResult {
            business,
            category,
            tags,
        }
    }

    /// Classify plain text (lowercased and tokenized first).
    pub fn classify_text(&self, text: &str) -> HeuristicResult {
        self.classify(&NormalizedPage::from_text(text))
    }
}

impl Default for HeuristicClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> HeuristicResult {
        HeuristicClassifier::new().classify_text(text)
    }

    fn tags(result: &HeuristicResult) -> Vec<&str> {
        result.tags.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_empty_text_is_unclassifiable() {
        let classifier = HeuristicClassifier::new();
        for _ in 0..3 {
            assert_eq!(classifier.classify_text(""), HeuristicResult::unclassifiable());
            assert_eq!(
                classifier.classify(&NormalizedPage::empty()),
                HeuristicResult::unclassifiable()
            );
        }
    }

    #[test]
    fn test_shop_page() {
        let result = classify("Welcome to our shop! Buy now.");
        assert!(result.business);
        assert_eq!(result.category, Category::Retail);
        assert_eq!(tags(&result), vec!["shop"]);
    }

    #[test]
    fn test_menu_beats_coffee_and_music() {
        let result = classify("Our menu features brewed coffee and live music.");
        assert!(!result.business);
        assert_eq!(result.category, Category::Restaurant);
        assert!(result.tags.contains("restaurant"));
        assert!(result.tags.contains("cafe"));
    }

    #[test]
    fn test_menu_beats_shop() {
        let result = classify("Order from our menu or visit the shop");
        assert_eq!(result.category, Category::Restaurant);
        assert!(result.business);
    }

    #[test]
    fn test_retail_beats_blog() {
        let result = classify("Read the blog, then browse the store");
        assert_eq!(result.category, Category::Retail);
        assert!(result.tags.contains("blog"));
        assert!(result.tags.contains("shop"));
    }

    #[test]
    fn test_blog_only() {
        let result = classify("My travel diary blog");
        // travel rule precedes blog
        assert_eq!(result.category, Category::Travel);
        let result = classify("Thoughts and posts from my blog");
        assert_eq!(result.category, Category::Blog);
        assert!(!result.business);
    }

    #[test]
    fn test_no_match_is_other() {
        let result = classify("lorem ipsum dolor sit amet");
        assert_eq!(result.category, Category::Other);
        assert!(result.tags.is_empty());
        assert!(!result.business);
    }

    #[test]
    fn test_substrings_do_not_match() {
        // "shopping" and "barn" are not whole-token keywords
        let result = classify("shopping barn");
        assert_eq!(result.category, Category::Other);
        assert!(!result.business);
    }

    #[test]
    fn test_rule_order_is_respected_for_every_pair() {
        let classifier = HeuristicClassifier::new();
        let rules = classifier.category_rules();
        for (i, earlier) in rules.iter().enumerate() {
            for later in &rules[i + 1..] {
                let text = format!("{} {}", later.keywords[0], earlier.keywords[0]);
                let result = classifier.classify_text(&text);
                assert_eq!(result.category, earlier.category, "text: {text}");
            }
        }
    }

    #[test]
    fn test_custom_rule_order() {
        let rules = vec![
            CategoryRule::new(Category::Blog, &["blog"]),
            CategoryRule::new(Category::Retail, &["shop"]),
        ];
        let classifier = HeuristicClassifier::with_rules(&["shop"], rules, vec![]);
        let result = classifier.classify_text("shop blog");
        assert_eq!(result.category, Category::Blog);
        assert!(result.business);
        assert!(result.tags.is_empty());
    }

    #[test]
    fn test_tags_independent_of_category() {
        let result = classify("Hotel bar with cocktails, live music and a gym");
        assert_eq!(result.category, Category::Bar);
        assert_eq!(tags(&result), vec!["bar", "fitness", "hotel", "music"]);
    }
}
