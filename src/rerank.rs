//! Prior-label reranking.
//!
//! Every confirmed record votes for its category once per distinct tag token
//! of the record that also appears on the page. Tags are tokenized like page
//! text, so `real-estate` or `live music` vote through each of their words. The highest score overrides the heuristic
//! category; ties go to the category that scored first in corpus order.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::normalize::tokenize;
use crate::{Category, Corpus};

/// Result of reranking one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RerankOutcome {
    /// Final category
    pub category: Category,
    /// Nonzero scores, in the order each category first scored
    pub scores: Vec<(Category, u32)>,
    /// True when `category` differs from the heuristic category
    pub overridden: bool,
}

impl RerankOutcome {
    /// Score of one category (0 when it never scored).
    pub fn score(&self, category: Category) -> u32 {
        self.scores
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, s)| *s)
            .unwrap_or(0)
    }
}

pub struct Reranker<'a> {
    corpus: &'a Corpus,
}

impl<'a> Reranker<'a> {
    pub fn new(corpus: &'a Corpus) -> Self {
        Self { corpus }
    }

    /// Per-category vote totals for a token set.
    pub fn scores(&self, tokens: &HashSet<String>) -> Vec<(Category, u32)> {
        let mut scores: Vec<(Category, u32)> = Vec::new();
        if tokens.is_empty() {
            return scores;
        }

        for record in self.corpus {
            let tag_tokens: HashSet<String> =
                record.tags.iter().flat_map(|tag| tokenize(tag)).collect();
            let hits = tag_tokens.iter().filter(|t| tokens.contains(*t)).count() as u32;
            if hits == 0 {
                continue;
            }
            match scores.iter_mut().find(|(c, _)| *c == record.category) {
                Some((_, score)) => *score += hits,
                None => scores.push((record.category, hits)),
            }
        }
        scores
    }

    /// Rerank a heuristic category against the corpus.
    pub fn rerank(&self, tokens: &HashSet<String>, heuristic: Category) -> RerankOutcome {
        let scores = self.scores(tokens);

        // Strict `>` keeps the earliest category on ties
        let mut best: Option<(Category, u32)> = None;
        for &(category, score) in &scores {
            let better = match best {
                Some((_, top)) => score > top,
                None => true,
            };
            if better {
                best = Some((category, score));
            }
        }

        let category = best.map(|(c, _)| c).unwrap_or(heuristic);
        if let Some((winner, score)) = best {
            debug!(
                heuristic = heuristic.as_str(),
                winner = winner.as_str(),
                score,
                "prior labels matched"
            );
        }

        RerankOutcome {
            category,
            scores,
            overridden: category != heuristic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FetchStatus, LabelRecord};

    fn record(category: Category, tags: &[&str]) -> LabelRecord {
        LabelRecord::new(
            "https://example.test",
            FetchStatus::Ok,
            true,
            category,
            tags.iter().copied(),
        )
    }

    fn tokens(words: &[&str]) -> HashSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_empty_corpus_keeps_heuristic() {
        let corpus = Corpus::default();
        let outcome = Reranker::new(&corpus).rerank(&tokens(&["pub", "music"]), Category::Blog);
        assert_eq!(outcome.category, Category::Blog);
        assert!(outcome.scores.is_empty());
        assert!(!outcome.overridden);
    }

    #[test]
    fn test_no_overlap_keeps_heuristic() {
        let corpus = Corpus::from_records(vec![record(Category::Bar, &["pub"])]);
        let outcome = Reranker::new(&corpus).rerank(&tokens(&["menu"]), Category::Restaurant);
        assert_eq!(outcome.category, Category::Restaurant);
        assert!(!outcome.overridden);
    }

    #[test]
    fn test_prior_label_overrides_other() {
        let corpus = Corpus::from_records(vec![record(Category::Bar, &["pub", "music"])]);
        let outcome =
            Reranker::new(&corpus).rerank(&tokens(&["live", "music", "pub"]), Category::Other);
        assert_eq!(outcome.category, Category::Bar);
        assert_eq!(outcome.score(Category::Bar), 2);
        assert!(outcome.overridden);
    }

    #[test]
    fn test_same_category_is_not_an_override() {
        let corpus = Corpus::from_records(vec![record(Category::Bar, &["pub"])]);
        let outcome = Reranker::new(&corpus).rerank(&tokens(&["pub"]), Category::Bar);
        assert_eq!(outcome.category, Category::Bar);
        assert!(!outcome.overridden);
    }

    #[test]
    fn test_highest_score_wins() {
        let corpus = Corpus::from_records(vec![
            record(Category::Cafe, &["coffee"]),
            record(Category::Bar, &["pub", "music"]),
        ]);
        let outcome =
            Reranker::new(&corpus).rerank(&tokens(&["coffee", "pub", "music"]), Category::Other);
        assert_eq!(outcome.category, Category::Bar);
        assert_eq!(outcome.scores, vec![(Category::Cafe, 1), (Category::Bar, 2)]);
    }

    #[test]
    fn test_tie_goes_to_first_scored_category() {
        let corpus = Corpus::from_records(vec![
            record(Category::Cafe, &["coffee"]),
            record(Category::Bar, &["pub"]),
        ]);
        let page = tokens(&["coffee", "pub"]);
        let outcome = Reranker::new(&corpus).rerank(&page, Category::Other);
        assert_eq!(outcome.category, Category::Cafe);

        let reversed = Corpus::from_records(vec![
            record(Category::Bar, &["pub"]),
            record(Category::Cafe, &["coffee"]),
        ]);
        let outcome = Reranker::new(&reversed).rerank(&page, Category::Other);
        assert_eq!(outcome.category, Category::Bar);
    }

    #[test]
    fn test_losing_category_gains_one_per_matching_record() {
        let page = tokens(&["pub", "music", "coffee"]);
        let mut corpus = Corpus::from_records(vec![
            record(Category::Bar, &["pub"]),
            record(Category::Bar, &["music"]),
            record(Category::Cafe, &["coffee"]),
        ]);

        let before = Reranker::new(&corpus).rerank(&page, Category::Other);
        assert_eq!(before.category, Category::Bar);
        assert_eq!(before.score(Category::Cafe), 1);

        // 2 vs 2: Bar scored first and keeps the lead
        corpus.push(record(Category::Cafe, &["pub"]));
        let tied = Reranker::new(&corpus).rerank(&page, Category::Other);
        assert_eq!(tied.score(Category::Cafe), 2);
        assert_eq!(tied.category, Category::Bar);

        corpus.push(record(Category::Cafe, &["music"]));
        let after = Reranker::new(&corpus).rerank(&page, Category::Other);
        assert_eq!(after.score(Category::Cafe), 3);
        assert_eq!(after.score(Category::Bar), 2);
        assert_eq!(after.category, Category::Cafe);
    }

    #[test]
    fn test_hyphenated_and_multi_word_tags_vote_per_word() {
        let corpus = Corpus::from_records(vec![
            record(Category::RealEstate, &["real-estate"]),
            record(Category::Bar, &["live music"]),
        ]);
        let reranker = Reranker::new(&corpus);

        let outcome = reranker.rerank(&tokens(&["real", "estate", "agents"]), Category::Other);
        assert_eq!(outcome.category, Category::RealEstate);
        assert_eq!(outcome.score(Category::RealEstate), 2);

        let outcome = reranker.rerank(&tokens(&["music", "tonight"]), Category::Other);
        assert_eq!(outcome.category, Category::Bar);
        assert_eq!(outcome.score(Category::Bar), 1);
    }

    #[test]
    fn test_repeated_tag_word_counts_once_per_record() {
        let corpus = Corpus::from_records(vec![record(Category::Bar, &["music", "live music"])]);
        let outcome = Reranker::new(&corpus).rerank(&tokens(&["music"]), Category::Other);
        assert_eq!(outcome.score(Category::Bar), 1);
    }

    #[test]
    fn test_empty_page_keeps_heuristic() {
        let corpus = Corpus::from_records(vec![record(Category::Bar, &["pub"])]);
        let outcome = Reranker::new(&corpus).rerank(&HashSet::new(), Category::Other);
        assert_eq!(outcome.category, Category::Other);
        assert!(outcome.scores.is_empty());
    }
}
