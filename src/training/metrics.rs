//! Single-label classification metrics.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::Category;

#[derive(Debug, Default, Clone, Copy)]
struct LabelStats {
    true_positive: usize,
    false_positive: usize,
    false_negative: usize,
    support: usize,
}

/// Precision, recall and F1 for one category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassMetrics {
    pub category: Category,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Number of gold examples of this category
    pub support: usize,
}

/// Unweighted or support-weighted average over categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AverageMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

/// Accuracy plus per-category breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    pub accuracy: f64,
    pub total: usize,
    pub correct: usize,
    /// Every category seen in gold or predicted labels, sorted by name
    pub per_class: Vec<ClassMetrics>,
    pub macro_avg: AverageMetrics,
    pub weighted_avg: AverageMetrics,
}

impl EvaluationReport {
    /// Score predictions against gold labels. `None` when there is nothing
    /// to score.
    pub fn from_pairs<I>(pairs: I) -> Option<Self>
    where
        I: IntoIterator<Item = (Category, Category)>,
    {
        let mut calculator = MetricsCalculator::default();
        for (gold, predicted) in pairs {
            calculator.push(gold, predicted);
        }
        calculator.finalize()
    }

    pub fn class(&self, category: Category) -> Option<&ClassMetrics> {
        self.per_class.iter().find(|m| m.category == category)
    }
}

/// Accumulates (gold, predicted) pairs.
#[derive(Debug, Default)]
pub struct MetricsCalculator {
    // Keyed by name so reports list categories alphabetically
    per_label: BTreeMap<&'static str, (Category, LabelStats)>,
    total: usize,
    correct: usize,
}

impl MetricsCalculator {
    pub fn push(&mut self, gold: Category, predicted: Category) {
        self.total += 1;
        if gold == predicted {
            self.correct += 1;
        }

        self.stats(gold).support += 1;
        if gold == predicted {
            self.stats(gold).true_positive += 1;
        } else {
            self.stats(gold).false_negative += 1;
            self.stats(predicted).false_positive += 1;
        }
    }

    fn stats(&mut self, category: Category) -> &mut LabelStats {
        &mut self
            .per_label
            .entry(category.as_str())
            .or_insert((category, LabelStats::default()))
            .1
    }

    pub fn finalize(&self) -> Option<EvaluationReport> {
        if self.total == 0 {
            return None;
        }

        let per_class: Vec<ClassMetrics> = self
            .per_label
            .values()
            .map(|(category, stats)| {
                let precision = ratio(stats.true_positive, stats.true_positive + stats.false_positive);
                let recall = ratio(stats.true_positive, stats.true_positive + stats.false_negative);
                let f1 = if precision + recall > 0.0 {
                    2.0 * precision * recall / (precision + recall)
                } else {
                    0.0
                };
                ClassMetrics {
                    category: *category,
                    precision,
                    recall,
                    f1,
                    support: stats.support,
                }
            })
            .collect();

        let n_classes = per_class.len() as f64;
        let macro_avg = AverageMetrics {
            precision: per_class.iter().map(|m| m.precision).sum::<f64>() / n_classes,
            recall: per_class.iter().map(|m| m.recall).sum::<f64>() / n_classes,
            f1: per_class.iter().map(|m| m.f1).sum::<f64>() / n_classes,
        };

        let total_support: usize = per_class.iter().map(|m| m.support).sum();
        let weighted = |f: fn(&ClassMetrics) -> f64| {
            if total_support == 0 {
                return 0.0;
            }
            per_class
                .iter()
                .map(|m| f(m) * m.support as f64)
                .sum::<f64>()
                / total_support as f64
        };
        let weighted_avg = AverageMetrics {
            precision: weighted(|m: &ClassMetrics| m.precision),
            recall: weighted(|m: &ClassMetrics| m.recall),
            f1: weighted(|m: &ClassMetrics| m.f1),
        };

        Some(EvaluationReport {
            accuracy: ratio(self.correct, self.total),
            total: self.total,
            correct: self.correct,
            per_class,
            macro_avg,
            weighted_avg,
        })
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>16} {:>9} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for m in &self.per_class {
            writeln!(
                f,
                "{:>16} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                m.category.as_str(),
                m.precision,
                m.recall,
                m.f1,
                m.support
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>16} {:>9} {:>9} {:>9.2} {:>9}",
            "accuracy", "", "", self.accuracy, self.total
        )?;
        for (name, avg) in [("macro avg", &self.macro_avg), ("weighted avg", &self.weighted_avg)] {
            writeln!(
                f,
                "{:>16} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                name, avg.precision, avg.recall, avg.f1, self.total
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty_is_none() {
        assert!(EvaluationReport::from_pairs(Vec::<(Category, Category)>::new()).is_none());
    }

    #[test]
    fn test_perfect_predictions() {
        let report = EvaluationReport::from_pairs(vec![
            (Category::Bar, Category::Bar),
            (Category::Cafe, Category::Cafe),
        ])
        .unwrap();
        assert!(approx(report.accuracy, 1.0));
        assert!(approx(report.macro_avg.f1, 1.0));
        assert_eq!(report.per_class.len(), 2);
    }

    #[test]
    fn test_mixed_predictions() {
        // gold:  Bar Bar Cafe Blog
        // pred:  Bar Cafe Cafe Other
        let report = EvaluationReport::from_pairs(vec![
            (Category::Bar, Category::Bar),
            (Category::Bar, Category::Cafe),
            (Category::Cafe, Category::Cafe),
            (Category::Blog, Category::Other),
        ])
        .unwrap();

        assert!(approx(report.accuracy, 0.5));
        assert_eq!(report.correct, 2);

        let bar = report.class(Category::Bar).unwrap();
        assert!(approx(bar.precision, 1.0));
        assert!(approx(bar.recall, 0.5));
        assert_eq!(bar.support, 2);

        let cafe = report.class(Category::Cafe).unwrap();
        assert!(approx(cafe.precision, 0.5));
        assert!(approx(cafe.recall, 1.0));

        // predicted-only label is reported with zero support
        let other = report.class(Category::Other).unwrap();
        assert_eq!(other.support, 0);
        assert!(approx(other.precision, 0.0));
        assert!(approx(other.f1, 0.0));

        let names: Vec<&str> = report.per_class.iter().map(|m| m.category.as_str()).collect();
        assert_eq!(names, vec!["Bar", "Blog", "Cafe", "Other"]);
    }

    #[test]
    fn test_weighted_average_uses_support() {
        let report = EvaluationReport::from_pairs(vec![
            (Category::Bar, Category::Bar),
            (Category::Bar, Category::Bar),
            (Category::Bar, Category::Bar),
            (Category::Cafe, Category::Bar),
        ])
        .unwrap();
        // Bar recall 1.0 (support 3), Cafe recall 0.0 (support 1)
        assert!(approx(report.weighted_avg.recall, 0.75));
        assert!(approx(report.macro_avg.recall, 0.5));
    }

    #[test]
    fn test_display_lists_every_class() {
        let report =
            EvaluationReport::from_pairs(vec![(Category::RealEstate, Category::Legal)]).unwrap();
        let table = report.to_string();
        assert!(table.contains("Real Estate"));
        assert!(table.contains("Legal"));
        assert!(table.contains("accuracy"));
        assert!(table.contains("weighted avg"));
    }
}
