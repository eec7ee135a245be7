//! Multinomial logistic regression.
//!
//! Fitted by full-batch gradient descent on the mean cross-entropy plus an
//! L2 penalty of `1 / (2 · C · n)` on the weights (the bias is not
//! penalized).

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::tfidf::SparseVector;
use crate::{Category, Error, TrainerConfig};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    /// Class labels, sorted by name; row `k` of `weights` scores `classes[k]`
    classes: Vec<Category>,
    weights: Array2<f64>,
    bias: Array1<f64>,
}

impl LogisticRegression {
    /// Fit on sparse rows of width `n_features`. A single class yields a
    /// constant predictor.
    pub fn fit(
        rows: &[SparseVector],
        labels: &[Category],
        n_features: usize,
        config: &TrainerConfig,
    ) -> Result<Self, Error> {
        if rows.is_empty() {
            return Err(Error::Model("no training rows".to_string()));
        }
        if rows.len() != labels.len() {
            return Err(Error::Model(format!(
                "{} rows but {} labels",
                rows.len(),
                labels.len()
            )));
        }
        if config.c <= 0.0 {
            return Err(Error::Model(format!("C must be positive, got {}", config.c)));
        }

        let mut classes: Vec<Category> = labels.to_vec();
        classes.sort_by_key(|c| c.as_str());
        classes.dedup();

        let targets: Vec<usize> = labels
            .iter()
            .map(|label| classes.iter().position(|c| c == label).unwrap_or(0))
            .collect();

        let k = classes.len();
        let mut model = Self {
            classes,
            weights: Array2::zeros((k, n_features)),
            bias: Array1::zeros(k),
        };
        if k == 1 {
            debug!("single class, constant predictor");
            return Ok(model);
        }

        let n = rows.len() as f64;
        let lambda = 1.0 / (config.c * n);
        let learning_rate = 1.0 / (1.0 + lambda);

        for iter in 0..config.max_iter {
            let mut grad_w = Array2::<f64>::zeros((k, n_features));
            let mut grad_b = Array1::<f64>::zeros(k);

            for (row, &target) in rows.iter().zip(&targets) {
                let mut probs = model.probabilities(row);
                probs[target] -= 1.0;
                for (class, &err) in probs.iter().enumerate() {
                    grad_b[class] += err;
                    for (j, v) in row.iter() {
                        grad_w[[class, j]] += err * v;
                    }
                }
            }

            grad_w /= n;
            grad_b /= n;
            grad_w.scaled_add(lambda, &model.weights);

            let max_grad = grad_w
                .iter()
                .chain(grad_b.iter())
                .fold(0.0f64, |acc, g| acc.max(g.abs()));
            if max_grad < config.tolerance {
                debug!(iter, max_grad, "converged");
                break;
            }

            model.weights.scaled_add(-learning_rate, &grad_w);
            model.bias.scaled_add(-learning_rate, &grad_b);
        }

        Ok(model)
    }

    pub fn classes(&self) -> &[Category] {
        &self.classes
    }

    pub fn n_features(&self) -> usize {
        self.weights.ncols()
    }

    /// Reject a model whose weight rows and bias do not match its classes.
    pub fn check(&self) -> Result<(), Error> {
        let k = self.classes.len();
        if k == 0 {
            return Err(Error::Model("model has no classes".to_string()));
        }
        if self.weights.nrows() != k || self.bias.len() != k {
            return Err(Error::Model(format!(
                "{} classes but {} weight rows and {} biases",
                k,
                self.weights.nrows(),
                self.bias.len()
            )));
        }
        Ok(())
    }

    /// Class probabilities, aligned with [`classes`](Self::classes).
    pub fn probabilities(&self, row: &SparseVector) -> Vec<f64> {
        let logits: Vec<f64> = (0..self.classes.len())
            .map(|k| row.dot(self.weights.row(k)) + self.bias[k])
            .collect();
        softmax(&logits)
    }

    /// Most probable class and its probability.
    pub fn predict(&self, row: &SparseVector) -> (Category, f64) {
        let probs = self.probabilities(row);
        let mut best = 0;
        for (idx, p) in probs.iter().enumerate() {
            if *p > probs[best] {
                best = idx;
            }
        }
        (self.classes[best], probs[best])
    }
}

fn softmax(logits: &[f64]) -> Vec<f64> {
    let max = logits.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exp_sum: f64 = logits.iter().map(|x| (x - max).exp()).sum();
    logits.iter().map(|x| (x - max).exp() / exp_sum).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(usize, f64)]) -> SparseVector {
        SparseVector {
            indices: pairs.iter().map(|(i, _)| *i).collect(),
            values: pairs.iter().map(|(_, v)| *v).collect(),
        }
    }

    #[test]
    fn test_softmax_sums_to_one() {
        let probs = softmax(&[1.0, 2.0, 3.0]);
        assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!(probs[2] > probs[1] && probs[1] > probs[0]);
        // large logits stay finite
        let probs = softmax(&[1000.0, 0.0]);
        assert!((probs[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_class_is_constant() {
        let rows = vec![row(&[(0, 1.0)]), row(&[(1, 1.0)])];
        let labels = vec![Category::Bar, Category::Bar];
        let model = LogisticRegression::fit(&rows, &labels, 2, &TrainerConfig::default()).unwrap();

        assert_eq!(model.classes(), &[Category::Bar]);
        let (category, prob) = model.predict(&row(&[(1, 1.0)]));
        assert_eq!(category, Category::Bar);
        assert!((prob - 1.0).abs() < 1e-12);
        assert_eq!(model.predict(&SparseVector::default()).0, Category::Bar);
    }

    #[test]
    fn test_check_rejects_mismatched_bias() {
        let rows = vec![row(&[(0, 1.0)]), row(&[(1, 1.0)])];
        let labels = vec![Category::Bar, Category::Cafe];
        let mut model =
            LogisticRegression::fit(&rows, &labels, 2, &TrainerConfig::default()).unwrap();
        assert!(model.check().is_ok());

        model.bias = Array1::zeros(1);
        assert!(matches!(model.check(), Err(Error::Model(_))));
    }

    #[test]
    fn test_separable_classes() {
        let rows = vec![
            row(&[(0, 1.0)]),
            row(&[(0, 0.8), (2, 0.6)]),
            row(&[(1, 1.0)]),
            row(&[(1, 0.8), (2, 0.6)]),
        ];
        let labels = vec![Category::Cafe, Category::Cafe, Category::Bar, Category::Bar];
        let model = LogisticRegression::fit(&rows, &labels, 3, &TrainerConfig::default()).unwrap();

        assert_eq!(model.classes(), &[Category::Bar, Category::Cafe]);
        assert_eq!(model.n_features(), 3);
        assert_eq!(model.predict(&row(&[(0, 1.0)])).0, Category::Cafe);
        assert_eq!(model.predict(&row(&[(1, 1.0)])).0, Category::Bar);

        let probs = model.probabilities(&row(&[(0, 1.0)]));
        assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_is_deterministic() {
        let rows = vec![row(&[(0, 1.0)]), row(&[(1, 1.0)]), row(&[(0, 0.6), (1, 0.8)])];
        let labels = vec![Category::Blog, Category::News, Category::News];
        let config = TrainerConfig::default();
        let a = LogisticRegression::fit(&rows, &labels, 2, &config).unwrap();
        let b = LogisticRegression::fit(&rows, &labels, 2, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_mismatched_input_rejected() {
        let rows = vec![row(&[(0, 1.0)])];
        let result = LogisticRegression::fit(&rows, &[], 1, &TrainerConfig::default());
        assert!(matches!(result, Err(Error::Model(_))));
        let result = LogisticRegression::fit(&[], &[], 1, &TrainerConfig::default());
        assert!(matches!(result, Err(Error::Model(_))));
    }
}
