//! Model configuration and its persisted form.
//!
//! Stored with `confy` as `narrowmind/config`. Besides the n-gram layout the
//! config carries `temperature` and `top_k`, which the model only hands out to
//! whatever sampler sits on top of it.

use crate::error::{Error, Result};
use ahash::{AHashMap, AHashSet};
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::Path;

const APP_NAME: &str = "narrowmind";
const CONFIG_NAME: &str = "config";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// N-gram orders to train, e.g. `[2, 3]`.
    pub ngram_orders: Vec<usize>,
    /// One blending weight per entry of `ngram_orders`.
    pub ngram_weights: Vec<f64>,
    /// Order backing the flat n-gram count table. `None` picks the largest order.
    pub primary_order: Option<usize>,
    pub temperature: f64,
    pub top_k: usize,
    /// Tokens kept on each side of a word in its context window.
    pub window_radius: usize,
    /// Upper bound on results from `find_similar_contexts`.
    pub max_similar_contexts: usize,
    /// How many contexts of a candidate word relevance scoring looks at.
    pub relevance_sample: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            ngram_orders: vec![2, 3],
            ngram_weights: vec![0.3, 0.5],
            primary_order: None,
            temperature: 1.0,
            top_k: 40,
            window_radius: 5,
            max_similar_contexts: 30,
            relevance_sample: 10,
        }
    }
}

impl ModelConfig {
    /// Default configuration with a custom n-gram layout.
    pub fn with_ngrams(orders: Vec<usize>, weights: Vec<f64>) -> Self {
        Self {
            ngram_orders: orders,
            ngram_weights: weights,
            ..Self::default()
        }
    }

    pub fn load() -> Result<Self> {
        match confy::load(APP_NAME, Some(CONFIG_NAME)) {
            Ok(config) => Ok(config),
            Err(err) => {
                warn!("Failed to load config, using defaults: {err}");
                Ok(Self::default())
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        confy::store(APP_NAME, Some(CONFIG_NAME), self)?;
        Ok(())
    }

    /// Load from an explicit file. A missing file is created with defaults.
    pub fn load_path(path: impl AsRef<Path>) -> Result<Self> {
        Ok(confy::load_path(path)?)
    }

    pub fn store_path(&self, path: impl AsRef<Path>) -> Result<()> {
        confy::store_path(path, self)?;
        Ok(())
    }

    /// Check the n-gram layout before any model is built from it.
    pub fn validate(&self) -> Result<()> {
        if self.ngram_orders.len() != self.ngram_weights.len() {
            return Err(Error::WeightCountMismatch {
                orders: self.ngram_orders.len(),
                weights: self.ngram_weights.len(),
            });
        }

        let mut seen = AHashSet::new();
        for (&order, &weight) in self.ngram_orders.iter().zip(&self.ngram_weights) {
            if order == 0 {
                return Err(Error::InvalidOrder(order));
            }
            if !seen.insert(order) {
                return Err(Error::DuplicateOrder(order));
            }
            if !weight.is_finite() || weight < 0.0 {
                return Err(Error::InvalidWeight { order, weight });
            }
        }

        if let Some(primary) = self.primary_order {
            if !seen.contains(&primary) {
                return Err(Error::UnknownPrimaryOrder(primary));
            }
        }

        Ok(())
    }

    /// The primary order, falling back to the largest configured order.
    pub fn resolved_primary_order(&self) -> Option<usize> {
        self.primary_order
            .or_else(|| self.ngram_orders.iter().copied().max())
    }

    /// Order -> weight, scaled to sum to 1.0. A zero total is left as is.
    pub fn normalized_weights(&self) -> AHashMap<usize, f64> {
        let mut weights: AHashMap<usize, f64> = self
            .ngram_orders
            .iter()
            .copied()
            .zip(self.ngram_weights.iter().copied())
            .collect();

        let total: f64 = weights.values().sum();
        if total > 0.0 {
            for weight in weights.values_mut() {
                *weight /= total;
            }
        }
        weights
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_normalize() {
        let weights = ModelConfig::default().normalized_weights();
        assert!((weights[&2] - 0.375).abs() < 1e-12);
        assert!((weights[&3] - 0.625).abs() < 1e-12);
        let total: f64 = weights.values().sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_total_weight_is_untouched() {
        let config = ModelConfig::with_ngrams(vec![2, 3], vec![0.0, 0.0]);
        let weights = config.normalized_weights();
        assert_eq!(weights[&2], 0.0);
        assert_eq!(weights[&3], 0.0);
    }

    #[test]
    fn test_validate_rejects_length_mismatch() {
        let config = ModelConfig::with_ngrams(vec![2, 3], vec![1.0]);
        assert!(matches!(
            config.validate(),
            Err(Error::WeightCountMismatch { orders: 2, weights: 1 })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_orders() {
        let zero = ModelConfig::with_ngrams(vec![0], vec![1.0]);
        assert!(matches!(zero.validate(), Err(Error::InvalidOrder(0))));

        let duplicate = ModelConfig::with_ngrams(vec![2, 2], vec![1.0, 1.0]);
        assert!(matches!(duplicate.validate(), Err(Error::DuplicateOrder(2))));

        let negative = ModelConfig::with_ngrams(vec![2], vec![-0.5]);
        assert!(matches!(negative.validate(), Err(Error::InvalidWeight { order: 2, .. })));

        let mut primary = ModelConfig::default();
        primary.primary_order = Some(4);
        assert!(matches!(primary.validate(), Err(Error::UnknownPrimaryOrder(4))));
    }

    #[test]
    fn test_empty_layout_is_valid() {
        let config = ModelConfig::with_ngrams(Vec::new(), Vec::new());
        assert!(config.validate().is_ok());
        assert_eq!(config.resolved_primary_order(), None);
    }

    #[test]
    fn test_primary_order_defaults_to_largest() {
        let config = ModelConfig::with_ngrams(vec![4, 2, 3], vec![0.2, 0.3, 0.5]);
        assert_eq!(config.resolved_primary_order(), Some(4));
    }

    #[test]
    fn test_store_and_load_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("narrowmind.toml");

        let mut config = ModelConfig::with_ngrams(vec![2, 4], vec![1.0, 3.0]);
        config.top_k = 12;
        config.store_path(&path).unwrap();

        let loaded = ModelConfig::load_path(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
