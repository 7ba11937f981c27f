//! Multi-order n-gram tables.
//!
//! For each configured order `n` the model maps every `(n-1)`-token prefix to
//! the tokens observed right after it, with counts. Alongside sit a flat count
//! table for the primary order, the vocabulary and unigram counts.
//!
//! # Backoff
//!
//! [`NgramModel::backoff_probability`] walks the orders from largest to
//! smallest:
//! - P(word | last n-1 tokens) if that prefix was seen followed by `word`
//! - P(word) from unigram counts otherwise
//! - a small epsilon (1e-9) for unseen words
//!
//! Continuations match tokens exactly, so "sat" and "sat." are different.

use ahash::{AHashMap, AHashSet};
use log::debug;

/// Ordered token sequence used as a table key.
pub type NgramKey = Vec<String>;
/// Continuation token -> count.
pub type Continuations = AHashMap<String, u64>;
/// Prefix of `n-1` tokens -> continuations, for one order `n`.
pub type NgramTable = AHashMap<NgramKey, Continuations>;

const UNSEEN_PROBABILITY: f64 = 1e-9;

#[derive(Debug, Default)]
pub struct NgramModel {
    /// Order -> prefix table.
    tables: AHashMap<usize, NgramTable>,
    primary_order: Option<usize>,
    /// Full n-token windows of the primary order -> count.
    primary_counts: AHashMap<NgramKey, u64>,
    vocabulary: Vec<String>,
    unigram_counts: AHashMap<String, u64>,
    total_unigrams: u64,
}

impl NgramModel {
    /// Count n-grams of every order in `orders` over the (already filtered)
    /// token stream.
    ///
    /// Orders longer than the stream get an empty table.
    pub fn train(tokens: &[String], orders: &[usize], primary_order: Option<usize>) -> Self {
        let mut model = Self {
            primary_order,
            ..Self::default()
        };

        for &order in orders {
            let table = model.tables.entry(order).or_default();
            if order == 0 || tokens.len() < order {
                debug!("Skipping {order}-grams: only {} tokens", tokens.len());
                continue;
            }

            for window in tokens.windows(order) {
                let (prefix, next) = window.split_at(order - 1);
                *table
                    .entry(prefix.to_vec())
                    .or_default()
                    .entry(next[0].clone())
                    .or_insert(0) += 1;

                if Some(order) == primary_order {
                    *model.primary_counts.entry(window.to_vec()).or_insert(0) += 1;
                }
            }
            debug!("Trained {order}-grams: {} distinct prefixes", table.len());
        }

        let mut seen = AHashSet::new();
        for token in tokens {
            if seen.insert(token.as_str()) {
                model.vocabulary.push(token.clone());
            }
            *model.unigram_counts.entry(token.clone()).or_insert(0) += 1;
            model.total_unigrams += 1;
        }

        model
    }

    pub fn table(&self, order: usize) -> Option<&NgramTable> {
        self.tables.get(&order)
    }

    /// Prefix table of the primary order.
    pub fn primary_table(&self) -> Option<&NgramTable> {
        self.primary_order.and_then(|order| self.table(order))
    }

    pub fn primary_order(&self) -> Option<usize> {
        self.primary_order
    }

    pub fn primary_counts(&self) -> &AHashMap<NgramKey, u64> {
        &self.primary_counts
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn unigram_counts(&self) -> &AHashMap<String, u64> {
        &self.unigram_counts
    }

    pub fn total_unigrams(&self) -> u64 {
        self.total_unigrams
    }

    /// Continuations of the last `order - 1` tokens of `context`.
    pub fn continuations(&self, order: usize, context: &[String]) -> Option<&Continuations> {
        if order == 0 || context.len() < order - 1 {
            return None;
        }
        let prefix = &context[context.len() - (order - 1)..];
        self.tables.get(&order)?.get(prefix)
    }

    /// Blend continuations across orders: `count * weight`, summed per token.
    ///
    /// Sorted by descending score, ties broken by token.
    pub fn weighted_continuations(
        &self,
        context: &[String],
        weights: &AHashMap<usize, f64>,
    ) -> Vec<(String, f64)> {
        let mut combined: AHashMap<&str, f64> = AHashMap::new();

        // Fixed order of addition keeps scores identical across runs.
        let mut orders: Vec<(usize, f64)> = weights.iter().map(|(&o, &w)| (o, w)).collect();
        orders.sort_unstable_by_key(|&(order, _)| order);

        for (order, weight) in orders {
            if weight == 0.0 {
                continue;
            }
            if let Some(continuations) = self.continuations(order, context) {
                for (token, &count) in continuations {
                    *combined.entry(token.as_str()).or_insert(0.0) += count as f64 * weight;
                }
            }
        }

        let mut scored: Vec<(String, f64)> = combined
            .into_iter()
            .map(|(token, score)| (token.to_string(), score))
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        scored
    }

    /// P(word | context) with backoff to lower orders and then unigrams.
    pub fn backoff_probability(&self, word: &str, context: &[String]) -> f64 {
        let mut orders: Vec<usize> = self.tables.keys().copied().collect();
        orders.sort_unstable_by(|a, b| b.cmp(a));

        for order in orders {
            if let Some(continuations) = self.continuations(order, context) {
                if let Some(&count) = continuations.get(word) {
                    let total: u64 = continuations.values().sum();
                    return count as f64 / total as f64;
                }
            }
        }

        if let Some(&count) = self.unigram_counts.get(word) {
            return count as f64 / self.total_unigrams as f64;
        }

        UNSEEN_PROBABILITY
    }
}
