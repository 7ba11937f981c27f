//! Thread-safe handle to a [`LanguageModel`].
//!
//! Uses `parking_lot::RwLock`: queries share the read lock. `train` builds the
//! new state with no lock held and takes the write lock only to swap it in, so
//! readers keep answering from the old model until the new one is complete.

use crate::config::ModelConfig;
use crate::error::Result;
use crate::model::{LanguageModel, TrainedState};
use parking_lot::{RwLock, RwLockReadGuard};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct SharedModel {
    inner: Arc<RwLock<LanguageModel>>,
}

impl SharedModel {
    pub fn new(config: ModelConfig) -> Result<Self> {
        Ok(Self::from(LanguageModel::new(config)?))
    }

    pub fn train(&self, text: &str) {
        let config = self.inner.read().config().clone();
        let state = TrainedState::build(&config, text);
        self.inner.write().install(state);
    }

    pub fn find_similar_contexts<S: AsRef<str>>(&self, query_words: &[S]) -> Vec<(usize, f64)> {
        self.inner.read().find_similar_contexts(query_words)
    }

    pub fn compute_relevance<S: AsRef<str>>(&self, candidate_word: &str, context_words: &[S]) -> f64 {
        self.inner.read().compute_relevance(candidate_word, context_words)
    }

    /// Read access for the accessors not mirrored here.
    pub fn read(&self) -> RwLockReadGuard<'_, LanguageModel> {
        self.inner.read()
    }
}

impl From<LanguageModel> for SharedModel {
    fn from(model: LanguageModel) -> Self {
        Self {
            inner: Arc::new(RwLock::new(model)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_concurrent_queries() {
        let shared = SharedModel::default();
        shared.train("The cat sat. The cat ran. A dog barked.");

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || {
                    let results = shared.find_similar_contexts(&["dog"]);
                    let relevance = shared.compute_relevance("dog", &["barked"]);
                    (results, relevance)
                })
            })
            .collect();

        for handle in handles {
            let (results, relevance) = handle.join().unwrap();
            assert_eq!(results[0].0, 2);
            assert!(relevance >= 1.0);
        }
    }

    #[test]
    fn test_queries_proceed_while_training() {
        let shared = SharedModel::default();
        shared.train("The cat sat. A dog barked.");

        let big: String = (0..2000).map(|i| format!("word{i} follows here. ")).collect();
        let trainer = {
            let shared = shared.clone();
            thread::spawn(move || shared.train(&big))
        };

        // Every read sees either the old model or the new one, never a mix.
        while !trainer.is_finished() {
            let sentences = shared.read().total_sentences();
            assert!(sentences == 2 || sentences == 2000);
        }
        trainer.join().unwrap();
        assert_eq!(shared.read().total_sentences(), 2000);
        assert!(shared.find_similar_contexts(&["dog"]).is_empty());
    }

    #[test]
    fn test_retrain_through_handle() {
        let shared = SharedModel::default();
        shared.train("One sentence here.");
        assert_eq!(shared.read().total_sentences(), 1);
        shared.train("First. Second. Third.");
        assert_eq!(shared.read().total_sentences(), 3);
    }
}
