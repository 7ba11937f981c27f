//! NarrowMind - a small statistical language model over raw text.
//!
//! # Overview
//!
//! One call to [`LanguageModel::train`] turns a text into:
//! - sentence contexts with per-word occurrence and window indices
//! - weighted multi-order n-gram continuation tables
//! - TF-IDF vectors over the sentences
//!
//! The trained model then answers two kinds of questions for a generator
//! sitting on top of it: which tokens follow a given sequence, and which
//! sentences (and candidate words) are relevant to a set of query words.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   Raw text      │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ Tokenizer       │ ← tokens, sentences (tokenizer.rs, normalize.rs)
//! └───┬─────────┬───┘
//!     │         │
//!     ▼         ▼
//! ┌────────┐ ┌──────────────┐
//! │ N-gram │ │ Context index│ ← contexts, word -> contexts, windows (context.rs)
//! │ tables │ └──────┬───────┘
//! └────────┘        │
//!  (ngram.rs)       ▼
//!            ┌──────────────┐
//!            │ TF-IDF index │ ← idf, per-sentence vectors (tfidf.rs)
//!            └──────┬───────┘
//!                   │
//!                   ▼
//!            ┌──────────────┐
//!            │ Similarity & │ ← cosine, top-k sentences, relevance boost
//!            │ relevance    │   (similarity.rs, model.rs)
//!            └──────────────┘
//! ```
//!
//! # Modules
//!
//! - `config.rs`: n-gram layout, sampler settings, `confy` persistence
//! - `model.rs`: training entry point and the query API
//! - `shared.rs`: `RwLock` handle for concurrent readers
//!
//! # Example
//!
//! ```rust
//! use narrowmind::LanguageModel;
//!
//! let mut model = LanguageModel::default();
//! model.train("The cat sat on the mat. The dog sat on the rug. A bird sang.");
//!
//! let similar = model.find_similar_contexts(&["dog", "rug"]);
//! assert_eq!(similar[0].0, 1);
//!
//! let boost = model.compute_relevance("rug", &["dog"]);
//! assert!(boost >= 1.0);
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod model;
pub mod ngram;
pub mod normalize;
pub mod shared;
pub mod similarity;
pub mod tfidf;
pub mod tokenizer;

pub use config::ModelConfig;
pub use context::{Context, ContextWindow};
pub use error::{Error, Result};
pub use model::{LanguageModel, TrainedState};
pub use shared::SharedModel;
pub use similarity::{cosine_similarity, SparseVector};
