//! indexlab - ordered integer-key indexes, classical and learned
//!
//! Five interchangeable engines over a sorted sequence of `u64` keys, built
//! for side-by-side comparison of classical search trees against learned
//! indexes:
//!
//! - **B-Tree**: classical multiway tree with in-node keys
//! - **B+-Tree**: keys in leaves, leaf chain for range scans
//! - **RMI**: two-stage linear models with error-bounded search envelopes
//! - **FITing-Tree**: piecewise-linear segmentation under a residual budget
//! - **RadixSpline**: radix prefix table over key-position spline points
//!
//! Every engine is built from a key sequence and then queried through the
//! same contract (`build`, `lookup`, `range_query`, `memory_usage`).
//! Engines are single-threaded; queries never mutate.
//!
//! ## Example
//!
//! ```rust
//! use indexlab::{EngineConfig, EngineKind, IndexEngine, OrderedIndex};
//!
//! let keys: Vec<u64> = (0..1000).map(|i| i * 3).collect();
//! let mut engine = IndexEngine::from_config(EngineKind::FitingTree, &EngineConfig::default());
//! engine.build(&keys);
//!
//! assert_eq!(engine.lookup(30), Some(10));
//! assert_eq!(engine.range_query(3, 12), vec![3, 6, 9, 12]);
//! ```

pub mod bplus_tree;
pub mod btree;
pub mod config;
pub mod engine;
pub mod error;
pub mod fiting_tree;
pub mod logging;
pub mod model_params;
pub mod radix_spline;
pub mod rmi;

mod bounds;

#[cfg(test)]
mod tests;

/// Key type shared by every engine.
pub type Key = u64;

// Re-export core types
pub use bplus_tree::BPlusTree;
pub use btree::BTree;
pub use config::EngineConfig;
pub use engine::{EngineKind, IndexEngine, OrderedIndex};
pub use error::{Error, Result};
pub use fiting_tree::FitingTree;
pub use logging::{init_from_env, init_logging, LogConfig};
pub use model_params::{load_params, parse_params, RmiParams};
pub use radix_spline::RadixSpline;
pub use rmi::RmiIndex;
