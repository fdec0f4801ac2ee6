//! Uniform index facade over the five engines
//!
//! Every engine is built from a key sequence and then queried through the
//! same contract: point lookups return the zero-based position of the key
//! (or its rank, for the node-based trees), range queries return matching
//! keys ascending, and `memory_usage` reports a byte estimate. The engines
//! are expressed as variants of a sum type so a benchmark harness can drive
//! any of them without dynamic dispatch.

use crate::bplus_tree::BPlusTree;
use crate::btree::BTree;
use crate::config::EngineConfig;
use crate::fiting_tree::FitingTree;
use crate::radix_spline::RadixSpline;
use crate::rmi::RmiIndex;
use crate::Key;

/// Common contract implemented by all five engines.
pub trait OrderedIndex {
    /// Replace any prior state with the given key sequence.
    fn build(&mut self, keys: &[Key]);

    /// Position of `key` in the engine's sorted order, or `None` when
    /// absent.
    fn lookup(&self, key: Key) -> Option<usize>;

    /// All keys in `[lo, hi]` ascending; empty when `lo > hi`.
    fn range_query(&self, lo: Key, hi: Key) -> Vec<Key>;

    /// Byte estimate of the engine's owned storage.
    fn memory_usage(&self) -> usize;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Names the five engine implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineKind {
    BTree,
    BPlusTree,
    Rmi,
    FitingTree,
    RadixSpline,
}

impl EngineKind {
    pub const ALL: [EngineKind; 5] = [
        EngineKind::BTree,
        EngineKind::BPlusTree,
        EngineKind::Rmi,
        EngineKind::FitingTree,
        EngineKind::RadixSpline,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EngineKind::BTree => "btree",
            EngineKind::BPlusTree => "bplus_tree",
            EngineKind::Rmi => "rmi",
            EngineKind::FitingTree => "fiting_tree",
            EngineKind::RadixSpline => "radix_spline",
        }
    }
}

/// Sum type over the engine implementations.
#[derive(Debug)]
pub enum IndexEngine {
    BTree(BTree<Key>),
    BPlusTree(BPlusTree),
    Rmi(RmiIndex),
    FitingTree(FitingTree),
    RadixSpline(RadixSpline),
}

impl IndexEngine {
    /// Construct an engine of the given kind from one configuration value.
    pub fn from_config(kind: EngineKind, config: &EngineConfig) -> Self {
        match kind {
            EngineKind::BTree => IndexEngine::BTree(BTree::new(config.btree_order)),
            EngineKind::BPlusTree => IndexEngine::BPlusTree(BPlusTree::new(config.btree_order)),
            EngineKind::Rmi => IndexEngine::Rmi(RmiIndex::new()),
            EngineKind::FitingTree => IndexEngine::FitingTree(FitingTree::new(config)),
            EngineKind::RadixSpline => IndexEngine::RadixSpline(RadixSpline::new(config.radix_bits)),
        }
    }

    pub fn kind(&self) -> EngineKind {
        match self {
            IndexEngine::BTree(_) => EngineKind::BTree,
            IndexEngine::BPlusTree(_) => EngineKind::BPlusTree,
            IndexEngine::Rmi(_) => EngineKind::Rmi,
            IndexEngine::FitingTree(_) => EngineKind::FitingTree,
            IndexEngine::RadixSpline(_) => EngineKind::RadixSpline,
        }
    }

    /// Whether the engine supports incremental insertion.
    pub fn supports_insert(&self) -> bool {
        matches!(
            self,
            IndexEngine::BTree(_) | IndexEngine::BPlusTree(_) | IndexEngine::FitingTree(_)
        )
    }

    /// Whether the engine supports deletion.
    pub fn supports_remove(&self) -> bool {
        matches!(self, IndexEngine::BTree(_))
    }

    /// Insert a key where the engine supports it; returns `false` for
    /// read-only engines and for a FITing-Tree duplicate.
    pub fn try_insert(&mut self, key: Key) -> bool {
        match self {
            IndexEngine::BTree(tree) => {
                tree.insert(key);
                true
            }
            IndexEngine::BPlusTree(tree) => {
                tree.insert(key);
                true
            }
            IndexEngine::FitingTree(tree) => tree.insert_in_place(key),
            IndexEngine::Rmi(_) | IndexEngine::RadixSpline(_) => false,
        }
    }

    /// Remove a key where the engine supports it.
    pub fn try_remove(&mut self, key: Key) -> bool {
        match self {
            IndexEngine::BTree(tree) => tree.remove(&key),
            _ => false,
        }
    }
}

impl OrderedIndex for IndexEngine {
    fn build(&mut self, keys: &[Key]) {
        match self {
            IndexEngine::BTree(e) => e.build(keys),
            IndexEngine::BPlusTree(e) => e.build(keys),
            IndexEngine::Rmi(e) => OrderedIndex::build(e, keys),
            IndexEngine::FitingTree(e) => OrderedIndex::build(e, keys),
            IndexEngine::RadixSpline(e) => OrderedIndex::build(e, keys),
        }
    }

    fn lookup(&self, key: Key) -> Option<usize> {
        match self {
            IndexEngine::BTree(e) => OrderedIndex::lookup(e, key),
            IndexEngine::BPlusTree(e) => OrderedIndex::lookup(e, key),
            IndexEngine::Rmi(e) => OrderedIndex::lookup(e, key),
            IndexEngine::FitingTree(e) => OrderedIndex::lookup(e, key),
            IndexEngine::RadixSpline(e) => OrderedIndex::lookup(e, key),
        }
    }

    fn range_query(&self, lo: Key, hi: Key) -> Vec<Key> {
        match self {
            IndexEngine::BTree(e) => OrderedIndex::range_query(e, lo, hi),
            IndexEngine::BPlusTree(e) => OrderedIndex::range_query(e, lo, hi),
            IndexEngine::Rmi(e) => OrderedIndex::range_query(e, lo, hi),
            IndexEngine::FitingTree(e) => OrderedIndex::range_query(e, lo, hi),
            IndexEngine::RadixSpline(e) => OrderedIndex::range_query(e, lo, hi),
        }
    }

    fn memory_usage(&self) -> usize {
        match self {
            IndexEngine::BTree(e) => OrderedIndex::memory_usage(e),
            IndexEngine::BPlusTree(e) => OrderedIndex::memory_usage(e),
            IndexEngine::Rmi(e) => OrderedIndex::memory_usage(e),
            IndexEngine::FitingTree(e) => OrderedIndex::memory_usage(e),
            IndexEngine::RadixSpline(e) => OrderedIndex::memory_usage(e),
        }
    }

    fn len(&self) -> usize {
        match self {
            IndexEngine::BTree(e) => OrderedIndex::len(e),
            IndexEngine::BPlusTree(e) => OrderedIndex::len(e),
            IndexEngine::Rmi(e) => OrderedIndex::len(e),
            IndexEngine::FitingTree(e) => OrderedIndex::len(e),
            IndexEngine::RadixSpline(e) => OrderedIndex::len(e),
        }
    }
}
