//! Engine tuning knobs shared by the index facade

use serde::{Deserialize, Serialize};

/// Configuration for constructing index engines
///
/// One value covers all five engines; each engine reads only the fields it
/// cares about.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Minimum degree of the B-Tree and B+-Tree nodes.
    /// Node capacity is `2 * btree_order - 1` keys.
    pub btree_order: usize,

    /// Residual budget for FITing-Tree segmentation. A segment is closed as
    /// soon as its maximum absolute residual would exceed this bound.
    pub fiting_epsilon: f64,

    /// Staged inserts held per FITing-Tree segment before a spill.
    pub delta_capacity: usize,

    /// Aggregate staged-insert fraction of the key array that forces a
    /// global spill and rebuild.
    pub delta_spill_fraction: f64,

    /// Radix prefix width for the RadixSpline bucket table
    /// (`2^radix_bits` buckets).
    pub radix_bits: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            btree_order: 5,
            fiting_epsilon: 32.0,
            delta_capacity: 64,
            delta_spill_fraction: 0.10,
            radix_bits: 18,
        }
    }
}
