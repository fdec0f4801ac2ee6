//! Recursive Model Index - two-stage learned index over a sorted key array
//!
//! Stage 1 is a single linear model that routes a key to one of
//! `branch_factor` stage-2 sub-models; the chosen sub-model predicts the
//! key's position. Each sub-model carries the signed residual bounds
//! observed during training, so a correct answer is guaranteed to lie in
//! `[prediction + min_error, prediction + max_error]` and a binary search
//! restricted to that envelope suffices.
//!
//! Parameters are trained offline and ingested through the
//! [`crate::model_params`] artifact loader. Until parameters arrive the
//! index is "unloaded" and every query degrades to a full-array binary
//! search.

use std::mem;
use std::path::Path;

use tracing::{info, instrument};

use crate::bounds;
use crate::error::Result;
use crate::model_params::{self, RmiParams, StageTwoModel};
use crate::Key;

#[derive(Debug, Default)]
pub struct RmiIndex {
    keys: Vec<Key>,
    branch_factor: usize,
    stage1_slope: f64,
    stage1_intercept: f64,
    submodels: Vec<StageTwoModel>,
}

impl RmiIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the key array. Any previously loaded model is discarded:
    /// its residual bounds were measured against the old array.
    #[instrument(skip(self, input), fields(keys = input.len()))]
    pub fn build(&mut self, input: &[Key]) {
        let mut keys = input.to_vec();
        keys.sort_unstable();
        keys.dedup();
        info!(
            keys = keys.len(),
            "built RMI key array; queries use binary search until parameters load"
        );
        self.keys = keys;
        self.branch_factor = 0;
        self.stage1_slope = 0.0;
        self.stage1_intercept = 0.0;
        self.submodels.clear();
    }

    /// Load model parameters from an artifact file. On failure the index
    /// stays unloaded and lookups keep falling back to binary search.
    pub fn load_params(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let params = model_params::load_params(path)?;
        self.apply_params(params);
        Ok(())
    }

    /// Programmatic twin of [`Self::load_params`].
    pub fn apply_params(&mut self, params: RmiParams) {
        info!(
            branch_factor = params.branch_factor,
            "applying RMI model parameters"
        );
        self.branch_factor = params.branch_factor;
        self.stage1_slope = params.stage1.slope;
        self.stage1_intercept = params.stage1.intercept;
        self.submodels = params.stage2;
    }

    pub fn is_loaded(&self) -> bool {
        self.branch_factor > 0
    }

    pub fn branch_factor(&self) -> usize {
        self.branch_factor
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    fn submodel_for(&self, key: Key) -> &StageTwoModel {
        let raw = (self.stage1_slope * key as f64 + self.stage1_intercept).round();
        let idx = (raw.max(0.0) as usize).min(self.branch_factor - 1);
        &self.submodels[idx]
    }

    /// Inclusive position envelope for `key`, clamped to the key array.
    fn envelope(&self, key: Key) -> (usize, usize) {
        let n = self.keys.len();
        let model = self.submodel_for(key);
        let predicted = (model.slope * key as f64 + model.intercept).round();
        let lo = (predicted + model.min_error as f64).max(0.0) as usize;
        let hi = (predicted + model.max_error as f64).max(0.0) as usize;
        let lo = lo.min(n - 1);
        let hi = hi.min(n - 1);
        (lo, hi.max(lo))
    }

    /// Position of `key`, or `None` when absent.
    pub fn lookup(&self, key: Key) -> Option<usize> {
        if self.keys.is_empty() {
            return None;
        }
        if !self.is_loaded() {
            return self.keys.binary_search(&key).ok();
        }
        let (lo, hi) = self.envelope(key);
        let slice = &self.keys[lo..=hi];
        slice.binary_search(&key).ok().map(|i| lo + i)
    }

    /// All keys in `[lo_key, hi_key]`, ascending.
    pub fn range_query(&self, lo_key: Key, hi_key: Key) -> Vec<Key> {
        if lo_key > hi_key || self.keys.is_empty() {
            return Vec::new();
        }
        let n = self.keys.len();
        let start = if self.is_loaded() {
            let (elo, ehi) = self.envelope(lo_key);
            bounds::lower_bound_in(&self.keys, lo_key, elo, ehi)
        } else {
            bounds::lower_bound(&self.keys, lo_key)
        };
        // the upper iterator is searched from the lower iterator to the end
        // of the array, so a mispredicted envelope cannot truncate the range
        let end = if self.is_loaded() {
            bounds::upper_bound_in(&self.keys, hi_key, start, n - 1)
        } else {
            bounds::upper_bound(&self.keys, hi_key)
        };
        self.keys[start..end.max(start)].to_vec()
    }

    /// Byte estimate of the key array plus model state.
    pub fn memory_usage(&self) -> usize {
        mem::size_of::<Self>()
            + self.keys.capacity() * mem::size_of::<Key>()
            + self.submodels.capacity() * mem::size_of::<StageTwoModel>()
    }
}

impl crate::engine::OrderedIndex for RmiIndex {
    fn build(&mut self, keys: &[Key]) {
        RmiIndex::build(self, keys);
    }

    fn lookup(&self, key: Key) -> Option<usize> {
        RmiIndex::lookup(self, key)
    }

    fn range_query(&self, lo: Key, hi: Key) -> Vec<Key> {
        RmiIndex::range_query(self, lo, hi)
    }

    fn memory_usage(&self) -> usize {
        RmiIndex::memory_usage(self)
    }

    fn len(&self) -> usize {
        self.keys.len()
    }
}
