//! Cross-engine test suite
//! Every engine is driven through the shared contract over the same
//! workloads, so a divergence in any single engine shows up as a diff
//! against the others.
