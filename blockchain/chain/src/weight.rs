// Copyright 2019-2023 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use blocks::Tipset;
use num_bigint::BigInt;

/// Accumulated weight of a chain, an opaque scalar to everything but the
/// calculator itself.
pub type Weight = BigInt;

/// Assigns a weight to a chain. The logic is consensus specific: it can
/// depend on the stake and power of validators, or be as simple as the
/// height of the blocks in a Nakamoto style consensus.
pub trait WeightCalculator {
    /// Calculates the accumulated weight of the tipset.
    fn calculate_weight(&self, tipset: &Tipset) -> anyhow::Result<Weight>;
}
