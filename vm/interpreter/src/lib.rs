// Copyright 2019-2023 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use blocks::Tipset;
use cid::Cid;
use ipld_blockstore::BlockStore;

/// Result of applying the messages of a tipset: the state root after
/// execution and the root of the produced receipts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpretResult {
    pub state_root: Cid,
    pub message_receipts: Cid,
}

/// Applies the messages of a tipset deterministically against its parent
/// state. Implementations may read and write the given store; identical
/// inputs must yield identical results on every honest node.
pub trait Interpreter<BS: BlockStore> {
    /// Opaque execution context threaded through unchanged by callers.
    type Indices;

    fn interpret(
        &self,
        store: &BS,
        tipset: &Tipset,
        indices: &Self::Indices,
    ) -> anyhow::Result<InterpretResult>;
}
