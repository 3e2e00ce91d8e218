// Copyright 2019-2023 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crypto::VRFProof;
use encoding::tuple::*;

/// A ticket is a marker of a tick of the blockchain's clock. It is the
/// source of randomness for proofs of storage and leader election, and it
/// orders the blocks within a tipset.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Default, Serialize_tuple, Deserialize_tuple, Hash)]
pub struct Ticket {
    /// A proof output by running a VRF on the VDF result of the parent ticket.
    pub vrfproof: VRFProof,
}

impl Ticket {
    /// Ticket constructor
    pub fn new(vrfproof: VRFProof) -> Self {
        Self { vrfproof }
    }
}

/// Proof of the miner's election for the epoch. Opaque to block assembly;
/// consensus validates it elsewhere.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize_tuple, Deserialize_tuple, Hash)]
pub struct ElectionProof {
    pub vrfproof: VRFProof,
}

impl ElectionProof {
    /// Election proof constructor
    pub fn new(vrfproof: VRFProof) -> Self {
        Self { vrfproof }
    }
}
