// Copyright 2019-2023 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

pub use cid::{Cid, Error, Version};
pub use multihash;
pub use multihash::Code;
use multihash::MultihashDigest;

/// Multicodec identifier for DAG-CBOR content.
pub const DAG_CBOR: u64 = 0x71;

/// Multicodec identifier for raw content.
pub const RAW: u64 = 0x55;

/// Constructs a v1 Cid for a DAG-CBOR encoded payload using the given hash function.
pub fn new_from_cbor(bz: &[u8], code: Code) -> Cid {
    let hash = code.digest(bz);
    Cid::new_v1(DAG_CBOR, hash)
}
