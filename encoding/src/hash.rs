// Copyright 2019-2023 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use blake2b_simd::Params;

/// Generates a blake2b hash with the provided output size.
pub fn blake2b_variable(ingest: &[u8], size: usize) -> Vec<u8> {
    let hash = Params::new()
        .hash_length(size)
        .to_state()
        .update(ingest)
        .finalize();

    hash.as_bytes().to_vec()
}

/// Generates a blake2b hash of fixed 32 byte size.
pub fn blake2b_256(ingest: &[u8]) -> [u8; 32] {
    let digest = Params::new()
        .hash_length(32)
        .to_state()
        .update(ingest)
        .finalize();

    let mut ret = [0u8; 32];
    ret.copy_from_slice(digest.as_bytes());
    ret
}
