// Copyright 2019-2023 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::signature::Signature;
use address::Address;

/// Signer is a trait which allows a key implementation to sign data for an
/// address.
pub trait Signer {
    /// Signs arbitrary data with the key associated with the address.
    fn sign_bytes(&self, data: &[u8], address: &Address) -> Result<Signature, anyhow::Error>;
}
