// Copyright 2019-2023 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::errors::Error;
use bls_signatures::{aggregate, Serialize as BlsSerialize, Signature as BlsSignature};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;

/// BLS signature length in bytes.
pub const BLS_SIG_LEN: usize = 96;

/// Secp256k1 signature length in bytes (64 plus the recovery byte).
pub const SECP_SIG_LEN: usize = 65;

/// Signature variant discriminant, used as the leading byte of the
/// serialized form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SignatureType {
    Secp256k1 = 1,
    Bls = 2,
}

/// A message signature. The two variants carry the raw signature bytes of
/// their respective schemes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Signature {
    Secp256k1(Vec<u8>),
    Bls(Vec<u8>),
}

impl Signature {
    /// Creates a secp256k1 signature from raw bytes.
    pub fn new_secp256k1(bytes: Vec<u8>) -> Self {
        Signature::Secp256k1(bytes)
    }

    /// Creates a BLS signature from raw bytes.
    pub fn new_bls(bytes: Vec<u8>) -> Self {
        Signature::Bls(bytes)
    }

    /// Returns the variant of the signature.
    pub fn signature_type(&self) -> SignatureType {
        match self {
            Signature::Secp256k1(_) => SignatureType::Secp256k1,
            Signature::Bls(_) => SignatureType::Bls,
        }
    }

    /// Returns the raw signature bytes, without the type byte.
    pub fn bytes(&self) -> &[u8] {
        match self {
            Signature::Secp256k1(bz) | Signature::Bls(bz) => bz,
        }
    }
}

impl Serialize for Signature {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let bytes = self.bytes();
        let mut bz = Vec::with_capacity(bytes.len() + 1);
        bz.push(self.signature_type() as u8);
        bz.extend_from_slice(bytes);
        serde_bytes::Serialize::serialize(&bz, serializer)
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bz: Cow<'de, [u8]> = serde_bytes::Deserialize::deserialize(deserializer)?;
        match bz.split_first() {
            Some((1, rest)) => Ok(Signature::Secp256k1(rest.to_vec())),
            Some((2, rest)) => Ok(Signature::Bls(rest.to_vec())),
            Some((b, _)) => Err(serde::de::Error::custom(format!(
                "invalid signature type byte {}",
                b
            ))),
            None => Err(serde::de::Error::custom("empty signature bytes")),
        }
    }
}

/// Aggregates a set of BLS signatures, given as raw bytes, into a single
/// signature. The empty set aggregates to the empty signature.
pub fn aggregate_bls_sigs(signatures: &[&[u8]]) -> Result<Signature, Error> {
    if signatures.is_empty() {
        return Ok(Signature::new_bls(Vec::new()));
    }

    let sigs: Vec<BlsSignature> = signatures
        .iter()
        .map(|bz| BlsSignature::from_bytes(bz))
        .collect::<Result<_, _>>()
        .map_err(|e| Error::InvalidSignature(e.to_string()))?;

    let agg = aggregate(&sigs).map_err(|e| Error::Aggregation(e.to_string()))?;
    Ok(Signature::new_bls(agg.as_bytes()))
}
