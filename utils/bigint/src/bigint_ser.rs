// Copyright 2019-2023 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::MAX_ENCODED_SIZE;
use num_bigint::{BigInt, Sign};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Wrapper for serializing a big int reference as chain bytes.
#[derive(Serialize)]
#[serde(transparent)]
pub struct BigIntSer<'a>(#[serde(with = "self")] pub &'a BigInt);

/// Wrapper for deserializing a big int from chain bytes.
#[derive(Deserialize, Serialize, Clone, Default, PartialEq, Eq, Debug)]
#[serde(transparent)]
pub struct BigIntDe(#[serde(with = "self")] pub BigInt);

/// Serializes a big int as a sign-prefixed big-endian byte string. Zero is
/// the empty byte string.
pub fn serialize<S>(int: &BigInt, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let (sign, mut bz) = int.to_bytes_be();
    match sign {
        Sign::Plus => bz.insert(0, 0),
        Sign::Minus => bz.insert(0, 1),
        Sign::NoSign => bz = Vec::new(),
    }
    if bz.len() > MAX_ENCODED_SIZE {
        return Err(serde::ser::Error::custom(format!(
            "big int of {} bytes exceeds the encoded limit",
            bz.len()
        )));
    }
    serde_bytes::Serialize::serialize(&bz, serializer)
}

/// Deserializes a sign-prefixed big-endian byte string into a big int.
pub fn deserialize<'de, D>(deserializer: D) -> Result<BigInt, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let bz: Cow<'de, [u8]> = serde_bytes::Deserialize::deserialize(deserializer)?;
    if bz.is_empty() {
        return Ok(BigInt::default());
    }
    if bz.len() > MAX_ENCODED_SIZE {
        return Err(serde::de::Error::custom(format!(
            "big int of {} bytes exceeds the encoded limit",
            bz.len()
        )));
    }
    let sign = match bz[0] {
        0 => Sign::Plus,
        1 => Sign::Minus,
        _ => {
            return Err(serde::de::Error::custom(
                "first byte must be a valid sign (0, 1)",
            ));
        }
    };
    Ok(BigInt::from_bytes_be(sign, &bz[1..]))
}
