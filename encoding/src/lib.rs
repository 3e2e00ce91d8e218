// Copyright 2019-2023 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod cbor;
mod errors;
mod hash;

pub use self::cbor::*;
pub use self::errors::*;
pub use self::hash::*;

pub use serde::{de, ser};
pub use serde_bytes;

pub mod tuple {
    pub use serde_tuple::{self, Deserialize_tuple, Serialize_tuple};
}

/// Serializes an object into canonical DAG-CBOR bytes.
pub fn to_vec<T>(obj: &T) -> Result<Vec<u8>, Error>
where
    T: ser::Serialize,
{
    serde_ipld_dagcbor::to_vec(obj).map_err(|e| Error::Marshalling(e.to_string()))
}

/// Deserializes an object from DAG-CBOR bytes.
pub fn from_slice<'a, T>(bz: &'a [u8]) -> Result<T, Error>
where
    T: de::Deserialize<'a>,
{
    serde_ipld_dagcbor::from_slice(bz).map_err(|e| Error::Unmarshalling(e.to_string()))
}
