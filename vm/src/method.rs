// Copyright 2019-2023 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use encoding::{de::DeserializeOwned, from_slice, to_vec, Error as EncodingError};
use serde::{Deserialize, Serialize};

/// Method number indexing an exported actor method.
pub type MethodNum = u64;

/// Base actor send method.
pub const METHOD_SEND: MethodNum = 0;

/// Base actor constructor method.
pub const METHOD_CONSTRUCTOR: MethodNum = 1;

/// Serialized bytes to be used as parameters into actor methods.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize, Hash, Default)]
#[serde(transparent)]
pub struct Serialized {
    #[serde(with = "serde_bytes")]
    bytes: Vec<u8>,
}

impl Serialized {
    /// Constructor for encoded bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Contructor for serializing an object.
    pub fn serialize<O: Serialize>(obj: O) -> Result<Self, EncodingError> {
        Ok(Self {
            bytes: to_vec(&obj)?,
        })
    }

    /// Returns reference to the encoded bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns whether the parameter bytes are empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Deserializes the encoded bytes into a defined type.
    pub fn deserialize<O: DeserializeOwned>(&self) -> Result<O, EncodingError> {
        from_slice(&self.bytes)
    }
}
