// Copyright 2019-2023 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use thiserror::Error;

/// Encoding error for data serialized through any taiga supported protocol.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("could not encode in CBOR: {0}")]
    Marshalling(String),
    #[error("could not decode from CBOR: {0}")]
    Unmarshalling(String),
}

impl From<Error> for String {
    fn from(e: Error) -> Self {
        e.to_string()
    }
}
