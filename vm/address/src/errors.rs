// Copyright 2019-2023 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use thiserror::Error;

/// Address error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("unknown protocol identifier {0}")]
    UnknownProtocol(u8),
    #[error("invalid payload of length {0} for protocol")]
    InvalidPayloadLength(usize),
    #[error("invalid BLS public key of length {0}")]
    InvalidBLSLength(usize),
    #[error("invalid SECP public key of length {0}")]
    InvalidSECPLength(usize),
    #[error("address bytes are too short")]
    InvalidLength,
    #[error("invalid ID payload: {0}")]
    InvalidIDPayload(String),
}
