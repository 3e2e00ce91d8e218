// Copyright 2019-2023 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use thiserror::Error;

/// Crypto error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("could not sign data: {0}")]
    Signing(String),
    #[error("could not aggregate signatures: {0}")]
    Aggregation(String),
    #[error("invalid signature bytes: {0}")]
    InvalidSignature(String),
}
