// Copyright 2019-2023 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use thiserror::Error;

/// AMT error
#[derive(Debug, Error)]
pub enum Error {
    #[error("index {0} out of range for the amt")]
    OutOfRange(u64),
    #[error("amt height {0} exceeds the maximum of {1}")]
    MaxHeight(u32, u32),
    #[error("cid {0} not found in block store")]
    CidNotFound(String),
    #[error("tried to serialize a node before flushing its children")]
    Cached,
    #[error("invalid amt node: {0}")]
    InvalidNode(String),
    #[error(transparent)]
    Encoding(#[from] encoding::Error),
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}
