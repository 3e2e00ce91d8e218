// Copyright 2019-2023 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use thiserror::Error;

/// Block production error
#[derive(Debug, Error)]
pub enum Error {
    /// The parent tipset Cid does not resolve in the content-addressed store.
    #[error("failed to load parent tipset")]
    ParentTipsetNotFound,
    /// The bytes behind the parent tipset Cid do not decode into a tipset.
    #[error("failed to decode parent tipset content")]
    ParentTipsetInvalidContent,
    /// The state transition interpreter failed; passed through unchanged.
    #[error("vm interpreter: {0}")]
    Interpreter(anyhow::Error),
    /// The chain weight calculator failed.
    #[error("weight calculation: {0}")]
    Weight(anyhow::Error),
    /// Building one of the message commitments failed.
    #[error(transparent)]
    Amt(#[from] ipld_amt::Error),
    /// Signature aggregation failed.
    #[error(transparent)]
    Crypto(#[from] crypto::Error),
    /// Reading the chain epoch clock failed.
    #[error(transparent)]
    Clock(#[from] clock::Error),
    /// Writing a commitment to the content-addressed store failed.
    #[error("store: {0}")]
    Store(anyhow::Error),
    /// Header assembly failed.
    #[error("header build: {0}")]
    Header(String),
}

impl From<blocks::Error> for Error {
    fn from(e: blocks::Error) -> Self {
        Error::Header(e.to_string())
    }
}
