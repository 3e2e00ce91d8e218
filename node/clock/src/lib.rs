// Copyright 2019-2023 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Duration of each tipset epoch in seconds.
pub const EPOCH_DURATION_SECONDS: i64 = 30;

/// Epoch number of a chain. This acts as a proxy for time within the VM.
pub type ChainEpoch = i64;

/// Const used within the VM to denote an unset `ChainEpoch`.
pub const EPOCH_UNDEFINED: ChainEpoch = -1;

/// Clock error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("time {0} precedes genesis time {1}")]
    BeforeGenesis(i64, i64),
}

/// Source of UTC wall-clock time. Abstracted so block production can be
/// driven by a fixed clock in tests.
pub trait UtcClock {
    fn now_utc(&self) -> DateTime<Utc>;
}

/// `UtcClock` backed by the system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl UtcClock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Maps wall-clock time onto chain epochs, anchored at the genesis block
/// timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainEpochClock {
    genesis_time: i64,
}

impl ChainEpochClock {
    /// Returns a `ChainEpochClock` based on the genesis UNIX timestamp in
    /// seconds.
    pub fn new(genesis_time: i64) -> Self {
        Self { genesis_time }
    }

    /// Returns the genesis UNIX timestamp in seconds.
    pub fn genesis_time(&self) -> i64 {
        self.genesis_time
    }

    /// Returns the epoch the given time falls into.
    pub fn epoch_at_time(&self, time: &DateTime<Utc>) -> Result<ChainEpoch, Error> {
        let elapsed = time.timestamp() - self.genesis_time;
        if elapsed < 0 {
            return Err(Error::BeforeGenesis(time.timestamp(), self.genesis_time));
        }
        Ok(elapsed / EPOCH_DURATION_SECONDS)
    }
}
