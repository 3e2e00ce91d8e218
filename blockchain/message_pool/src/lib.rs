// Copyright 2019-2023 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use message::{Message, SignedMessage};

/// View over a pool of pending signed messages. Each call is a snapshot;
/// consumers must treat the returned order as opaque and preserve it.
pub trait MessageStore {
    /// Returns up to `n` of the highest-scored pending messages.
    fn top_scored(&self, n: usize) -> Vec<SignedMessage>;
}

/// In-memory message pool scoring messages by their gas price. Messages
/// with equal gas price keep their arrival order.
#[derive(Default, Debug)]
pub struct MessagePool {
    pending: Vec<SignedMessage>,
}

impl MessagePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a message to the pool.
    pub fn add(&mut self, msg: SignedMessage) {
        self.pending.push(msg);
    }

    /// Number of pending messages.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl MessageStore for MessagePool {
    fn top_scored(&self, n: usize) -> Vec<SignedMessage> {
        let mut msgs: Vec<&SignedMessage> = self.pending.iter().collect();
        // stable sort keeps arrival order for equal gas prices
        msgs.sort_by(|a, b| b.gas_price().cmp(a.gas_price()));
        msgs.into_iter().take(n).cloned().collect()
    }
}
