// Copyright 2019-2023 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::{BlockHeader, Error, Ticket};
use cid::Cid;
use clock::ChainEpoch;
use encoding::{
    de::{self, Deserializer},
    ser::{self, Serializer},
    Cbor,
};
use num_bigint::BigInt;
use serde::Deserialize;

/// A set of Cids forming a unique key for a tipset. Equal keys will have
/// equivalent iteration order, matching the canonical order of the blocks
/// in the tipset (which is by ticket).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default, Ord, PartialOrd)]
pub struct TipsetKeys {
    pub cids: Vec<Cid>,
}

impl TipsetKeys {
    pub fn new(cids: Vec<Cid>) -> Self {
        Self { cids }
    }

    /// Returns the tipset header cids.
    pub fn cids(&self) -> &[Cid] {
        &self.cids
    }
}

impl ser::Serialize for TipsetKeys {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.cids.serialize(serializer)
    }
}

impl<'de> de::Deserialize<'de> for TipsetKeys {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let cids: Vec<Cid> = Deserialize::deserialize(deserializer)?;
        Ok(TipsetKeys { cids })
    }
}

impl Cbor for TipsetKeys {}

/// An immutable set of blocks at the same height with the same parent set.
/// Blocks in a tipset are canonically ordered by ticket, ties broken by the
/// header Cids, which are distinct.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tipset {
    blocks: Vec<BlockHeader>,
    key: TipsetKeys,
}

#[allow(clippy::len_without_is_empty)]
impl Tipset {
    /// Builds a new tipset from a collection of blocks. A valid tipset
    /// contains a non-empty collection of blocks with distinct miners that
    /// all specify identical epoch, parents, weight, state root and receipt
    /// root.
    pub fn new(headers: Vec<BlockHeader>) -> Result<Self, Error> {
        if headers.is_empty() {
            return Err(Error::NoBlocks);
        }

        let base = &headers[0];
        for header in headers.iter().skip(1) {
            if header.parents() != base.parents() {
                return Err(Error::InvalidTipset("parent cids are not equal".to_owned()));
            }
            if header.weight() != base.weight() {
                return Err(Error::InvalidTipset("weights are not equal".to_owned()));
            }
            if header.epoch() != base.epoch() {
                return Err(Error::InvalidTipset("epochs are not equal".to_owned()));
            }
            if header.state_root() != base.state_root() {
                return Err(Error::InvalidTipset("state roots are not equal".to_owned()));
            }
            if header.message_receipts() != base.message_receipts() {
                return Err(Error::InvalidTipset(
                    "message receipts are not equal".to_owned(),
                ));
            }
            if headers
                .iter()
                .filter(|other| other.miner_address() == header.miner_address())
                .count()
                > 1
            {
                return Err(Error::InvalidTipset(format!(
                    "miner {} is duplicated",
                    header.miner_address()
                )));
            }
        }

        let mut sorted_headers = headers;
        sorted_headers
            .sort_by_key(|header| (header.ticket().clone(), header.cid().to_bytes()));

        let cids = sorted_headers
            .iter()
            .map(|header| *header.cid())
            .collect();

        Ok(Self {
            blocks: sorted_headers,
            key: TipsetKeys { cids },
        })
    }

    /// Returns the epoch of the tipset.
    pub fn epoch(&self) -> ChainEpoch {
        self.blocks[0].epoch()
    }
    /// Returns all blocks in the tipset.
    pub fn blocks(&self) -> &[BlockHeader] {
        &self.blocks
    }
    /// Consumes the tipset, returning its blocks.
    pub fn into_blocks(self) -> Vec<BlockHeader> {
        self.blocks
    }
    /// Returns the smallest ticket of all blocks in the tipset.
    pub fn min_ticket(&self) -> &Ticket {
        self.blocks[0].ticket()
    }
    /// Returns the smallest timestamp of all blocks in the tipset.
    pub fn min_timestamp(&self) -> u64 {
        self.blocks
            .iter()
            .map(BlockHeader::timestamp)
            .min()
            .unwrap_or_default()
    }
    /// Returns the number of blocks in the tipset.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }
    /// Returns the key for the tipset.
    pub fn key(&self) -> &TipsetKeys {
        &self.key
    }
    /// Returns the Cids of the headers in the tipset.
    pub fn cids(&self) -> &[Cid] {
        self.key.cids()
    }
    /// Returns the Cids of the parents of the blocks in the tipset.
    pub fn parents(&self) -> &TipsetKeys {
        self.blocks[0].parents()
    }
    /// Returns the state root of the tipset's parent.
    pub fn parent_state(&self) -> &Cid {
        self.blocks[0].state_root()
    }
    /// Returns the tipset's calculated weight.
    pub fn weight(&self) -> &BigInt {
        self.blocks[0].weight()
    }
}

/// Tipsets are stored in the content-addressed store as the tuple of their
/// header cids, the headers themselves, and the height.
impl ser::Serialize for Tipset {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (self.key.cids(), &self.blocks, self.epoch()).serialize(serializer)
    }
}

impl<'de> de::Deserialize<'de> for Tipset {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (_cids, blocks, _height): (Vec<Cid>, Vec<BlockHeader>, ChainEpoch) =
            Deserialize::deserialize(deserializer)?;
        // the key is derived from the headers rather than trusted from the wire
        Tipset::new(blocks).map_err(de::Error::custom)
    }
}

impl Cbor for Tipset {}
