// Copyright 2019-2023 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::BlockHeader;
use cid::Cid;
use encoding::tuple::*;
use encoding::Cbor;
use message::{SignedMessage, UnsignedMessage};
use std::fmt;

/// A complete block: the header plus the messages it carries, with bls
/// messages stripped of their aggregated signatures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct Block {
    pub header: BlockHeader,
    pub bls_messages: Vec<UnsignedMessage>,
    pub secp_messages: Vec<SignedMessage>,
}

impl Block {
    /// Returns the content identifier of the block, which is the identifier
    /// of its header.
    pub fn cid(&self) -> &Cid {
        self.header.cid()
    }
}

impl Cbor for Block {}

/// Human-readable representation of the block Cid.
impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Block: {:?}", self.cid())
    }
}

/// Tracks the merkle roots of both secp and bls messages separately.
#[derive(Clone, Debug, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct MsgMeta {
    pub bls_messages: Cid,
    pub secp_messages: Cid,
}

impl Cbor for MsgMeta {}
