// Copyright 2019-2023 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::{ElectionProof, Error, Ticket, TipsetKeys};
use address::Address;
use cid::{new_from_cbor, Cid, Code::Blake2b256};
use clock::ChainEpoch;
use crypto::Signature;
use derive_builder::Builder;
use encoding::{
    de::{self, Deserializer},
    ser::{self, Serializer},
    Cbor, Error as EncodingError,
};
use num_bigint::{
    bigint_ser::{BigIntDe, BigIntSer},
    BigInt,
};
use serde::Deserialize;
use std::fmt;

/// Header of a block.
///
/// Usage:
/// ```
/// use blocks::{BlockHeader, ElectionProof, Ticket, TipsetKeys};
/// use address::Address;
/// use cid::{new_from_cbor, Code::Blake2b256};
/// use num_bigint::BigInt;
/// use crypto::Signature;
///
/// BlockHeader::builder()
///     .miner_address(Address::new_id(0))
///     .ticket(Ticket::default())
///     .election_proof(ElectionProof::default())
///     .parents(TipsetKeys::default())
///     .weight(BigInt::from(0u8))
///     .epoch(0)
///     .state_root(new_from_cbor(&[], Blake2b256))
///     .message_receipts(new_from_cbor(&[], Blake2b256))
///     .messages(new_from_cbor(&[], Blake2b256))
///     .bls_aggregate(Signature::new_bls(vec![]))
///     .timestamp(0)
///     .build_and_validate()
///     .unwrap();
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Builder)]
#[builder(name = "BlockHeaderBuilder")]
pub struct BlockHeader {
    // MINER INFO
    /// The address of the miner actor that mined this block.
    miner_address: Address,

    // CONSENSUS
    /// The ticket submitted with this block.
    ticket: Ticket,
    /// The proof that the miner won leader election for the epoch.
    election_proof: ElectionProof,

    // CHAIN LINKING
    /// The set of parents this block was based on. Typically one, but can
    /// be several when there were multiple winning ticket holders for an
    /// epoch.
    parents: TipsetKeys,
    /// The aggregate chain weight of the parent set.
    weight: BigInt,
    /// The period in which the block was generated.
    epoch: ChainEpoch,

    // STATE
    /// The state root after the parent tipset was executed.
    state_root: Cid,
    /// The root of the receipts produced by executing the parent tipset.
    message_receipts: Cid,
    /// The Cid of the `MsgMeta` carrying the roots of the block's bls and
    /// secp message vectors.
    messages: Cid,

    // SIGNATURES
    /// Aggregate of the bls signatures of all bls messages in the block.
    bls_aggregate: Signature,
    /// Block time, in seconds since the Unix epoch.
    timestamp: u64,
    /// The signature of the producing miner over the serialized header.
    /// Left empty at assembly; the miner actor fills it before gossip.
    #[builder(default)]
    signature: Option<Signature>,
    /// Fork signaling flags.
    #[builder(default)]
    fork_signal: u64,

    // CACHE
    /// Serialized bytes of the header, computed on construction.
    #[builder(setter(skip), default)]
    cached_bytes: Vec<u8>,
    /// Cid of the header, computed on construction.
    #[builder(setter(skip), default = "new_from_cbor(&[], Blake2b256)")]
    cached_cid: Cid,
}

impl ser::Serialize for BlockHeader {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (
            &self.miner_address,
            &self.ticket,
            &self.election_proof,
            &self.parents,
            BigIntSer(&self.weight),
            &self.epoch,
            &self.state_root,
            &self.message_receipts,
            &self.messages,
            &self.bls_aggregate,
            &self.timestamp,
            &self.signature,
            &self.fork_signal,
        )
            .serialize(serializer)
    }
}

impl<'de> de::Deserialize<'de> for BlockHeader {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (
            miner_address,
            ticket,
            election_proof,
            parents,
            BigIntDe(weight),
            epoch,
            state_root,
            message_receipts,
            messages,
            bls_aggregate,
            timestamp,
            signature,
            fork_signal,
        ) = Deserialize::deserialize(deserializer)?;

        let mut builder = BlockHeader::builder();
        builder
            .miner_address(miner_address)
            .ticket(ticket)
            .election_proof(election_proof)
            .parents(parents)
            .weight(weight)
            .epoch(epoch)
            .state_root(state_root)
            .message_receipts(message_receipts)
            .messages(messages)
            .bls_aggregate(bls_aggregate)
            .timestamp(timestamp)
            .signature(signature)
            .fork_signal(fork_signal);

        builder.build_and_validate().map_err(de::Error::custom)
    }
}

impl BlockHeader {
    /// Generates a `BlockHeader` builder as a constructor.
    pub fn builder() -> BlockHeaderBuilder {
        BlockHeaderBuilder::default()
    }
    /// Getter for the header miner address.
    pub fn miner_address(&self) -> &Address {
        &self.miner_address
    }
    /// Getter for the header ticket.
    pub fn ticket(&self) -> &Ticket {
        &self.ticket
    }
    /// Getter for the header election proof.
    pub fn election_proof(&self) -> &ElectionProof {
        &self.election_proof
    }
    /// Getter for the header parents.
    pub fn parents(&self) -> &TipsetKeys {
        &self.parents
    }
    /// Getter for the header parent weight.
    pub fn weight(&self) -> &BigInt {
        &self.weight
    }
    /// Getter for the header epoch.
    pub fn epoch(&self) -> ChainEpoch {
        self.epoch
    }
    /// Getter for the header state root.
    pub fn state_root(&self) -> &Cid {
        &self.state_root
    }
    /// Getter for the header message receipts root.
    pub fn message_receipts(&self) -> &Cid {
        &self.message_receipts
    }
    /// Getter for the header messages Cid.
    pub fn messages(&self) -> &Cid {
        &self.messages
    }
    /// Getter for the header bls signature aggregate.
    pub fn bls_aggregate(&self) -> &Signature {
        &self.bls_aggregate
    }
    /// Getter for the header timestamp.
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }
    /// Getter for the header block signature.
    pub fn signature(&self) -> &Option<Signature> {
        &self.signature
    }
    /// Getter for the header fork signal.
    pub fn fork_signal(&self) -> u64 {
        self.fork_signal
    }
    /// Getter for the cached header Cid.
    pub fn cid(&self) -> &Cid {
        &self.cached_cid
    }
    /// Getter for the cached serialized bytes of the header.
    pub fn cached_bytes(&self) -> &[u8] {
        &self.cached_bytes
    }

    /// Fills the header cache with its serialized bytes and Cid.
    fn update_cache(&mut self) -> Result<(), EncodingError> {
        self.cached_bytes = self.marshal_cbor()?;
        self.cached_cid = new_from_cbor(&self.cached_bytes, Blake2b256);
        Ok(())
    }
}

impl BlockHeaderBuilder {
    /// Converts the builder into a header and fills its Cid cache.
    pub fn build_and_validate(&self) -> Result<BlockHeader, String> {
        let mut header = self.build().map_err(|e| e.to_string())?;
        header.update_cache().map_err(|e| e.to_string())?;
        Ok(header)
    }

    /// Same as `build_and_validate`, wrapping failures as a blocks error.
    pub fn build_header(&self) -> Result<BlockHeader, Error> {
        self.build_and_validate().map_err(Error::InvalidHeader)
    }
}

impl Cbor for BlockHeader {
    fn cid(&self) -> Result<Cid, EncodingError> {
        Ok(*self.cid())
    }
}

/// Human-readable representation of the block Cid.
impl fmt::Display for BlockHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockHeader: {:?}", self.cid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crypto::VRFProof;

    fn header(epoch: ChainEpoch) -> BlockHeader {
        BlockHeader::builder()
            .miner_address(Address::new_id(10))
            .ticket(Ticket::new(VRFProof::new(vec![1, 3])))
            .election_proof(ElectionProof::default())
            .parents(TipsetKeys::default())
            .weight(BigInt::from(91u8))
            .epoch(epoch)
            .state_root(new_from_cbor(&[1], Blake2b256))
            .message_receipts(new_from_cbor(&[2], Blake2b256))
            .messages(new_from_cbor(&[3], Blake2b256))
            .bls_aggregate(Signature::new_bls(vec![]))
            .timestamp(1600000000)
            .build_and_validate()
            .unwrap()
    }

    #[test]
    fn symmetric_header_encoding() {
        let h = header(7);
        let bz = h.marshal_cbor().unwrap();
        let decoded = BlockHeader::unmarshal_cbor(&bz).unwrap();
        assert_eq!(decoded, h);
        assert_eq!(decoded.cid(), h.cid());
        assert_eq!(decoded.cached_bytes(), bz.as_slice());
    }

    #[test]
    fn cid_tracks_content() {
        assert_eq!(header(7).cid(), header(7).cid());
        assert_ne!(header(7).cid(), header(8).cid());
    }

    #[test]
    fn missing_required_field_fails() {
        let res = BlockHeader::builder()
            .miner_address(Address::new_id(10))
            .build_and_validate();
        assert!(res.is_err());
    }
}
