// Copyright 2019-2023 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod errors;

pub use errors::Error;

use address::Address;
use blocks::{Block, BlockHeader, ElectionProof, MsgMeta, Ticket, Tipset};
use chain::WeightCalculator;
use cid::{Cid, Code::Blake2b256};
use clock::{ChainEpochClock, UtcClock};
use crypto::{aggregate_bls_sigs, Signature};
use encoding::Cbor;
use interpreter::Interpreter;
use ipld_amt::Amt;
use ipld_blockstore::BlockStore;
use log::{debug, info};
use message::{SignedMessage, UnsignedMessage};
use message_pool::MessageStore;

/// Upper bound on the number of messages packed into one block.
pub const BLOCK_MAX_MESSAGES: usize = 1000;

/// Assembles block proposals. Fetches the parent tipset from the
/// content-addressed store, runs the interpreter over it, packs the
/// highest-scored pending messages and emits an unsigned header; the miner
/// actor signs the proposal elsewhere.
pub struct BlockProducer<DB, MS, CLK, WC, VM> {
    data_store: DB,
    message_store: MS,
    clock: CLK,
    epoch_clock: ChainEpochClock,
    weight_calculator: WC,
    interpreter: VM,
}

impl<DB, MS, CLK, WC, VM> BlockProducer<DB, MS, CLK, WC, VM>
where
    DB: BlockStore,
    MS: MessageStore,
    CLK: UtcClock,
    WC: WeightCalculator,
    VM: Interpreter<DB>,
{
    pub fn new(
        data_store: DB,
        message_store: MS,
        clock: CLK,
        epoch_clock: ChainEpochClock,
        weight_calculator: WC,
        interpreter: VM,
    ) -> Self {
        Self {
            data_store,
            message_store,
            clock,
            epoch_clock,
            weight_calculator,
            interpreter,
        }
    }

    /// Produces a block proposal on top of the given parent tipset. The
    /// returned header leaves `signature` empty. Nothing is published on
    /// failure; all stores touched along the way are content-addressed, so
    /// a retried attempt is harmless.
    pub fn generate(
        &self,
        miner_address: Address,
        parent_tipset_cid: &Cid,
        election_proof: ElectionProof,
        ticket: Ticket,
        indices: &VM::Indices,
    ) -> Result<Block, Error> {
        let parent_tipset = self.get_tipset(parent_tipset_cid)?;
        debug!(
            "assembling block on {} parents at epoch {}",
            parent_tipset.len(),
            parent_tipset.epoch()
        );

        let vm_result = self
            .interpreter
            .interpret(&self.data_store, &parent_tipset, indices)
            .map_err(Error::Interpreter)?;

        let parent_weight = self
            .weight_calculator
            .calculate_weight(&parent_tipset)
            .map_err(Error::Weight)?;

        let messages = self.message_store.top_scored(BLOCK_MAX_MESSAGES);
        debug!("pulled {} messages from the message pool", messages.len());

        let (msg_meta, bls_messages, secp_messages, bls_aggregate) =
            self.build_msg_meta(&messages)?;
        let messages_cid = self
            .data_store
            .put(&msg_meta, Blake2b256)
            .map_err(Error::Store)?;

        let now = self.clock.now_utc();
        let current_epoch = self.epoch_clock.epoch_at_time(&now)?;

        let header = BlockHeader::builder()
            .miner_address(miner_address)
            .ticket(ticket)
            .election_proof(election_proof)
            .parents(parent_tipset.key().clone())
            .weight(parent_weight)
            .epoch(current_epoch)
            .state_root(vm_result.state_root)
            .message_receipts(vm_result.message_receipts)
            .messages(messages_cid)
            .bls_aggregate(bls_aggregate)
            .timestamp(now.timestamp() as u64)
            .build_header()?;

        info!(
            "produced block proposal {} for miner {} at epoch {}",
            header.cid(),
            header.miner_address(),
            current_epoch
        );

        Ok(Block {
            header,
            bls_messages,
            secp_messages,
        })
    }

    /// Loads and decodes the parent tipset from the content-addressed store.
    fn get_tipset(&self, tipset_cid: &Cid) -> Result<Tipset, Error> {
        let raw = self
            .data_store
            .get_bytes(tipset_cid)
            .map_err(|_| Error::ParentTipsetNotFound)?
            .ok_or(Error::ParentTipsetNotFound)?;
        Tipset::unmarshal_cbor(&raw).map_err(|_| Error::ParentTipsetInvalidContent)
    }

    /// Partitions the selected messages by signature kind in one pass,
    /// building the two message vectors and their commitment. Messages keep
    /// their index from the scored ordering in whichever vector they land
    /// in, and bls signatures are aggregated in that same order.
    #[allow(clippy::type_complexity)]
    fn build_msg_meta(
        &self,
        messages: &[SignedMessage],
    ) -> Result<(MsgMeta, Vec<UnsignedMessage>, Vec<SignedMessage>, Signature), Error> {
        let mut bls_messages = Vec::new();
        let mut secp_messages = Vec::new();
        let mut bls_signatures: Vec<&[u8]> = Vec::new();

        let mut bls_amt = Amt::new(&self.data_store);
        let mut secp_amt = Amt::new(&self.data_store);

        for (index, msg) in messages.iter().enumerate() {
            match msg.signature() {
                Signature::Bls(sig) => {
                    bls_amt.set(index as u64, msg.message().clone())?;
                    bls_messages.push(msg.message().clone());
                    bls_signatures.push(sig);
                }
                Signature::Secp256k1(_) => {
                    secp_amt.set(index as u64, msg.clone())?;
                    secp_messages.push(msg.clone());
                }
            }
        }

        let bls_aggregate = aggregate_bls_sigs(&bls_signatures)?;
        debug!(
            "packed {} bls and {} secp messages",
            bls_messages.len(),
            secp_messages.len()
        );

        let msg_meta = MsgMeta {
            bls_messages: bls_amt.flush()?,
            secp_messages: secp_amt.flush()?,
        };

        Ok((msg_meta, bls_messages, secp_messages, bls_aggregate))
    }
}
