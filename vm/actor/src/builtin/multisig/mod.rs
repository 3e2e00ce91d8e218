// Copyright 2019-2023 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod state;
mod types;

pub use self::state::State;
pub use self::types::*;

use crate::{CALLER_TYPES_SIGNABLE, INIT_ACTOR_ADDR};
use ipld_blockstore::BlockStore;
use message::Message;
use num_bigint::Sign;
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use runtime::{ActorCode, Runtime};
use std::collections::HashSet;
use vm::{actor_error, ActorError, MethodNum, Serialized, TokenAmount, METHOD_CONSTRUCTOR};

/// Multisig actor methods.
#[derive(FromPrimitive)]
#[repr(u64)]
pub enum Method {
    Constructor = METHOD_CONSTRUCTOR,
    Propose = 2,
    Approve = 3,
    Cancel = 4,
    AddSigner = 5,
    RemoveSigner = 6,
    SwapSigner = 7,
    ChangeThreshold = 8,
}

/// Multisig actor
pub struct Actor;

impl Actor {
    /// Initializes the wallet. Only the init actor may construct; funds
    /// received with the construction message vest linearly over
    /// `unlock_duration` epochs when a duration is given.
    pub fn constructor<BS, RT>(rt: &mut RT, params: ConstructorParams) -> Result<(), ActorError>
    where
        BS: BlockStore,
        RT: Runtime<BS>,
    {
        rt.validate_immediate_caller_is(std::iter::once(&*INIT_ACTOR_ADDR))?;

        if params.signers.is_empty() {
            return Err(actor_error!(ErrIllegalArgument; "must have at least one signer"));
        }
        if params.signers.len() > SIGNERS_MAX {
            return Err(
                actor_error!(ErrIllegalArgument; "cannot have more than {} signers", SIGNERS_MAX),
            );
        }

        let mut seen = HashSet::with_capacity(params.signers.len());
        for signer in &params.signers {
            if !seen.insert(signer) {
                return Err(actor_error!(ErrIllegalArgument; "duplicate signer {}", signer));
            }
        }

        if params.threshold as usize > params.signers.len() {
            return Err(
                actor_error!(ErrIllegalArgument; "must not require more approvals than signers"),
            );
        }
        if params.threshold < 1 {
            return Err(actor_error!(ErrIllegalArgument; "must require at least one approval"));
        }
        if params.unlock_duration < 0 {
            return Err(actor_error!(ErrIllegalArgument; "negative unlock duration disallowed"));
        }

        let mut st = State {
            signers: params.signers,
            threshold: params.threshold,
            next_transaction_id: TxnID(0),
            initial_balance: TokenAmount::from(0),
            start_epoch: rt.curr_epoch(),
            unlock_duration: params.unlock_duration,
            pending_transactions: Vec::new(),
        };
        if params.unlock_duration > 0 {
            st.initial_balance = rt.message().value().clone();
        }

        rt.create(&st)?;
        Ok(())
    }

    /// Starts a proposal and immediately records the caller's approval,
    /// which executes the call at once when the threshold is one.
    pub fn propose<BS, RT>(rt: &mut RT, params: ProposeParams) -> Result<TxnID, ActorError>
    where
        BS: BlockStore,
        RT: Runtime<BS>,
    {
        rt.validate_immediate_caller_type(CALLER_TYPES_SIGNABLE.iter())?;
        let caller = *rt.message().from();

        if params.value.sign() == Sign::Minus {
            return Err(
                actor_error!(ErrIllegalArgument; "proposed value must be non-negative, was {}", params.value),
            );
        }

        let tx_number = rt.transaction(|st: &mut State, _| {
            if !st.is_signer(&caller) {
                return Err(actor_error!(ErrForbidden; "{} is not a signer", caller));
            }

            let tx_number = st.next_transaction_id;
            st.next_transaction_id.0 += 1;

            st.pending_transactions.push(Transaction {
                transaction_number: tx_number,
                to: params.to,
                value: params.value,
                method: params.method,
                params: params.params,
                approved: Vec::new(),
            });

            Ok(tx_number)
        })?;

        Self::approve_transaction(rt, tx_number)?;

        Ok(tx_number)
    }

    /// Records the caller's approval of a pending transaction.
    pub fn approve<BS, RT>(rt: &mut RT, params: TxnIDParams) -> Result<(), ActorError>
    where
        BS: BlockStore,
        RT: Runtime<BS>,
    {
        rt.validate_immediate_caller_type(CALLER_TYPES_SIGNABLE.iter())?;
        Self::approve_transaction(rt, params.transaction_number)
    }

    /// Withdraws a pending transaction. Only its proposer may cancel.
    pub fn cancel<BS, RT>(rt: &mut RT, params: TxnIDParams) -> Result<(), ActorError>
    where
        BS: BlockStore,
        RT: Runtime<BS>,
    {
        rt.validate_immediate_caller_type(CALLER_TYPES_SIGNABLE.iter())?;
        let caller = *rt.message().from();

        rt.transaction(|st: &mut State, _| {
            if !st.is_signer(&caller) {
                return Err(actor_error!(ErrForbidden; "{} is not a signer", caller));
            }

            let proposed_by_caller = match st.get_pending_transaction(params.transaction_number) {
                Some(tx) => tx.approved.first() == Some(&caller),
                None => {
                    return Err(
                        actor_error!(ErrNotFound; "no pending transaction {}", params.transaction_number),
                    );
                }
            };
            if !proposed_by_caller {
                return Err(
                    actor_error!(ErrForbidden; "cannot cancel another signer's transaction"),
                );
            }

            st.delete_pending_transaction(params.transaction_number)
                .map_err(|e| actor_error!(ErrIllegalState; "failed to cancel: {}", e))
        })
    }

    /// Adds a signer. Must go through the wallet itself, i.e. a previously
    /// approved multisig call.
    pub fn add_signer<BS, RT>(rt: &mut RT, params: AddSignerParams) -> Result<(), ActorError>
    where
        BS: BlockStore,
        RT: Runtime<BS>,
    {
        let receiver = *rt.message().to();
        rt.validate_immediate_caller_is(std::iter::once(&receiver))?;

        rt.transaction(|st: &mut State, _| {
            if st.signers.len() >= SIGNERS_MAX {
                return Err(
                    actor_error!(ErrIllegalArgument; "cannot have more than {} signers", SIGNERS_MAX),
                );
            }
            if st.is_signer(&params.signer) {
                return Err(actor_error!(ErrIllegalArgument; "{} is already a signer", params.signer));
            }

            st.signers.push(params.signer);
            if params.increase_threshold {
                st.threshold += 1;
            }
            Ok(())
        })
    }

    /// Removes a signer, keeping the threshold within the signer count.
    pub fn remove_signer<BS, RT>(rt: &mut RT, params: RemoveSignerParams) -> Result<(), ActorError>
    where
        BS: BlockStore,
        RT: Runtime<BS>,
    {
        let receiver = *rt.message().to();
        rt.validate_immediate_caller_is(std::iter::once(&receiver))?;

        rt.transaction(|st: &mut State, _| {
            if !st.is_signer(&params.signer) {
                return Err(actor_error!(ErrForbidden; "{} is not a signer", params.signer));
            }

            st.signers.retain(|s| s != &params.signer);
            if params.decrease_threshold {
                st.threshold -= 1;
            }

            if st.threshold < 1 || (st.signers.len() as u64) < st.threshold {
                return Err(
                    actor_error!(ErrIllegalArgument; "{} signers cannot meet a threshold of {}",
                        st.signers.len(), st.threshold),
                );
            }
            Ok(())
        })
    }

    /// Replaces a signer in place. Position is preserved so proposer
    /// identification stays intact.
    pub fn swap_signer<BS, RT>(rt: &mut RT, params: SwapSignerParams) -> Result<(), ActorError>
    where
        BS: BlockStore,
        RT: Runtime<BS>,
    {
        let receiver = *rt.message().to();
        rt.validate_immediate_caller_is(std::iter::once(&receiver))?;

        rt.transaction(|st: &mut State, _| {
            if st.is_signer(&params.to) {
                return Err(actor_error!(ErrIllegalArgument; "{} is already a signer", params.to));
            }

            let slot = st
                .signers
                .iter_mut()
                .find(|s| **s == params.from)
                .ok_or_else(|| actor_error!(ErrNotFound; "{} is not a signer", params.from))?;
            *slot = params.to;
            Ok(())
        })
    }

    /// Changes the number of approvals needed to dispatch a proposal.
    pub fn change_threshold<BS, RT>(
        rt: &mut RT,
        params: ChangeThresholdParams,
    ) -> Result<(), ActorError>
    where
        BS: BlockStore,
        RT: Runtime<BS>,
    {
        let receiver = *rt.message().to();
        rt.validate_immediate_caller_is(std::iter::once(&receiver))?;

        rt.transaction(|st: &mut State, _| {
            if params.new_threshold < 1 || params.new_threshold > st.signers.len() as u64 {
                return Err(actor_error!(ErrIllegalArgument; "new threshold {} out of bounds for {} signers",
                    params.new_threshold, st.signers.len()));
            }
            st.threshold = params.new_threshold;
            Ok(())
        })
    }

    /// Records an approval and, once the threshold is met, checks the
    /// vesting lock and dispatches the call.
    fn approve_transaction<BS, RT>(rt: &mut RT, tx_number: TxnID) -> Result<(), ActorError>
    where
        BS: BlockStore,
        RT: Runtime<BS>,
    {
        let caller = *rt.message().from();
        let curr_balance = rt.current_balance()?;
        let curr_epoch = rt.curr_epoch();

        let (tx, threshold_met) = rt.transaction(|st: &mut State, _| {
            if !st.is_signer(&caller) {
                return Err(actor_error!(ErrForbidden; "{} is not a signer", caller));
            }

            let threshold = st.threshold;
            let tx = st
                .get_pending_transaction_mut(tx_number)
                .ok_or_else(|| actor_error!(ErrNotFound; "no pending transaction {}", tx_number))?;

            if tx.approved.contains(&caller) {
                return Err(actor_error!(ErrIllegalState; "{} already approved transaction {}",
                    caller, tx_number));
            }
            tx.approved.push(caller);

            if (tx.approved.len() as u64) < threshold {
                return Ok((tx.clone(), false));
            }

            let tx = tx.clone();
            st.check_available(&curr_balance, &tx.value, curr_epoch)
                .map_err(|e| actor_error!(ErrInsufficientFunds; "insufficient funds unlocked: {}", e))?;
            st.delete_pending_transaction(tx_number)
                .map_err(|e| actor_error!(ErrIllegalState; "failed to consume transaction: {}", e))?;
            Ok((tx, true))
        })?;

        if threshold_met {
            // The result is discarded on purpose: a failing downstream call
            // does not restore the consumed transaction or refund.
            let _ = rt.send(&tx.to, tx.method, &tx.params, &tx.value);
        }

        Ok(())
    }
}

impl ActorCode for Actor {
    fn invoke_method<BS, RT>(
        &self,
        rt: &mut RT,
        method: MethodNum,
        params: &Serialized,
    ) -> Result<Serialized, ActorError>
    where
        BS: BlockStore,
        RT: Runtime<BS>,
    {
        match Method::from_u64(method) {
            Some(Method::Constructor) => {
                Self::constructor(rt, params.deserialize()?)?;
                Ok(Serialized::default())
            }
            Some(Method::Propose) => {
                let res = Self::propose(rt, params.deserialize()?)?;
                Ok(Serialized::serialize(res)?)
            }
            Some(Method::Approve) => {
                Self::approve(rt, params.deserialize()?)?;
                Ok(Serialized::default())
            }
            Some(Method::Cancel) => {
                Self::cancel(rt, params.deserialize()?)?;
                Ok(Serialized::default())
            }
            Some(Method::AddSigner) => {
                Self::add_signer(rt, params.deserialize()?)?;
                Ok(Serialized::default())
            }
            Some(Method::RemoveSigner) => {
                Self::remove_signer(rt, params.deserialize()?)?;
                Ok(Serialized::default())
            }
            Some(Method::SwapSigner) => {
                Self::swap_signer(rt, params.deserialize()?)?;
                Ok(Serialized::default())
            }
            Some(Method::ChangeThreshold) => {
                Self::change_threshold(rt, params.deserialize()?)?;
                Ok(Serialized::default())
            }
            None => Err(actor_error!(SysErrInvalidMethod; "invalid method {}", method)),
        }
    }
}
