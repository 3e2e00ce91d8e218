// Copyright 2019-2023 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::{Transaction, TxnID};
use address::Address;
use clock::ChainEpoch;
use encoding::{tuple::*, Cbor};
use num_bigint::bigint_ser;
use vm::TokenAmount;

/// Multisig actor state.
#[derive(Serialize_tuple, Deserialize_tuple, Clone, Debug, PartialEq, Eq)]
pub struct State {
    /// Parties which may propose and approve. Order is significant: a
    /// removed slot shifts nothing, and swapped signers keep their position.
    pub signers: Vec<Address>,
    /// Number of approvals a proposal needs before it is dispatched.
    pub threshold: u64,
    /// Counter the next proposal's transaction number is drawn from.
    pub next_transaction_id: TxnID,

    // Linear unlock
    #[serde(with = "bigint_ser")]
    pub initial_balance: TokenAmount,
    pub start_epoch: ChainEpoch,
    pub unlock_duration: ChainEpoch,

    /// Proposals waiting for approvals, ordered by creation.
    pub pending_transactions: Vec<Transaction>,
}

impl State {
    /// Returns whether the address is one of the signers.
    pub fn is_signer(&self, address: &Address) -> bool {
        self.signers.contains(address)
    }

    /// Returns the pending transaction with the given number.
    pub fn get_pending_transaction(&self, tx_number: TxnID) -> Option<&Transaction> {
        self.pending_transactions
            .iter()
            .find(|tx| tx.transaction_number == tx_number)
    }

    pub(crate) fn get_pending_transaction_mut(
        &mut self,
        tx_number: TxnID,
    ) -> Option<&mut Transaction> {
        self.pending_transactions
            .iter_mut()
            .find(|tx| tx.transaction_number == tx_number)
    }

    /// Removes the pending transaction with the given number.
    pub(crate) fn delete_pending_transaction(&mut self, tx_number: TxnID) -> Result<(), String> {
        let idx = self
            .pending_transactions
            .iter()
            .position(|tx| tx.transaction_number == tx_number)
            .ok_or_else(|| format!("no pending transaction {} to delete", tx_number))?;
        self.pending_transactions.remove(idx);
        Ok(())
    }

    /// Returns the balance still locked by the linear vesting schedule at
    /// the given epoch.
    pub fn amount_locked(&self, curr_epoch: ChainEpoch) -> TokenAmount {
        if curr_epoch < self.start_epoch {
            return self.initial_balance.clone();
        }
        let elapsed = curr_epoch - self.start_epoch;
        if elapsed >= self.unlock_duration {
            return TokenAmount::from(0);
        }
        // Division before multiplication; the truncation is part of the
        // on-chain arithmetic.
        self.initial_balance.clone() / TokenAmount::from(self.unlock_duration)
            * TokenAmount::from(elapsed)
    }

    /// Checks that spending `amount` at `curr_epoch` leaves the vested
    /// minimum in place.
    pub(crate) fn check_available(
        &self,
        balance: &TokenAmount,
        amount: &TokenAmount,
        curr_epoch: ChainEpoch,
    ) -> Result<(), String> {
        if amount < &TokenAmount::from(0) {
            return Err(format!("amount to spend {} less than zero", amount));
        }
        if balance < amount {
            return Err(format!(
                "current balance {} less than amount to spend {}",
                balance, amount
            ));
        }
        let remaining = balance - amount;
        let locked = self.amount_locked(curr_epoch);
        if remaining < locked {
            return Err(format!(
                "balance {} after spending {} would be less than the locked amount {}",
                remaining, amount, locked
            ));
        }
        Ok(())
    }
}

impl Cbor for State {}
