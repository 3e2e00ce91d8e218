// Copyright 2019-2023 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod actor_code;

pub use self::actor_code::ActorCode;

use address::Address;
use cid::Cid;
use clock::ChainEpoch;
use encoding::Cbor;
use ipld_blockstore::BlockStore;
use message::UnsignedMessage;
use vm::{ActorError, ExitCode, MethodNum, Serialized, TokenAmount};

/// Runtime is the VM's internal execution context. This is everything that
/// is accessible to actors beyond their parameters: the triggering message
/// (caller, receiver, value received), chain time, the receiver's balance
/// and the single mutable state document.
pub trait Runtime<BS: BlockStore> {
    /// Information about the message being executed. The sender is the
    /// immediate caller and the receiver is the actor being invoked.
    fn message(&self) -> &UnsignedMessage;

    /// The current chain epoch number. The genesis block has epoch zero.
    fn curr_epoch(&self) -> ChainEpoch;

    /// Validates that the immediate caller is one of the given addresses.
    /// Exported actor methods must invoke exactly one caller validation
    /// before touching state.
    fn validate_immediate_caller_is<'a, I>(&self, addresses: I) -> Result<(), ActorError>
    where
        I: IntoIterator<Item = &'a Address>;

    /// Validates that the immediate caller's actor code is one of the given
    /// code identifiers.
    fn validate_immediate_caller_type<'a, I>(&self, types: I) -> Result<(), ActorError>
    where
        I: IntoIterator<Item = &'a Cid>;

    /// The balance of the receiver, including the value carried by the
    /// currently executing message.
    fn current_balance(&self) -> Result<TokenAmount, ActorError>;

    /// Initializes the state object. Only valid in a constructor and before
    /// any state has been committed.
    fn create<C: Cbor>(&mut self, obj: &C) -> Result<(), ActorError>;

    /// Loads a readonly copy of the receiver's state.
    fn state<C: Cbor>(&self) -> Result<C, ActorError>;

    /// Loads a mutable copy of the state and hands it to the closure. The
    /// mutated state is committed when the closure succeeds; on error
    /// nothing is committed and the previous state root stays in place.
    fn transaction<C, R, F>(&mut self, f: F) -> Result<R, ActorError>
    where
        C: Cbor,
        F: FnOnce(&mut C, &BS) -> Result<R, ActorError>;

    /// Returns a reference to the underlying block store.
    fn store(&self) -> &BS;

    /// Sends a message to another actor, returning its result. Not
    /// permitted inside a state transaction.
    fn send(
        &mut self,
        to: &Address,
        method: MethodNum,
        params: &Serialized,
        value: &TokenAmount,
    ) -> Result<Serialized, ActorError>;

    /// Wraps an exit code and message into an actor error. The caller is
    /// expected to return the error; no unwinding takes place.
    fn abort<S: AsRef<str>>(&self, exit_code: ExitCode, msg: S) -> ActorError;
}
