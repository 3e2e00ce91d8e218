// Copyright 2019-2023 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod signed_message;
mod unsigned_message;

pub use signed_message::SignedMessage;
pub use unsigned_message::{MessageBuilder, UnsignedMessage};

use address::Address;
use vm::{MethodNum, Serialized, TokenAmount};

/// Message interface to interact with signed and unsigned messages in a
/// generic context.
pub trait Message {
    /// Returns the sender of the message.
    fn from(&self) -> &Address;
    /// Returns the destination of the message.
    fn to(&self) -> &Address;
    /// Returns the message sequence or nonce.
    fn sequence(&self) -> u64;
    /// Returns the amount sent in the message.
    fn value(&self) -> &TokenAmount;
    /// Returns the method number to be called.
    fn method_num(&self) -> MethodNum;
    /// Returns the encoded parameters for the method call.
    fn params(&self) -> &Serialized;
    /// Returns the gas price for the message.
    fn gas_price(&self) -> &TokenAmount;
    /// Returns the gas limit for the message.
    fn gas_limit(&self) -> i64;
    /// Returns the total funds the sender needs to cover the message.
    fn required_funds(&self) -> TokenAmount;
}
