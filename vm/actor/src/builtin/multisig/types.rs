// Copyright 2019-2023 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use address::Address;
use clock::ChainEpoch;
use encoding::tuple::*;
use num_bigint::bigint_ser;
use serde::{Deserialize, Serialize};
use std::fmt;
use vm::{MethodNum, Serialized, TokenAmount};

/// Maximum number of signers allowed in a multisig. If more are required,
/// compose a tree of multisigs.
pub const SIGNERS_MAX: usize = 256;

/// Transaction identifier allocated by a multisig actor instance.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(transparent)]
pub struct TxnID(pub u64);

impl fmt::Display for TxnID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A proposal awaiting approvals. The first entry of `approved` is the
/// proposer; the order of the remaining entries is the approval order and
/// must be preserved.
#[derive(Clone, PartialEq, Eq, Debug, Serialize_tuple, Deserialize_tuple)]
pub struct Transaction {
    pub transaction_number: TxnID,
    pub to: Address,
    #[serde(with = "bigint_ser")]
    pub value: TokenAmount,
    pub method: MethodNum,
    pub params: Serialized,
    pub approved: Vec<Address>,
}

/// Constructor parameters for the multisig actor.
#[derive(Serialize_tuple, Deserialize_tuple, Debug, Clone)]
pub struct ConstructorParams {
    pub signers: Vec<Address>,
    pub threshold: u64,
    pub unlock_duration: ChainEpoch,
}

/// Propose method call parameters.
#[derive(Serialize_tuple, Deserialize_tuple, Debug, Clone)]
pub struct ProposeParams {
    pub to: Address,
    #[serde(with = "bigint_ser")]
    pub value: TokenAmount,
    pub method: MethodNum,
    pub params: Serialized,
}

/// Parameters for the approve and cancel methods.
#[derive(Serialize_tuple, Deserialize_tuple, Debug, Clone, Copy)]
pub struct TxnIDParams {
    pub transaction_number: TxnID,
}

/// Add signer method parameters.
#[derive(Serialize_tuple, Deserialize_tuple, Debug, Clone)]
pub struct AddSignerParams {
    pub signer: Address,
    pub increase_threshold: bool,
}

/// Remove signer method parameters.
#[derive(Serialize_tuple, Deserialize_tuple, Debug, Clone)]
pub struct RemoveSignerParams {
    pub signer: Address,
    pub decrease_threshold: bool,
}

/// Swap signer method parameters.
#[derive(Serialize_tuple, Deserialize_tuple, Debug, Clone)]
pub struct SwapSignerParams {
    pub from: Address,
    pub to: Address,
}

/// Change threshold method parameters.
#[derive(Serialize_tuple, Deserialize_tuple, Debug, Clone, Copy)]
pub struct ChangeThresholdParams {
    pub new_threshold: u64,
}
