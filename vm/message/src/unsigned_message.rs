// Copyright 2019-2023 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::Message;
use address::Address;
use derive_builder::Builder;
use encoding::Cbor;
use num_bigint::bigint_ser::{BigIntDe, BigIntSer};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use vm::{MethodNum, Serialized, TokenAmount};

/// VM message which carries all the data needed for a state transition.
///
/// Usage:
/// ```
/// use message::{Message, UnsignedMessage};
/// use address::Address;
///
/// let message = UnsignedMessage::builder()
///     .to(Address::new_id(0))
///     .from(Address::new_id(1))
///     .sequence(0) // optional
///     .value(0.into()) // optional
///     .method_num(0) // optional
///     .params(Default::default()) // optional
///     .gas_limit(0) // optional
///     .gas_price(0.into()) // optional
///     .build()
///     .unwrap();
/// assert_eq!(message.sequence(), 0);
/// ```
#[derive(PartialEq, Eq, Clone, Debug, Builder)]
#[builder(name = "MessageBuilder")]
pub struct UnsignedMessage {
    pub to: Address,
    pub from: Address,
    #[builder(default)]
    pub sequence: u64,
    #[builder(default)]
    pub value: TokenAmount,
    #[builder(default)]
    pub gas_price: TokenAmount,
    #[builder(default)]
    pub gas_limit: i64,
    #[builder(default)]
    pub method_num: MethodNum,
    #[builder(default)]
    pub params: Serialized,
}

impl UnsignedMessage {
    /// Generates an `UnsignedMessage` builder to be modified and constructed.
    pub fn builder() -> MessageBuilder {
        MessageBuilder::default()
    }
}

impl Serialize for UnsignedMessage {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (
            &self.to,
            &self.from,
            &self.sequence,
            BigIntSer(&self.value),
            BigIntSer(&self.gas_price),
            &self.gas_limit,
            &self.method_num,
            &self.params,
        )
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for UnsignedMessage {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (to, from, sequence, BigIntDe(value), BigIntDe(gas_price), gas_limit, method_num, params) =
            Deserialize::deserialize(deserializer)?;
        Ok(Self {
            to,
            from,
            sequence,
            value,
            gas_price,
            gas_limit,
            method_num,
            params,
        })
    }
}

impl Message for UnsignedMessage {
    fn from(&self) -> &Address {
        &self.from
    }
    fn to(&self) -> &Address {
        &self.to
    }
    fn sequence(&self) -> u64 {
        self.sequence
    }
    fn value(&self) -> &TokenAmount {
        &self.value
    }
    fn method_num(&self) -> MethodNum {
        self.method_num
    }
    fn params(&self) -> &Serialized {
        &self.params
    }
    fn gas_price(&self) -> &TokenAmount {
        &self.gas_price
    }
    fn gas_limit(&self) -> i64 {
        self.gas_limit
    }
    fn required_funds(&self) -> TokenAmount {
        &self.value + &self.gas_price * TokenAmount::from(self.gas_limit)
    }
}

impl Cbor for UnsignedMessage {}
