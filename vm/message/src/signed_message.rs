// Copyright 2019-2023 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::{Message, UnsignedMessage};
use address::Address;
use crypto::{Signature, Signer};
use encoding::tuple::*;
use encoding::Cbor;
use vm::{MethodNum, Serialized, TokenAmount};

/// Represents a wrapped message with its signature.
#[derive(PartialEq, Eq, Clone, Debug, Serialize_tuple, Deserialize_tuple)]
pub struct SignedMessage {
    message: UnsignedMessage,
    signature: Signature,
}

impl SignedMessage {
    /// Signs an unsigned message with the given signer.
    pub fn new<S: Signer>(message: UnsignedMessage, signer: &S) -> anyhow::Result<Self> {
        let bz = message.marshal_cbor()?;
        let signature = signer.sign_bytes(&bz, message.from())?;
        Ok(Self { message, signature })
    }

    /// Constructs a signed message from existing parts.
    pub fn from_parts(message: UnsignedMessage, signature: Signature) -> Self {
        Self { message, signature }
    }

    /// Returns the wrapped unsigned message.
    pub fn message(&self) -> &UnsignedMessage {
        &self.message
    }

    /// Returns the signature of the message.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }
}

impl Message for SignedMessage {
    fn from(&self) -> &Address {
        self.message.from()
    }
    fn to(&self) -> &Address {
        self.message.to()
    }
    fn sequence(&self) -> u64 {
        self.message.sequence()
    }
    fn value(&self) -> &TokenAmount {
        self.message.value()
    }
    fn method_num(&self) -> MethodNum {
        self.message.method_num()
    }
    fn params(&self) -> &Serialized {
        self.message.params()
    }
    fn gas_price(&self) -> &TokenAmount {
        self.message.gas_price()
    }
    fn gas_limit(&self) -> i64 {
        self.message.gas_limit()
    }
    fn required_funds(&self) -> TokenAmount {
        self.message.required_funds()
    }
}

impl Cbor for SignedMessage {}

#[cfg(test)]
mod tests {
    use super::*;

    struct DummySigner;

    impl Signer for DummySigner {
        fn sign_bytes(&self, data: &[u8], _addr: &Address) -> anyhow::Result<Signature> {
            Ok(Signature::new_secp256k1(data[..4].to_vec()))
        }
    }

    #[test]
    fn signing_covers_message_bytes() {
        let msg = UnsignedMessage::builder()
            .to(Address::new_id(1))
            .from(Address::new_id(2))
            .build()
            .unwrap();
        let expected = msg.marshal_cbor().unwrap()[..4].to_vec();

        let signed = SignedMessage::new(msg, &DummySigner).unwrap();
        assert_eq!(signed.signature(), &Signature::new_secp256k1(expected));
    }

    #[test]
    fn symmetric_encoding() {
        let msg = UnsignedMessage::builder()
            .to(Address::new_id(1))
            .from(Address::new_id(2))
            .value(55.into())
            .build()
            .unwrap();
        let signed = SignedMessage::from_parts(msg, Signature::new_bls(vec![9; 3]));

        let bz = signed.marshal_cbor().unwrap();
        assert_eq!(SignedMessage::unmarshal_cbor(&bz).unwrap(), signed);
    }
}
