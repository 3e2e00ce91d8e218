// Copyright 2019-2023 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod errors;
mod network;
mod payload;
mod protocol;

pub use self::errors::Error;
pub use self::network::Network;
pub use self::payload::Payload;
pub use self::protocol::Protocol;

use data_encoding::Encoding;
#[allow(unused_imports)]
use data_encoding_macro::{internal_new_encoding, new_encoding};
use encoding::blake2b_variable;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Hash length of the payload for Secp and Actor addresses.
pub const PAYLOAD_HASH_LEN: usize = 20;

/// Uncompressed secp public key length used for validation of Secp addresses.
pub const SECP_PUB_LEN: usize = 65;

/// BLS public key length used for validation of BLS addresses.
pub const BLS_PUB_LEN: usize = 48;

/// Length of the checksum hash for string encodings.
pub const CHECKSUM_HASH_LEN: usize = 4;

/// Defines the encoder for the base32 encoding used in the human-readable
/// address form, with the appropriate alphabet and no padding.
const ADDRESS_ENCODER: Encoding = new_encoding! {
    symbols: "abcdefghijklmnopqrstuvwxyz234567",
    padding: None,
};

/// Address is the struct that defines the protocol and data payload conversion from either
/// a public key or value.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct Address {
    network: Network,
    payload: Payload,
}

impl Address {
    fn new(network: Network, payload: Payload) -> Self {
        Self { network, payload }
    }

    /// Creates an address with an ID protocol payload.
    pub fn new_id(id: u64) -> Self {
        Self::new(Network::default(), Payload::ID(id))
    }

    /// Creates an address from a BLS public key.
    pub fn new_bls(pubkey: &[u8]) -> Result<Self, Error> {
        let key: [u8; BLS_PUB_LEN] = pubkey
            .try_into()
            .map_err(|_| Error::InvalidBLSLength(pubkey.len()))?;
        Ok(Self::new(Network::default(), Payload::BLS(key)))
    }

    /// Creates an address from an uncompressed secp256k1 public key.
    pub fn new_secp256k1(pubkey: &[u8]) -> Result<Self, Error> {
        if pubkey.len() != SECP_PUB_LEN {
            return Err(Error::InvalidSECPLength(pubkey.len()));
        }
        Ok(Self::new(
            Network::default(),
            Payload::Secp256k1(address_hash(pubkey)),
        ))
    }

    /// Creates an address from encoded bytes (protocol byte followed by the
    /// raw payload).
    pub fn from_bytes(bz: &[u8]) -> Result<Self, Error> {
        if bz.len() < 2 {
            return Err(Error::InvalidLength);
        }
        let protocol = Protocol::from_byte(bz[0]).ok_or(Error::UnknownProtocol(bz[0]))?;
        Ok(Self::new(
            Network::default(),
            Payload::new(protocol, &bz[1..])?,
        ))
    }

    /// Returns the address in bytes form (protocol byte followed by the raw
    /// payload).
    pub fn to_bytes(self) -> Vec<u8> {
        self.payload.to_bytes()
    }

    /// Returns the protocol of the address.
    pub fn protocol(self) -> Protocol {
        Protocol::from(self.payload)
    }

    /// Returns the data payload of the address.
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Returns the raw payload bytes, without the protocol byte.
    pub fn payload_bytes(self) -> Vec<u8> {
        self.payload.to_raw_bytes()
    }

    /// Returns the network of the address.
    pub fn network(self) -> Network {
        self.network
    }

    /// Returns a copy of the address for the given network.
    pub fn with_network(self, network: Network) -> Self {
        Self::new(network, self.payload)
    }
}

/// Returns the 4 byte checksum hash over the protocol byte and payload.
pub fn checksum(ingest: &[u8]) -> Vec<u8> {
    blake2b_variable(ingest, CHECKSUM_HASH_LEN)
}

/// Validates the checksum against the ingest data.
pub fn validate_checksum(ingest: &[u8], expect: &[u8]) -> bool {
    checksum(ingest) == expect
}

/// Returns the address hash for the Secp256k1 and Actor protocols.
fn address_hash(ingest: &[u8]) -> [u8; PAYLOAD_HASH_LEN] {
    let digest = blake2b_variable(ingest, PAYLOAD_HASH_LEN);
    let mut hash = [0u8; PAYLOAD_HASH_LEN];
    hash.copy_from_slice(&digest);
    hash
}

fn to_leb_bytes(id: u64) -> Vec<u8> {
    let mut buf = unsigned_varint::encode::u64_buffer();
    unsigned_varint::encode::u64(id, &mut buf).to_vec()
}

fn from_leb_bytes(bz: &[u8]) -> Result<u64, Error> {
    let (id, remaining) =
        unsigned_varint::decode::u64(bz).map_err(|e| Error::InvalidIDPayload(e.to_string()))?;
    if !remaining.is_empty() {
        return Err(Error::InvalidIDPayload("trailing payload bytes".to_owned()));
    }
    Ok(id)
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = self.network.to_prefix();
        let protocol = self.protocol();
        match self.payload {
            Payload::ID(id) => write!(f, "{}{}{}", prefix, protocol, id),
            _ => {
                let raw = self.payload.to_raw_bytes();
                let mut ingest = Vec::with_capacity(raw.len() + 1);
                ingest.push(protocol as u8);
                ingest.extend_from_slice(&raw);

                let mut bz = raw;
                bz.extend_from_slice(&checksum(&ingest));
                write!(f, "{}{}{}", prefix, protocol, ADDRESS_ENCODER.encode(&bz))
            }
        }
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let bz = self.to_bytes();
        serde_bytes::Serialize::serialize(&bz, serializer)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bz: std::borrow::Cow<'de, [u8]> = serde_bytes::Deserialize::deserialize(deserializer)?;
        Address::from_bytes(&bz).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_display() {
        assert_eq!(Address::new_id(1024).to_string(), "f01024");
        assert_eq!(
            Address::new_id(1024).with_network(Network::Testnet).to_string(),
            "t01024"
        );
    }

    #[test]
    fn bytes_round_trip() {
        let key = [7u8; BLS_PUB_LEN];
        for addr in [
            Address::new_id(0),
            Address::new_id(u64::MAX),
            Address::new_bls(&key).unwrap(),
            Address::new_secp256k1(&[3u8; SECP_PUB_LEN]).unwrap(),
        ] {
            assert_eq!(Address::from_bytes(&addr.to_bytes()).unwrap(), addr);
        }
    }

    #[test]
    fn rejects_malformed_bytes() {
        assert_eq!(Address::from_bytes(&[]), Err(Error::InvalidLength));
        assert_eq!(Address::from_bytes(&[9, 1, 2]), Err(Error::UnknownProtocol(9)));
        assert_eq!(
            Address::from_bytes(&[3, 1, 2]),
            Err(Error::InvalidPayloadLength(2))
        );
    }

    #[test]
    fn key_lengths_validated() {
        assert_eq!(
            Address::new_bls(&[0u8; 12]),
            Err(Error::InvalidBLSLength(12))
        );
        assert_eq!(
            Address::new_secp256k1(&[0u8; 10]),
            Err(Error::InvalidSECPLength(10))
        );
    }

    #[test]
    fn display_carries_checksum() {
        let addr = Address::new_bls(&[42u8; BLS_PUB_LEN]).unwrap();
        let s = addr.to_string();
        assert!(s.starts_with("f3"));

        let raw = addr.payload_bytes();
        let decoded = ADDRESS_ENCODER.decode(s[2..].as_bytes()).unwrap();
        assert_eq!(&decoded[..raw.len()], raw.as_slice());
        assert!(validate_checksum(&addr.to_bytes(), &decoded[raw.len()..]));
    }

    #[test]
    fn serde_round_trip() {
        let addr = Address::new_secp256k1(&[9u8; SECP_PUB_LEN]).unwrap();
        let bz = serde_ipld_dagcbor::to_vec(&addr).unwrap();
        let out: Address = serde_ipld_dagcbor::from_slice(&bz).unwrap();
        assert_eq!(out, addr);
    }
}
