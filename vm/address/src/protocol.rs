// Copyright 2019-2023 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::fmt;

/// Protocol defines the addressing protocol used to derive data to an address.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Protocol {
    /// ID protocol addressing
    ID = 0,
    /// SECP256K1 key addressing
    Secp256k1 = 1,
    /// Actor protocol addressing
    Actor = 2,
    /// BLS key addressing
    BLS = 3,
}

impl Protocol {
    /// Returns the protocol for the identifier byte, if valid.
    pub(crate) fn from_byte(b: u8) -> Option<Protocol> {
        match b {
            0 => Some(Protocol::ID),
            1 => Some(Protocol::Secp256k1),
            2 => Some(Protocol::Actor),
            3 => Some(Protocol::BLS),
            _ => None,
        }
    }
}

/// Protocols formatted as their identifier digit.
impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u8)
    }
}
