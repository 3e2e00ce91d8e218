// Copyright 2019-2023 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

/// Network defines the preconfigured networks to use with address encoding.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
}

impl Network {
    /// Returns the string prefix used when rendering an address.
    pub fn to_prefix(self) -> &'static str {
        match self {
            Network::Mainnet => "f",
            Network::Testnet => "t",
        }
    }
}
