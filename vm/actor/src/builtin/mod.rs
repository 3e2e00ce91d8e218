// Copyright 2019-2023 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod codes;
pub mod multisig;
mod singletons;

pub use self::codes::*;
pub use self::singletons::*;
