// Copyright 2019-2023 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod errors;
mod signature;
mod signer;
mod vrf;

pub use self::errors::Error;
pub use self::signature::*;
pub use self::signer::Signer;
pub use self::vrf::VRFProof;
