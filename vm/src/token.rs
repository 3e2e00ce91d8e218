// Copyright 2019-2023 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use num_bigint::BigInt;

/// Token amount in the chain's smallest unit.
pub type TokenAmount = BigInt;
