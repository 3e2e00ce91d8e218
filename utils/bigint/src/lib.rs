// Copyright 2019-2023 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

pub mod bigint_ser;

pub use num_bigint::*;

/// Maximum length, in bytes, that a serialized big integer may occupy on
/// chain (sign prefix included). Anything larger is rejected by both the
/// serializer and the deserializer.
pub const MAX_ENCODED_SIZE: usize = 128;
