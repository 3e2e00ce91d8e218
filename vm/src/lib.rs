// Copyright 2019-2023 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod error;
mod exit_code;
mod method;
mod token;

pub use self::error::*;
pub use self::exit_code::*;
pub use self::method::*;
pub use self::token::*;
