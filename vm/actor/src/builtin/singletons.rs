// Copyright 2019-2023 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use address::Address;

lazy_static! {
    /// Distinguished account of the init actor, the only party allowed to
    /// construct new actors.
    pub static ref INIT_ACTOR_ADDR: Address = Address::new_id(0);
}
