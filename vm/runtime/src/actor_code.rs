// Copyright 2019-2023 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::Runtime;
use ipld_blockstore::BlockStore;
use vm::{ActorError, MethodNum, Serialized};

/// Interface for invoking methods on an actor.
pub trait ActorCode {
    /// Invokes the method with the given parameters against the actor's
    /// handler for the method number.
    fn invoke_method<BS, RT>(
        &self,
        rt: &mut RT,
        method: MethodNum,
        params: &Serialized,
    ) -> Result<Serialized, ActorError>
    where
        BS: BlockStore,
        RT: Runtime<BS>;
}
