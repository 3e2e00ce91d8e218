// Copyright 2019-2023 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::errors::Error;
use crate::{from_slice, to_vec};
use cid::{new_from_cbor, Cid, Code::Blake2b256};
use serde::{de::DeserializeOwned, Serialize};

/// Implemented by types which live in the content-addressed store as canonical CBOR.
pub trait Cbor: Serialize + DeserializeOwned {
    /// Marshals the object into CBOR bytes.
    fn marshal_cbor(&self) -> Result<Vec<u8>, Error> {
        to_vec(self)
    }

    /// Unmarshals CBOR bytes into the object.
    fn unmarshal_cbor(bz: &[u8]) -> Result<Self, Error> {
        from_slice(bz)
    }

    /// Returns the content identifier of the serialized object.
    fn cid(&self) -> Result<Cid, Error> {
        Ok(new_from_cbor(&self.marshal_cbor()?, Blake2b256))
    }
}
