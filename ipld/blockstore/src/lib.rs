// Copyright 2019-2023 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use anyhow::Result;
use cid::{new_from_cbor, Cid, Code};
use db::Store;
use encoding::{de::DeserializeOwned, from_slice, ser::Serialize, to_vec};

/// Wrapper for a database to handle inserting and retrieving ipld data with Cids.
pub trait BlockStore: Store {
    /// Get raw bytes from the block store by Cid.
    fn get_bytes(&self, cid: &Cid) -> Result<Option<Vec<u8>>> {
        Ok(self.read(cid.to_bytes())?)
    }

    /// Get a typed object from the block store by Cid.
    fn get<T>(&self, cid: &Cid) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        match self.get_bytes(cid)? {
            Some(bz) => Ok(Some(from_slice(&bz)?)),
            None => Ok(None),
        }
    }

    /// Returns `Ok(true)` if the block exists in the store.
    fn contains(&self, cid: &Cid) -> Result<bool> {
        Ok(self.exists(cid.to_bytes())?)
    }

    /// Put an object in the block store and return its Cid identifier.
    fn put<S>(&self, obj: &S, code: Code) -> Result<Cid>
    where
        S: Serialize,
    {
        self.put_raw(to_vec(obj)?, code)
    }

    /// Put raw bytes in the block store and return their Cid identifier.
    /// Writes are keyed by content, so repeating a put is harmless.
    fn put_raw(&self, bytes: Vec<u8>, code: Code) -> Result<Cid> {
        let cid = new_from_cbor(&bytes, code);
        self.write(cid.to_bytes(), &bytes)?;
        Ok(cid)
    }
}

impl<T: Store> BlockStore for T {}
