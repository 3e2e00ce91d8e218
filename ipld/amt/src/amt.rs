// Copyright 2019-2023 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::{
    init_sized_vec, nodes_for_height, Error, Link, Node, Root, MAX_HEIGHT, MAX_INDEX,
};
use cid::{Cid, Code::Blake2b256};
use encoding::{de::DeserializeOwned, ser::Serialize};
use ipld_blockstore::BlockStore;

/// Array mapped trie: a persistent vector keyed by dense integer indices,
/// serializable to a Cid. Nodes are written to the backing block store on
/// `flush`, which makes two identically-built vectors yield identical Cids.
///
/// Usage:
/// ```
/// use ipld_amt::Amt;
///
/// let db = db::MemoryDB::default();
/// let mut amt = Amt::new(&db);
///
/// amt.set(2, "foo".to_owned()).unwrap();
/// assert_eq!(amt.get(2).unwrap(), Some("foo".to_owned()));
/// assert_eq!(amt.count(), 1);
///
/// let cid = amt.flush().unwrap();
/// let restored: Amt<String, _> = Amt::load(&cid, &db).unwrap();
/// assert_eq!(restored.get(2).unwrap(), Some("foo".to_owned()));
/// ```
#[derive(Debug)]
pub struct Amt<'db, V, BS> {
    root: Root<V>,
    block_store: &'db BS,
}

impl<'db, V, BS> Amt<'db, V, BS>
where
    V: Serialize + DeserializeOwned,
    BS: BlockStore,
{
    /// Constructor for a new AMT over the given block store.
    pub fn new(block_store: &'db BS) -> Self {
        Self {
            root: Root::new(),
            block_store,
        }
    }

    /// Constructs an AMT from the Cid of a previously flushed root.
    pub fn load(cid: &Cid, block_store: &'db BS) -> Result<Self, Error> {
        let root: Root<V> = block_store
            .get(cid)?
            .ok_or_else(|| Error::CidNotFound(cid.to_string()))?;

        if root.height > MAX_HEIGHT {
            return Err(Error::MaxHeight(root.height, MAX_HEIGHT));
        }

        Ok(Self { root, block_store })
    }

    /// Gets the height of the AMT.
    pub fn height(&self) -> u32 {
        self.root.height
    }

    /// Gets the count of elements in the AMT.
    pub fn count(&self) -> u64 {
        self.root.count
    }

    /// Gets the value at the index, if any.
    pub fn get(&self, i: u64) -> Result<Option<V>, Error>
    where
        V: Clone,
    {
        if i > MAX_INDEX {
            return Err(Error::OutOfRange(i));
        }

        if i >= nodes_for_height(self.height() + 1) {
            return Ok(None);
        }

        self.root.node.get(self.block_store, self.height(), i)
    }

    /// Sets the value at the index, growing the tree as needed.
    pub fn set(&mut self, i: u64, val: V) -> Result<(), Error> {
        if i > MAX_INDEX {
            return Err(Error::OutOfRange(i));
        }

        while i >= nodes_for_height(self.height() + 1) {
            // The occupied root moves down a level as slot zero of a new root.
            if !self.root.node.is_empty() {
                let node = std::mem::replace(&mut self.root.node, Node::new_leaf());
                let mut links: Vec<Option<Link<V>>> = init_sized_vec();
                links[0] = Some(Link::Dirty(Box::new(node)));
                self.root.node = Node::Link { links };
            } else {
                self.root.node = Node::Link {
                    links: init_sized_vec(),
                };
            }
            self.root.height += 1;
        }

        if self
            .root
            .node
            .set(self.block_store, self.height(), i, val)?
            .is_none()
        {
            self.root.count += 1;
        }

        Ok(())
    }

    /// Flushes the tree into the block store and returns the root Cid.
    pub fn flush(&mut self) -> Result<Cid, Error> {
        self.root.node.flush(self.block_store)?;
        Ok(self.block_store.put(&self.root, Blake2b256)?)
    }
}
