// Copyright 2019-2023 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::{init_sized_vec, nodes_for_height, Error};
use cid::{Cid, Code::Blake2b256};
use encoding::{
    de::{self, Deserialize, DeserializeOwned},
    ser::{self, Serialize},
    serde_bytes::{ByteBuf, Bytes},
};
use ipld_blockstore::BlockStore;

/// Link to a subtree: either persisted behind a Cid or an in-memory child
/// which still has to be flushed.
#[derive(Debug, PartialEq)]
pub(crate) enum Link<V> {
    Cid(Cid),
    Dirty(Box<Node<V>>),
}

/// A single trie node, a fixed `WIDTH` array of value or subtree slots.
/// Leaf nodes only ever occur at height zero.
#[derive(Debug, PartialEq)]
pub(crate) enum Node<V> {
    Link { links: Vec<Option<Link<V>>> },
    Leaf { vals: Vec<Option<V>> },
}

/// Serialized form of a node: a presence bitmap followed by the occupied
/// link or value slots in index order.
pub(crate) struct CollapsedNode<V> {
    bmap: u8,
    links: Vec<Cid>,
    vals: Vec<V>,
}

impl<V> Serialize for Node<V>
where
    V: Serialize,
{
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        match self {
            Node::Leaf { vals } => {
                let mut bmap = 0u8;
                let mut values = Vec::new();
                for (i, v) in vals.iter().enumerate() {
                    if let Some(val) = v {
                        bmap |= 1 << i;
                        values.push(val);
                    }
                }
                (Bytes::new(&[bmap]), Vec::<&Cid>::new(), values).serialize(s)
            }
            Node::Link { links } => {
                let mut bmap = 0u8;
                let mut cids = Vec::new();
                for (i, link) in links.iter().enumerate() {
                    match link {
                        Some(Link::Cid(cid)) => {
                            bmap |= 1 << i;
                            cids.push(cid);
                        }
                        Some(Link::Dirty(_)) => return Err(ser::Error::custom(Error::Cached)),
                        None => (),
                    }
                }
                (Bytes::new(&[bmap]), cids, Vec::<&V>::new()).serialize(s)
            }
        }
    }
}

impl<'de, V> Deserialize<'de> for CollapsedNode<V>
where
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        let (bmap_bz, links, vals): (ByteBuf, Vec<Cid>, Vec<V>) =
            Deserialize::deserialize(deserializer)?;
        if bmap_bz.len() != 1 {
            return Err(de::Error::custom("node bitmap must be a single byte"));
        }
        Ok(Self {
            bmap: bmap_bz[0],
            links,
            vals,
        })
    }
}

impl<V> CollapsedNode<V> {
    /// Redistributes the serialized slots into a sized node, validating the
    /// bitmap along the way.
    pub(crate) fn expand(self) -> Result<Node<V>, Error> {
        let CollapsedNode { bmap, links, vals } = self;
        if !links.is_empty() && !vals.is_empty() {
            return Err(Error::InvalidNode(
                "node carries both links and values".to_owned(),
            ));
        }
        if bmap.count_ones() as usize != links.len() + vals.len() {
            return Err(Error::InvalidNode(format!(
                "bitmap {:#010b} does not match {} entries",
                bmap,
                links.len() + vals.len()
            )));
        }

        if !links.is_empty() {
            let mut slots = init_sized_vec();
            let mut iter = links.into_iter();
            for (i, slot) in slots.iter_mut().enumerate() {
                if bmap & (1 << i) != 0 {
                    *slot = iter.next().map(Link::Cid);
                }
            }
            Ok(Node::Link { links: slots })
        } else {
            let mut slots = init_sized_vec();
            let mut iter = vals.into_iter();
            for (i, slot) in slots.iter_mut().enumerate() {
                if bmap & (1 << i) != 0 {
                    *slot = iter.next();
                }
            }
            Ok(Node::Leaf { vals: slots })
        }
    }
}

impl<V> Node<V>
where
    V: Serialize + DeserializeOwned,
{
    pub(crate) fn new_leaf() -> Self {
        Node::Leaf {
            vals: init_sized_vec(),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        match self {
            Node::Leaf { vals } => vals.iter().all(Option::is_none),
            Node::Link { links } => links.iter().all(Option::is_none),
        }
    }

    /// Gets the value at the index of the subtree rooted at this node.
    pub(crate) fn get<BS: BlockStore>(&self, bs: &BS, height: u32, i: u64) -> Result<Option<V>, Error>
    where
        V: Clone,
    {
        match self {
            Node::Leaf { vals } => Ok(vals.get(i as usize).cloned().flatten()),
            Node::Link { links } => {
                let nfh = nodes_for_height(height);
                match links.get((i / nfh) as usize).and_then(Option::as_ref) {
                    Some(Link::Cid(cid)) => {
                        let collapsed: CollapsedNode<V> = bs
                            .get(cid)?
                            .ok_or_else(|| Error::CidNotFound(cid.to_string()))?;
                        collapsed.expand()?.get(bs, height - 1, i % nfh)
                    }
                    Some(Link::Dirty(node)) => node.get(bs, height - 1, i % nfh),
                    None => Ok(None),
                }
            }
        }
    }

    /// Sets the value at the index of the subtree rooted at this node,
    /// returning the previous value if the slot was occupied.
    pub(crate) fn set<BS: BlockStore>(
        &mut self,
        bs: &BS,
        height: u32,
        i: u64,
        val: V,
    ) -> Result<Option<V>, Error> {
        if height == 0 {
            return match self {
                Node::Leaf { vals } => Ok(vals[i as usize].replace(val)),
                Node::Link { .. } => Err(Error::InvalidNode(
                    "link node at leaf height".to_owned(),
                )),
            };
        }

        let nfh = nodes_for_height(height);
        let idx = (i / nfh) as usize;

        match self {
            Node::Link { links } => {
                if let Some(Link::Cid(cid)) = &links[idx] {
                    // bring the persisted subtree back into memory for mutation
                    let cid = *cid;
                    let collapsed: CollapsedNode<V> = bs
                        .get(&cid)?
                        .ok_or_else(|| Error::CidNotFound(cid.to_string()))?;
                    links[idx] = Some(Link::Dirty(Box::new(collapsed.expand()?)));
                } else if links[idx].is_none() {
                    let node = if height == 1 {
                        Node::new_leaf()
                    } else {
                        Node::Link {
                            links: init_sized_vec(),
                        }
                    };
                    links[idx] = Some(Link::Dirty(Box::new(node)));
                }

                match &mut links[idx] {
                    Some(Link::Dirty(node)) => node.set(bs, height - 1, i % nfh, val),
                    _ => unreachable!("slot was materialized above"),
                }
            }
            Node::Leaf { .. } => Err(Error::InvalidNode(
                "leaf node above leaf height".to_owned(),
            )),
        }
    }

    /// Persists all dirty subtrees, replacing them with links to the stored
    /// blocks.
    pub(crate) fn flush<BS: BlockStore>(&mut self, bs: &BS) -> Result<(), Error> {
        if let Node::Link { links } = self {
            for link in links.iter_mut().flatten() {
                if let Link::Dirty(node) = link {
                    node.flush(bs)?;
                    let cid = bs.put(&**node, Blake2b256)?;
                    *link = Link::Cid(cid);
                }
            }
        }
        Ok(())
    }
}
