// Copyright 2019-2023 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::{init_sized_vec, CollapsedNode, Node};
use serde::{
    de::{self, Deserialize},
    ser::{self, Serialize},
};

/// Root of an AMT vector. Tracks the tree height and element count and is
/// the object the vector's Cid refers to.
#[derive(PartialEq, Debug)]
pub(crate) struct Root<V> {
    pub height: u32,
    pub count: u64,
    pub node: Node<V>,
}

impl<V> Root<V> {
    pub(crate) fn new() -> Self {
        Self {
            height: 0,
            count: 0,
            node: Node::Leaf {
                vals: init_sized_vec(),
            },
        }
    }
}

impl<V> Serialize for Root<V>
where
    V: Serialize,
{
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        (&self.height, &self.count, &self.node).serialize(s)
    }
}

impl<'de, V> Deserialize<'de> for Root<V>
where
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        let (height, count, node): (u32, u64, CollapsedNode<V>) =
            Deserialize::deserialize(deserializer)?;
        Ok(Self {
            height,
            count,
            node: node.expand().map_err(de::Error::custom)?,
        })
    }
}
