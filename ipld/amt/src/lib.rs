// Copyright 2019-2023 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod amt;
mod error;
mod node;
mod root;

pub use self::amt::Amt;
pub use self::error::Error;
pub(crate) use self::node::{CollapsedNode, Link, Node};
pub(crate) use self::root::Root;

/// Fan-out of every trie node.
pub(crate) const WIDTH: u64 = 8;

/// Highest index that can be stored in the amt.
pub const MAX_INDEX: u64 = 1 << 48;

/// Maximum height of the tree, bounding `MAX_INDEX`.
pub(crate) const MAX_HEIGHT: u32 = 16;

/// Number of indices a subtree rooted at the given height covers.
pub(crate) fn nodes_for_height(height: u32) -> u64 {
    WIDTH.pow(height)
}

pub(crate) fn init_sized_vec<V>() -> Vec<Option<V>> {
    (0..WIDTH).map(|_| None).collect()
}
