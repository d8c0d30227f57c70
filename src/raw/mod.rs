mod arena;
mod handle;
mod node;
mod raw_bst_map;
mod size;

pub(crate) use handle::Handle;
pub(crate) use node::Direction;
pub(crate) use raw_bst_map::{RawBstMap, Stack};
