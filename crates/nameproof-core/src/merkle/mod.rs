//! Merkle tree commitment over a sorted record set.

mod proof;
mod tree;
mod verify;

pub use proof::*;
pub use tree::*;
pub use verify::*;
