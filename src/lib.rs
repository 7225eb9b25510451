//! An ordered, duplicate-free container implemented by a probabilistic skip
//! list, along with the index arena that backs its nodes.

pub mod arena;
pub mod skiplist;
