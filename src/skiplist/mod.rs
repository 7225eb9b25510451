//! Ordered, duplicate-free container backed by a probabilistic linked
//! hierarchy of subsequences.

mod compare;
mod error;
mod level_generator;
mod list;

pub use self::compare::{Compare, NaturalOrder};
pub use self::error::SkipListError;
pub use self::level_generator::{LevelGenerator, MAX_LEVEL};
pub use self::list::{Cursor, IntoIter, Iter, SkipList};
