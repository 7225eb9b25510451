use thiserror::Error;

/// The error type for cursor accessors.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum SkipListError {
    /// The cursor references no node; it is past the last element of the
    /// list. Callers are expected to compare against `end()` or check
    /// `is_end()` before dereferencing.
    #[error("cursor is past the end of the list")]
    PastTheEnd,
}
