use std::cmp::Ordering;

/// A total order over values of type `T`.
///
/// The skip list considers two keys equal if and only if the comparator
/// returns [`Ordering::Equal`] for them, so a comparator that looks at part
/// of a value collapses all values sharing that part into one key.
pub trait Compare<T> {
    /// Three-way comparison of `lhs` against `rhs`.
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering;
}

/// Orders values by their `Ord` implementation. The default comparator.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct NaturalOrder;

impl<T> Compare<T> for NaturalOrder
where
    T: Ord,
{
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering {
        lhs.cmp(rhs)
    }
}

impl<T, F> Compare<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering {
        self(lhs, rhs)
    }
}
