use crate::arena::Arena;
use crate::skiplist::compare::{Compare, NaturalOrder};
use crate::skiplist::error::SkipListError;
use crate::skiplist::level_generator::{LevelGenerator, MAX_LEVEL};
use serde::de::{SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::fmt::Debug;
use std::iter::FromIterator;
use std::marker::PhantomData;
use std::mem;
use std::ptr;

type Link = Option<usize>;

struct Node<T> {
    value: T,
    // one link per level the node participates in; length is level + 1
    forward: Vec<Link>,
}

impl<T> Node<T> {
    fn new(value: T, level: usize) -> Self {
        Node {
            value,
            forward: vec![None; level + 1],
        }
    }
}

/// An ordered, duplicate-free container implemented by a skip list.
///
/// A skip list is a probabilistic data structure that allows for binary
/// search tree operations by maintaining a linked hierarchy of subsequences.
/// The first subsequence is a sorted linked list of all the elements that it
/// contains. Each successive subsequence contains approximately a quarter of
/// the elements of the previous subsequence, so searching, insertion, and
/// bound queries take approximately logarithmic time without any rebalancing.
///
/// Nodes live in an index [`Arena`] owned by the list; every link is a stable
/// index into that arena, so a node referenced from many levels at once still
/// has a single deallocation point. Keys that compare equal under the
/// comparator are rejected on insertion rather than duplicated.
///
/// # Examples
/// ```
/// use skip_list::skiplist::SkipList;
///
/// let mut list = SkipList::new();
/// for key in vec![3, 1, 4, 1, 5] {
///     list.insert(key);
/// }
///
/// assert_eq!(list.len(), 4);
/// assert_eq!(list.iter().collect::<Vec<&u32>>(), vec![&1, &3, &4, &5]);
///
/// assert_eq!(list.find(&4).get(), Some(&4));
/// assert!(list.find(&2).is_end());
/// assert_eq!(list.lower_bound(&2).get(), Some(&3));
/// ```
///
/// [`Arena`]: ../arena/struct.Arena.html
pub struct SkipList<T, C = NaturalOrder> {
    arena: Arena<Node<T>>,
    // the sentinel head's forward array; it holds no value and is never
    // visited by iteration
    head: Vec<Link>,
    len: usize,
    max_level: usize,
    cmp: C,
    levels: LevelGenerator,
}

impl<T> SkipList<T>
where
    T: Ord,
{
    /// Constructs a new, empty `SkipList<T>` ordered by `T`'s `Ord`
    /// implementation.
    ///
    /// # Examples
    /// ```
    /// use skip_list::skiplist::SkipList;
    ///
    /// let list: SkipList<u32> = SkipList::new();
    /// ```
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }

    /// Constructs a new, empty `SkipList<T>` whose level generator is seeded
    /// with `seed`, so the node tower heights are reproducible across runs.
    ///
    /// # Examples
    /// ```
    /// use skip_list::skiplist::SkipList;
    ///
    /// let mut list = SkipList::with_seed([1, 2, 3, 4]);
    /// list.insert(1);
    /// ```
    pub fn with_seed(seed: [u32; 4]) -> Self {
        Self::with_comparator_and_seed(NaturalOrder, seed)
    }
}

impl<T, C> SkipList<T, C>
where
    C: Compare<T>,
{
    /// Constructs a new, empty `SkipList<T, C>` ordered by `cmp`.
    ///
    /// # Examples
    /// ```
    /// use skip_list::skiplist::SkipList;
    ///
    /// let mut list = SkipList::with_comparator(|lhs: &u32, rhs: &u32| rhs.cmp(lhs));
    /// list.insert(1);
    /// list.insert(3);
    /// assert_eq!(list.iter().collect::<Vec<&u32>>(), vec![&3, &1]);
    /// ```
    pub fn with_comparator(cmp: C) -> Self {
        SkipList {
            arena: Arena::new(),
            head: vec![None; MAX_LEVEL],
            len: 0,
            max_level: 0,
            cmp,
            levels: LevelGenerator::new(),
        }
    }

    /// Constructs a new, empty `SkipList<T, C>` ordered by `cmp`, with a
    /// seeded level generator.
    pub fn with_comparator_and_seed(cmp: C, seed: [u32; 4]) -> Self {
        SkipList {
            arena: Arena::new(),
            head: vec![None; MAX_LEVEL],
            len: 0,
            max_level: 0,
            cmp,
            levels: LevelGenerator::from_seed(seed),
        }
    }

    fn forward(&self, position: Link, level: usize) -> Link {
        match position {
            None => self.head[level],
            Some(index) => self.arena[index].forward[level],
        }
    }

    fn forward_mut(&mut self, position: Link, level: usize) -> &mut Link {
        match position {
            None => &mut self.head[level],
            Some(index) => &mut self.arena[index].forward[level],
        }
    }

    fn cursor_at(&self, node: Link) -> Cursor<'_, T> {
        Cursor {
            arena: &self.arena,
            node,
        }
    }

    // Walks from the sentinel at the highest active level down to level 0 and
    // returns the last position whose key compares less than `key` (`None` is
    // the sentinel itself). In inclusive mode the walk also passes over keys
    // comparing equal, which turns the successor into the upper bound.
    fn seek(&self, key: &T, inclusive: bool) -> Link {
        let mut position = None;
        for level in (0..=self.max_level).rev() {
            while let Some(next) = self.forward(position, level) {
                match self.cmp.compare(&self.arena[next].value, key) {
                    Ordering::Less => position = Some(next),
                    Ordering::Equal if inclusive => position = Some(next),
                    _ => break,
                }
            }
        }
        position
    }

    // Same walk as `seek`, but records the last strictly-less position for
    // every level so a new node can be spliced in after them.
    fn update_path(&self, key: &T) -> Vec<Link> {
        let mut update = vec![None; self.max_level + 1];
        let mut position = None;
        for level in (0..=self.max_level).rev() {
            while let Some(next) = self.forward(position, level) {
                if self.cmp.compare(&self.arena[next].value, key) == Ordering::Less {
                    position = Some(next);
                } else {
                    break;
                }
            }
            update[level] = position;
        }
        update
    }

    /// Inserts a value into the list, returning the position of the value and
    /// whether the list changed. If a value comparing equal is already
    /// present, the list is left untouched and the returned cursor references
    /// the existing value.
    ///
    /// # Examples
    /// ```
    /// use skip_list::skiplist::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// let (cursor, inserted) = list.insert(1);
    /// assert!(inserted);
    /// assert_eq!(cursor.get(), Some(&1));
    ///
    /// let (cursor, inserted) = list.insert(1);
    /// assert!(!inserted);
    /// assert_eq!(cursor.get(), Some(&1));
    /// assert_eq!(list.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> (Cursor<'_, T>, bool) {
        let mut update = self.update_path(&value);

        if let Some(index) = self.forward(update[0], 0) {
            if self.cmp.compare(&self.arena[index].value, &value) == Ordering::Equal {
                return (self.cursor_at(Some(index)), false);
            }
        }

        let level = self.levels.random_level();
        if level > self.max_level {
            // levels activated for the first time descend straight from the
            // sentinel
            update.resize(level + 1, None);
            self.max_level = level;
        }

        let mut node = Node::new(value, level);
        for (i, predecessor) in update.iter().enumerate().take(level + 1) {
            node.forward[i] = self.forward(*predecessor, i);
        }

        let index = self.arena.insert(node);
        for (i, predecessor) in update.iter().enumerate().take(level + 1) {
            *self.forward_mut(*predecessor, i) = Some(index);
        }

        self.len += 1;
        (self.cursor_at(Some(index)), true)
    }

    /// Constructs a value and inserts it. Equivalent to
    /// `insert(constructor())`.
    ///
    /// # Examples
    /// ```
    /// use skip_list::skiplist::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// let (cursor, inserted) = list.insert_with(|| String::from("test"));
    /// assert!(inserted);
    /// assert_eq!(cursor.get().map(String::as_str), Some("test"));
    /// ```
    pub fn insert_with<F>(&mut self, constructor: F) -> (Cursor<'_, T>, bool)
    where
        F: FnOnce() -> T,
    {
        self.insert(constructor())
    }

    /// Returns a cursor referencing the value that compares equal to `key`,
    /// or the end cursor if there is no such value.
    ///
    /// # Examples
    /// ```
    /// use skip_list::skiplist::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// list.insert(1);
    /// assert_eq!(list.find(&1).get(), Some(&1));
    /// assert!(list.find(&2).is_end());
    /// ```
    pub fn find(&self, key: &T) -> Cursor<'_, T> {
        let node = self
            .forward(self.seek(key, false), 0)
            .filter(|&index| self.cmp.compare(&self.arena[index].value, key) == Ordering::Equal);
        self.cursor_at(node)
    }

    /// Returns the number of values comparing equal to `key`. As the list
    /// rejects duplicates, this is always 0 or 1.
    ///
    /// # Examples
    /// ```
    /// use skip_list::skiplist::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// list.insert(1);
    /// list.insert(1);
    /// assert_eq!(list.count(&1), 1);
    /// assert_eq!(list.count(&2), 0);
    /// ```
    pub fn count(&self, key: &T) -> usize {
        if self.find(key).is_end() {
            0
        } else {
            1
        }
    }

    /// Returns a cursor referencing the first value not less than `key`, or
    /// the end cursor if every value is less than `key`.
    ///
    /// # Examples
    /// ```
    /// use skip_list::skiplist::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// list.insert(1);
    /// list.insert(3);
    /// assert_eq!(list.lower_bound(&2).get(), Some(&3));
    /// assert_eq!(list.lower_bound(&3).get(), Some(&3));
    /// assert!(list.lower_bound(&4).is_end());
    /// ```
    pub fn lower_bound(&self, key: &T) -> Cursor<'_, T> {
        self.cursor_at(self.forward(self.seek(key, false), 0))
    }

    /// Returns a cursor referencing the first value strictly greater than
    /// `key`, or the end cursor if every value is less than or equal to
    /// `key`.
    ///
    /// # Examples
    /// ```
    /// use skip_list::skiplist::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// list.insert(1);
    /// list.insert(3);
    /// assert_eq!(list.upper_bound(&2).get(), Some(&3));
    /// assert_eq!(list.upper_bound(&3).get(), None);
    /// ```
    pub fn upper_bound(&self, key: &T) -> Cursor<'_, T> {
        self.cursor_at(self.forward(self.seek(key, true), 0))
    }

    /// Returns the pair `(lower_bound(key), upper_bound(key))`. The range
    /// spans at most one value.
    ///
    /// # Examples
    /// ```
    /// use skip_list::skiplist::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// list.insert(1);
    /// list.insert(3);
    ///
    /// let (lower, upper) = list.equal_range(&1);
    /// assert_eq!(lower.get(), Some(&1));
    /// assert_eq!(upper.get(), Some(&3));
    ///
    /// let (lower, upper) = list.equal_range(&2);
    /// assert_eq!(lower, upper);
    /// ```
    pub fn equal_range(&self, key: &T) -> (Cursor<'_, T>, Cursor<'_, T>) {
        (self.lower_bound(key), self.upper_bound(key))
    }

    /// Returns the number of values in the list.
    ///
    /// # Examples
    /// ```
    /// use skip_list::skiplist::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// list.insert(1);
    /// assert_eq!(list.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list holds no values.
    ///
    /// # Examples
    /// ```
    /// use skip_list::skiplist::SkipList;
    ///
    /// let list: SkipList<u32> = SkipList::new();
    /// assert!(list.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the largest number of values the list could theoretically
    /// hold.
    pub fn max_size(&self) -> usize {
        isize::max_value() as usize / mem::size_of::<Node<T>>()
    }

    /// Clears the list, removing all values and resetting the tracked
    /// maximum level. This is the only operation that removes values and it
    /// invalidates every previously obtained cursor.
    ///
    /// # Examples
    /// ```
    /// use skip_list::skiplist::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// list.insert(1);
    /// list.insert(2);
    /// list.clear();
    /// assert!(list.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.arena.clear();
        for link in &mut self.head {
            *link = None;
        }
        self.len = 0;
        self.max_level = 0;
    }

    /// Exchanges the entire contents of two lists in constant time,
    /// including their comparators and level generator state.
    ///
    /// # Examples
    /// ```
    /// use skip_list::skiplist::SkipList;
    ///
    /// let mut lhs = SkipList::new();
    /// lhs.insert(1);
    /// let mut rhs = SkipList::new();
    /// rhs.insert(2);
    ///
    /// lhs.swap(&mut rhs);
    /// assert_eq!(lhs.iter().collect::<Vec<&u32>>(), vec![&2]);
    /// assert_eq!(rhs.iter().collect::<Vec<&u32>>(), vec![&1]);
    /// ```
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Returns a cursor referencing the smallest value in the list, or the
    /// end cursor if the list is empty.
    ///
    /// # Examples
    /// ```
    /// use skip_list::skiplist::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// assert_eq!(list.begin(), list.end());
    /// list.insert(1);
    /// assert_eq!(list.begin().get(), Some(&1));
    /// ```
    pub fn begin(&self) -> Cursor<'_, T> {
        self.cursor_at(self.head[0])
    }

    /// Returns the cursor one past the largest value in the list.
    /// Dereferencing it is an error.
    ///
    /// # Examples
    /// ```
    /// use skip_list::skiplist::SkipList;
    ///
    /// let list: SkipList<u32> = SkipList::new();
    /// assert!(list.end().is_end());
    /// ```
    pub fn end(&self) -> Cursor<'_, T> {
        self.cursor_at(None)
    }

    /// Returns an iterator over the list that yields immutable references in
    /// ascending order.
    ///
    /// # Examples
    /// ```
    /// use skip_list::skiplist::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// list.insert(3);
    /// list.insert(1);
    ///
    /// let mut iterator = list.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            arena: &self.arena,
            node: self.head[0],
        }
    }
}

impl<T> Default for SkipList<T>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> Clone for SkipList<T, C>
where
    T: Clone,
    C: Compare<T> + Clone,
{
    // Re-inserts every value of the source in iteration order; the copy
    // draws its own tower heights rather than mirroring the source's
    // structure.
    fn clone(&self) -> Self {
        let mut list = SkipList::with_comparator(self.cmp.clone());
        for value in self {
            list.insert(value.clone());
        }
        list
    }
}

impl<T, C> Debug for SkipList<T, C>
where
    T: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(Iter {
                arena: &self.arena,
                node: self.head[0],
            })
            .finish()
    }
}

impl<T, C, D> PartialEq<SkipList<T, D>> for SkipList<T, C>
where
    T: PartialEq,
{
    fn eq(&self, other: &SkipList<T, D>) -> bool {
        self.len == other.len && self.into_iter().eq(other)
    }
}

impl<T, C> Eq for SkipList<T, C> where T: Eq {}

impl<T, C, D> PartialOrd<SkipList<T, D>> for SkipList<T, C>
where
    T: PartialOrd,
{
    fn partial_cmp(&self, other: &SkipList<T, D>) -> Option<Ordering> {
        self.into_iter().partial_cmp(other)
    }
}

impl<T, C> Ord for SkipList<T, C>
where
    T: Ord,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.into_iter().cmp(other)
    }
}

impl<T> FromIterator<T> for SkipList<T>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut list = SkipList::new();
        list.extend(iter);
        list
    }
}

impl<T, C> Extend<T> for SkipList<T, C>
where
    C: Compare<T>,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T, C> IntoIterator for SkipList<T, C> {
    type IntoIter = IntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            node: self.head[0],
            arena: self.arena,
        }
    }
}

impl<'a, T: 'a, C> IntoIterator for &'a SkipList<T, C> {
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            arena: &self.arena,
            node: self.head[0],
        }
    }
}

impl<T, C> Serialize for SkipList<T, C>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len))?;
        for value in self {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}

impl<'de, T> Deserialize<'de> for SkipList<T>
where
    T: Deserialize<'de> + Ord,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SeqVisitor<T> {
            marker: PhantomData<T>,
        }

        impl<'de, T> Visitor<'de> for SeqVisitor<T>
        where
            T: Deserialize<'de> + Ord,
        {
            type Value = SkipList<T>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a sequence of ordered values")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut list = SkipList::new();
                while let Some(value) = seq.next_element()? {
                    list.insert(value);
                }
                Ok(list)
            }
        }

        deserializer.deserialize_seq(SeqVisitor {
            marker: PhantomData,
        })
    }
}

/// A position inside a `SkipList<T, C>`, either referencing a value or
/// sitting past the end of the list.
///
/// Cursors are forward-only; advancing follows the bottom-level link and
/// saturates at the end position. Two cursors are equal when they reference
/// the same node of the same list, or when both are past the end.
pub struct Cursor<'a, T: 'a> {
    arena: &'a Arena<Node<T>>,
    node: Link,
}

impl<'a, T: 'a> Cursor<'a, T> {
    /// Returns the referenced value, or an error for the end position.
    ///
    /// # Errors
    ///
    /// Returns [`SkipListError::PastTheEnd`] if the cursor references no
    /// node.
    ///
    /// # Examples
    /// ```
    /// use skip_list::skiplist::{SkipList, SkipListError};
    ///
    /// let mut list = SkipList::new();
    /// list.insert(1);
    /// assert_eq!(list.begin().value(), Ok(&1));
    /// assert_eq!(list.end().value(), Err(SkipListError::PastTheEnd));
    /// ```
    ///
    /// [`SkipListError::PastTheEnd`]: enum.SkipListError.html#variant.PastTheEnd
    pub fn value(&self) -> Result<&'a T, SkipListError> {
        match self.node {
            Some(index) => Ok(&self.arena[index].value),
            None => Err(SkipListError::PastTheEnd),
        }
    }

    /// Returns the referenced value, or `None` for the end position.
    ///
    /// # Examples
    /// ```
    /// use skip_list::skiplist::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// list.insert(1);
    /// assert_eq!(list.begin().get(), Some(&1));
    /// assert_eq!(list.end().get(), None);
    /// ```
    pub fn get(&self) -> Option<&'a T> {
        self.node.map(|index| &self.arena[index].value)
    }

    /// Returns `true` if the cursor is past the end of the list.
    ///
    /// # Examples
    /// ```
    /// use skip_list::skiplist::SkipList;
    ///
    /// let list: SkipList<u32> = SkipList::new();
    /// assert!(list.begin().is_end());
    /// ```
    pub fn is_end(&self) -> bool {
        self.node.is_none()
    }

    /// Advances the cursor to the next value in ascending order. Advancing
    /// past the last value yields the end position, where further calls have
    /// no effect.
    ///
    /// # Examples
    /// ```
    /// use skip_list::skiplist::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// list.insert(1);
    /// list.insert(3);
    ///
    /// let mut cursor = list.begin();
    /// assert_eq!(cursor.get(), Some(&1));
    /// cursor.advance();
    /// assert_eq!(cursor.get(), Some(&3));
    /// cursor.advance();
    /// assert!(cursor.is_end());
    /// ```
    pub fn advance(&mut self) {
        if let Some(index) = self.node {
            self.node = self.arena[index].forward[0];
        }
    }
}

impl<'a, T: 'a> Clone for Cursor<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T: 'a> Copy for Cursor<'a, T> {}

impl<'a, T: 'a> PartialEq for Cursor<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.arena, other.arena) && self.node == other.node
    }
}

impl<'a, T: 'a> Eq for Cursor<'a, T> {}

impl<'a, T: 'a> Debug for Cursor<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor").field("node", &self.node).finish()
    }
}

/// An owning iterator for `SkipList<T, C>`.
///
/// This iterator traverses the values of the list in ascending order and
/// yields owned values, draining the backing arena as it goes.
pub struct IntoIter<T> {
    arena: Arena<Node<T>>,
    node: Link,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.node?;
        let node = self.arena.take(index);
        self.node = node.forward[0];
        Some(node.value)
    }
}

/// An iterator for `SkipList<T, C>`.
///
/// This iterator traverses the values of the list in ascending order and
/// yields immutable references.
pub struct Iter<'a, T: 'a> {
    arena: &'a Arena<Node<T>>,
    node: Link,
}

impl<'a, T: 'a> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.node?;
        let node = &self.arena[index];
        self.node = node.forward[0];
        Some(&node.value)
    }
}
