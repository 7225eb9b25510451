//! Append-only allocator with stable indices.

use std::mem;
use std::ops::{Index, IndexMut};
use std::vec::Vec;

/// An append-only allocator that hands out stable `usize` indices.
///
/// The arena is the single ownership root for every object allocated from it.
/// Objects may be referenced from many places at once by index without any
/// reference counting, and they are released either wholesale with [`clear`]
/// or moved out one final time with [`take`]. There is no per-object free
/// operation, so the underlying storage is simply a `Vec` of slots and no
/// unsafe code is needed.
///
/// [`clear`]: #method.clear
/// [`take`]: #method.take
///
/// # Examples
///
/// ```
/// use skip_list::arena::Arena;
///
/// let mut arena = Arena::new();
///
/// let x = arena.insert(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena.take(x), 2);
/// ```
pub struct Arena<T> {
    slots: Vec<Option<T>>,
    len: usize,
}

impl<T> Arena<T> {
    /// Constructs a new, empty `Arena<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use skip_list::arena::Arena;
    ///
    /// let arena: Arena<u32> = Arena::new();
    /// ```
    pub fn new() -> Self {
        Arena {
            slots: Vec::new(),
            len: 0,
        }
    }

    /// Constructs a new, empty `Arena<T>` with space for `capacity` objects
    /// before reallocating.
    ///
    /// # Examples
    ///
    /// ```
    /// use skip_list::arena::Arena;
    ///
    /// let arena: Arena<u32> = Arena::with_capacity(1024);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Arena {
            slots: Vec::with_capacity(capacity),
            len: 0,
        }
    }

    /// Allocates an object in the arena, returning its index. Indices are
    /// stable until the arena is cleared.
    ///
    /// # Examples
    ///
    /// ```
    /// use skip_list::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// let x = arena.insert(1);
    /// assert_eq!(arena[x], 1);
    /// ```
    pub fn insert(&mut self, value: T) -> usize {
        self.slots.push(Some(value));
        self.len += 1;
        self.slots.len() - 1
    }

    /// Returns an immutable reference to the object at `index`, or `None` if
    /// the index is out of bounds or the object was already taken.
    ///
    /// # Examples
    ///
    /// ```
    /// use skip_list::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// let x = arena.insert(1);
    /// assert_eq!(arena.get(x), Some(&1));
    /// assert_eq!(arena.get(x + 1), None);
    /// ```
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Returns a mutable reference to the object at `index`, or `None` if
    /// the index is out of bounds or the object was already taken.
    ///
    /// # Examples
    ///
    /// ```
    /// use skip_list::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// let x = arena.insert(1);
    /// *arena.get_mut(x).unwrap() = 2;
    /// assert_eq!(arena.get(x), Some(&2));
    /// ```
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index).and_then(Option::as_mut)
    }

    /// Moves the object at `index` out of the arena, leaving its slot vacant.
    /// The slot is not reused.
    ///
    /// # Panics
    ///
    /// Panics if `index` does not refer to a live object.
    ///
    /// # Examples
    ///
    /// ```
    /// use skip_list::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// let x = arena.insert(1);
    /// assert_eq!(arena.take(x), 1);
    /// assert_eq!(arena.get(x), None);
    /// ```
    pub fn take(&mut self, index: usize) -> T {
        let slot = mem::replace(&mut self.slots[index], None);
        match slot {
            Some(value) => {
                self.len -= 1;
                value
            },
            None => panic!("attempting to take vacant slot"),
        }
    }

    /// Returns the number of live objects in the arena.
    ///
    /// # Examples
    ///
    /// ```
    /// use skip_list::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// arena.insert(1);
    /// assert_eq!(arena.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the arena holds no live objects.
    ///
    /// # Examples
    ///
    /// ```
    /// use skip_list::arena::Arena;
    ///
    /// let arena: Arena<u32> = Arena::new();
    /// assert!(arena.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Releases every object in the arena. All previously returned indices
    /// become invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use skip_list::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// arena.insert(1);
    /// arena.clear();
    /// assert!(arena.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.slots.clear();
        self.len = 0;
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for Arena<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        self.get(index).expect("index points to vacant slot")
    }
}

impl<T> IndexMut<usize> for Arena<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.get_mut(index).expect("index points to vacant slot")
    }
}
