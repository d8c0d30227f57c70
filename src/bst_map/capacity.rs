use super::BstMap;
use crate::raw::RawBstMap;

impl<K, V> BstMap<K, V> {
    /// Creates an empty map with room for at least `capacity` entries before
    /// the node arena reallocates.
    ///
    /// This is an extension and is not part of the standard `BTreeMap` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::BstMap;
    ///
    /// let map: BstMap<i32, i32> = BstMap::with_capacity(32);
    /// assert!(map.is_empty());
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        BstMap {
            raw: RawBstMap::with_capacity(capacity),
        }
    }

    /// Returns the number of entries the map can hold without reallocating.
    ///
    /// Slots freed by deletions are reused, so deleting and reinserting never
    /// grows the capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::BstMap;
    ///
    /// let mut map: BstMap<i32, i32> = BstMap::with_capacity(32);
    /// assert!(map.capacity() >= 32);
    ///
    /// let before = map.capacity();
    /// for i in 0..100 {
    ///     map.insert(1, i);
    ///     map.delete(&1);
    /// }
    /// assert_eq!(map.capacity(), before);
    /// ```
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
