use core::borrow::Borrow;
use core::ops::{Index, IndexMut};

use tracing::debug;

use super::BstMap;
use crate::{Error, Rank, Result};

impl<K: Ord, V> BstMap<K, V> {
    /// Returns the number of keys in the map strictly less than `key`.
    ///
    /// `key` need not be present. For a present key this is its zero-based
    /// position in sorted order.
    ///
    /// # Complexity
    ///
    /// O(height)
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::BstMap;
    ///
    /// let map = BstMap::from([(10, "a"), (20, "b"), (30, "c")]);
    /// assert_eq!(map.rank(&10), 0);
    /// assert_eq!(map.rank(&25), 2);
    /// assert_eq!(map.rank(&99), 3);
    /// ```
    #[must_use]
    pub fn rank<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.rank(key)
    }

    /// Returns the key at position `index` in sorted order, the inverse of
    /// [`rank`](BstMap::rank).
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `index >= self.len()`.
    ///
    /// # Complexity
    ///
    /// O(height)
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::{BstMap, Error};
    ///
    /// let map = BstMap::from([("c", 3), ("a", 1), ("b", 2)]);
    /// assert_eq!(map.select(0), Ok(&"a"));
    /// assert_eq!(map.select(2), Ok(&"c"));
    /// assert_eq!(map.select(3), Err(Error::OutOfRange { index: 3, len: 3 }));
    /// ```
    pub fn select(&self, index: usize) -> Result<&K> {
        match self.raw.select(index) {
            Some(handle) => Ok(self.raw.node(handle).key()),
            None => {
                let len = self.len();
                debug!(index, len, "select index out of range");
                Err(Error::OutOfRange { index, len })
            }
        }
    }

    /// Returns the key-value pair at position `rank` in sorted order, or
    /// `None` if `rank` is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert("a", 10);
    /// map.insert("c", 30);
    /// map.insert("b", 20);
    ///
    /// assert_eq!(map.get_by_rank(1), Some((&"b", &20)));
    /// assert!(map.get_by_rank(3).is_none());
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<(&K, &V)> {
        let node = self.raw.node(self.raw.select(rank)?);
        Some((node.key(), node.value()))
    }

    /// Returns the key and a mutable reference to the value at position
    /// `rank` in sorted order, or `None` if `rank` is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::BstMap;
    ///
    /// let mut map = BstMap::from([(10, "a"), (5, "b")]);
    /// if let Some((key, value)) = map.get_by_rank_mut(0) {
    ///     assert_eq!(*key, 5);
    ///     *value = "updated";
    /// }
    /// assert_eq!(map.get(&5), Some(&"updated"));
    /// ```
    #[must_use]
    pub fn get_by_rank_mut(&mut self, rank: usize) -> Option<(&K, &mut V)> {
        let handle = self.raw.select(rank)?;
        Some(self.raw.node_mut(handle).key_value_mut())
    }

    /// Returns the largest key in the map less than or equal to `key`, or
    /// `None` if every key is greater.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::BstMap;
    ///
    /// let map = BstMap::from([(10, ()), (20, ()), (30, ())]);
    /// assert_eq!(map.floor(&20), Some(&20));
    /// assert_eq!(map.floor(&25), Some(&20));
    /// assert_eq!(map.floor(&5), None);
    /// ```
    #[must_use]
    pub fn floor<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.floor(key).map(|h| self.raw.node(h).key())
    }

    /// Returns the smallest key in the map greater than or equal to `key`, or
    /// `None` if every key is smaller.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::BstMap;
    ///
    /// let map = BstMap::from([(10, ()), (20, ()), (30, ())]);
    /// assert_eq!(map.ceiling(&20), Some(&20));
    /// assert_eq!(map.ceiling(&25), Some(&30));
    /// assert_eq!(map.ceiling(&35), None);
    /// ```
    #[must_use]
    pub fn ceiling<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.ceiling(key).map(|h| self.raw.node(h).key())
    }

    /// Returns the number of keys in the closed range `[lo, hi]`, or 0 when
    /// `lo > hi`.
    ///
    /// Computed from two ranks, without visiting the keys in between.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::BstMap;
    ///
    /// let map = BstMap::from([("a", 1), ("c", 2), ("e", 3), ("g", 4)]);
    /// assert_eq!(map.range_count("b", "e"), 2);
    /// assert_eq!(map.range_count("a", "g"), 4);
    /// assert_eq!(map.range_count("g", "a"), 0);
    /// ```
    #[must_use]
    pub fn range_count<Q>(&self, lo: &Q, hi: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.range_count(lo, hi)
    }
}

/// Indexes into the map by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use bst_symtab::{BstMap, Rank};
///
/// let map = BstMap::from([("a", 1), ("b", 2)]);
/// assert_eq!(map[Rank(1)], 2);
/// ```
impl<K: Ord, V> Index<Rank> for BstMap<K, V> {
    type Output = V;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.get_by_rank(rank.0).map(|(_, v)| v).expect("index out of bounds")
    }
}

/// Mutably indexes into the map by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use bst_symtab::{BstMap, Rank};
///
/// let mut map = BstMap::from([("a", 1), ("b", 2)]);
/// map[Rank(1)] = 5;
/// assert_eq!(map.get("b"), Some(&5));
/// ```
impl<K: Ord, V> IndexMut<Rank> for BstMap<K, V> {
    fn index_mut(&mut self, rank: Rank) -> &mut Self::Output {
        self.get_by_rank_mut(rank.0).map(|(_, v)| v).expect("index out of bounds")
    }
}
