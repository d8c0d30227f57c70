use core::borrow::Borrow;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::ops::Index;

use alloc::collections::{VecDeque, vec_deque};
use smallvec::SmallVec;

use crate::raw::{Direction, Handle, RawBstMap, Stack};

mod capacity;
mod order_statistic;

pub use crate::Rank;

/// An ordered symbol table based on an unbalanced [binary search tree].
///
/// Given a key type with a [total order], the map keeps one entry per key and
/// answers ordered questions about them: the smallest and largest key, the
/// nearest key at or below/above a probe ([`floor`], [`ceiling`]), how many
/// keys sort before a probe ([`rank`]), which key sits at a given position
/// ([`select`]), and which keys fall inside a closed range ([`keys_in`],
/// [`range_count`]).
///
/// Every node records the size of the subtree below it, which is what makes
/// rank and select walks of a single root-to-node path.
///
/// The tree is never rebalanced. Its shape is fixed by the order of
/// insertions and deletions, so every walk costs O(height), which is
/// O(log n) for keys arriving in random order and O(n) for keys arriving
/// sorted. Walks are iterative, so a degenerate tree costs time but cannot
/// exhaust the call stack. [`height`] reports the current shape.
///
/// Deletion of a node with two children promotes its in-order successor
/// (Hibbard deletion).
///
/// It is a logic error for a key to be modified in such a way that the key's
/// ordering relative to any other key, as determined by the [`Ord`] trait,
/// changes while it is in the map. The behavior resulting from such a logic
/// error is not specified, but will be encapsulated to the `BstMap` that
/// observed the logic error and not result in undefined behavior.
///
/// # Examples
///
/// ```
/// use bst_symtab::BstMap;
///
/// let mut st = BstMap::new();
/// for (value, key) in ["S", "E", "A", "R", "C", "H", "E", "X", "A", "M", "P", "L", "E"].into_iter().enumerate() {
///     st.insert(key, value);
/// }
///
/// // ten distinct keys, later values win
/// assert_eq!(st.len(), 10);
/// assert_eq!(st.get("E"), Some(&12));
/// assert_eq!(st.get("A"), Some(&8));
///
/// let keys: Vec<_> = st.keys().copied().collect();
/// assert_eq!(keys, ["A", "C", "E", "H", "L", "M", "P", "R", "S", "X"]);
///
/// assert_eq!(st.rank("H"), 3);
/// assert_eq!(st.select(3), Ok(&"H"));
/// assert_eq!(st.floor("G"), Some(&"E"));
/// assert_eq!(st.ceiling("G"), Some(&"H"));
/// assert_eq!(st.range_count("D", "N"), 4);
/// ```
///
/// Storing `None` through [`put`] deletes the key:
///
/// ```
/// use bst_symtab::BstMap;
///
/// let mut st = BstMap::new();
/// st.put("apple", Some(3));
/// assert!(st.contains_key("apple"));
///
/// st.put("apple", None);
/// assert!(!st.contains_key("apple"));
/// assert!(st.is_empty());
/// ```
///
/// [binary search tree]: https://en.wikipedia.org/wiki/Binary_search_tree
/// [total order]: https://en.wikipedia.org/wiki/Total_order
/// [`floor`]: BstMap::floor
/// [`ceiling`]: BstMap::ceiling
/// [`rank`]: BstMap::rank
/// [`select`]: BstMap::select
/// [`keys_in`]: BstMap::keys_in
/// [`range_count`]: BstMap::range_count
/// [`height`]: BstMap::height
/// [`put`]: BstMap::put
pub struct BstMap<K, V> {
    raw: RawBstMap<K, V>,
}

/// An iterator over the entries of a `BstMap`, in ascending key order.
///
/// This `struct` is created by the [`iter`] method on [`BstMap`]. See its
/// documentation for more.
///
/// [`iter`]: BstMap::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    tree: &'a RawBstMap<K, V>,
    // Nodes whose left subtrees have been visited, nearest on top.
    stack: Stack,
    remaining: usize,
}

/// The keys of a `BstMap` within a range, in ascending order.
///
/// This `struct` is created by the [`keys`] and [`keys_in`] methods on
/// [`BstMap`]. The keys are collected when the method is called, so the
/// iterator owns its own queue of references.
///
/// [`keys`]: BstMap::keys
/// [`keys_in`]: BstMap::keys_in
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K> {
    inner: vec_deque::IntoIter<&'a K>,
}

/// The keys of a `BstMap` in breadth-first order.
///
/// This `struct` is created by the [`level_order`] method on [`BstMap`]. See
/// its documentation for more.
///
/// [`level_order`]: BstMap::level_order
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct LevelOrder<'a, K, V> {
    tree: &'a RawBstMap<K, V>,
    // Child links waiting to be visited; missing children are queued too.
    queue: VecDeque<Option<Handle>>,
    remaining: usize,
}

impl<K, V> BstMap<K, V> {
    /// Makes a new, empty `BstMap`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::BstMap;
    ///
    /// let mut map = BstMap::new();
    ///
    /// // entries can now be inserted into the empty map
    /// map.insert(1, "a");
    /// ```
    #[must_use]
    pub const fn new() -> BstMap<K, V> {
        BstMap { raw: RawBstMap::new() }
    }

    /// Clears the map, removing all elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::BstMap;
    ///
    /// let mut a = BstMap::new();
    /// a.insert(1, "a");
    /// a.clear();
    /// assert!(a.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the number of elements in the map.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::BstMap;
    ///
    /// let mut a = BstMap::new();
    /// assert_eq!(a.len(), 0);
    /// a.insert(1, "a");
    /// assert_eq!(a.len(), 1);
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::BstMap;
    ///
    /// let mut a = BstMap::new();
    /// assert!(a.is_empty());
    /// a.insert(1, "a");
    /// assert!(!a.is_empty());
    /// ```
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the number of nodes on the longest path from the root to a
    /// leaf, or 0 for an empty map.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::BstMap;
    ///
    /// let balanced = BstMap::from([(2, ()), (1, ()), (3, ())]);
    /// assert_eq!(balanced.height(), 2);
    ///
    /// // sorted insertions degrade to a path
    /// let path = BstMap::from([(1, ()), (2, ()), (3, ())]);
    /// assert_eq!(path.height(), 3);
    /// ```
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Returns the smallest key in the map, or `None` if it is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// assert_eq!(map.min(), None);
    /// map.insert("m", 1);
    /// map.insert("c", 2);
    /// assert_eq!(map.min(), Some(&"c"));
    /// ```
    #[must_use]
    pub fn min(&self) -> Option<&K> {
        self.first_key_value().map(|(k, _)| k)
    }

    /// Returns the largest key in the map, or `None` if it is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// assert_eq!(map.max(), None);
    /// map.insert("m", 1);
    /// map.insert("x", 2);
    /// assert_eq!(map.max(), Some(&"x"));
    /// ```
    #[must_use]
    pub fn max(&self) -> Option<&K> {
        self.last_key_value().map(|(k, _)| k)
    }

    /// Returns the first key-value pair in the map.
    /// The key in this pair is the minimum key in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// assert_eq!(map.first_key_value(), None);
    /// map.insert(1, "b");
    /// map.insert(2, "a");
    /// assert_eq!(map.first_key_value(), Some((&1, &"b")));
    /// ```
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        let node = self.raw.node(self.raw.extreme(Direction::Left)?);
        Some((node.key(), node.value()))
    }

    /// Returns the last key-value pair in the map.
    /// The key in this pair is the maximum key in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, "b");
    /// map.insert(2, "a");
    /// assert_eq!(map.last_key_value(), Some((&2, &"a")));
    /// ```
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        let node = self.raw.node(self.raw.extreme(Direction::Right)?);
        Some((node.key(), node.value()))
    }

    /// Removes and returns the first element in the map.
    /// The key of this element is the minimum key that was in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::BstMap;
    ///
    /// let mut map = BstMap::from([(1, "a"), (2, "b")]);
    /// assert_eq!(map.pop_first(), Some((1, "a")));
    /// assert_eq!(map.pop_first(), Some((2, "b")));
    /// assert_eq!(map.pop_first(), None);
    /// ```
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        self.raw.pop_extreme(Direction::Left)
    }

    /// Removes and returns the last element in the map.
    /// The key of this element is the maximum key that was in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::BstMap;
    ///
    /// let mut map = BstMap::from([(1, "a"), (2, "b")]);
    /// assert_eq!(map.pop_last(), Some((2, "b")));
    /// assert_eq!(map.pop_last(), Some((1, "a")));
    /// assert_eq!(map.pop_last(), None);
    /// ```
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        self.raw.pop_extreme(Direction::Right)
    }

    /// Removes the entry with the smallest key. Does nothing on an empty map.
    ///
    /// The minimum is spliced out by linking its right subtree into its place.
    pub fn delete_min(&mut self) {
        self.pop_first();
    }

    /// Removes the entry with the largest key. Does nothing on an empty map.
    ///
    /// The maximum is spliced out by linking its left subtree into its place.
    pub fn delete_max(&mut self) {
        self.pop_last();
    }

    /// Gets an iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::BstMap;
    ///
    /// let map = BstMap::from([(3, "c"), (2, "b"), (1, "a")]);
    ///
    /// for (key, value) in map.iter() {
    ///     println!("{key}: {value}");
    /// }
    ///
    /// let (first_key, first_value) = map.iter().next().unwrap();
    /// assert_eq!((*first_key, *first_value), (1, "a"));
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        let mut stack = SmallVec::new();
        self.raw.push_left_spine(self.raw.root(), &mut stack);
        Iter {
            tree: &self.raw,
            stack,
            remaining: self.len(),
        }
    }

    /// Gets an iterator over the keys in breadth-first order: the root, then
    /// each depth of the tree from left to right.
    ///
    /// The order exposes the tree's shape, which depends on the order the
    /// keys were inserted in.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::BstMap;
    ///
    /// let map = BstMap::from([("m", 0), ("c", 1), ("x", 2), ("a", 3), ("e", 4)]);
    /// let keys: Vec<_> = map.level_order().copied().collect();
    /// assert_eq!(keys, ["m", "c", "x", "a", "e"]);
    /// ```
    pub fn level_order(&self) -> LevelOrder<'_, K, V> {
        let mut queue = VecDeque::new();
        queue.push_back(self.raw.root());
        LevelOrder {
            tree: &self.raw,
            queue,
            remaining: self.len(),
        }
    }
}

impl<K: Ord, V> BstMap<K, V> {
    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the map's key type, but the ordering
    /// on the borrowed form *must* match the ordering on the key type.
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
    /// let mut map = BstMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.search(key).map(|h| self.raw.node(h).value())
    }

    /// Returns the key-value pair corresponding to the supplied key.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(String::from("k"), "a");
    /// assert_eq!(map.get_key_value("k"), Some((&String::from("k"), &"a")));
    /// assert_eq!(map.get_key_value("j"), None);
    /// ```
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let node = self.raw.node(self.raw.search(key)?);
        Some((node.key(), node.value()))
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, "a");
    /// if let Some(x) = map.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(map[&1], "b");
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.raw.search(key)?;
        Some(self.raw.node_mut(handle).value_mut())
    }

    /// Returns `true` if the map contains a value for the specified key.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, "a");
    /// assert!(map.contains_key(&1));
    /// assert!(!map.contains_key(&2));
    /// ```
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.get(key).is_some()
    }

    /// Associates `value` with `key`, or deletes `key` when `value` is `None`.
    ///
    /// `Some(v)` behaves like [`insert`](BstMap::insert); `None` behaves like
    /// [`delete`](BstMap::delete). A key is present in the map exactly when the
    /// last `put` for it stored `Some`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.put("a", Some(1));
    /// map.put("a", Some(2));
    /// assert_eq!(map.get("a"), Some(&2));
    ///
    /// map.put("a", None);
    /// assert_eq!(map.get("a"), None);
    ///
    /// // storing `None` for an absent key is a no-op
    /// map.put("b", None);
    /// assert!(map.is_empty());
    /// ```
    pub fn put(&mut self, key: K, value: Option<V>) {
        match value {
            Some(value) => {
                self.raw.insert(key, value);
            }
            None => self.delete(&key),
        }
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map did not have this key present, `None` is returned and a new
    /// leaf is linked in where the search ended.
    ///
    /// If the map did have this key present, the value is updated in place, and
    /// the old value is returned. The key is not updated.
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
    /// let mut map = BstMap::new();
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert_eq!(map.is_empty(), false);
    ///
    /// map.insert(37, "b");
    /// assert_eq!(map.insert(37, "c"), Some("b"));
    /// assert_eq!(map[&37], "c");
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.raw.insert(key, value)
    }

    /// Removes a key from the map. Does nothing if the key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::BstMap;
    ///
    /// let mut map = BstMap::from([(1, "a"), (2, "b")]);
    /// map.delete(&1);
    /// map.delete(&3);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn delete<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove_entry(key);
    }

    /// Removes a key from the map, returning the value at the key if the key
    /// was previously in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes a key from the map, returning the stored key and value if the
    /// key was previously in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove_entry(&1), Some((1, "a")));
    /// assert_eq!(map.remove_entry(&1), None);
    /// ```
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove_entry(key)
    }

    /// Gets every key of the map in ascending order.
    ///
    /// Equivalent to [`keys_in`](BstMap::keys_in) over `[min, max]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::BstMap;
    ///
    /// let map = BstMap::from([(2, "b"), (1, "a")]);
    /// let keys: Vec<_> = map.keys().copied().collect();
    /// assert_eq!(keys, [1, 2]);
    /// ```
    pub fn keys(&self) -> Keys<'_, K> {
        match (self.min(), self.max()) {
            (Some(lo), Some(hi)) => self.keys_in(lo, hi),
            _ => Keys {
                inner: VecDeque::new().into_iter(),
            },
        }
    }

    /// Gets the keys in the closed range `[lo, hi]` in ascending order.
    ///
    /// Yields nothing when `lo > hi`. The walk skips every subtree that lies
    /// wholly outside the range.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::BstMap;
    ///
    /// let map = BstMap::from([("a", 1), ("c", 2), ("e", 3), ("g", 4)]);
    /// let keys: Vec<_> = map.keys_in("b", "e").copied().collect();
    /// assert_eq!(keys, ["c", "e"]);
    /// assert_eq!(map.keys_in("e", "b").count(), 0);
    /// ```
    pub fn keys_in<Q>(&self, lo: &Q, hi: &Q) -> Keys<'_, K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        Keys {
            inner: self.raw.collect_keys(lo, hi).into_iter(),
        }
    }
}

impl<K: Clone, V: Clone> Clone for BstMap<K, V> {
    fn clone(&self) -> Self {
        BstMap { raw: self.raw.clone() }
    }
}

impl<K: Hash, V: Hash> Hash for BstMap<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for (k, v) in self {
            k.hash(state);
            v.hash(state);
        }
    }
}

// Equal entries in equal order; tree shape is not compared.
impl<K: PartialEq, V: PartialEq> PartialEq for BstMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<K: Eq, V: Eq> Eq for BstMap<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for BstMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Renders the entries in ascending key order as `{k1: v1, k2: v2}`.
///
/// # Examples
///
/// ```
/// use bst_symtab::BstMap;
///
/// let map = BstMap::from([("b", 2), ("a", 1)]);
/// assert_eq!(map.to_string(), "{a: 1, b: 2}");
/// assert_eq!(BstMap::<u8, u8>::new().to_string(), "{}");
/// ```
impl<K: fmt::Display, V: fmt::Display> fmt::Display for BstMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{k}: {v}")?;
        }
        f.write_str("}")
    }
}

impl<K, V> Default for BstMap<K, V> {
    fn default() -> Self {
        BstMap::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for BstMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = BstMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for BstMap<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a BstMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<K, Q, V> Index<&Q> for BstMap<K, V>
where
    K: Borrow<Q> + Ord,
    Q: ?Sized + Ord,
{
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the `BstMap`.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

/// Inserts the pairs in array order, so the first pair becomes the root.
impl<K: Ord, V, const N: usize> From<[(K, V); N]> for BstMap<K, V> {
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, K: 'a, V: 'a> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        let handle = self.stack.pop()?;
        let node = tree.node(handle);
        tree.push_left_spine(node.right(), &mut self.stack);
        self.remaining -= 1;
        Some((node.key(), node.value()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K> Iterator for Keys<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K> DoubleEndedIterator for Keys<'_, K> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K> ExactSizeIterator for Keys<'_, K> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K> FusedIterator for Keys<'_, K> {}

impl<K> Clone for Keys<'_, K> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for Keys<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K: 'a, V: 'a> Iterator for LevelOrder<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        let tree = self.tree;
        while let Some(link) = self.queue.pop_front() {
            let Some(handle) = link else {
                continue;
            };
            let node = tree.node(handle);
            self.queue.push_back(node.left());
            self.queue.push_back(node.right());
            self.remaining -= 1;
            return Some(node.key());
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for LevelOrder<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for LevelOrder<'_, K, V> {}

impl<K, V> Clone for LevelOrder<'_, K, V> {
    fn clone(&self) -> Self {
        LevelOrder {
            tree: self.tree,
            queue: self.queue.clone(),
            remaining: self.remaining,
        }
    }
}

impl<K: fmt::Debug, V> fmt::Debug for LevelOrder<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
