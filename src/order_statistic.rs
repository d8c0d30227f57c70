/// A zero-based rank into the sorted order of a map.
///
/// Indexing a [`BstMap`](crate::BstMap) by `Rank` reads the value of the
/// entry with that many smaller keys.
///
/// # Examples
///
/// ```
/// use bst_symtab::{BstMap, Rank};
///
/// let mut map = BstMap::new();
/// map.insert("b", 20);
/// map.insert("a", 10);
///
/// assert_eq!(map[Rank(0)], 10);
/// assert_eq!(map[Rank(1)], 20);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
