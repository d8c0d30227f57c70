use core::borrow::Borrow;
use core::cmp::Ordering;

use alloc::collections::VecDeque;
use smallvec::SmallVec;
use tracing::trace;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Direction, Node};
use super::size::Size;

/// The unbalanced binary search tree backing `BstMap`.
///
/// Every walk is iterative. Mutations record the links they follow in a
/// `Path` and recompute subtree sizes along it, deepest node first, once the
/// structural change is done.
#[derive(Clone)]
pub(crate) struct RawBstMap<K, V> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<K, V>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
}

/// One step of a walk: the node we left and the link we took out of it.
#[derive(Clone, Copy)]
struct PathElement {
    node: Handle,
    direction: Direction,
}

/// Stack of steps from the root (or a subtree root) down to a node.
type Path = SmallVec<[PathElement; 32]>;

/// Stack of pending nodes for in-order traversal.
pub(crate) type Stack = SmallVec<[Handle; 32]>;

impl<K, V> RawBstMap<K, V> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
        }
    }

    /// Returns the number of key-value pairs in the tree.
    pub(crate) fn len(&self) -> usize {
        let len = self.size_of(self.root);
        debug_assert_eq!(len, self.nodes.len(), "root size disagrees with live node count");
        len
    }

    /// Returns true if the tree contains no elements.
    pub(crate) fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Drops every node.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    pub(crate) fn root(&self) -> Option<Handle> {
        self.root
    }

    /// Returns a reference to a node by handle.
    pub(crate) fn node(&self, handle: Handle) -> &Node<K, V> {
        self.nodes.get(handle)
    }

    /// Returns a mutable reference to a node by handle.
    pub(crate) fn node_mut(&mut self, handle: Handle) -> &mut Node<K, V> {
        self.nodes.get_mut(handle)
    }

    /// Subtree size behind a link; a missing subtree has size zero.
    #[inline]
    pub(crate) fn size_of(&self, link: Option<Handle>) -> usize {
        link.map_or(0, |h| self.nodes.get(h).size().to_usize())
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub(crate) fn height(&self) -> usize {
        let mut tallest = 0;
        let mut pending: SmallVec<[(Handle, usize); 32]> = self.root.into_iter().map(|h| (h, 1)).collect();
        while let Some((handle, depth)) = pending.pop() {
            tallest = tallest.max(depth);
            let node = self.nodes.get(handle);
            pending.extend([node.left(), node.right()].into_iter().flatten().map(|child| (child, depth + 1)));
        }
        tallest
    }

    /// Follows `direction` links from the root to the last node.
    ///
    /// `Left` finds the minimum, `Right` the maximum.
    pub(crate) fn extreme(&self, direction: Direction) -> Option<Handle> {
        let mut current = self.root?;
        while let Some(next) = self.nodes.get(current).child(direction) {
            current = next;
        }
        Some(current)
    }

    /// Pushes `from` and its chain of left descendants onto `stack`.
    pub(crate) fn push_left_spine(&self, from: Option<Handle>, stack: &mut Stack) {
        let mut link = from;
        while let Some(handle) = link {
            stack.push(handle);
            link = self.nodes.get(handle).left();
        }
    }

    /// Points the link described by `parent` (or the root, when there is no
    /// parent) at `child`.
    fn link(&mut self, parent: Option<PathElement>, child: Option<Handle>) {
        match parent {
            Some(step) => self.nodes.get_mut(step.node).set_child(step.direction, child),
            None => self.root = child,
        }
    }

    /// Recomputes a node's size from its children.
    fn resize(&mut self, handle: Handle) {
        let node = self.nodes.get(handle);
        let size = Size::of_children(self.size_of(node.left()), self.size_of(node.right()));
        self.nodes.get_mut(handle).set_size(size);
    }

    /// Recomputes sizes along `path`, deepest node first.
    fn resize_path(&mut self, path: &Path) {
        for step in path.iter().rev() {
            self.resize(step.node);
        }
    }

    /// Unlinks the extreme node of the subtree rooted at `subtree`.
    ///
    /// Walks `direction` links to the first node without one, splices that
    /// node out by linking its other child into its place, and recomputes the
    /// sizes of its ancestors within the subtree. Returns the detached node
    /// and the subtree's new root. The detached node's links are left stale;
    /// the caller either frees it or relinks it.
    fn detach_extreme(&mut self, subtree: Handle, direction: Direction) -> (Handle, Option<Handle>) {
        let mut path: Path = SmallVec::new();
        let mut current = subtree;
        while let Some(next) = self.nodes.get(current).child(direction) {
            path.push(PathElement { node: current, direction });
            current = next;
        }

        let remaining = self.nodes.get(current).child(direction.opposite());
        let Some(&parent) = path.last() else {
            return (current, remaining);
        };
        self.link(Some(parent), remaining);
        self.resize_path(&path);
        (current, Some(subtree))
    }

    /// Removes the minimum (`Left`) or maximum (`Right`) entry.
    pub(crate) fn pop_extreme(&mut self, direction: Direction) -> Option<(K, V)> {
        let root = self.root?;
        let (extreme, root) = self.detach_extreme(root, direction);
        self.root = root;
        let entry = self.nodes.take(extreme).into_key_value();
        trace!(?direction, len = self.size_of(self.root), "removed extreme node");
        Some(entry)
    }
}

impl<K: Ord, V> RawBstMap<K, V> {
    /// Finds the node holding `key`.
    pub(crate) fn search<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut link = self.root;
        while let Some(current) = link {
            let node = self.nodes.get(current);
            link = match key.cmp(node.key().borrow()) {
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
                Ordering::Equal => return Some(current),
            };
        }
        None
    }

    /// Inserts a key-value pair, overwriting the value in place if the key is
    /// already present. Returns the old value in that case.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<V> {
        let mut path: Path = SmallVec::new();
        let mut link = self.root;

        while let Some(current) = link {
            let node = self.nodes.get_mut(current);
            let direction = match key.cmp(node.key()) {
                Ordering::Less => Direction::Left,
                Ordering::Greater => Direction::Right,
                // Sizes along the path are unchanged when no node is added.
                Ordering::Equal => return Some(core::mem::replace(node.value_mut(), value)),
            };
            path.push(PathElement { node: current, direction });
            link = node.child(direction);
        }

        let leaf = self.nodes.alloc(Node::new(key, value));
        self.link(path.last().copied(), Some(leaf));
        self.resize_path(&path);
        trace!(depth = path.len(), len = self.size_of(self.root), "linked new leaf");
        None
    }

    /// Removes `key` by Hibbard deletion and returns its entry.
    ///
    /// A node with two children is replaced by its in-order successor, which
    /// is detached from the right subtree first. The predecessor is never
    /// used.
    pub(crate) fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut path: Path = SmallVec::new();
        let mut link = self.root;
        let target = loop {
            let current = link?;
            let node = self.nodes.get(current);
            let direction = match key.cmp(node.key().borrow()) {
                Ordering::Less => Direction::Left,
                Ordering::Greater => Direction::Right,
                Ordering::Equal => break current,
            };
            path.push(PathElement { node: current, direction });
            link = node.child(direction);
        };

        let node = self.nodes.get(target);
        let (left, right) = (node.left(), node.right());
        let replacement = match (left, right) {
            (_, None) => left,
            (None, Some(_)) => right,
            (Some(left), Some(right)) => {
                let (successor, rest) = self.detach_extreme(right, Direction::Left);
                let promoted = self.nodes.get_mut(successor);
                promoted.set_child(Direction::Left, Some(left));
                promoted.set_child(Direction::Right, rest);
                self.resize(successor);
                trace!(depth = path.len(), "promoted in-order successor");
                Some(successor)
            }
        };

        self.link(path.last().copied(), replacement);
        self.resize_path(&path);
        let entry = self.nodes.take(target).into_key_value();
        trace!(len = self.size_of(self.root), "removed node");
        Some(entry)
    }

    /// Returns the number of keys strictly less than `key`.
    pub(crate) fn rank<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut rank = 0;
        let mut link = self.root;
        while let Some(current) = link {
            let node = self.nodes.get(current);
            match key.cmp(node.key().borrow()) {
                Ordering::Less => link = node.left(),
                Ordering::Greater => {
                    rank += 1 + self.size_of(node.left());
                    link = node.right();
                }
                Ordering::Equal => return rank + self.size_of(node.left()),
            }
        }
        rank
    }

    /// Finds the node whose key has rank `index`.
    pub(crate) fn select(&self, index: usize) -> Option<Handle> {
        let mut remaining = index;
        let mut link = self.root;
        while let Some(current) = link {
            let node = self.nodes.get(current);
            let left = self.size_of(node.left());
            match remaining.cmp(&left) {
                Ordering::Less => link = node.left(),
                Ordering::Greater => {
                    remaining -= left + 1;
                    link = node.right();
                }
                Ordering::Equal => return Some(current),
            }
        }
        None
    }

    /// Finds the node with the largest key `<= key`.
    pub(crate) fn floor<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut best = None;
        let mut link = self.root;
        while let Some(current) = link {
            let node = self.nodes.get(current);
            match key.cmp(node.key().borrow()) {
                Ordering::Equal => return Some(current),
                Ordering::Less => link = node.left(),
                // Anything in the right subtree that qualifies beats this node.
                Ordering::Greater => {
                    best = Some(current);
                    link = node.right();
                }
            }
        }
        best
    }

    /// Finds the node with the smallest key `>= key`.
    pub(crate) fn ceiling<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut best = None;
        let mut link = self.root;
        while let Some(current) = link {
            let node = self.nodes.get(current);
            match key.cmp(node.key().borrow()) {
                Ordering::Equal => return Some(current),
                Ordering::Greater => link = node.right(),
                Ordering::Less => {
                    best = Some(current);
                    link = node.left();
                }
            }
        }
        best
    }

    /// Number of keys in the closed range `[lo, hi]`.
    pub(crate) fn range_count<Q>(&self, lo: &Q, hi: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        if lo > hi {
            return 0;
        }
        let count = self.rank(hi) - self.rank(lo);
        if self.search(hi).is_some() { count + 1 } else { count }
    }

    /// Collects the keys in `[lo, hi]` in ascending order.
    ///
    /// In-order walk pruned by the range: a left subtree is entered only if
    /// `lo < key`, a right subtree only if `hi > key`.
    pub(crate) fn collect_keys<Q>(&self, lo: &Q, hi: &Q) -> VecDeque<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut queue = VecDeque::new();
        let mut stack: Stack = SmallVec::new();
        let mut link = self.root;

        loop {
            while let Some(current) = link {
                let node = self.nodes.get(current);
                let key: &Q = node.key().borrow();
                stack.push(current);
                link = if lo < key { node.left() } else { None };
            }

            let Some(current) = stack.pop() else {
                break;
            };
            let node = self.nodes.get(current);
            let key: &Q = node.key().borrow();
            if lo <= key && key <= hi {
                queue.push_back(node.key());
            }
            link = if hi > key { node.right() } else { None };
        }

        queue
    }
}
