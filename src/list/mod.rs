use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use std::ptr::NonNull;

use tracing::{debug, trace};

use crate::error::Error;
use crate::list::iterator::{Iter, Nodes};
use crate::list::node::Node;

pub mod cursor;
pub mod iterator;

mod algorithms;
mod dump;
pub(crate) mod node;

pub use algorithms::drain::Drain;

/// Number of elements a node holds when no size is given.
pub const DEFAULT_NODE_SIZE: usize = 4;

/// The `StoutList` is a doubly-linked list of nodes, each holding a small
/// block of up to `node_size` elements.
///
/// Every node except the last one is kept at least half full, so locating
/// a position walks *O*(*n* / `node_size`) nodes and then indexes into a
/// block.
///
/// The `StoutList` contains:
/// - a pointer `ghost` to the payload-free ghost node, whose `next` is the
///   first node and whose `prev` is the last node of the chain;
/// - the fixed `node_size` shared by all nodes;
/// - the total number of elements `len`.
///
/// Elements appended with [`add`] are unique: an element equal to one
/// already in the list is rejected. Positional [`insert`] does not check.
///
/// Nodes store their blocks in a `SmallVec`, which makes `StoutList<T>`
/// (and its iterators) invariant in `T`:
///
/// ```compile_fail
/// use stout_list::StoutList;
///
/// fn shorten<'a>(list: StoutList<&'static str>) -> StoutList<&'a str> {
///     list
/// }
/// ```
///
/// [`add`]: StoutList::add
/// [`insert`]: StoutList::insert
pub struct StoutList<T> {
    ghost: NonNull<Node<T>>,
    node_size: usize,
    /// the number of elements over all nodes
    pub(crate) len: usize,
    _marker: PhantomData<Box<Node<T>>>,
}

/// Nodes detached from a list, `front..=back`.
///
/// When detached from a list, reading of `front.prev` and `back.next`
/// is invalid.
pub(crate) struct DetachedNodes<T> {
    front: NonNull<Node<T>>,
    back: NonNull<Node<T>>,
    _marker: PhantomData<Box<Node<T>>>,
}

// private methods
impl<T> StoutList<T> {
    fn with_node_size_unchecked(node_size: usize) -> Self {
        Self {
            ghost: new_ghost(),
            node_size,
            len: 0,
            _marker: PhantomData,
        }
    }

    pub(crate) fn ghost_node(&self) -> NonNull<Node<T>> {
        self.ghost
    }
    pub(crate) fn front_node(&self) -> NonNull<Node<T>> {
        // SAFETY: `ghost.next` is always valid (either `ghost` itself, or the first node
        // of the chain).
        unsafe { self.ghost.as_ref().next }
    }
    pub(crate) fn back_node(&self) -> NonNull<Node<T>> {
        // SAFETY: `ghost.prev` is always valid (either `ghost` itself, or the last node
        // of the chain).
        unsafe { self.ghost.as_ref().prev }
    }

    fn half(&self) -> usize {
        self.node_size / 2
    }

    fn check_index(&self, index: usize, bound: usize) -> Result<(), Error> {
        if index < bound {
            Ok(())
        } else {
            Err(Error::IndexOutOfBounds {
                index,
                len: self.len,
            })
        }
    }

    /// Attach a detached node `node` to the list, between `prev` and `next`.
    ///
    /// It is unsafe because it does not check whether `prev` and `next` belongs
    /// to the list, or whether they are adjacent (only in `#[cfg(debug_assertions)]`).
    unsafe fn attach_node(
        &mut self,
        prev: NonNull<Node<T>>,
        next: NonNull<Node<T>>,
        node: NonNull<Node<T>>,
    ) {
        #[cfg(debug_assertions)]
        assert_adjacent(prev, next);
        connect(prev, node);
        connect(node, next);
    }

    /// Detach a single node `node` from the list, and return it as a box.
    ///
    /// It is unsafe because it does not check whether `node` belongs to the list,
    /// or whether it is the ghost node. The elements of the node are still
    /// counted in `len`.
    unsafe fn detach_node(&mut self, node: NonNull<Node<T>>) -> Box<Node<T>> {
        let node = Box::from_raw(node.as_ptr());
        connect(node.prev, node.next);
        node
    }

    /// Detach all nodes from the list, and return the detached nodes, or return
    /// `None` if the list is empty. The list is left empty.
    pub(crate) fn detach_all_nodes(&mut self) -> Option<DetachedNodes<T>> {
        if self.front_node() == self.ghost {
            return None;
        }
        let (front, back) = (self.front_node(), self.back_node());
        // SAFETY: the ghost node is always valid.
        unsafe { connect(self.ghost, self.ghost) };
        self.len = 0;
        Some(DetachedNodes {
            front,
            back,
            _marker: PhantomData,
        })
    }

    /// Find the node holding position `at` and the offset of `at` inside it.
    ///
    /// `at == len` resolves to the ghost node at offset 0.
    pub(crate) fn locate(&self, at: usize) -> (NonNull<Node<T>>, usize) {
        debug_assert!(at <= self.len);
        let (mut node, mut start) = (self.front_node(), 0);
        while node != self.ghost {
            // SAFETY: every node between the ghost's `next` and the ghost is live.
            let current = unsafe { node.as_ref() };
            if at < start + current.count() {
                return (node, at - start);
            }
            start += current.count();
            node = current.next;
        }
        (self.ghost, 0)
    }

    /// Append `item` to the last node, or to a new node if the last one is
    /// full. No uniqueness check.
    pub(crate) fn push_back_unchecked(&mut self, item: T) {
        let mut back = self.back_node();
        // SAFETY: `back` is either the ghost node or the last live node.
        unsafe {
            if back != self.ghost && back.as_ref().count() < self.node_size {
                back.as_mut().push(item);
            } else {
                let mut node = Node::new_detached(self.node_size);
                node.as_mut().push(item);
                self.attach_node(back, self.ghost, node);
            }
        }
        self.len += 1;
    }

    /// Take the last element, unlinking the last node once it is empty.
    pub(crate) fn pop_back(&mut self) -> Option<T> {
        let mut back = self.back_node();
        if back == self.ghost {
            return None;
        }
        // SAFETY: `back` is the last live node, and the last node is exempt
        // from the half-capacity rule.
        let item = unsafe {
            if back.as_ref().count() == 1 {
                trace!("unlinking emptied last node");
                self.detach_node(back).elements.pop()
            } else {
                back.as_mut().elements.pop()
            }
        };
        self.len -= 1;
        item
    }

    /// An empty list with the same node size.
    pub(crate) fn empty_like(&self) -> Self {
        Self::with_node_size_unchecked(self.node_size)
    }

    /// Assert the node-level invariants of the list.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        let mut total = 0;
        let mut node = self.front_node();
        // SAFETY: walks the live chain only.
        unsafe {
            assert_eq!(self.ghost.as_ref().count(), 0);
            while node != self.ghost {
                let current = node.as_ref();
                assert_adjacent(current.prev, node);
                assert!(current.count() <= self.node_size);
                if current.next == self.ghost {
                    assert!(current.count() >= 1, "empty node left in the chain");
                } else {
                    assert!(
                        current.count() >= self.half(),
                        "node below half capacity: {} < {}",
                        current.count(),
                        self.half()
                    );
                }
                total += current.count();
                node = current.next;
            }
        }
        assert_eq!(total, self.len);
    }
}

impl<T> StoutList<T> {
    /// Create an empty `StoutList` with [`DEFAULT_NODE_SIZE`].
    ///
    /// # Examples
    /// ```
    /// use stout_list::StoutList;
    /// let list: StoutList<u32> = StoutList::new();
    /// assert_eq!(list.node_size(), 4);
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self::with_node_size_unchecked(DEFAULT_NODE_SIZE)
    }

    /// Create an empty `StoutList` whose nodes hold up to `node_size`
    /// elements.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNodeSize`] if `node_size` is zero or odd.
    ///
    /// # Examples
    /// ```
    /// use stout_list::{Error, StoutList};
    ///
    /// let list: StoutList<u32> = StoutList::with_node_size(6).unwrap();
    /// assert_eq!(list.node_size(), 6);
    ///
    /// assert_eq!(
    ///     StoutList::<u32>::with_node_size(3).unwrap_err(),
    ///     Error::InvalidNodeSize(3)
    /// );
    /// ```
    pub fn with_node_size(node_size: usize) -> Result<Self, Error> {
        if node_size == 0 || node_size % 2 != 0 {
            return Err(Error::InvalidNodeSize(node_size));
        }
        debug!(node_size, "creating list");
        Ok(Self::with_node_size_unchecked(node_size))
    }

    /// The maximum number of elements in a node.
    #[inline]
    pub fn node_size(&self) -> usize {
        self.node_size
    }

    /// Returns the number of elements in the `StoutList`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the `StoutList` is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of nodes in the chain.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n* / `node_size`) time.
    pub fn node_count(&self) -> usize {
        self.nodes().count()
    }

    /// Removes all elements from the `StoutList`.
    pub fn clear(&mut self) {
        self.drain().for_each(drop);
    }

    /// Appends `item` to the end of the list, unless an equal element is
    /// already present.
    ///
    /// Returns `true` if `item` was added. The last node is filled before a
    /// new node is allocated.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time, for the scan for an
    /// equal element.
    ///
    /// # Examples
    ///
    /// ```
    /// use stout_list::StoutList;
    ///
    /// let mut list = StoutList::new();
    /// assert!(list.add("a"));
    /// assert!(list.add("b"));
    /// assert!(!list.add("a"));
    /// assert_eq!(list.len(), 2);
    /// ```
    pub fn add(&mut self, item: T) -> bool
    where
        T: PartialEq,
    {
        if self.contains(&item) {
            return false;
        }
        self.push_back_unchecked(item);
        true
    }

    /// Inserts `item` at position `at`, shifting later elements back.
    ///
    /// A full node is split in two halves first. Inserting at the start of a
    /// node prefers free room at the end of its predecessor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `at > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use stout_list::StoutList;
    ///
    /// let mut list: StoutList<_> = (1..=4).collect();
    /// list.insert(2, 10).unwrap();
    /// assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 10, 3, 4]);
    /// assert!(list.insert(9, 0).is_err());
    /// ```
    pub fn insert(&mut self, at: usize, item: T) -> Result<(), Error> {
        self.check_index(at, self.len + 1)?;
        if self.is_empty() {
            self.push_back_unchecked(item);
            return Ok(());
        }
        let (mut node, offset) = self.locate(at);
        // SAFETY: `node` is a node of the chain (possibly the ghost node when
        // `at == len`), and its `prev` is either the ghost node or live.
        unsafe {
            if offset == 0 {
                let mut prev = node.as_ref().prev;
                if prev != self.ghost && prev.as_ref().count() < self.node_size {
                    prev.as_mut().push(item);
                    self.len += 1;
                    return Ok(());
                }
                if node == self.ghost {
                    self.push_back_unchecked(item);
                    return Ok(());
                }
            }
            if node.as_ref().count() < self.node_size {
                node.as_mut().insert(offset, item);
            } else {
                let half = self.half();
                trace!(at, offset, half, "splitting full node");
                let mut successor = Node::new_detached(self.node_size);
                successor.as_mut().take_from(node.as_mut(), half);
                self.attach_node(node, node.as_ref().next, successor);
                if offset <= half {
                    node.as_mut().insert(offset, item);
                } else {
                    successor.as_mut().insert(offset - half, item);
                }
            }
        }
        self.len += 1;
        Ok(())
    }

    /// Removes the element at position `at` and returns it.
    ///
    /// A node that drops below half capacity takes the first element of its
    /// successor if the successor can spare one, or absorbs the successor
    /// entirely otherwise. The last node is exempt and is unlinked once it
    /// becomes empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `at >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use stout_list::StoutList;
    ///
    /// let mut list: StoutList<_> = (1..=3).collect();
    /// assert_eq!(list.remove(1), Ok(2));
    /// assert_eq!(list.remove(0), Ok(1));
    /// assert_eq!(list.remove(0), Ok(3));
    /// assert!(list.remove(0).is_err());
    /// ```
    pub fn remove(&mut self, at: usize) -> Result<T, Error> {
        self.check_index(at, self.len)?;
        let (mut node, offset) = self.locate(at);
        debug_assert!(node != self.ghost);
        let half = self.half();
        // SAFETY: `at < len`, so `node` is live, and a live node that is not
        // the last one has a live successor.
        let item = unsafe {
            let is_back = node.as_ref().next == self.ghost;
            let count = node.as_ref().count();
            if is_back && count == 1 {
                trace!(at, "unlinking emptied last node");
                self.detach_node(node).remove(offset)
            } else if is_back || count > half {
                node.as_mut().remove(offset)
            } else {
                let item = node.as_mut().remove(offset);
                let mut successor = node.as_ref().next;
                if successor.as_ref().count() > half {
                    trace!(at, "mini-merge with successor");
                    let first = successor.as_mut().remove(0);
                    node.as_mut().push(first);
                } else {
                    trace!(at, "full merge with successor");
                    let mut successor = self.detach_node(successor);
                    node.as_mut().take_from(&mut successor, 0);
                }
                item
            }
        };
        self.len -= 1;
        Ok(item)
    }

    /// Returns a reference to the element at position `at`, or `None` if it
    /// is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use stout_list::StoutList;
    ///
    /// let list: StoutList<_> = (0..10).collect();
    /// assert_eq!(list.get(7), Some(&7));
    /// assert_eq!(list.get(10), None);
    /// ```
    pub fn get(&self, at: usize) -> Option<&T> {
        if at >= self.len {
            return None;
        }
        let (node, offset) = self.locate(at);
        // SAFETY: `at < len`, so `node` is live.
        unsafe { node.as_ref() }.elements.get(offset)
    }

    /// Overwrites the element at position `at` with `item`, returning the old
    /// element. The linked structure is untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `at >= len`.
    pub fn replace(&mut self, at: usize, item: T) -> Result<T, Error> {
        self.check_index(at, self.len)?;
        let (mut node, offset) = self.locate(at);
        // SAFETY: `at < len`, so `node` is live.
        let slot = unsafe { &mut node.as_mut().elements[offset] };
        Ok(std::mem::replace(slot, item))
    }

    /// Provides a forward iterator over the elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use stout_list::StoutList;
    ///
    /// let list: StoutList<_> = (0..3).collect();
    /// let mut iter = list.iter();
    /// assert_eq!(iter.next(), Some(&0));
    /// assert_eq!(iter.next_back(), Some(&2));
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Provides an iterator over the live elements of each node, as slices.
    ///
    /// # Examples
    ///
    /// ```
    /// use stout_list::StoutList;
    ///
    /// let list: StoutList<_> = (0..6).collect();
    /// let blocks: Vec<&[i32]> = list.nodes().collect();
    /// assert_eq!(blocks, vec![&[0, 1, 2, 3][..], &[4, 5][..]]);
    /// ```
    #[inline]
    pub fn nodes(&self) -> Nodes<'_, T> {
        Nodes::new(self)
    }

    /// Removes every element and returns them in order as an iterator.
    ///
    /// The list is empty as soon as this is called; elements not consumed
    /// are dropped with the `Drain`.
    ///
    /// # Examples
    ///
    /// ```
    /// use stout_list::StoutList;
    ///
    /// let mut list: StoutList<_> = (0..5).collect();
    /// let drained: Vec<_> = list.drain().collect();
    /// assert_eq!(drained, vec![0, 1, 2, 3, 4]);
    /// assert!(list.is_empty());
    /// ```
    pub fn drain(&mut self) -> Drain<'_, T> {
        Drain::new(self)
    }
}

impl<T: Debug> Debug for StoutList<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for StoutList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DetachedNodes<T> {
    /// Take the front node back into a box, and return it with the rest of
    /// the detached nodes, if any.
    pub(crate) fn pop_front(self) -> (Box<Node<T>>, Option<Self>) {
        // SAFETY: `front..=back` is a valid range that no list links to any more.
        let node = unsafe { Box::from_raw(self.front.as_ptr()) };
        let rest = if self.front == self.back {
            None
        } else {
            Some(Self {
                front: node.next,
                back: self.back,
                _marker: PhantomData,
            })
        };
        (node, rest)
    }
}

pub(crate) unsafe fn connect<T>(mut prev: NonNull<Node<T>>, mut next: NonNull<Node<T>>) {
    prev.as_mut().next = next;
    next.as_mut().prev = prev;
}

fn new_ghost<T>() -> NonNull<Node<T>> {
    let mut ghost = Node::new_detached(0);
    // SAFETY: `ghost` is freshly allocated and links to itself.
    unsafe {
        ghost.as_mut().next = ghost;
        ghost.as_mut().prev = ghost;
    }
    ghost
}

#[cfg(any(test, debug_assertions))]
fn assert_adjacent<T>(prev: NonNull<Node<T>>, next: NonNull<Node<T>>) {
    unsafe {
        assert_eq!(prev.as_ref().next, next);
        assert_eq!(next.as_ref().prev, prev);
    }
}

impl<T> Drop for StoutList<T> {
    fn drop(&mut self) {
        self.clear();
        // SAFETY: the ghost node was leaked from a box in `new_ghost`, and
        // no node links to it any more.
        unsafe { drop(Box::from_raw(self.ghost.as_ptr())) };
    }
}

unsafe impl<T: Send> Send for StoutList<T> {}

unsafe impl<T: Sync> Sync for StoutList<T> {}
