use smallvec::SmallVec;
use std::ptr::NonNull;

/// Number of elements a node stores inline before its block spills to the
/// heap. Matches [`DEFAULT_NODE_SIZE`](crate::DEFAULT_NODE_SIZE).
pub const INLINE_ELEMENTS: usize = 4;

pub(crate) type Elements<T> = SmallVec<[T; INLINE_ELEMENTS]>;

/// A block of up to `node_size` elements, packed at the front.
///
/// The node does not know its capacity; the owning list checks it before
/// every `push`/`insert`.
pub(crate) struct Node<T> {
    pub(crate) next: NonNull<Node<T>>,
    pub(crate) prev: NonNull<Node<T>>,
    pub(crate) elements: Elements<T>,
}

impl<T> Node<T> {
    /// Create a detached node with room for `capacity` elements.
    ///
    /// `next` and `prev` are dangling until the node is attached.
    pub(crate) fn new_detached(capacity: usize) -> NonNull<Node<T>> {
        NonNull::from(Box::leak(Box::new(Node {
            next: NonNull::dangling(),
            prev: NonNull::dangling(),
            elements: Elements::with_capacity(capacity),
        })))
    }

    /// Number of live elements.
    #[inline]
    pub(crate) fn count(&self) -> usize {
        self.elements.len()
    }

    /// Write `item` right after the last live element.
    #[inline]
    pub(crate) fn push(&mut self, item: T) {
        self.elements.push(item);
    }

    /// Write `item` at `offset`, shifting `offset..count` one slot right.
    pub(crate) fn insert(&mut self, offset: usize, item: T) {
        debug_assert!(offset <= self.count());
        self.elements.insert(offset, item);
    }

    /// Take the element at `offset`, shifting `offset+1..count` one slot left.
    pub(crate) fn remove(&mut self, offset: usize) -> T {
        debug_assert!(offset < self.count());
        self.elements.remove(offset)
    }

    /// Move the elements `at..` of `other` to the end of this node, in order.
    pub(crate) fn take_from(&mut self, other: &mut Node<T>, at: usize) {
        debug_assert!(at <= other.count());
        self.elements.extend(other.elements.drain(at..));
    }
}

#[cfg(test)]
mod tests {
    use super::Node;

    fn node_of(items: &[i32]) -> Box<Node<i32>> {
        let mut node = unsafe { Box::from_raw(Node::new_detached(4).as_ptr()) };
        items.iter().for_each(|&item| node.push(item));
        node
    }

    #[test]
    fn node_insert_shifts_right() {
        let mut node = node_of(&[1, 2, 4]);
        node.insert(2, 3);
        assert_eq!(node.elements.as_slice(), &[1, 2, 3, 4]);
        assert_eq!(node.count(), 4);
    }

    #[test]
    fn node_remove_shifts_left() {
        let mut node = node_of(&[1, 2, 3, 4]);
        assert_eq!(node.remove(1), 2);
        assert_eq!(node.elements.as_slice(), &[1, 3, 4]);
        assert_eq!(node.remove(2), 4);
        assert_eq!(node.elements.as_slice(), &[1, 3]);
    }

    #[test]
    fn node_take_upper_half_and_merge_back() {
        let mut node = node_of(&[1, 2, 3, 4]);
        let mut upper = node_of(&[]);
        upper.take_from(&mut node, 2);
        assert_eq!(upper.elements.as_slice(), &[3, 4]);
        assert_eq!(node.elements.as_slice(), &[1, 2]);

        let mut other = node_of(&[5, 6]);
        node.take_from(&mut other, 0);
        assert_eq!(node.elements.as_slice(), &[1, 2, 5, 6]);
        assert_eq!(other.count(), 0);
    }
}
