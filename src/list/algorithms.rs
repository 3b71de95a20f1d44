use crate::list::node::Node;
use crate::list::StoutList;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use tracing::debug;

pub mod drain;
mod sort;

impl<T: PartialEq> PartialEq for StoutList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other)
    }
}

impl<T: Eq> Eq for StoutList<T> {}

impl<T: PartialOrd> PartialOrd for StoutList<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other)
    }
}

impl<T: Ord> Ord for StoutList<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other)
    }
}

/// Clones node by node, so the clone has the same layout as the original.
impl<T: Clone> Clone for StoutList<T> {
    fn clone(&self) -> Self {
        let mut list = self.empty_like();
        for elements in self.nodes() {
            let mut node = Node::new_detached(self.node_size());
            // SAFETY: `node` is freshly allocated, and it is attached between
            // the last node and the ghost node of `list`, which are adjacent.
            unsafe {
                node.as_mut().elements.extend(elements.iter().cloned());
                list.attach_node(list.back_node(), list.ghost_node(), node);
            }
            list.len += elements.len();
        }
        list
    }
}

impl<T: Hash> Hash for StoutList<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for elt in self {
            elt.hash(state);
        }
    }
}

impl<T> StoutList<T> {
    /// Returns `true` if the `StoutList` contains an element equal to the given value.
    ///
    /// Every node is scanned in full.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use stout_list::StoutList;
    ///
    /// let list: StoutList<_> = (0..10).collect();
    ///
    /// assert_eq!(list.contains(&9), true);
    /// assert_eq!(list.contains(&10), false);
    /// ```
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        self.nodes().any(|elements| elements.contains(x))
    }

    /// Sort the list in non-decreasing order.
    ///
    /// All elements are drained into a buffer, sorted there with a stable
    /// insertion sort, and appended back. Afterwards every node but possibly
    /// the last one is full. Duplicates are kept.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*<sup>2</sup>) time and *O*(*n*) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use stout_list::StoutList;
    ///
    /// let mut list: StoutList<_> = [5, 2, 4, 3, 1].iter().copied().collect();
    ///
    /// list.sort_ascending();
    ///
    /// assert_eq!(list.into_iter().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
    /// ```
    pub fn sort_ascending(&mut self)
    where
        T: Ord,
    {
        debug!(len = self.len(), "sorting ascending");
        let mut buffer: Vec<T> = self.drain().collect();
        sort::insertion_sort(&mut buffer, |a, b| a.cmp(b));
        self.rebuild(buffer);
    }

    /// Sort the list in non-increasing order.
    ///
    /// Like [`sort_ascending`](StoutList::sort_ascending), but the buffer is
    /// sorted with a bubble sort.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*<sup>2</sup>) time and *O*(*n*) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use stout_list::StoutList;
    ///
    /// let mut list: StoutList<_> = [5, 2, 4, 3, 1].iter().copied().collect();
    ///
    /// list.sort_descending();
    ///
    /// assert_eq!(list.into_iter().collect::<Vec<_>>(), vec![5, 4, 3, 2, 1]);
    /// ```
    pub fn sort_descending(&mut self)
    where
        T: Ord,
    {
        debug!(len = self.len(), "sorting descending");
        let mut buffer: Vec<T> = self.drain().collect();
        sort::bubble_sort(&mut buffer, |a, b| b.cmp(a));
        self.rebuild(buffer);
    }

    /// Append every element of `buffer` in order, packing the nodes full.
    fn rebuild(&mut self, buffer: Vec<T>) {
        debug_assert!(self.is_empty());
        buffer
            .into_iter()
            .for_each(|item| self.push_back_unchecked(item));
    }
}
