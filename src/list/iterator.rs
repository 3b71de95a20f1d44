use crate::list::node::Node;
use crate::list::StoutList;
use std::fmt;
use std::iter::{FromIterator, FusedIterator};
use std::marker::PhantomData;
use std::ptr::NonNull;
use std::slice;

/// An iterator over the nodes of a `StoutList`, yielding the live elements
/// of each node as a slice.
///
/// It uses a pair of nodes `start..end` to represent a half-open subrange
/// of the chain, where `start` is inclusive and `end` is not.
///
/// Though `Nodes` does not hold a reference to the list, it actually
/// *borrows* (immutably) from the list, so a phantom marker of
/// `&'a StoutList<T>` is added to protect the list from being written.
///
/// # Examples
///
/// ```compile_fail
/// use stout_list::StoutList;
///
/// let mut list: StoutList<_> = (0..3).collect();
/// let mut nodes = list.nodes();
///
/// // Won't compile, because list is already borrowed immutably.
/// list.add(4);
/// println!("{:?}", nodes.next());
/// ```
pub struct Nodes<'a, T: 'a> {
    start: NonNull<Node<T>>,
    end: NonNull<Node<T>>,
    _marker: PhantomData<&'a StoutList<T>>,
}

impl<'a, T: 'a> Nodes<'a, T> {
    pub(crate) fn new(list: &'a StoutList<T>) -> Self {
        Self {
            start: list.front_node(),
            end: list.ghost_node(),
            _marker: PhantomData,
        }
    }
}

impl<'a, T: 'a> Clone for Nodes<'a, T> {
    fn clone(&self) -> Self {
        Self {
            start: self.start,
            end: self.end,
            _marker: PhantomData,
        }
    }
}

impl<'a, T: 'a> Iterator for Nodes<'a, T> {
    type Item = &'a [T];

    /// Return the elements of `start` and reset the iterating range to
    /// `(start.next)..end`, or return `None` if `start..end` is already empty.
    fn next(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: `start..end` is always a valid range of a list,
        // and it is not empty here, so it is safe.
        let current = unsafe { self.start.as_ref() };
        self.start = current.next;
        Some(current.elements.as_slice())
    }
}

impl<'a, T: 'a> DoubleEndedIterator for Nodes<'a, T> {
    /// Reset the iterating range to `start..(end.prev)` and return the
    /// elements of the new `end`, or return `None` if `start..end` is
    /// already empty.
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: `start..end` is always a valid range of a list,
        // and it is not empty here, so it is safe.
        self.end = unsafe { self.end.as_ref().prev };
        let current = unsafe { self.end.as_ref() };
        Some(current.elements.as_slice())
    }
}

impl<'a, T: 'a> FusedIterator for Nodes<'a, T> {}

/// An iterator over the elements of a `StoutList`.
///
/// It walks the nodes with a [`Nodes`] iterator and the elements inside the
/// front and back nodes with slice iterators.
pub struct Iter<'a, T: 'a> {
    nodes: Nodes<'a, T>,
    front: slice::Iter<'a, T>,
    back: slice::Iter<'a, T>,
    len: usize,
}

impl<'a, T: 'a> Iter<'a, T> {
    pub(crate) fn new(list: &'a StoutList<T>) -> Self {
        Self {
            nodes: list.nodes(),
            front: <&[T]>::default().iter(),
            back: <&[T]>::default().iter(),
            len: list.len(),
        }
    }
}

impl<'a, T: 'a> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            front: self.front.clone(),
            back: self.back.clone(),
            len: self.len,
        }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for Iter<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.clone().collect::<Vec<_>>()).finish()
    }
}

impl<'a, T: 'a> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.front.next() {
                self.len -= 1;
                return Some(item);
            }
            match self.nodes.next() {
                Some(elements) => self.front = elements.iter(),
                None => break,
            }
        }
        // The remaining elements, if any, sit in the node taken from the back.
        let item = self.back.next()?;
        self.len -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.back.next_back() {
                self.len -= 1;
                return Some(item);
            }
            match self.nodes.next_back() {
                Some(elements) => self.back = elements.iter(),
                None => break,
            }
        }
        let item = self.front.next_back()?;
        self.len -= 1;
        Some(item)
    }
}

impl<'a, T: 'a> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T: 'a> FusedIterator for Iter<'a, T> {}

/// An owning iterator over the elements of a `StoutList`.
///
/// This `struct` is created by the [`into_iter`] method on [`StoutList`]
/// (provided by the `IntoIterator` trait). See its documentation for more.
///
/// [`into_iter`]: StoutList::into_iter
pub struct IntoIter<T> {
    list: StoutList<T>,
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter")
            .field("list", &self.list)
            .finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.list.is_empty() {
            return None;
        }
        self.list.remove(0).ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.list.len;
        (len, Some(len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.list.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for StoutList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a StoutList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Collects with [`StoutList::add`], so later duplicates are skipped.
impl<T: PartialEq> FromIterator<T> for StoutList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = StoutList::new();
        list.extend(iter);
        list
    }
}

/// Extends with [`StoutList::add`], so duplicates are skipped.
impl<T: PartialEq> Extend<T> for StoutList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|item| {
            self.add(item);
        });
    }
}

impl<'a, T: 'a + Copy + PartialEq> Extend<&'a T> for StoutList<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}

unsafe impl<T: Sync> Send for Iter<'_, T> {}

unsafe impl<T: Sync> Sync for Iter<'_, T> {}

unsafe impl<T: Sync> Send for Nodes<'_, T> {}

unsafe impl<T: Sync> Sync for Nodes<'_, T> {}

#[cfg(test)]
mod tests {
    use crate::StoutList;

    #[test]
    fn test_iter() {
        fn test_case(node_size: usize, len: i32, mid: usize) {
            let vec: Vec<i32> = (0..len).collect();
            let mut list = StoutList::with_node_size(node_size).unwrap();
            list.extend(vec.iter().copied());

            let mut iter = list.iter();
            for (i, item) in vec.iter().enumerate() {
                assert_eq!(iter.next(), Some(item));
                assert_eq!(iter.len(), vec.len() - i - 1);
            }
            assert_eq!(iter.next(), None);
            assert_eq!(iter.next(), None);
            assert_eq!(iter.next_back(), None);

            let mut iter = list.iter();
            for item in vec.iter().take(mid) {
                assert_eq!(iter.next(), Some(item));
            }
            let mut iter = iter.rev();
            for (i, item) in vec.iter().skip(mid).rev().enumerate() {
                assert_eq!(iter.next(), Some(item));
                assert_eq!(iter.len(), vec.len() - mid - i - 1);
            }
            assert_eq!(iter.next(), None);
            assert_eq!(iter.next_back(), None);
        }
        for &node_size in &[2, 4, 6] {
            test_case(node_size, 10, 10);
            test_case(node_size, 10, 8);
            test_case(node_size, 10, 5);
            test_case(node_size, 10, 2);
            test_case(node_size, 10, 0);
            test_case(node_size, 2, 1);
            test_case(node_size, 1, 1);
            test_case(node_size, 1, 0);
            test_case(node_size, 0, 0);
        }
    }

    #[test]
    fn test_iter_meets_in_one_node() {
        let list: StoutList<_> = (0..4).collect();
        let mut iter = list.iter();
        assert_eq!(iter.next(), Some(&0));
        assert_eq!(iter.next_back(), Some(&3));
        assert_eq!(iter.next_back(), Some(&2));
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn test_nodes_both_ends() {
        let list: StoutList<_> = (0..9).collect();
        let mut nodes = list.nodes();
        assert_eq!(nodes.next_back(), Some(&[8][..]));
        assert_eq!(nodes.next(), Some(&[0, 1, 2, 3][..]));
        assert_eq!(nodes.next(), Some(&[4, 5, 6, 7][..]));
        assert_eq!(nodes.next(), None);
    }

    #[test]
    fn test_into_iter() {
        let list: StoutList<_> = (0..7).collect();
        let mut iter = list.into_iter();
        assert_eq!(iter.len(), 7);
        assert_eq!(iter.next(), Some(0));
        assert_eq!(iter.next_back(), Some(6));
        assert_eq!(iter.collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_into_iter_from_back() {
        let mut list = StoutList::with_node_size(2).unwrap();
        list.extend(0..7);
        list.insert(1, 10).unwrap();
        let mut iter = list.into_iter();
        for expected in (2..7).rev() {
            assert_eq!(iter.next_back(), Some(expected));
            iter.list.check_invariants();
        }
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.next(), Some(0));
        assert_eq!(iter.next_back(), Some(1));
        assert_eq!(iter.next_back(), Some(10));
        assert_eq!(iter.next_back(), None);
        assert_eq!(iter.list.node_count(), 0);
    }

    #[test]
    fn test_collect_skips_duplicates() {
        let list: StoutList<_> = vec![3, 1, 3, 2, 1].into_iter().collect();
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![3, 1, 2]);
    }
}
