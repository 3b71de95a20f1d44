use crate::list::node::{Elements, INLINE_ELEMENTS};
use crate::list::{DetachedNodes, StoutList};
use smallvec::IntoIter as ElementsIntoIter;
use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;

/// A draining iterator over the elements of a `StoutList`.
///
/// This `struct` is created by [`StoutList::drain`]. All nodes are detached
/// from the list when the `Drain` is created, so the list is already empty
/// (and stays well-formed even if the `Drain` is leaked). Nodes are freed
/// one by one as their elements are yielded.
pub struct Drain<'a, T: 'a> {
    nodes: Option<DetachedNodes<T>>,
    current: ElementsIntoIter<[T; INLINE_ELEMENTS]>,
    _marker: PhantomData<&'a mut StoutList<T>>,
}

impl<'a, T: 'a> Drain<'a, T> {
    pub(crate) fn new(list: &'a mut StoutList<T>) -> Self {
        Self {
            nodes: list.detach_all_nodes(),
            current: Elements::new().into_iter(),
            _marker: PhantomData,
        }
    }
}

impl<T> Iterator for Drain<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.current.next() {
                return Some(item);
            }
            let (mut node, rest) = self.nodes.take()?.pop_front();
            self.nodes = rest;
            self.current = std::mem::take(&mut node.elements).into_iter();
        }
    }
}

impl<T> FusedIterator for Drain<'_, T> {}

impl<T> Drop for Drain<'_, T> {
    fn drop(&mut self) {
        self.for_each(drop);
    }
}

impl<T: fmt::Debug> fmt::Debug for Drain<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Drain")
            .field(&self.current.as_slice())
            .finish()
    }
}

unsafe impl<T: Send> Send for Drain<'_, T> {}

unsafe impl<T: Sync> Sync for Drain<'_, T> {}

#[cfg(test)]
mod tests {
    use crate::StoutList;

    #[test]
    fn drain_partially_consumed() {
        let mut list: StoutList<_> = (0..10).map(|i| i.to_string()).collect();
        let mut drain = list.drain();
        assert_eq!(drain.next().as_deref(), Some("0"));
        assert_eq!(drain.next().as_deref(), Some("1"));
        drop(drain);
        assert!(list.is_empty());
        assert_eq!(list.node_count(), 0);
        assert!(list.add("x".to_string()));
        list.check_invariants();
    }

    #[test]
    fn drain_leaked_leaves_list_empty() {
        let mut list: StoutList<_> = (0..3).collect();
        std::mem::forget(list.drain());
        assert!(list.is_empty());
        list.check_invariants();
    }

    #[test]
    fn drain_moves_across_threads() {
        let mut list: StoutList<_> = (0..6).map(|i| i.to_string()).collect();
        let drain = list.drain();
        let drained = std::thread::scope(|scope| {
            scope
                .spawn(move || drain.collect::<Vec<_>>())
                .join()
                .unwrap()
        });
        assert_eq!(drained, vec!["0", "1", "2", "3", "4", "5"]);
        assert!(list.is_empty());
    }
}
