use crate::error::{Direction, Error};
use crate::list::StoutList;
use std::fmt;
use std::fmt::{Display, Formatter};

/// A bidirectional cursor over a `StoutList` with editing operations.
///
/// In a list with length *n*, there are *n* + 1 valid positions for the
/// cursor, indexed by 0, 1, ..., *n*; the cursor sits between the element
/// before it and the element after it.
///
/// The cursor reads from a snapshot of the elements, taken when it is
/// created and taken again after each structural change it makes, so `next`
/// and `previous` are *O*(1). Changes go through the list's positional
/// operations. The cursor holds the list's unique borrow, so the list cannot
/// change behind its back:
///
/// ```compile_fail
/// use stout_list::StoutList;
///
/// let mut list: StoutList<_> = (0..3).collect();
/// let mut cursor = list.cursor();
/// list.add(4);
/// println!("{:?}", cursor.next());
/// ```
///
/// # Examples
///
/// ```
/// use stout_list::StoutList;
///
/// let mut list: StoutList<_> = ['A', 'B', 'C'].iter().copied().collect();
/// let mut cursor = list.cursor();
///
/// // [|A B C]
/// assert_eq!(cursor.next(), Ok(&'A'));
/// // [A|B C], remove the `A` just passed
/// assert_eq!(cursor.remove(), Ok('A'));
/// // [|B C], insert before the cursor
/// cursor.add('Z').unwrap();
/// // [Z|B C]
/// assert_eq!(cursor.next(), Ok(&'B'));
/// assert_eq!(cursor.set('Y'), Ok('B'));
///
/// assert_eq!(list.iter().collect::<String>(), "ZYC");
/// ```
pub struct ListCursor<'a, T: 'a> {
    list: &'a mut StoutList<T>,
    snapshot: Vec<T>,
    index: usize,
    last_move: Option<Direction>,
}

impl<'a, T: Clone + 'a> ListCursor<'a, T> {
    pub(crate) fn new(list: &'a mut StoutList<T>, index: usize) -> Self {
        debug_assert!(index <= list.len());
        let snapshot = list.iter().cloned().collect();
        Self {
            list,
            snapshot,
            index,
            last_move: None,
        }
    }

    fn refresh(&mut self) {
        self.snapshot.clear();
        self.snapshot.extend(self.list.iter().cloned());
    }

    /// Position of the element returned by the last move.
    fn last_position(&self) -> Result<usize, Error> {
        match self.last_move {
            Some(Direction::Forward) => Ok(self.index - 1),
            Some(Direction::Backward) => Ok(self.index),
            None => Err(Error::NoMove),
        }
    }

    /// Returns a shared view of the list.
    pub fn view(&self) -> &StoutList<T> {
        &*self.list
    }

    /// Returns `true` if there is an element after the cursor.
    pub fn has_next(&self) -> bool {
        self.index < self.snapshot.len()
    }

    /// Returns `true` if there is an element before the cursor.
    pub fn has_previous(&self) -> bool {
        self.index > 0
    }

    /// Position of the element `next` would return.
    pub fn next_index(&self) -> usize {
        self.index
    }

    /// Position of the element `previous` would return, or `None` at the
    /// start of the list.
    pub fn previous_index(&self) -> Option<usize> {
        self.index.checked_sub(1)
    }

    /// Returns the element after the cursor and moves the cursor past it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Exhausted`] if the cursor is at the end.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<&T, Error> {
        if !self.has_next() {
            return Err(Error::Exhausted(Direction::Forward));
        }
        self.index += 1;
        self.last_move = Some(Direction::Forward);
        Ok(&self.snapshot[self.index - 1])
    }

    /// Moves the cursor back over the element before it and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Exhausted`] if the cursor is at the start.
    pub fn previous(&mut self) -> Result<&T, Error> {
        if !self.has_previous() {
            return Err(Error::Exhausted(Direction::Backward));
        }
        self.index -= 1;
        self.last_move = Some(Direction::Backward);
        Ok(&self.snapshot[self.index])
    }

    /// Removes the element returned by the last `next` or `previous`.
    ///
    /// Allowed once per move.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoMove`] if there was no move since the cursor was
    /// created or since the last `remove`/`add`.
    pub fn remove(&mut self) -> Result<T, Error> {
        let at = self.last_position()?;
        let removed = self.list.remove(at)?;
        if self.last_move == Some(Direction::Forward) {
            self.index -= 1;
        }
        self.last_move = None;
        self.refresh();
        Ok(removed)
    }

    /// Overwrites the element returned by the last `next` or `previous`,
    /// and returns the old element. The cursor does not move and may `set`
    /// or `remove` again.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoMove`] if there was no move since the cursor was
    /// created or since the last `remove`/`add`.
    pub fn set(&mut self, item: T) -> Result<T, Error> {
        let at = self.last_position()?;
        let old = self.list.replace(at, item.clone())?;
        self.snapshot[at] = item;
        Ok(old)
    }

    /// Inserts `item` before the cursor; a following `next` is unaffected and
    /// a following `previous` returns `item`.
    ///
    /// An insert is not a move: `remove` and `set` fail until the next move.
    pub fn add(&mut self, item: T) -> Result<(), Error> {
        self.list.insert(self.index, item)?;
        self.index += 1;
        self.last_move = None;
        self.refresh();
        Ok(())
    }

    /// Renders the nodes of the list with the cursor position marked.
    /// See [`StoutList::dump`].
    pub fn dump(&self) -> String
    where
        T: Display,
    {
        self.list.dump_marked(Some(self.index))
    }
}

impl<T: Clone> StoutList<T> {
    /// Provides a cursor at the start of the list.
    pub fn cursor(&mut self) -> ListCursor<'_, T> {
        ListCursor::new(self, 0)
    }

    /// Provides a cursor before the element at position `at`.
    ///
    /// By convention, the cursor is at the end of the list if `at == len`.
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
    /// let mut list: StoutList<_> = (0..5).collect();
    /// let mut cursor = list.cursor_at(5).unwrap();
    /// assert_eq!(cursor.previous(), Ok(&4));
    /// assert!(list.cursor_at(6).is_err());
    /// ```
    pub fn cursor_at(&mut self, at: usize) -> Result<ListCursor<'_, T>, Error> {
        if at > self.len() {
            return Err(Error::IndexOutOfBounds {
                index: at,
                len: self.len(),
            });
        }
        Ok(ListCursor::new(self, at))
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for ListCursor<'a, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListCursor")
            .field("list", &self.list)
            .field("index", &self.index)
            .field("last_move", &self.last_move)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Direction, Error, StoutList};

    fn list_of(node_size: usize, len: i32) -> StoutList<i32> {
        let mut list = StoutList::with_node_size(node_size).unwrap();
        list.extend(0..len);
        list
    }

    #[test]
    fn cursor_walks_both_ways() {
        let mut list = list_of(4, 6);
        let mut cursor = list.cursor();
        assert!(!cursor.has_previous());
        assert_eq!(cursor.previous_index(), None);
        for i in 0..6 {
            assert_eq!(cursor.next_index(), i as usize);
            assert_eq!(cursor.next(), Ok(&i));
        }
        assert!(!cursor.has_next());
        assert_eq!(cursor.next(), Err(Error::Exhausted(Direction::Forward)));
        for i in (0..6).rev() {
            assert_eq!(cursor.previous(), Ok(&i));
        }
        assert_eq!(
            cursor.previous(),
            Err(Error::Exhausted(Direction::Backward))
        );
    }

    #[test]
    fn cursor_remove_needs_a_move() {
        let mut list = list_of(4, 3);
        let mut cursor = list.cursor();
        assert_eq!(cursor.remove(), Err(Error::NoMove));
        assert_eq!(cursor.set(9), Err(Error::NoMove));

        assert_eq!(cursor.next(), Ok(&0));
        assert_eq!(cursor.remove(), Ok(0));
        assert_eq!(cursor.remove(), Err(Error::NoMove));
        assert_eq!(cursor.next_index(), 0);
        assert_eq!(cursor.next(), Ok(&1));
    }

    #[test]
    fn cursor_remove_after_previous() {
        let mut list = list_of(2, 5);
        let mut cursor = list.cursor_at(3).unwrap();
        assert_eq!(cursor.previous(), Ok(&2));
        assert_eq!(cursor.remove(), Ok(2));
        assert_eq!(cursor.next_index(), 2);
        assert_eq!(cursor.next(), Ok(&3));
        assert_eq!(cursor.previous(), Ok(&3));
        assert_eq!(cursor.previous(), Ok(&1));
        drop(cursor);
        list.check_invariants();
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![0, 1, 3, 4]);
    }

    #[test]
    fn cursor_set_keeps_position() {
        let mut list = list_of(4, 5);
        let mut cursor = list.cursor();
        cursor.next().unwrap();
        cursor.next().unwrap();
        assert_eq!(cursor.set(10), Ok(1));
        assert_eq!(cursor.set(11), Ok(10));
        assert_eq!(cursor.previous(), Ok(&11));
        assert_eq!(cursor.set(12), Ok(11));
        assert_eq!(cursor.next(), Ok(&12));
        assert_eq!(cursor.view().get(1), Some(&12));
    }

    #[test]
    fn cursor_add_is_not_a_move() {
        let mut list = list_of(4, 4);
        let mut cursor = list.cursor_at(2).unwrap();
        cursor.add(20).unwrap();
        assert_eq!(cursor.set(5), Err(Error::NoMove));
        assert_eq!(cursor.remove(), Err(Error::NoMove));
        assert_eq!(cursor.next_index(), 3);
        assert_eq!(cursor.previous(), Ok(&20));
        assert_eq!(cursor.next(), Ok(&20));
        assert_eq!(cursor.next(), Ok(&2));
        cursor.view().check_invariants();
        assert_eq!(
            cursor.view().iter().copied().collect::<Vec<_>>(),
            vec![0, 1, 20, 2, 3]
        );
    }

    #[test]
    fn cursor_add_at_end_and_into_empty() {
        let mut list = StoutList::new();
        let mut cursor = list.cursor();
        for i in 0..6 {
            cursor.add(i).unwrap();
        }
        assert!(!cursor.has_next());
        assert_eq!(cursor.previous(), Ok(&5));
        cursor.view().check_invariants();
        assert_eq!(list.node_count(), 2);
    }

    #[test]
    fn cursor_at_out_of_bounds() {
        let mut list = list_of(4, 2);
        assert_eq!(
            list.cursor_at(3).unwrap_err(),
            Error::IndexOutOfBounds { index: 3, len: 2 }
        );
    }

    #[test]
    fn cursor_remove_everything() {
        let mut list = list_of(2, 7);
        let mut cursor = list.cursor();
        while cursor.has_next() {
            cursor.next().unwrap();
            cursor.remove().unwrap();
            cursor.view().check_invariants();
        }
        assert!(list.is_empty());
    }
}
