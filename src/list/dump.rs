use crate::list::StoutList;
use std::fmt::Display;

impl<T: Display> StoutList<T> {
    /// Renders the nodes of the list for diagnostics.
    ///
    /// Each node is shown as a tuple of `node_size` slots, with `-` for an
    /// unused slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use stout_list::StoutList;
    ///
    /// let mut list: StoutList<_> = ['A', 'B', 'C', 'D', 'E'].iter().copied().collect();
    /// assert_eq!(list.dump(), "[(A, B, C, D), (E, -, -, -)]");
    ///
    /// let cursor = list.cursor_at(2).unwrap();
    /// assert_eq!(cursor.dump(), "[(A, B, | C, D), (E, -, -, -)]");
    /// ```
    pub fn dump(&self) -> String {
        self.dump_marked(None)
    }

    /// Like [`dump`](StoutList::dump), with `| ` before the element at
    /// position `mark`, or ` |` after the last element if `mark == len`.
    pub(crate) fn dump_marked(&self, mark: Option<usize>) -> String {
        let mut out = String::from("[");
        let mut position = 0;
        for (i, elements) in self.nodes().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push('(');
            for slot in 0..self.node_size() {
                if slot > 0 {
                    out.push_str(", ");
                }
                match elements.get(slot) {
                    Some(element) => {
                        if mark == Some(position) {
                            out.push_str("| ");
                        }
                        out.push_str(&element.to_string());
                        position += 1;
                        if mark == Some(self.len()) && position == self.len() {
                            out.push_str(" |");
                        }
                    }
                    None => out.push('-'),
                }
            }
            out.push(')');
        }
        out.push(']');
        out
    }
}

#[cfg(test)]
mod tests {
    use crate::StoutList;

    #[test]
    fn dump_empty() {
        let list = StoutList::<i32>::new();
        assert_eq!(list.dump(), "[]");
        assert_eq!(list.dump_marked(Some(0)), "[]");
    }

    #[test]
    fn dump_marks_cursor() {
        let mut list: StoutList<_> = (1..=4).collect();
        list.insert(2, 10).unwrap();
        assert_eq!(list.dump(), "[(1, 2, 10, -), (3, 4, -, -)]");
        assert_eq!(list.dump_marked(Some(0)), "[(| 1, 2, 10, -), (3, 4, -, -)]");
        assert_eq!(list.dump_marked(Some(3)), "[(1, 2, 10, -), (| 3, 4, -, -)]");
        assert_eq!(list.dump_marked(Some(5)), "[(1, 2, 10, -), (3, 4 |, -, -)]");
    }

    #[test]
    fn dump_other_node_size() {
        let mut list = StoutList::with_node_size(2).unwrap();
        list.extend(["x", "y", "z"].iter().copied());
        assert_eq!(list.dump(), "[(x, y), (z, -)]");
    }
}
