use std::fmt;

/// The moving direction of a [`ListCursor`](crate::list::cursor::ListCursor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
}

/// Errors that can occur when operating on a [`StoutList`](crate::StoutList)
/// or one of its cursors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The requested node size is zero or odd.
    InvalidNodeSize(usize),

    /// The position is outside the valid range of the operation.
    IndexOutOfBounds { index: usize, len: usize },

    /// `remove` or `set` was called on a cursor without a preceding
    /// `next`/`previous`, or twice after the same move.
    NoMove,

    /// There is no element left in the given direction.
    Exhausted(Direction),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::InvalidNodeSize(size) => {
                write!(f, "node size must be positive and even, got {}", size)
            }
            Error::IndexOutOfBounds { index, len } => {
                write!(f, "index {} out of bounds for list of length {}", index, len)
            }
            Error::NoMove => f.write_str("no element was returned by `next` or `previous`"),
            Error::Exhausted(Direction::Forward) => f.write_str("no next element"),
            Error::Exhausted(Direction::Backward) => f.write_str("no previous element"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use crate::{Direction, Error};

    #[test]
    fn error_messages() {
        assert_eq!(
            Error::InvalidNodeSize(3).to_string(),
            "node size must be positive and even, got 3"
        );
        assert_eq!(
            Error::IndexOutOfBounds { index: 5, len: 2 }.to_string(),
            "index 5 out of bounds for list of length 2"
        );
        assert_eq!(
            Error::Exhausted(Direction::Backward).to_string(),
            "no previous element"
        );
    }
}
