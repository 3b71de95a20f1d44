//! This crate provides an unrolled doubly-linked list, [`StoutList`], whose
//! nodes each hold a small block of elements instead of a single one.
//!
//! Storing several elements per node cuts the per-element pointer overhead
//! of a linked list and keeps neighboring elements close in memory, while
//! inserting and removing at any position stays cheap: only the node holding
//! the position and its right neighbor are touched.
//!
//! Here is a quick example showing how the list works.
//!
//! ```
//! use stout_list::StoutList;
//!
//! let mut list = StoutList::new();
//! for c in "stout".chars() {
//!     list.add(c); // the second `t` is rejected
//! }
//! assert_eq!(list.len(), 4);
//!
//! list.insert(1, 'h').unwrap();
//! assert_eq!(list.remove(0), Ok('s'));
//! assert_eq!(list.iter().collect::<String>(), "htou");
//!
//! list.sort_ascending();
//! assert_eq!(list.iter().collect::<String>(), "hotu");
//! ```
//!
//! # Memory Layout
//!
//! The memory layout of a list with node size 4 is like the following graph:
//! ```text
//!          ┌──────────────────────────────────────────────────────────────┐
//!          ↓                                               (Ghost) Node   │
//!    ╔═══════════╗           ╔═══════════╗                 ┌───────────┐  │
//!    ║   next    ║ ────────→ ║   next    ║ ────────→ ┄┄ ─→ │   next    │ ─┘
//!    ╟───────────╢           ╟───────────╢                 ├───────────┤
//! ┌─ ║   prev    ║ ←──────── ║   prev    ║ ←──────── ┄┄ ←─ │   prev    │
//! │  ╟───────────╢           ╟───────────╢                 ├───────────┤
//! │  ║ a b c -   ║           ║ d e f g   ║                 ┊No elements┊
//! │  ╚═══════════╝           ╚═══════════╝                 └╌╌╌╌╌╌╌╌╌╌╌┘
//! │      Node 0                  Node 1                        ↑   ↑
//! └────────────────────────────────────────────────────────────┘   │
//! ╔═══════════╗                                                    │
//! ║   ghost   ║ ───────────────────────────────────────────────────┘
//! ╟───────────╢
//! ║ node_size ║
//! ╟───────────╢
//! ║    len    ║
//! ╚═══════════╝
//!  StoutList
//! ```
//!
//! The ghost node never holds elements. Its `next` is the first node and its
//! `prev` is the last node, so it serves as both the head and the tail
//! sentinel of the chain. In an empty list, it links to itself.
//!
//! Every node holds at most `node_size` elements, packed at the front of its
//! block. Every node except the last one holds at least `node_size / 2`
//! elements; the last node holds at least one.
//!
//! # Mutations
//!
//! - [`add`]: append at the end, unless an equal element is already present.
//!   The last node is filled before a new node is allocated.
//! - [`insert`]: insert at a position. A full node is split into two halves
//!   first.
//! - [`remove`]: remove at a position. A node falling below half capacity
//!   borrows the first element of its successor, or absorbs the successor
//!   entirely if the successor cannot spare one.
//! - [`sort_ascending`] / [`sort_descending`]: sort all elements and repack
//!   the nodes full.
//!
//! # Cursors
//!
//! A [`ListCursor`] walks the list in both directions and can remove,
//! overwrite and insert elements around its position.
//!
//! ```
//! use stout_list::StoutList;
//!
//! let mut list: StoutList<_> = (1..=5).collect();
//! let mut cursor = list.cursor();
//! while let Ok(&item) = cursor.next() {
//!     if item % 2 == 0 {
//!         cursor.remove().unwrap();
//!     }
//! }
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 3, 5]);
//! ```
//!
//! [`add`]: crate::StoutList::add
//! [`insert`]: crate::StoutList::insert
//! [`remove`]: crate::StoutList::remove
//! [`sort_ascending`]: crate::StoutList::sort_ascending
//! [`sort_descending`]: crate::StoutList::sort_descending
//! [`ListCursor`]: crate::list::cursor::ListCursor

#[doc(inline)]
pub use error::{Direction, Error};
#[doc(inline)]
pub use list::cursor::ListCursor;
#[doc(inline)]
pub use list::iterator::{IntoIter, Iter, Nodes};
#[doc(inline)]
pub use list::node::INLINE_ELEMENTS;
#[doc(inline)]
pub use list::{Drain, StoutList, DEFAULT_NODE_SIZE};

pub mod list;

mod error;
