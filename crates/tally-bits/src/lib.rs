//! Word-packed bit sets for gameplay bookkeeping.
//!
//! Two layers:
//!
//! - [`mask`] -- stateless bit arithmetic over a single `u32` word, with the
//!   "significant bits" variants needed when only the low `n` bits of a word
//!   are meaningful.
//! - [`BitSet`] / [`BitList`] -- a packed sequence of booleans built on those
//!   primitives. `BitSet` has a fixed length; `BitList` derefs to `BitSet`
//!   and adds the resizing surface (`set_len`, `push`, `pop`), the same way
//!   `Vec<T>` layers over `[T]`.
//!
//! # Mutation versioning
//!
//! Every mutating operation bumps an internal version counter. A detached
//! [`BitCursor`] snapshots the version at creation and fails fast with
//! [`BitError::Invalidated`] if the set is mutated mid-iteration, instead of
//! silently walking stale state. The borrowing [`BitSet::iter`] and
//! [`BitSet::ones`] iterators are the everyday alternative; the borrow
//! checker already rules out mutation underneath them.
//!
//! ```
//! use tally_bits::BitList;
//!
//! let mut cooldowns = BitList::new(8);
//! cooldowns.set(3, true);
//! assert_eq!(cooldowns.count_ones(), 1);
//!
//! let mut cursor = cooldowns.cursor();
//! cooldowns.set(3, false);
//! assert!(cursor.next(&cooldowns).is_err());
//! ```

pub mod mask;

mod bitlist;
mod bitset;

pub use bitlist::BitList;
pub use bitset::{BitCursor, BitError, BitSet, Iter, Ones};
