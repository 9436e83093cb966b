use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use crate::bitset::{BitSet, words_for};

/// A growable [`BitSet`].
///
/// `BitList` layers a resizing surface over `BitSet` the same way `Vec<T>`
/// layers over `[T]`: it derefs to `BitSet`, so every fixed-length operation
/// is available unchanged, and adds [`set_len`](Self::set_len),
/// [`push`](Self::push) and [`pop`](Self::pop).
///
/// Resizing is in-place, not a recreate: growing zero-extends, shrinking
/// masks the new boundary word and drops now-unused words, and either way
/// the version counter advances so live [`BitCursor`](crate::BitCursor)s
/// fail fast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitList {
    bits: BitSet,
}

impl BitList {
    /// Create a list of `len` bits, all false.
    pub fn new(len: usize) -> Self {
        BitSet::new(len).into()
    }

    /// Create a list of `len` bits, all set to `value`.
    pub fn filled(len: usize, value: bool) -> Self {
        BitSet::filled(len, value).into()
    }

    /// Create a list of `len` bits with the listed indices set true.
    ///
    /// # Panics
    ///
    /// Panics if any index in `flags` is `>= len`.
    pub fn from_flags(len: usize, flags: &[usize]) -> Self {
        BitSet::from_flags(len, flags).into()
    }

    /// Create a list from a sequence of booleans, one bit per item.
    pub fn from_bits<I: IntoIterator<Item = bool>>(bits: I) -> Self {
        BitSet::from_bits(bits).into()
    }

    /// Resize to `new_len` bits.
    ///
    /// New high bits start false; on shrink, bits at index `>= new_len` are
    /// discarded and the boundary word is re-masked. Always bumps the
    /// version, even when `new_len == len()`.
    pub fn set_len(&mut self, new_len: usize) {
        let bits = &mut self.bits;
        bits.words.resize(words_for(new_len), 0);
        if new_len < bits.len {
            bits.len = new_len;
            bits.mask_boundary();
        } else {
            bits.len = new_len;
        }
        bits.version += 1;
    }

    /// Append one bit at index `len()`.
    pub fn push(&mut self, bit: bool) {
        let index = self.bits.len;
        self.set_len(index + 1);
        if bit {
            self.bits.set(index, true);
        }
    }

    /// Remove and return the last bit, or `None` if the list is empty.
    pub fn pop(&mut self) -> Option<bool> {
        if self.bits.len == 0 {
            return None;
        }
        let bit = self.bits.get(self.bits.len - 1);
        self.set_len(self.bits.len - 1);
        Some(bit)
    }

    /// Extract the underlying fixed-length set.
    pub fn into_bits(self) -> BitSet {
        self.bits
    }
}

impl From<BitSet> for BitList {
    fn from(bits: BitSet) -> Self {
        Self { bits }
    }
}

impl Deref for BitList {
    type Target = BitSet;

    fn deref(&self) -> &BitSet {
        &self.bits
    }
}

impl DerefMut for BitList {
    fn deref_mut(&mut self) -> &mut BitSet {
        &mut self.bits
    }
}

impl Extend<bool> for BitList {
    fn extend<I: IntoIterator<Item = bool>>(&mut self, iter: I) {
        for bit in iter {
            self.push(bit);
        }
    }
}
