use serde::{Deserialize, Serialize};

use crate::mask::{self, WORD_BITS};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during bit-set operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BitError {
    /// Two bit sets of different lengths were combined. Sets are never
    /// implicitly zero-extended to match.
    #[error("bit set lengths differ: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },
    /// The set is too long to collapse into a single 32-bit mask.
    #[error("bit set of length {len} does not fit in a 32-bit mask")]
    MaskOverflow { len: usize },
    /// The set was mutated while a [`BitCursor`] was iterating it.
    #[error("bit set mutated during iteration (version {expected} -> {actual})")]
    Invalidated { expected: u64, actual: u64 },
}

// ---------------------------------------------------------------------------
// BitSet
// ---------------------------------------------------------------------------

/// A fixed-length, word-packed sequence of booleans.
///
/// Bits are stored 32 per `u32` word. The logical length may be shorter than
/// the backing words; bits at index `>= len()` in the boundary word are kept
/// zero at all times, so the bulk operations (`count_ones`, `any`,
/// `coincides`, ...) can work a word at a time without re-masking.
///
/// Every mutating operation increments an internal version counter, which
/// [`BitCursor`] uses to detect mutation during iteration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BitSet {
    pub(crate) words: Vec<u32>,
    pub(crate) len: usize,
    pub(crate) version: u64,
}

/// Equality compares length and bit pattern; the mutation version is
/// bookkeeping, not content.
impl PartialEq for BitSet {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.words == other.words
    }
}

impl Eq for BitSet {}

#[inline]
pub(crate) fn words_for(len: usize) -> usize {
    len.div_ceil(WORD_BITS)
}

impl BitSet {
    /// Create a set of `len` bits, all false.
    pub fn new(len: usize) -> Self {
        Self {
            words: vec![0; words_for(len)],
            len,
            version: 0,
        }
    }

    /// Create a set of `len` bits, all set to `value`.
    pub fn filled(len: usize, value: bool) -> Self {
        let mut set = Self::new(len);
        if value {
            set.words.fill(u32::MAX);
            set.mask_boundary();
        }
        set
    }

    /// Create a set of `len` bits with the listed indices set true.
    ///
    /// # Panics
    ///
    /// Panics if any index in `flags` is `>= len`.
    pub fn from_flags(len: usize, flags: &[usize]) -> Self {
        let mut set = Self::new(len);
        for &i in flags {
            assert!(i < len, "flag index {i} out of range for length {len}");
            set.words[i / WORD_BITS] = mask::with_flag(set.words[i / WORD_BITS], i % WORD_BITS);
        }
        set
    }

    /// Create a set from a sequence of booleans, one bit per item.
    pub fn from_bits<I: IntoIterator<Item = bool>>(bits: I) -> Self {
        let mut words = Vec::new();
        let mut len = 0;
        for bit in bits {
            if len % WORD_BITS == 0 {
                words.push(0);
            }
            if bit {
                let last = words.len() - 1;
                words[last] = mask::with_flag(words[last], len % WORD_BITS);
            }
            len += 1;
        }
        Self {
            words,
            len,
            version: 0,
        }
    }

    /// Create a set over an existing word array.
    ///
    /// Extra high bits in the boundary word are cleared; surplus words are
    /// dropped.
    ///
    /// # Panics
    ///
    /// Panics if `words` has fewer than `len` bits of storage.
    pub fn from_words(mut words: Vec<u32>, len: usize) -> Self {
        assert!(
            words.len() * WORD_BITS >= len,
            "{} words cannot hold {len} bits",
            words.len()
        );
        words.truncate(words_for(len));
        let mut set = Self {
            words,
            len,
            version: 0,
        };
        set.mask_boundary();
        set
    }

    /// Expand a single 32-bit mask into a set of `len` bits (`len <= 32`).
    ///
    /// # Panics
    ///
    /// Panics if `len > 32`.
    pub fn from_bit_mask(mask_word: u32, len: usize) -> Self {
        assert!(len <= WORD_BITS, "length {len} exceeds one word");
        Self::from_words(vec![mask_word], len)
    }

    /// Number of logical bits.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the set holds zero bits, i.e. `len() == 0`.
    ///
    /// This is about length, not content: an all-false set of length 8 is
    /// not "empty" here. For "no bit is set", use [`none`](Self::none).
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current mutation version. Bumped by every mutating operation.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Read the bit at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn get(&self, index: usize) -> bool {
        assert!(
            index < self.len,
            "bit index {index} out of range for length {}",
            self.len
        );
        mask::has_flag(self.words[index / WORD_BITS], index % WORD_BITS)
    }

    /// Write the bit at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn set(&mut self, index: usize, value: bool) {
        assert!(
            index < self.len,
            "bit index {index} out of range for length {}",
            self.len
        );
        let word = &mut self.words[index / WORD_BITS];
        *word = if value {
            mask::with_flag(*word, index % WORD_BITS)
        } else {
            mask::without_flag(*word, index % WORD_BITS)
        };
        self.version += 1;
    }

    /// Set every bit to `value`.
    pub fn set_all(&mut self, value: bool) {
        self.words.fill(if value { u32::MAX } else { 0 });
        self.mask_boundary();
        self.version += 1;
    }

    /// Flip every bit in place.
    pub fn invert(&mut self) {
        for word in &mut self.words {
            *word = !*word;
        }
        self.mask_boundary();
        self.version += 1;
    }

    /// Bitwise AND with `other`, word at a time.
    pub fn and(&mut self, other: &BitSet) -> Result<(), BitError> {
        self.check_len(other)?;
        for (w, o) in self.words.iter_mut().zip(&other.words) {
            *w &= o;
        }
        self.version += 1;
        Ok(())
    }

    /// Bitwise OR with `other`, word at a time.
    pub fn or(&mut self, other: &BitSet) -> Result<(), BitError> {
        self.check_len(other)?;
        for (w, o) in self.words.iter_mut().zip(&other.words) {
            *w |= o;
        }
        self.version += 1;
        Ok(())
    }

    /// Bitwise XOR with `other`, word at a time.
    pub fn xor(&mut self, other: &BitSet) -> Result<(), BitError> {
        self.check_len(other)?;
        for (w, o) in self.words.iter_mut().zip(&other.words) {
            *w ^= o;
        }
        self.version += 1;
        Ok(())
    }

    /// Returns `true` if any bit is set.
    pub fn any(&self) -> bool {
        // Boundary bits are kept zero, so whole-word tests suffice.
        self.words.iter().any(|&w| w != 0)
    }

    /// Returns `true` if every bit is set. Vacuously true for a zero-length
    /// set.
    pub fn all(&self) -> bool {
        let rem = self.len % WORD_BITS;
        let full_words = self.len / WORD_BITS;
        if !self.words[..full_words].iter().all(|&w| w == u32::MAX) {
            return false;
        }
        rem == 0 || mask::all_for(self.words[full_words], rem)
    }

    /// Returns `true` if no bit is set.
    ///
    /// This is about content, not length: a zero-length set and an
    /// all-false set both report `none()`. For "holds zero bits", use
    /// [`is_empty`](Self::is_empty).
    pub fn none(&self) -> bool {
        !self.any()
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|&w| mask::units_count(w) as usize).sum()
    }

    /// Returns `true` if this set and `other` share at least one set bit.
    pub fn intersects(&self, other: &BitSet) -> Result<bool, BitError> {
        self.check_len(other)?;
        Ok(self.words.iter().zip(&other.words).any(|(&a, &b)| a & b != 0))
    }

    /// Returns `true` if this set and `other` agree on every bit.
    pub fn coincides(&self, other: &BitSet) -> Result<bool, BitError> {
        self.check_len(other)?;
        Ok(self.words == other.words)
    }

    /// Collapse the set into a single 32-bit mask.
    ///
    /// Fails with [`BitError::MaskOverflow`] when the set is longer than one
    /// word; use [`bit_mask_lossy`](Self::bit_mask_lossy) when truncation is
    /// intended.
    pub fn bit_mask(&self) -> Result<u32, BitError> {
        if self.len > WORD_BITS {
            return Err(BitError::MaskOverflow { len: self.len });
        }
        Ok(self.bit_mask_lossy())
    }

    /// Collapse the set into a single 32-bit mask, keeping only the low 32
    /// bits. The explicit lossy variant of [`bit_mask`](Self::bit_mask).
    pub fn bit_mask_lossy(&self) -> u32 {
        self.words.first().copied().unwrap_or(0)
    }

    /// Borrowing iterator over the bits, in index order.
    pub fn iter(&self) -> Iter<'_> {
        Iter { set: self, index: 0 }
    }

    /// Borrowing iterator over the indices of set bits, ascending.
    pub fn ones(&self) -> Ones<'_> {
        Ones { set: self, index: 0 }
    }

    /// Create a detached cursor positioned before the first bit.
    ///
    /// The cursor snapshots the current version; stepping it after any
    /// mutation fails with [`BitError::Invalidated`].
    pub fn cursor(&self) -> BitCursor {
        BitCursor {
            version: self.version,
            index: 0,
        }
    }

    fn check_len(&self, other: &BitSet) -> Result<(), BitError> {
        if self.len != other.len {
            return Err(BitError::LengthMismatch {
                left: self.len,
                right: other.len,
            });
        }
        Ok(())
    }

    /// Clear bits above `len` in the boundary word.
    pub(crate) fn mask_boundary(&mut self) {
        let rem = self.len % WORD_BITS;
        if rem != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= mask::significant(rem);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Iterators
// ---------------------------------------------------------------------------

/// Borrowing iterator over the bits of a [`BitSet`].
#[derive(Debug)]
pub struct Iter<'a> {
    set: &'a BitSet,
    index: usize,
}

impl Iterator for Iter<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        if self.index >= self.set.len {
            return None;
        }
        let bit = self.set.get(self.index);
        self.index += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.set.len - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a BitSet {
    type Item = bool;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Borrowing iterator over the set-bit indices of a [`BitSet`].
#[derive(Debug)]
pub struct Ones<'a> {
    set: &'a BitSet,
    index: usize,
}

impl Iterator for Ones<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.index < self.set.len {
            let i = self.index;
            self.index += 1;
            if self.set.get(i) {
                return Some(i);
            }
        }
        None
    }
}

// ---------------------------------------------------------------------------
// BitCursor
// ---------------------------------------------------------------------------

/// A detached, fail-fast enumerator over a [`BitSet`].
///
/// Unlike [`Iter`], a cursor holds no borrow, so the set stays mutable while
/// the cursor is live. The trade-off is that every step revalidates the
/// version snapshot taken at creation: if the set has been mutated in the
/// meantime, the step fails with [`BitError::Invalidated`] rather than
/// iterating stale state. A [`Clone`]d set keeps its version, so a cursor
/// taken from the original also walks the clone.
#[derive(Debug, Clone)]
pub struct BitCursor {
    version: u64,
    index: usize,
}

impl BitCursor {
    /// Advance over the next bit of `bits`, or `Ok(None)` at the end.
    pub fn next(&mut self, bits: &BitSet) -> Result<Option<bool>, BitError> {
        if self.version != bits.version {
            return Err(BitError::Invalidated {
                expected: self.version,
                actual: bits.version,
            });
        }
        if self.index >= bits.len {
            return Ok(None);
        }
        let bit = bits.get(self.index);
        self.index += 1;
        Ok(Some(bit))
    }

    /// Index of the next bit the cursor will visit.
    pub fn position(&self) -> usize {
        self.index
    }
}
