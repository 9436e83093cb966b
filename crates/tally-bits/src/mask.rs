//! Stateless bit arithmetic over a single `u32` word.
//!
//! These are the primitives the packed bit-set is built on. A bit set whose
//! length is not a multiple of 32 has a boundary word that is only partially
//! meaningful; the `*_for` variants take the number of significant (low) bits
//! and ignore everything above them.
//!
//! Indices are only debug-asserted here. This is a low-level layer; the
//! bounds-checked surface lives on [`BitSet`](crate::BitSet).

/// Number of bits in one storage word.
pub const WORD_BITS: usize = 32;

/// Returns `true` if bit `index` of `word` is set.
#[inline]
pub fn has_flag(word: u32, index: usize) -> bool {
    debug_assert!(index < WORD_BITS);
    word & (1 << index) != 0
}

/// Returns `word` with bit `index` set.
#[inline]
pub fn with_flag(word: u32, index: usize) -> u32 {
    debug_assert!(index < WORD_BITS);
    word | (1 << index)
}

/// Returns `word` with bit `index` cleared.
#[inline]
pub fn without_flag(word: u32, index: usize) -> u32 {
    debug_assert!(index < WORD_BITS);
    word & !(1 << index)
}

/// Population count: the number of set bits in `word`.
///
/// Delegates to the hardware popcount rather than testing bit by bit.
#[inline]
pub fn units_count(word: u32) -> u32 {
    word.count_ones()
}

/// Mask covering the low `bits` bits (`bits <= 32`).
#[inline]
pub fn significant(bits: usize) -> u32 {
    debug_assert!(bits <= WORD_BITS);
    if bits >= WORD_BITS {
        u32::MAX
    } else {
        (1u32 << bits) - 1
    }
}

/// Returns `true` if any of the low `bits` bits of `word` are set.
#[inline]
pub fn any_for(word: u32, bits: usize) -> bool {
    word & significant(bits) != 0
}

/// Returns `true` if all of the low `bits` bits of `word` are set.
#[inline]
pub fn all_for(word: u32, bits: usize) -> bool {
    let m = significant(bits);
    word & m == m
}

/// Returns `true` if none of the low `bits` bits of `word` are set.
#[inline]
pub fn empty_for(word: u32, bits: usize) -> bool {
    !any_for(word, bits)
}

/// Returns `true` if `a` and `b` share a set bit among the low `bits` bits.
#[inline]
pub fn intersects(a: u32, b: u32, bits: usize) -> bool {
    a & b & significant(bits) != 0
}

/// Returns `true` if `a` and `b` agree on every one of the low `bits` bits.
#[inline]
pub fn coincides(a: u32, b: u32, bits: usize) -> bool {
    (a ^ b) & significant(bits) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_roundtrip() {
        let w = with_flag(0, 5);
        assert!(has_flag(w, 5));
        assert!(!has_flag(w, 4));
        assert_eq!(without_flag(w, 5), 0);
    }

    #[test]
    fn units_count_matches_naive() {
        let w = 0b1011_0101;
        let naive = (0..WORD_BITS).filter(|&i| has_flag(w, i)).count() as u32;
        assert_eq!(units_count(w), naive);
        assert_eq!(units_count(0), 0);
        assert_eq!(units_count(u32::MAX), 32);
    }

    #[test]
    fn significant_edges() {
        assert_eq!(significant(0), 0);
        assert_eq!(significant(1), 1);
        assert_eq!(significant(31), u32::MAX >> 1);
        assert_eq!(significant(32), u32::MAX);
    }

    #[test]
    fn partial_word_predicates_ignore_high_bits() {
        // Bits 4 and up are set, but only the low 4 are significant.
        let w = u32::MAX << 4;
        assert!(!any_for(w, 4));
        assert!(empty_for(w, 4));
        assert!(!all_for(w, 4));
        assert!(any_for(w, 5));
    }

    #[test]
    fn all_for_full_and_partial() {
        assert!(all_for(u32::MAX, 32));
        assert!(all_for(0b0111, 3));
        assert!(!all_for(0b0101, 3));
        // Zero significant bits: vacuously all set.
        assert!(all_for(0, 0));
    }

    #[test]
    fn intersects_and_coincides_masked() {
        // Disagreement only above the significant range.
        assert!(coincides(0b1_0011, 0b0_0011, 4));
        assert!(!coincides(0b1_0011, 0b0_0010, 4));
        assert!(intersects(0b0110, 0b0010, 4));
        // The shared bit sits outside the significant range.
        assert!(!intersects(0b1000, 0b1000, 3));
    }
}
