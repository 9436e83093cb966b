use std::fmt;
use std::ops::{Add, Sub};

use fixed::types::I32F32;

/// Q32.32 fixed-point: 32 integer bits, 32 fractional bits.
///
/// The scalar to reach for when entities feed a deterministic lockstep
/// simulation; float scalars are fine for purely local bookkeeping.
pub type Fixed64 = I32F32;

/// The numeric contract the entity family is generic over.
///
/// Implementations exist for `i32`, `i64`, `f32`, `f64` and [`Fixed64`].
pub trait Scalar:
    Copy + PartialOrd + Add<Output = Self> + Sub<Output = Self> + fmt::Debug
{
    const ZERO: Self;

    /// Scale by an `f64` factor. Integer implementations round to nearest,
    /// so a relative modifier of `0.5` on a pure value of `50` contributes
    /// exactly `25`.
    fn scale(self, factor: f64) -> Self;

    /// Lossy conversion for ratio reporting. Not for simulation math.
    fn to_f64(self) -> f64;

    /// Whether this value is a real number. Trivially true for integer and
    /// fixed-point scalars; floats report NaN and infinities here so the
    /// entities can refuse them before a balance is poisoned.
    fn is_finite(self) -> bool {
        true
    }
}

macro_rules! int_scalar {
    ($($t:ty),*) => {$(
        impl Scalar for $t {
            const ZERO: Self = 0;

            #[inline]
            fn scale(self, factor: f64) -> Self {
                ((self as f64) * factor).round() as $t
            }

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }
        }
    )*};
}

macro_rules! float_scalar {
    ($($t:ty),*) => {$(
        impl Scalar for $t {
            const ZERO: Self = 0.0;

            #[inline]
            fn scale(self, factor: f64) -> Self {
                ((self as f64) * factor) as $t
            }

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn is_finite(self) -> bool {
                <$t>::is_finite(self)
            }
        }
    )*};
}

int_scalar!(i32, i64);
float_scalar!(f32, f64);

impl Scalar for Fixed64 {
    const ZERO: Self = Fixed64::ZERO;

    #[inline]
    fn scale(self, factor: f64) -> Self {
        self * Fixed64::from_num(factor)
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self.to_num()
    }
}

/// Clamp `value` into `[min, max]`. Callers guarantee `min <= max`.
#[inline]
pub(crate) fn clamp<T: Scalar>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}
