use serde::{Deserialize, Serialize};

use crate::scalar::Scalar;
use crate::{EntityError, check_amount};

/// A fill-up gauge toward a resizable threshold.
///
/// Filling past the threshold is clamped, not an error; the overflow that
/// did not fit is handed back so callers can route it elsewhere (spill into
/// the next charge, award as bonus, drop it).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilledEntity<T> {
    threshold: T,
    filler: T,
}

impl<T: Scalar> FilledEntity<T> {
    /// Create an empty gauge with the given threshold.
    pub fn new(threshold: T) -> Result<Self, EntityError> {
        check_amount(threshold)?;
        Ok(Self {
            threshold,
            filler: T::ZERO,
        })
    }

    /// The fill target.
    pub fn threshold(&self) -> T {
        self.threshold
    }

    /// Progress so far, in `[0, threshold]`.
    pub fn filler(&self) -> T {
        self.filler
    }

    /// What is still missing to reach the threshold.
    pub fn shortfall(&self) -> T {
        self.threshold - self.filler
    }

    /// Returns `true` once the gauge has reached its threshold.
    pub fn is_filled(&self) -> bool {
        self.filler >= self.threshold
    }

    /// Fill progress as `0.0..=1.0`. A zero threshold reads as already
    /// filled (`1.0`).
    pub fn ratio(&self) -> f64 {
        if self.threshold <= T::ZERO {
            return 1.0;
        }
        self.filler.to_f64() / self.threshold.to_f64()
    }

    /// Add `amount` toward the threshold; returns the overflow that did not
    /// fit (zero while the gauge is still below threshold).
    pub fn fill(&mut self, amount: T) -> Result<T, EntityError> {
        check_amount(amount)?;
        let raised = self.filler + amount;
        if raised > self.threshold {
            self.filler = self.threshold;
            Ok(raised - self.threshold)
        } else {
            self.filler = raised;
            Ok(T::ZERO)
        }
    }

    /// Drop all progress.
    pub fn clear(&mut self) {
        self.filler = T::ZERO;
    }

    /// Change the threshold; progress above the new threshold is clamped.
    pub fn resize_threshold(&mut self, new_threshold: T) -> Result<(), EntityError> {
        check_amount(new_threshold)?;
        self.threshold = new_threshold;
        if self.filler > self.threshold {
            self.filler = self.threshold;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FilledFloat, FilledInt};

    #[test]
    fn fill_reports_overflow() {
        let mut charge = FilledInt::new(10).unwrap();
        assert_eq!(charge.fill(6), Ok(0));
        assert!(!charge.is_filled());
        assert_eq!(charge.shortfall(), 4);

        assert_eq!(charge.fill(7), Ok(3));
        assert!(charge.is_filled());
        assert_eq!(charge.filler(), 10);
    }

    #[test]
    fn ratio_and_zero_threshold() {
        let mut charge = FilledInt::new(10).unwrap();
        charge.fill(5).unwrap();
        assert_eq!(charge.ratio(), 0.5);

        let degenerate = FilledInt::new(0).unwrap();
        assert!(degenerate.is_filled());
        assert_eq!(degenerate.ratio(), 1.0);
    }

    #[test]
    fn clear_resets_progress() {
        let mut charge = FilledFloat::new(2.0).unwrap();
        charge.fill(1.5).unwrap();
        charge.clear();
        assert_eq!(charge.filler(), 0.0);
        assert_eq!(charge.ratio(), 0.0);
    }

    #[test]
    fn resize_clamps_progress() {
        let mut charge = FilledInt::new(10).unwrap();
        charge.fill(8).unwrap();
        charge.resize_threshold(5).unwrap();
        assert_eq!(charge.filler(), 5);
        assert!(charge.is_filled());

        charge.resize_threshold(20).unwrap();
        assert!(!charge.is_filled());
        assert_eq!(charge.shortfall(), 15);
    }

    #[test]
    fn negative_inputs_are_errors() {
        assert_eq!(FilledInt::new(-1).unwrap_err(), EntityError::NegativeAmount);
        let mut charge = FilledInt::new(10).unwrap();
        assert_eq!(charge.fill(-1), Err(EntityError::NegativeAmount));
        assert_eq!(charge.resize_threshold(-1), Err(EntityError::NegativeAmount));
        assert_eq!(charge.filler(), 0);
    }

    #[test]
    fn non_finite_amounts_are_errors() {
        let mut charge = FilledFloat::new(2.0).unwrap();
        assert_eq!(charge.fill(f32::NAN), Err(EntityError::NonFiniteAmount));
        assert_eq!(
            charge.resize_threshold(f32::INFINITY),
            Err(EntityError::NonFiniteAmount)
        );
        assert_eq!(charge.filler(), 0.0);
        assert_eq!(charge.threshold(), 2.0);
    }

    #[test]
    fn serde_roundtrip() {
        let mut charge = FilledInt::new(10).unwrap();
        charge.fill(7).unwrap();
        let data = bitcode::serialize(&charge).expect("serialize gauge");
        let restored: FilledInt = bitcode::deserialize(&data).expect("deserialize gauge");
        assert_eq!(charge, restored);
    }
}
