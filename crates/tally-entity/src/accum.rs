use serde::{Deserialize, Serialize};

use crate::scalar::Scalar;
use crate::{EntityError, check_amount};

/// A monotonic accumulate-then-spend counter.
///
/// Tracks cumulative `got` and cumulative `spent`, both non-decreasing; the
/// derived balance is `value() == got() - spent()`, and `spent <= got` holds
/// at all times because a spend that would overdraw is refused.
///
/// "Insufficient balance" is a routine outcome, so [`spend`](Self::spend)
/// reports it as `Ok(false)` rather than an error; only a negative amount is
/// an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccumEntity<T> {
    got: T,
    spent: T,
}

impl<T: Scalar> AccumEntity<T> {
    /// Create a counter with nothing accumulated.
    pub fn new() -> Self {
        Self {
            got: T::ZERO,
            spent: T::ZERO,
        }
    }

    /// Cumulative amount ever added.
    pub fn got(&self) -> T {
        self.got
    }

    /// Cumulative amount ever spent.
    pub fn spent(&self) -> T {
        self.spent
    }

    /// Current balance: `got - spent`. Never negative.
    pub fn value(&self) -> T {
        self.got - self.spent
    }

    /// Accumulate `amount`.
    pub fn add(&mut self, amount: T) -> Result<(), EntityError> {
        check_amount(amount)?;
        self.got = self.got + amount;
        Ok(())
    }

    /// Spend `amount` from the balance.
    ///
    /// Returns `Ok(false)` without mutating when `amount` exceeds
    /// [`value`](Self::value); `Ok(true)` once the spend is applied.
    pub fn spend(&mut self, amount: T) -> Result<bool, EntityError> {
        check_amount(amount)?;
        if amount > self.value() {
            return Ok(false);
        }
        self.spent = self.spent + amount;
        Ok(true)
    }
}

impl<T: Scalar> Default for AccumEntity<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AccumFloat, AccumInt};

    #[test]
    fn add_then_spend() {
        let mut xp = AccumInt::new();
        xp.add(5).unwrap();
        assert_eq!(xp.spend(3), Ok(true));
        assert_eq!(xp.value(), 2);
        assert_eq!(xp.got(), 5);
        assert_eq!(xp.spent(), 3);
    }

    #[test]
    fn overdraw_is_refused_without_mutation() {
        let mut xp = AccumInt::new();
        xp.add(5).unwrap();
        assert_eq!(xp.spend(100), Ok(false));
        assert_eq!(xp.value(), 5);
        assert_eq!(xp.spent(), 0);
    }

    #[test]
    fn exact_balance_can_be_spent() {
        let mut xp = AccumInt::new();
        xp.add(7).unwrap();
        assert_eq!(xp.spend(7), Ok(true));
        assert_eq!(xp.value(), 0);
    }

    #[test]
    fn negative_amounts_are_errors() {
        let mut xp = AccumInt::new();
        assert_eq!(xp.add(-1), Err(EntityError::NegativeAmount));
        assert_eq!(xp.spend(-1), Err(EntityError::NegativeAmount));
        assert_eq!(xp.got(), 0);
    }

    #[test]
    fn non_finite_amounts_are_errors() {
        let mut heat = AccumFloat::new();
        heat.add(5.0).unwrap();
        assert_eq!(heat.add(f32::NAN), Err(EntityError::NonFiniteAmount));
        assert_eq!(heat.spend(f32::NAN), Err(EntityError::NonFiniteAmount));
        assert_eq!(heat.add(f32::INFINITY), Err(EntityError::NonFiniteAmount));
        assert_eq!(heat.value(), 5.0);
    }

    #[test]
    fn float_counter() {
        let mut heat = AccumFloat::new();
        heat.add(1.5).unwrap();
        heat.add(2.0).unwrap();
        assert_eq!(heat.spend(3.0), Ok(true));
        assert_eq!(heat.value(), 0.5);
    }

    #[test]
    fn serde_roundtrip() {
        let mut xp = AccumInt::new();
        xp.add(42).unwrap();
        xp.spend(10).unwrap();
        let data = bitcode::serialize(&xp).expect("serialize counter");
        let restored: AccumInt = bitcode::deserialize(&data).expect("deserialize counter");
        assert_eq!(xp, restored);
    }
}
