use serde::{Deserialize, Serialize};

use crate::scalar::Scalar;
use crate::{EntityError, check_amount};

/// A capacity-bounded consumable balance.
///
/// The balance starts full. [`spend`](Self::spend) is not bounds-checked
/// downward: the balance may go negative, which callers can treat as a
/// deficit signal or clear explicitly with
/// [`remove_excess`](Self::remove_excess). Restoring clamps at
/// [`capacity`](Self::capacity), so the balance never exceeds it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpendingEntity<T> {
    capacity: T,
    cur_value: T,
}

impl<T: Scalar> SpendingEntity<T> {
    /// Create a full balance with the given capacity.
    pub fn new(capacity: T) -> Result<Self, EntityError> {
        check_amount(capacity)?;
        Ok(Self {
            capacity,
            cur_value: capacity,
        })
    }

    /// Current ceiling of the balance.
    pub fn capacity(&self) -> T {
        self.capacity
    }

    /// Current balance. May be negative after overdrawing.
    pub fn cur_value(&self) -> T {
        self.cur_value
    }

    /// How much restoration would be needed to fill up.
    pub fn shortage(&self) -> T {
        self.capacity - self.cur_value
    }

    /// Returns `true` when the balance is at capacity.
    pub fn is_full(&self) -> bool {
        self.cur_value >= self.capacity
    }

    /// Returns `true` when the balance is exhausted (zero or overdrawn).
    pub fn is_empty(&self) -> bool {
        self.cur_value <= T::ZERO
    }

    /// Consume `amount`, possibly overdrawing into a negative balance.
    pub fn spend(&mut self, amount: T) -> Result<(), EntityError> {
        check_amount(amount)?;
        self.cur_value = self.cur_value - amount;
        Ok(())
    }

    /// Restore `amount`, clamping at capacity.
    pub fn restore(&mut self, amount: T) -> Result<(), EntityError> {
        check_amount(amount)?;
        let raised = self.cur_value + amount;
        self.cur_value = if raised > self.capacity {
            self.capacity
        } else {
            raised
        };
        Ok(())
    }

    /// Restore straight to capacity.
    pub fn restore_full(&mut self) {
        self.cur_value = self.capacity;
    }

    /// Clear a negative balance back to zero, returning the deficit that was
    /// removed (zero when the balance was non-negative).
    pub fn remove_excess(&mut self) -> T {
        if self.cur_value < T::ZERO {
            let deficit = T::ZERO - self.cur_value;
            self.cur_value = T::ZERO;
            deficit
        } else {
            T::ZERO
        }
    }

    /// Change the capacity. A balance above the new capacity is clamped
    /// down; a deficit is left untouched.
    pub fn resize_capacity(&mut self, new_capacity: T) -> Result<(), EntityError> {
        check_amount(new_capacity)?;
        self.capacity = new_capacity;
        if self.cur_value > self.capacity {
            self.cur_value = self.capacity;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Fixed64, SpendingEntity, SpendingInt};

    #[test]
    fn starts_full() {
        let mana = SpendingInt::new(10).unwrap();
        assert_eq!(mana.cur_value(), 10);
        assert!(mana.is_full());
        assert!(!mana.is_empty());
    }

    #[test]
    fn restore_clamps_at_capacity() {
        let mut mana = SpendingInt::new(10).unwrap();
        mana.spend(4).unwrap();
        mana.restore(20).unwrap();
        assert_eq!(mana.cur_value(), 10);
        assert!(mana.is_full());
    }

    #[test]
    fn overdraw_and_remove_excess() {
        let mut mana = SpendingInt::new(10).unwrap();
        mana.spend(13).unwrap();
        assert_eq!(mana.cur_value(), -3);
        assert!(mana.is_empty());
        assert_eq!(mana.shortage(), 13);

        assert_eq!(mana.remove_excess(), 3);
        assert_eq!(mana.cur_value(), 0);
        // Idempotent once the deficit is gone.
        assert_eq!(mana.remove_excess(), 0);
    }

    #[test]
    fn resize_clamps_from_above_only() {
        let mut mana = SpendingInt::new(10).unwrap();
        mana.resize_capacity(6).unwrap();
        assert_eq!(mana.cur_value(), 6);

        mana.spend(8).unwrap();
        mana.resize_capacity(4).unwrap();
        assert_eq!(mana.cur_value(), -2);
    }

    #[test]
    fn negative_inputs_are_errors() {
        assert_eq!(SpendingInt::new(-1).unwrap_err(), EntityError::NegativeAmount);
        let mut mana = SpendingInt::new(10).unwrap();
        assert_eq!(mana.spend(-2), Err(EntityError::NegativeAmount));
        assert_eq!(mana.restore(-2), Err(EntityError::NegativeAmount));
        assert_eq!(mana.resize_capacity(-2), Err(EntityError::NegativeAmount));
        assert_eq!(mana.cur_value(), 10);
    }

    #[test]
    fn non_finite_amounts_cannot_poison_the_balance() {
        use crate::SpendingFloat;

        let mut mana = SpendingFloat::new(10.0).unwrap();
        assert_eq!(mana.spend(f32::NAN), Err(EntityError::NonFiniteAmount));
        assert_eq!(mana.restore(f32::NAN), Err(EntityError::NonFiniteAmount));
        assert_eq!(
            mana.resize_capacity(f32::INFINITY),
            Err(EntityError::NonFiniteAmount)
        );
        assert_eq!(mana.cur_value(), 10.0);
        assert_eq!(
            SpendingFloat::new(f32::NAN).unwrap_err(),
            EntityError::NonFiniteAmount
        );
    }

    #[test]
    fn restore_full_ignores_deficit_history() {
        let mut mana = SpendingInt::new(10).unwrap();
        mana.spend(25).unwrap();
        mana.restore_full();
        assert_eq!(mana.cur_value(), 10);
    }

    #[test]
    fn fixed_point_balance() {
        let mut fuel = SpendingEntity::<Fixed64>::new(Fixed64::from_num(2.5)).unwrap();
        fuel.spend(Fixed64::from_num(1.25)).unwrap();
        assert_eq!(fuel.cur_value(), Fixed64::from_num(1.25));
        fuel.restore(Fixed64::from_num(10)).unwrap();
        assert!(fuel.is_full());
    }

    #[test]
    fn serde_roundtrip() {
        let mut mana = SpendingInt::new(10).unwrap();
        mana.spend(4).unwrap();
        let data = bitcode::serialize(&mana).expect("serialize balance");
        let restored: SpendingInt = bitcode::deserialize(&data).expect("deserialize balance");
        assert_eq!(mana, restored);
    }
}
