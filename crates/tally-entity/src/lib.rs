//! Bounded numeric entities for gameplay bookkeeping.
//!
//! Every type here is a small state machine over two or three raw numbers
//! whose *derived* value is computed, never stored:
//!
//! - [`AccumEntity`] -- monotonic accumulate-then-spend counter
//!   (experience, currency earned over a run). `value() == got - spent`,
//!   and `spent <= got` always holds.
//! - [`SpendingEntity`] -- capacity-bounded consumable balance (mana,
//!   stamina). Spending may overdraw into a deficit; restoring clamps at
//!   capacity.
//! - [`FilledEntity`] -- fill-up gauge toward a resizable threshold
//!   (charge bars, capture progress). Filling past the threshold clamps
//!   and reports the overflow.
//! - [`StaticEntity`] / [`ModifiableEntity`] -- a pure value bounded by
//!   `[min, max]` with externally-owned additive/relative [`Modifier`]s
//!   layered on top; `ModifiableEntity` additionally caches the effective
//!   value between modifier changes.
//!
//! All of them are generic over the [`Scalar`] trait, implemented for
//! `i32`/`i64`/`f32`/`f64` and the deterministic Q32.32 [`Fixed64`] type.
//!
//! # Errors vs booleans
//!
//! Invalid inputs (negative or non-finite amounts, `min > max`, duplicate
//! modifier registration) fail with an [`EntityError`] before any state
//! changes.
//! Routine outcomes callers branch on (insufficient balance, removing an
//! absent modifier) come back as booleans or clamped results, never as
//! errors. This split is deliberate; do not convert one into the other.

mod accum;
mod filled;
mod modifiable;
mod modifier;
mod scalar;
mod spending;

pub use accum::AccumEntity;
pub use filled::FilledEntity;
pub use modifiable::{ModifiableEntity, StaticEntity};
pub use modifier::{Modifier, ModifierKind, StatModifier};
pub use scalar::{Fixed64, Scalar};
pub use spending::SpendingEntity;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur when mutating a numeric entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EntityError {
    /// An `add`/`spend`/`restore`/`fill` amount was negative. Deltas are
    /// magnitudes; direction is encoded in the operation.
    #[error("amount must be non-negative")]
    NegativeAmount,
    /// A float amount was NaN or infinite. `NaN < 0.0` is false, so without
    /// this check a NaN would pass the sign test and poison the balance.
    #[error("amount must be finite")]
    NonFiniteAmount,
    /// The modifier is already registered on this entity (identity
    /// comparison, not value comparison).
    #[error("modifier is already registered on this entity")]
    DuplicateModifier,
    /// A `[min, max]` range with `min > max`.
    #[error("invalid bounds: min must not exceed max")]
    InvalidBounds,
}

/// Reject a non-finite or negative delta before any state changes.
pub(crate) fn check_amount<T: Scalar>(amount: T) -> Result<(), EntityError> {
    if !amount.is_finite() {
        return Err(EntityError::NonFiniteAmount);
    }
    if amount < T::ZERO {
        return Err(EntityError::NegativeAmount);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Concrete aliases
// ---------------------------------------------------------------------------

pub type AccumInt = AccumEntity<i32>;
pub type AccumFloat = AccumEntity<f32>;
pub type SpendingInt = SpendingEntity<i32>;
pub type SpendingFloat = SpendingEntity<f32>;
pub type FilledInt = FilledEntity<i32>;
pub type FilledFloat = FilledEntity<f32>;
pub type StaticInt = StaticEntity<i32>;
pub type StaticFloat = StaticEntity<f32>;
pub type ModifiableInt = ModifiableEntity<i32>;
pub type ModifiableFloat = ModifiableEntity<f32>;
