use std::fmt;

use serde::{Deserialize, Serialize};

use crate::scalar::Scalar;

/// How a modifier contributes to an entity's effective value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModifierKind {
    /// Contributes `value()` directly.
    Additive,
    /// Contributes `pure.scale(multiplier())`, computed against the
    /// entity's *pure* value. Relative modifiers never compound against
    /// each other.
    Relative,
}

/// An external adjustment layered onto a [`StaticEntity`] or
/// [`ModifiableEntity`].
///
/// Modifiers are owned by the caller and registered by reference identity;
/// the entity only reads them. Implementations are free to return values
/// that change over time (an aura ramping up, a decaying buff), but the
/// caching [`ModifiableEntity`] must then be
/// [`invalidate`](crate::ModifiableEntity::invalidate)d by hand.
///
/// [`StaticEntity`]: crate::StaticEntity
/// [`ModifiableEntity`]: crate::ModifiableEntity
pub trait Modifier<T: Scalar>: fmt::Debug {
    fn kind(&self) -> ModifierKind;

    /// Additive amount. Read only when `kind()` is
    /// [`ModifierKind::Additive`].
    fn value(&self) -> T;

    /// Relative factor. Read only when `kind()` is
    /// [`ModifierKind::Relative`].
    fn multiplier(&self) -> f64;
}

/// A plain, constant modifier. Covers the common case where a buff is just
/// a number decided at creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatModifier<T> {
    kind: ModifierKind,
    value: T,
    multiplier: f64,
}

impl<T: Scalar> StatModifier<T> {
    /// A flat `+value` modifier.
    pub fn additive(value: T) -> Self {
        Self {
            kind: ModifierKind::Additive,
            value,
            multiplier: 1.0,
        }
    }

    /// A `pure * multiplier` modifier.
    pub fn relative(multiplier: f64) -> Self {
        Self {
            kind: ModifierKind::Relative,
            value: T::ZERO,
            multiplier,
        }
    }
}

impl<T: Scalar> Modifier<T> for StatModifier<T> {
    fn kind(&self) -> ModifierKind {
        self.kind
    }

    fn value(&self) -> T {
        self.value
    }

    fn multiplier(&self) -> f64 {
        self.multiplier
    }
}
