use std::cell::Cell;
use std::rc::Rc;

use crate::modifier::{Modifier, ModifierKind};
use crate::scalar::{Scalar, clamp};
use crate::EntityError;

// ---------------------------------------------------------------------------
// Modifier bookkeeping shared by both entity flavors
// ---------------------------------------------------------------------------

/// Registered modifiers, tracked by reference identity. A set, not a list:
/// the same `Rc` can only be registered once, while two distinct modifiers
/// with equal numbers are fine.
#[derive(Debug)]
struct ModifierList<T> {
    entries: Vec<Rc<dyn Modifier<T>>>,
}

impl<T: Scalar> ModifierList<T> {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn add(&mut self, modifier: Rc<dyn Modifier<T>>) -> Result<(), EntityError> {
        if self.entries.iter().any(|m| Rc::ptr_eq(m, &modifier)) {
            return Err(EntityError::DuplicateModifier);
        }
        self.entries.push(modifier);
        Ok(())
    }

    fn remove(&mut self, modifier: &Rc<dyn Modifier<T>>) -> bool {
        let before = self.entries.len();
        self.entries.retain(|m| !Rc::ptr_eq(m, modifier));
        self.entries.len() != before
    }

    /// Sum of contributions against the given pure value. Each relative
    /// modifier is computed independently from `pure` and summed, never
    /// chained through intermediate results.
    fn contribution(&self, pure: T) -> T {
        self.entries.iter().fold(T::ZERO, |acc, m| {
            acc + match m.kind() {
                ModifierKind::Additive => m.value(),
                ModifierKind::Relative => pure.scale(m.multiplier()),
            }
        })
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

// ---------------------------------------------------------------------------
// StaticEntity
// ---------------------------------------------------------------------------

/// A `[min, max]`-bounded value with modifier composition, recomputed on
/// every read.
///
/// The effective value is `pure + Σ contributions`, clamped into the bounds
/// regardless of how far the modifier sum strays. See
/// [`ModifiableEntity`] for the caching flavor.
#[derive(Debug)]
pub struct StaticEntity<T: Scalar> {
    pure: T,
    min: T,
    max: T,
    modifiers: ModifierList<T>,
}

impl<T: Scalar> StaticEntity<T> {
    /// Create an entity with `pure` clamped into `[min, max]`.
    pub fn new(pure: T, min: T, max: T) -> Result<Self, EntityError> {
        if min > max {
            return Err(EntityError::InvalidBounds);
        }
        Ok(Self {
            pure: clamp(pure, min, max),
            min,
            max,
            modifiers: ModifierList::new(),
        })
    }

    /// The unmodified base value.
    pub fn pure_value(&self) -> T {
        self.pure
    }

    pub fn min_value(&self) -> T {
        self.min
    }

    pub fn max_value(&self) -> T {
        self.max
    }

    /// Replace the base value, clamped into the bounds.
    pub fn set_pure(&mut self, value: T) {
        self.pure = clamp(value, self.min, self.max);
    }

    /// Register a modifier. The same `Rc` cannot be registered twice.
    pub fn add_modifier(&mut self, modifier: Rc<dyn Modifier<T>>) -> Result<(), EntityError> {
        self.modifiers.add(modifier)
    }

    /// Unregister a modifier. Removing one that was never registered is a
    /// silent no-op reported as `false`.
    pub fn remove_modifier(&mut self, modifier: &Rc<dyn Modifier<T>>) -> bool {
        self.modifiers.remove(modifier)
    }

    /// Returns `true` when any modifier is registered.
    pub fn is_modified(&self) -> bool {
        self.modifiers.len() > 0
    }

    pub fn modifier_count(&self) -> usize {
        self.modifiers.len()
    }

    /// The effective value: `pure + Σ contributions`, clamped into
    /// `[min, max]`.
    pub fn modified_value(&self) -> T {
        clamp(
            self.pure + self.modifiers.contribution(self.pure),
            self.min,
            self.max,
        )
    }

    /// Replace the bounds; the base value is re-clamped into the new range.
    pub fn resize(&mut self, min: T, max: T) -> Result<(), EntityError> {
        if min > max {
            return Err(EntityError::InvalidBounds);
        }
        self.min = min;
        self.max = max;
        self.pure = clamp(self.pure, min, max);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ModifiableEntity
// ---------------------------------------------------------------------------

/// A [`StaticEntity`] that caches its effective value.
///
/// The cache is dropped whenever a modifier is added or removed, the base
/// value is replaced, or the bounds are resized. Modifiers whose outputs
/// change on their own between those events require a manual
/// [`invalidate`](Self::invalidate).
#[derive(Debug)]
pub struct ModifiableEntity<T: Scalar> {
    inner: StaticEntity<T>,
    cache: Cell<Option<T>>,
}

impl<T: Scalar> ModifiableEntity<T> {
    pub fn new(pure: T, min: T, max: T) -> Result<Self, EntityError> {
        Ok(Self {
            inner: StaticEntity::new(pure, min, max)?,
            cache: Cell::new(None),
        })
    }

    pub fn pure_value(&self) -> T {
        self.inner.pure_value()
    }

    pub fn min_value(&self) -> T {
        self.inner.min_value()
    }

    pub fn max_value(&self) -> T {
        self.inner.max_value()
    }

    pub fn set_pure(&mut self, value: T) {
        self.inner.set_pure(value);
        self.cache.set(None);
    }

    pub fn add_modifier(&mut self, modifier: Rc<dyn Modifier<T>>) -> Result<(), EntityError> {
        self.inner.add_modifier(modifier)?;
        self.cache.set(None);
        Ok(())
    }

    pub fn remove_modifier(&mut self, modifier: &Rc<dyn Modifier<T>>) -> bool {
        let removed = self.inner.remove_modifier(modifier);
        if removed {
            self.cache.set(None);
        }
        removed
    }

    pub fn is_modified(&self) -> bool {
        self.inner.is_modified()
    }

    pub fn modifier_count(&self) -> usize {
        self.inner.modifier_count()
    }

    /// The effective value, computed once and reused until the entity
    /// changes.
    pub fn cur_value(&self) -> T {
        if let Some(cached) = self.cache.get() {
            return cached;
        }
        let value = self.inner.modified_value();
        self.cache.set(Some(value));
        value
    }

    pub fn resize(&mut self, min: T, max: T) -> Result<(), EntityError> {
        self.inner.resize(min, max)?;
        self.cache.set(None);
        Ok(())
    }

    /// Drop the cached value. Needed only when a registered modifier's
    /// output changed without the entity being touched.
    pub fn invalidate(&self) {
        self.cache.set(None);
    }
}
