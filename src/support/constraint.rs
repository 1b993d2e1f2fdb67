//! Type-level numeric constraints for validated model inputs.
//!
//! Vehicle and environment parameters (mass, power, frontal area, air density,
//! efficiencies) are only meaningful inside a numeric domain.
//! The types in this module record that domain at the type level so a value that
//! made it past construction never has to be checked again.
//!
//! # Provided constraints
//!
//! - [`NonNegative`]: Zero or greater
//! - [`StrictlyPositive`]: Greater than zero
//! - [`UnitIntervalLowerOpen`]: Lower-open unit interval `0 < x ≤ 1`
//!
//! Each marker is used with the generic [`Constrained<T, C>`] wrapper,
//! where `C` is the marker type implementing [`Constraint<T>`].
//! Each marker also provides an associated `new()` constructor
//! (e.g., `StrictlyPositive::new(798.0)`).

mod non_negative;
mod strictly_positive;
mod unit_interval;

use std::marker::PhantomData;

use thiserror::Error;

pub use non_negative::NonNegative;
pub use strictly_positive::StrictlyPositive;
pub use unit_interval::{UnitBounds, UnitIntervalLowerOpen};

/// A trait for enforcing numeric invariants at construction time.
pub trait Constraint<T> {
    /// Checks that the given value satisfies this constraint.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if the value does not satisfy the constraint.
    fn check(value: &T) -> Result<(), ConstraintError>;
}

/// An error returned when a [`Constraint`] is violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConstraintError {
    #[error("value must not be negative")]
    Negative,
    #[error("value must not be zero")]
    Zero,
    #[error("value is not a number")]
    NotANumber,
    #[error("value is not finite")]
    NotFinite,
    #[error("value is below the minimum allowed")]
    BelowMinimum,
    #[error("value is above the maximum allowed")]
    AboveMaximum,
}

/// A result type alias to use with [`Constraint`].
pub type ConstraintResult<T, E = ConstraintError> = Result<T, E>;

/// A wrapper enforcing a numeric constraint at construction time.
///
/// # Example
///
/// ```
/// use downforce_models::support::constraint::{Constrained, StrictlyPositive};
/// use uom::si::{f64::Mass, mass::kilogram};
///
/// let mass = Constrained::<_, StrictlyPositive>::new(Mass::new::<kilogram>(798.0)).unwrap();
/// assert_eq!(mass.into_inner().get::<kilogram>(), 798.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Constrained<T, C: Constraint<T>> {
    value: T,
    _marker: PhantomData<C>,
}

impl<T, C: Constraint<T>> Constrained<T, C> {
    /// Constructs a new constrained value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not satisfy the constraint.
    pub fn new(value: T) -> Result<Self, ConstraintError> {
        C::check(&value)?;
        Ok(Self {
            value,
            _marker: PhantomData,
        })
    }

    /// Consumes the wrapper and returns the inner value.
    pub fn into_inner(self) -> T {
        self.value
    }
}

/// Returns a reference to the inner unconstrained value.
impl<T, C: Constraint<T>> AsRef<T> for Constrained<T, C> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}

/// Checks that a plain `f64` is finite before a sign constraint is applied.
///
/// Sign checks alone accept `+inf`, which is never a usable model input.
///
/// # Errors
///
/// Returns [`ConstraintError::NotANumber`] for `NaN` and
/// [`ConstraintError::NotFinite`] for infinities.
pub fn finite(value: f64) -> ConstraintResult<f64> {
    if value.is_nan() {
        Err(ConstraintError::NotANumber)
    } else if value.is_infinite() {
        Err(ConstraintError::NotFinite)
    } else {
        Ok(value)
    }
}
