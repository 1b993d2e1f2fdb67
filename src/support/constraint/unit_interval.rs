use std::cmp::Ordering;

use uom::si::{f64::Ratio, ratio::ratio};

use super::{Constrained, Constraint, ConstraintError};

/// Supplies 0 and 1 for types used with [`UnitIntervalLowerOpen`].
pub trait UnitBounds: PartialOrd {
    fn zero() -> Self;
    fn one() -> Self;
}

impl UnitBounds for f64 {
    fn zero() -> Self {
        0.0
    }
    fn one() -> Self {
        1.0
    }
}

impl UnitBounds for Ratio {
    fn zero() -> Self {
        Ratio::new::<ratio>(0.0)
    }
    fn one() -> Self {
        Ratio::new::<ratio>(1.0)
    }
}

/// Marker type enforcing that a value lies in the lower-open unit interval: `0 < x ≤ 1`.
///
/// Used for drivetrain efficiency and sweep spans.
///
/// # Examples
///
/// ```
/// use downforce_models::support::constraint::{Constrained, UnitIntervalLowerOpen};
/// use uom::si::{f64::Ratio, ratio::ratio};
///
/// let eta = UnitIntervalLowerOpen::new(0.85).unwrap();
/// assert_eq!(eta.into_inner(), 0.85);
///
/// let r = Constrained::<Ratio, UnitIntervalLowerOpen>::new(Ratio::new::<ratio>(0.42)).unwrap();
/// assert_eq!(r.as_ref().get::<ratio>(), 0.42);
///
/// assert!(UnitIntervalLowerOpen::new(0.0).is_err());
/// assert!(UnitIntervalLowerOpen::new(1.2).is_err());
/// assert!(UnitIntervalLowerOpen::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct UnitIntervalLowerOpen;

impl UnitIntervalLowerOpen {
    /// Constructs `Constrained<T, UnitIntervalLowerOpen>` if 0 < value ≤ 1.
    ///
    /// # Errors
    ///
    /// - [`ConstraintError::BelowMinimum`] if less than or equal to zero.
    /// - [`ConstraintError::AboveMaximum`] if greater than one.
    /// - [`ConstraintError::NotANumber`] if comparison is undefined (e.g., NaN).
    pub fn new<T: UnitBounds>(
        value: T,
    ) -> Result<Constrained<T, UnitIntervalLowerOpen>, ConstraintError> {
        Constrained::<T, UnitIntervalLowerOpen>::new(value)
    }
}

impl<T: UnitBounds> Constraint<T> for UnitIntervalLowerOpen {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match (value.partial_cmp(&T::zero()), value.partial_cmp(&T::one())) {
            (None, _) | (_, None) => Err(ConstraintError::NotANumber),
            (Some(Ordering::Less | Ordering::Equal), _) => Err(ConstraintError::BelowMinimum),
            (_, Some(Ordering::Greater)) => Err(ConstraintError::AboveMaximum),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn efficiencies() {
        assert!(UnitIntervalLowerOpen::new(0.85).is_ok());
        assert!(UnitIntervalLowerOpen::new(1.0).is_ok());
        assert_eq!(
            UnitIntervalLowerOpen::new(0.0),
            Err(ConstraintError::BelowMinimum)
        );
        assert_eq!(
            UnitIntervalLowerOpen::new(1.000_000_1),
            Err(ConstraintError::AboveMaximum)
        );
        assert_eq!(
            UnitIntervalLowerOpen::new(f64::NAN),
            Err(ConstraintError::NotANumber)
        );
    }

    #[test]
    fn ratios() {
        assert!(UnitIntervalLowerOpen::new(Ratio::new::<ratio>(0.5)).is_ok());
        assert_eq!(
            UnitIntervalLowerOpen::new(Ratio::new::<ratio>(-0.1)),
            Err(ConstraintError::BelowMinimum)
        );
    }
}
