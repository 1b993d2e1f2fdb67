//! Clamping and finite guards.
//!
//! Every solver in this crate finishes by clamping its result into a documented
//! envelope, and every intermediate that can leave the real numbers (a division
//! by a vanishing speed, a square root of a negative discriminant) passes
//! through [`finite_or`] first.
//!
//! A non-finite intermediate is a *numeric-domain violation*. It is recovered
//! locally by substituting a caller-chosen fallback and is never returned as an
//! error, but it is never silent either: each substitution emits a
//! `tracing::warn!` event and bumps a process-wide counter readable through
//! [`numeric_domain_violations`].
//!
//! ```
//! use downforce_models::support::bounds::{Band, finite_or, numeric_domain_violations};
//!
//! let band = Band::new(140.0, 160.0);
//! assert_eq!(band.clamp(171.3), 160.0);
//!
//! let before = numeric_domain_violations();
//! assert_eq!(finite_or(f64::NAN, 140.0, "doc example"), 140.0);
//! assert!(numeric_domain_violations() > before);
//! ```

use std::{
    ops::Sub,
    sync::atomic::{AtomicU64, Ordering},
};

static VIOLATIONS: AtomicU64 = AtomicU64::new(0);

/// A closed interval `[low, high]`.
///
/// Works with plain `f64` values and with `uom` quantities alike.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Band<T> {
    low: T,
    high: T,
}

impl<T: PartialOrd + Copy> Band<T> {
    /// Creates a band from its bounds.
    ///
    /// If the bounds arrive reversed they are swapped.
    #[must_use]
    pub fn new(low: T, high: T) -> Self {
        if high < low {
            Self {
                low: high,
                high: low,
            }
        } else {
            Self { low, high }
        }
    }

    /// Returns the lower bound.
    #[must_use]
    pub fn low(&self) -> T {
        self.low
    }

    /// Returns the upper bound.
    #[must_use]
    pub fn high(&self) -> T {
        self.high
    }

    /// Clamps `value` into the band.
    ///
    /// Values that do not compare (NaN) clamp to the lower bound.
    #[must_use]
    pub fn clamp(&self, value: T) -> T {
        match (value.partial_cmp(&self.low), value.partial_cmp(&self.high)) {
            (Some(std::cmp::Ordering::Less) | None, _) | (_, None) => self.low,
            (_, Some(std::cmp::Ordering::Greater)) => self.high,
            _ => value,
        }
    }

    /// Returns `true` if `value` lies inside the band, bounds included.
    #[must_use]
    pub fn contains(&self, value: T) -> bool {
        self.low <= value && value <= self.high
    }
}

impl<T: PartialOrd + Copy + Sub<Output = T>> Band<T> {
    /// Returns `high - low`.
    #[must_use]
    pub fn width(&self) -> T {
        self.high - self.low
    }
}

/// Returns `value` if it is finite, otherwise records a numeric-domain
/// violation and returns `fallback`.
///
/// `context` names the computation that went out of domain and ends up in the
/// emitted `warn` event.
#[must_use]
pub fn finite_or(value: f64, fallback: f64, context: &'static str) -> f64 {
    if value.is_finite() {
        value
    } else {
        record_violation(context, value, fallback);
        fallback
    }
}

/// Records a numeric-domain violation that was recovered without going
/// through [`finite_or`], such as a solver that failed to converge.
pub fn record_violation(context: &'static str, value: f64, fallback: f64) {
    VIOLATIONS.fetch_add(1, Ordering::Relaxed);
    tracing::warn!(context, value, fallback, "numeric domain violation recovered");
}

/// Total numeric-domain violations recovered since process start.
///
/// Diagnostic only. Concurrent callers share the counter, so compare
/// before/after readings rather than absolute values.
#[must_use]
pub fn numeric_domain_violations() -> u64 {
    VIOLATIONS.load(Ordering::Relaxed)
}
