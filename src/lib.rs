//! # Downforce Models
//!
//! Aerodynamic performance and lap-time models for single-seater race cars,
//! built on [Twine](https://github.com/isentropic-dev/twine).
//!
//! Given an aerodynamic configuration (drag and downforce coefficients, wing
//! angles, ride heights) and a track from a catalog, the models estimate top
//! speed, corner speeds per corner class and a lap time, then derive setup
//! recommendations, corner-criticality rankings, comparisons, team rankings and
//! season forecasts from those numbers. Every output is deterministic, finite
//! and bounded by documented per-track envelopes.
//!
//! ## Crate layout
//!
//! - [`models`]: Domain-specific [`twine_core::Model`] implementations.
//! - [`catalog`]: Read-only track and team registries, with built-in data.
//! - [`support`]: Supporting utilities used by models.
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events (clamped inputs, solver outcomes,
//! recovered numeric-domain violations) and never installs a subscriber.
//!
//! Note: Only utilities at the crate-level (in [`support`]) are part of the
//! public API. Model-specific utility code remains private.

pub mod catalog;
pub mod models;
pub mod support;
