//! Vehicle models.
//!
//! This module contains models of a whole car on track, starting with its
//! aerodynamic performance.

pub mod performance;
