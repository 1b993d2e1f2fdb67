//! Supporting utilities used by models.
//!
//! - [`constraint`]: Type-level numeric constraints for validated inputs.
//! - [`bounds`]: Closed intervals, clamping and finite guards shared by every solver.

pub mod bounds;
pub mod constraint;
