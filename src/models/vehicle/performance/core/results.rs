use uom::si::f64::Ratio;

use crate::catalog::DownforceLevel;

use super::{AeroForces, CornerSpeeds, LapTimeEstimate, PorpoisingRisk, TopSpeed};

/// Performance of one configuration on one track.
///
/// Every field is finite and inside its documented envelope.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PerformanceResult {
    /// Catalog identifier of the track.
    pub track: String,

    pub level: DownforceLevel,
    pub top_speed: TopSpeed,
    pub corner_speeds: CornerSpeeds,
    pub lap_time: LapTimeEstimate,

    /// Total lift coefficient over drag coefficient.
    pub lift_to_drag: f64,

    /// Front share of total downforce.
    pub balance: Ratio,

    /// Aerodynamic loads at top speed.
    pub forces_at_top_speed: AeroForces,

    /// Porpoising assessment at top speed.
    pub porpoising: PorpoisingRisk,
}
