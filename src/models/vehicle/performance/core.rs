//! Aerodynamic performance and lap-time estimation.
//!
//! A request flows one way: the track's corner classes and downforce level,
//! together with an aerodynamic configuration, feed the top-speed and
//! corner-speed solvers; their outputs drive the lap-time integrator; the
//! recommendation, critical-corner and comparison layers are built on top of
//! repeated evaluations. Every number leaving this module is finite and inside
//! a documented envelope.

mod aero_force;
mod comparison;
mod config;
mod corner_speed;
mod critical_corners;
mod dynamics;
mod error;
mod input;
mod lap_time;
mod recommendation;
mod results;
mod top_speed;

#[cfg(test)]
mod test_support;

pub use aero_force::{
    AeroForces, DRS_DRAG_REDUCTION, DRS_REAR_DOWNFORCE_LOSS, DrsEffect, GROUND_EFFECT_FACTOR,
    PorpoisingRisk, RiskLevel, WING_EFFICIENCY, balance, downforce, drag_force, drs_effect,
    lift_to_drag, porpoising_risk,
};
pub use comparison::{
    ConfigurationComparison, Faster, RaceForecast, ReferenceComparison, SENSITIVITY_POINTS,
    SeasonForecast, SensitivityParameter, SensitivityPoint, TeamRanking, TeamStanding,
};
pub use config::{EngineConfig, Params, Vehicle};
pub use corner_speed::{
    ClassCalibration, CornerSpeedSolver, CornerSpeeds, SATURATED_DOWNFORCE_SHARE, team_signature,
};
pub use critical_corners::{
    CornerAnnotation, CornerInsights, CornerTier, TimeImpact, corner_insights,
};
pub use error::EngineError;
pub use input::{AeroConfiguration, REFERENCE_CD, REFERENCE_CL, REFERENCE_FRICTION};
pub use lap_time::{LapTimeEstimate, RACE_LAP_PENALTY_FACTOR, format_lap_time};
pub use recommendation::{
    Adjustment, Directive, SetupDelta, SetupField, SetupRecommendation, ideal_configuration,
    setup_deltas,
};
pub use results::PerformanceResult;
pub use top_speed::{
    TOP_SPEED_PER_CD_STEP, TOP_SPEED_PER_CL_STEP, TopSpeed, TopSpeedError, TopSpeedSolver,
    TopSpeedSolverConfig,
};

use uom::si::{f64::Velocity, velocity::meter_per_second};

use crate::{
    catalog::Track,
    support::constraint::{Constrained, UnitIntervalLowerOpen},
};

use dynamics::Dynamics;

/// Evaluates configurations for one validated vehicle.
///
/// Holds the reference terminal velocity, which is solved once on
/// construction and shared by every evaluation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Evaluator {
    params: Params,
    top_speed: TopSpeedSolver,
}

impl Evaluator {
    pub(crate) fn new(params: Params) -> Self {
        Self {
            top_speed: TopSpeedSolver::new(&params),
            params,
        }
    }

    pub(crate) fn params(&self) -> &Params {
        &self.params
    }

    /// Full performance of `config` on `track`.
    pub(crate) fn evaluate(&self, config: &AeroConfiguration, track: &Track) -> PerformanceResult {
        tracing::debug!(
            track = track.id(),
            cd = config.cd(),
            cl_total = config.cl_total(),
            "evaluating configuration"
        );

        let params = &self.params;
        let top_speed = self.top_speed.solve(config, track.level());
        let corner_speeds = CornerSpeedSolver::solve(config, track, params.tire_friction());
        let dynamics = Dynamics::new(params, config)
            .with_terminal_speed(top_speed.speed.get::<meter_per_second>());
        let lap_time = lap_time::estimate(
            &dynamics,
            track,
            &corner_speeds,
            top_speed.speed,
            params.profile_step(),
        );

        let (density, area) = (params.air_density(), params.frontal_area());
        PerformanceResult {
            track: track.id().to_owned(),
            level: track.level(),
            top_speed,
            corner_speeds,
            lap_time,
            lift_to_drag: round_dp(config.lift_to_drag(), 3),
            balance: config.balance(),
            forces_at_top_speed: AeroForces::at(config, top_speed.speed, density, area),
            porpoising: porpoising_risk(config, top_speed.speed, params.mass(), density, area),
        }
    }

    pub(crate) fn recommend(
        &self,
        config: &AeroConfiguration,
        track: &Track,
    ) -> SetupRecommendation {
        recommendation::recommend(self, config, track)
    }

    pub(crate) fn critical_corners(
        &self,
        config: &AeroConfiguration,
        track: &Track,
    ) -> Vec<CornerAnnotation> {
        critical_corners::analyze(self, config, track)
    }

    pub(crate) fn compare(
        &self,
        first: &AeroConfiguration,
        second: &AeroConfiguration,
        track: &Track,
    ) -> ConfigurationComparison {
        comparison::compare(self, first, second, track)
    }

    pub(crate) fn forecast_season(
        &self,
        first: &AeroConfiguration,
        second: &AeroConfiguration,
        tracks: &[&Track],
    ) -> SeasonForecast {
        comparison::forecast_season(self, first, second, tracks)
    }

    pub(crate) fn rank<'a>(
        &self,
        entries: impl IntoIterator<Item = (&'a str, AeroConfiguration)>,
        track: &Track,
    ) -> TeamRanking {
        comparison::rank(self, entries, track)
    }

    /// Rear-wing flap effect for `config` at its top speed on `track`.
    pub(crate) fn drs_effect(&self, config: &AeroConfiguration, track: &Track) -> DrsEffect {
        let top_speed = self.top_speed.solve(config, track.level());
        aero_force::drs_effect(
            config,
            top_speed.speed,
            self.params.air_density(),
            self.params.frontal_area(),
        )
    }

    pub(crate) fn sensitivity(
        &self,
        config: &AeroConfiguration,
        track: &Track,
        parameter: SensitivityParameter,
        span: Constrained<f64, UnitIntervalLowerOpen>,
    ) -> Vec<SensitivityPoint> {
        comparison::sensitivity(self, config, track, parameter, span)
    }

    pub(crate) fn compare_with_reference(
        &self,
        config: &AeroConfiguration,
        track: &Track,
    ) -> Option<ReferenceComparison> {
        let result = self.evaluate(config, track);
        comparison::compare_with_reference(&result, track)
    }

    /// Reference terminal velocity, if the solve converged.
    pub(crate) fn reference_speed(&self) -> Option<Velocity> {
        self.top_speed.reference()
    }
}

/// Rounds half away from zero to `places` decimal places.
fn round_dp(value: f64, places: i32) -> f64 {
    let scale = 10_f64.powi(places);
    (value * scale).round() / scale
}
