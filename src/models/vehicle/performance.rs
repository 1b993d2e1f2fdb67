//! Aerodynamic performance and lap-time model.
//!
//! [`PerformanceEngine`] is the entry point: it binds a validated vehicle
//! ([`EngineConfig`]) to read-only track and team catalogs and answers
//! performance, setup and comparison queries by track id or team name.
//! [`PerformanceModel`] wraps an engine as a [`twine_core::Model`].
//!
//! ```
//! use downforce_models::models::vehicle::performance::{AeroConfiguration, PerformanceEngine};
//! use uom::si::velocity::kilometer_per_hour;
//!
//! let engine = PerformanceEngine::builtin().unwrap();
//! let config = AeroConfiguration::new(0.66, 1.15, 1.50).unwrap();
//!
//! let result = engine.estimate_performance(&config, "monza").unwrap();
//! let top = result.top_speed.speed.get::<kilometer_per_hour>();
//! assert!((355.0..=370.0).contains(&top));
//! ```
//!
//! The computational core is in the internal [`core`] module.

pub(crate) mod core;

pub use self::core::{
    Adjustment, AeroConfiguration, AeroForces, ClassCalibration, ConfigurationComparison,
    CornerAnnotation, CornerInsights, CornerSpeedSolver, CornerSpeeds, CornerTier,
    DRS_DRAG_REDUCTION, DRS_REAR_DOWNFORCE_LOSS, Directive, DrsEffect, EngineConfig, EngineError,
    Faster, GROUND_EFFECT_FACTOR, LapTimeEstimate, Params, PerformanceResult, PorpoisingRisk,
    RACE_LAP_PENALTY_FACTOR, REFERENCE_CD, REFERENCE_CL, REFERENCE_FRICTION, RaceForecast,
    ReferenceComparison, RiskLevel, SATURATED_DOWNFORCE_SHARE, SENSITIVITY_POINTS,
    SeasonForecast, SensitivityParameter, SensitivityPoint, SetupDelta, SetupField,
    SetupRecommendation, TOP_SPEED_PER_CD_STEP, TOP_SPEED_PER_CL_STEP, TeamRanking,
    TeamStanding, TimeImpact, TopSpeed, TopSpeedError, TopSpeedSolver, TopSpeedSolverConfig,
    Vehicle, WING_EFFICIENCY, balance, corner_insights, downforce, drag_force, drs_effect,
    format_lap_time, ideal_configuration, lift_to_drag, porpoising_risk, setup_deltas,
    team_signature,
};

use twine_core::Model;
use uom::si::f64::Velocity;

use crate::{
    catalog::{TeamAeroProfile, TeamCatalog, Track, TrackCatalog},
    support::constraint::{UnitIntervalLowerOpen, finite},
};

use self::core::Evaluator;

/// Answers performance queries for one vehicle over a pair of catalogs.
///
/// The engine holds no mutable state; a shared reference can serve any number
/// of threads.
#[derive(Debug, Clone, Copy)]
pub struct PerformanceEngine<'a> {
    tracks: &'a TrackCatalog,
    teams: &'a TeamCatalog,
    evaluator: Evaluator,
}

impl<'a> PerformanceEngine<'a> {
    /// Creates an engine for the vehicle in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfiguration`] if `config` fails
    /// validation.
    pub fn new(
        tracks: &'a TrackCatalog,
        teams: &'a TeamCatalog,
        config: EngineConfig,
    ) -> Result<Self, EngineError> {
        let evaluator = Evaluator::new(config.validate()?);
        tracing::debug!(
            tracks = tracks.len(),
            teams = teams.len(),
            reference_converged = evaluator.reference_speed().is_some(),
            "performance engine ready"
        );
        Ok(Self {
            tracks,
            teams,
            evaluator,
        })
    }

    /// Looks up a track by id or display name.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] if the catalog has no such track.
    pub fn track(&self, id: &str) -> Result<&'a Track, EngineError> {
        self.tracks
            .get(id)
            .ok_or_else(|| EngineError::track_not_found(id))
    }

    /// Looks up a team by name.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] if the catalog has no such team.
    pub fn team(&self, name: &str) -> Result<&'a TeamAeroProfile, EngineError> {
        self.teams
            .get(name)
            .ok_or_else(|| EngineError::team_not_found(name))
    }

    #[must_use]
    pub fn tracks(&self) -> &'a TrackCatalog {
        self.tracks
    }

    #[must_use]
    pub fn teams(&self) -> &'a TeamCatalog {
        self.teams
    }

    /// Terminal velocity of the reference configuration, if the solve
    /// converged.
    #[must_use]
    pub fn reference_terminal_velocity(&self) -> Option<Velocity> {
        self.evaluator.reference_speed()
    }

    /// Top speed, corner speeds, lap time and aero summary of `config` on
    /// `track`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] if `track` is unknown.
    pub fn estimate_performance(
        &self,
        config: &AeroConfiguration,
        track: &str,
    ) -> Result<PerformanceResult, EngineError> {
        let track = self.track(track)?;
        Ok(self.evaluator.evaluate(config, track))
    }

    /// Ranked setup changes toward the track's ideal configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] if `track` is unknown.
    pub fn recommend_setup(
        &self,
        config: &AeroConfiguration,
        track: &str,
    ) -> Result<SetupRecommendation, EngineError> {
        let track = self.track(track)?;
        Ok(self.evaluator.recommend(config, track))
    }

    /// Corner classes of `track`, most important first.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] if `track` is unknown.
    pub fn analyze_critical_corners(
        &self,
        track: &str,
        config: &AeroConfiguration,
    ) -> Result<Vec<CornerAnnotation>, EngineError> {
        let track = self.track(track)?;
        Ok(self.evaluator.critical_corners(config, track))
    }

    /// Evaluates two configurations on the same track.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] if `track` is unknown.
    pub fn compare_configurations(
        &self,
        first: &AeroConfiguration,
        second: &AeroConfiguration,
        track: &str,
    ) -> Result<ConfigurationComparison, EngineError> {
        let track = self.track(track)?;
        Ok(self.evaluator.compare(first, second, track))
    }

    /// Evaluates two catalog teams on the same track.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] if either team or the track is
    /// unknown.
    pub fn compare_teams(
        &self,
        first: &str,
        second: &str,
        track: &str,
    ) -> Result<ConfigurationComparison, EngineError> {
        let first = self.team(first)?.configuration();
        let second = self.team(second)?.configuration();
        self.compare_configurations(&first, &second, track)
    }

    /// Races two catalog teams over `tracks`, in order.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] if either team or any track is
    /// unknown.
    pub fn forecast_season(
        &self,
        first: &str,
        second: &str,
        tracks: &[&str],
    ) -> Result<SeasonForecast, EngineError> {
        let first = self.team(first)?.configuration();
        let second = self.team(second)?.configuration();
        let tracks = tracks
            .iter()
            .map(|id| self.track(id))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.evaluator.forecast_season(&first, &second, &tracks))
    }

    /// Every catalog team on `track`, quickest first.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] if `track` is unknown.
    pub fn rank_teams(&self, track: &str) -> Result<TeamRanking, EngineError> {
        let track = self.track(track)?;
        let entries = self
            .teams
            .iter()
            .map(|team| (team.name(), team.configuration()));
        Ok(self.evaluator.rank(entries, track))
    }

    /// Effect of opening the rear-wing flap on `config` at its top speed on
    /// `track`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] if `track` is unknown.
    pub fn drs_effect(
        &self,
        config: &AeroConfiguration,
        track: &str,
    ) -> Result<DrsEffect, EngineError> {
        let track = self.track(track)?;
        Ok(self.evaluator.drs_effect(config, track))
    }

    /// Sweeps one coefficient over `base · (1 ± span_fraction)` in
    /// [`SENSITIVITY_POINTS`] steps.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] if `track` is unknown, or
    /// [`EngineError::InvalidConfiguration`] if `span_fraction` is not in
    /// `(0, 1]`.
    pub fn sensitivity(
        &self,
        config: &AeroConfiguration,
        track: &str,
        parameter: SensitivityParameter,
        span_fraction: f64,
    ) -> Result<Vec<SensitivityPoint>, EngineError> {
        let span = finite(span_fraction)
            .and_then(UnitIntervalLowerOpen::new)
            .map_err(EngineError::invalid("span_fraction"))?;
        let track = self.track(track)?;
        Ok(self
            .evaluator
            .sensitivity(config, track, parameter, span))
    }

    /// Predicted qualifying lap against the track's reference lap, or `None`
    /// if the track carries no reference.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] if `track` is unknown.
    pub fn compare_with_reference(
        &self,
        config: &AeroConfiguration,
        track: &str,
    ) -> Result<Option<ReferenceComparison>, EngineError> {
        let track = self.track(track)?;
        Ok(self.evaluator.compare_with_reference(config, track))
    }
}

impl PerformanceEngine<'static> {
    /// An engine over the built-in catalogs with the default vehicle.
    ///
    /// # Errors
    ///
    /// Returns an error only if the default vehicle fails validation.
    pub fn builtin() -> Result<Self, EngineError> {
        Self::new(
            TrackCatalog::builtin(),
            TeamCatalog::builtin(),
            EngineConfig::default(),
        )
    }
}

/// Input to [`PerformanceModel`].
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceInput {
    pub config: AeroConfiguration,

    /// Track id or display name.
    pub track: String,
}

/// A [`PerformanceEngine`] exposed as a [`twine_core::Model`].
#[derive(Debug, Clone, Copy)]
pub struct PerformanceModel<'a> {
    engine: PerformanceEngine<'a>,
}

impl<'a> PerformanceModel<'a> {
    #[must_use]
    pub fn new(engine: PerformanceEngine<'a>) -> Self {
        Self { engine }
    }

    #[must_use]
    pub fn engine(&self) -> &PerformanceEngine<'a> {
        &self.engine
    }
}

impl<'a> From<PerformanceEngine<'a>> for PerformanceModel<'a> {
    fn from(engine: PerformanceEngine<'a>) -> Self {
        Self::new(engine)
    }
}

impl Model for PerformanceModel<'_> {
    type Input = PerformanceInput;
    type Output = PerformanceResult;
    type Error = EngineError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.engine.estimate_performance(&input.config, &input.track)
    }
}
