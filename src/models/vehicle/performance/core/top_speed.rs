//! Top speed from a calibrated terminal velocity.
//!
//! Each downforce level carries the top speed the reference configuration
//! reaches on its tracks. That anchor is scaled by the vehicle's power-limited
//! terminal velocity relative to the default vehicle, both found by bisection
//! on `wheel_power = v · (drag(v) + Crr · (weight + downforce(v)))`.
//! A configuration's top speed moves linearly away from the anchor with its
//! drag and lift coefficients and is then clamped into the envelope of the
//! track's downforce level.

mod config;
mod error;
mod problem;

pub use config::TopSpeedSolverConfig;
pub use error::TopSpeedError;

use twine_solvers::equation::bisection;
use uom::si::{
    f64::{Power, Velocity},
    power::watt,
    velocity::{kilometer_per_hour, meter_per_second},
};

use crate::{
    catalog::DownforceLevel,
    support::bounds::{Band, finite_or, record_violation},
};

use super::{
    AeroConfiguration, EngineConfig, Params, REFERENCE_CD, REFERENCE_CL, dynamics::Dynamics,
    round_dp,
};

use problem::{RoadLoadModel, TerminalVelocityProblem};

/// Top-speed change, in km/h, for every +0.01 of drag coefficient.
pub const TOP_SPEED_PER_CD_STEP: f64 = -2.0;

/// Top-speed change, in km/h, for every +0.1 of total lift coefficient.
pub const TOP_SPEED_PER_CL_STEP: f64 = -1.0;

const CD_STEP: f64 = 0.01;
const CL_STEP: f64 = 0.1;

/// Bisection bracket for terminal velocity, m/s.
const SPEED_BRACKET: [f64; 2] = [1.0, 200.0];

/// A configuration's top speed on one track.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TopSpeed {
    /// Calibrated speed clamped into the level's envelope, rounded to 0.01 km/h.
    pub speed: Velocity,

    /// Calibrated speed before clamping.
    pub unclamped: Velocity,

    /// Top speed of the reference configuration on this level, scaled to the
    /// vehicle.
    pub reference: Velocity,
}

impl TopSpeed {
    /// `speed` in km/h, exactly as rounded.
    ///
    /// `speed` is stored in SI units, so reading it back in km/h can be one
    /// ulp off the rounded value.
    #[must_use]
    pub fn kmh(&self) -> f64 {
        round_dp(self.speed.get::<kilometer_per_hour>(), 2)
    }
}

/// Computes top speeds for one vehicle.
#[derive(Debug, Clone, Copy)]
pub struct TopSpeedSolver {
    reference: Option<Velocity>,
    power_scale: Option<f64>,
}

impl TopSpeedSolver {
    /// Solves for the reference terminal velocity of the vehicle in `params`
    /// and of the default vehicle.
    ///
    /// A failed solve is logged and remembered; every later [`solve`](Self::solve)
    /// then falls back to the envelope's lower bound and records a
    /// numeric-domain violation.
    pub(crate) fn new(params: &Params) -> Self {
        let solver = *params.top_speed_solver();
        let reference = reference_terminal_velocity(params);
        let nominal = EngineConfig {
            top_speed_solver: solver,
            ..EngineConfig::default()
        }
        .validate()
        .ok()
        .and_then(|nominal| reference_terminal_velocity(&nominal));

        let power_scale = match (reference, nominal) {
            (Some(reference), Some(nominal)) => Some(
                reference.get::<meter_per_second>() / nominal.get::<meter_per_second>(),
            )
            .filter(|scale| scale.is_finite() && *scale > 0.0),
            _ => None,
        };
        Self {
            reference,
            power_scale,
        }
    }

    /// Terminal velocity of the reference configuration, if the solve converged.
    #[must_use]
    pub fn reference(&self) -> Option<Velocity> {
        self.reference
    }

    /// Realistic top-speed envelope for a downforce level.
    #[must_use]
    pub fn envelope(level: DownforceLevel) -> Band<Velocity> {
        let band = envelope_kmh(level);
        Band::new(
            Velocity::new::<kilometer_per_hour>(band.low()),
            Velocity::new::<kilometer_per_hour>(band.high()),
        )
    }

    /// Top speed of the reference configuration on a level, for the default
    /// vehicle.
    #[must_use]
    pub fn level_anchor(level: DownforceLevel) -> Velocity {
        Velocity::new::<kilometer_per_hour>(anchor_kmh(level))
    }

    /// Top speed of `config` on a track of the given downforce level.
    pub(crate) fn solve(&self, config: &AeroConfiguration, level: DownforceLevel) -> TopSpeed {
        let envelope = envelope_kmh(level);
        let reference = if let Some(scale) = self.power_scale {
            anchor_kmh(level) * scale
        } else {
            record_violation("top speed reference", f64::NAN, envelope.low());
            envelope.low()
        };

        let raw = reference
            + (config.cd() - REFERENCE_CD) / CD_STEP * TOP_SPEED_PER_CD_STEP
            + (config.cl_total() - REFERENCE_CL) / CL_STEP * TOP_SPEED_PER_CL_STEP;
        let unclamped = finite_or(raw, envelope.low(), "top speed calibration");
        let speed = round_dp(envelope.clamp(unclamped), 2);

        TopSpeed {
            speed: Velocity::new::<kilometer_per_hour>(speed),
            unclamped: Velocity::new::<kilometer_per_hour>(unclamped),
            reference: Velocity::new::<kilometer_per_hour>(reference),
        }
    }
}

/// Reference-configuration top speed per level, km/h.
///
/// Catalog team profiles sit within a few km/h of the reference configuration,
/// so each anchor leaves them inside the level's envelope.
fn anchor_kmh(level: DownforceLevel) -> f64 {
    match level {
        DownforceLevel::VeryLow => 362.0,
        DownforceLevel::Low => 353.5,
        DownforceLevel::Medium => 346.0,
        DownforceLevel::MediumHigh => 337.0,
        DownforceLevel::High => 334.0,
        DownforceLevel::VeryHigh => 308.0,
    }
}

fn envelope_kmh(level: DownforceLevel) -> Band<f64> {
    let (low, high) = match level {
        DownforceLevel::VeryLow => (355.0, 370.0),
        DownforceLevel::Low => (340.0, 362.0),
        DownforceLevel::Medium => (325.0, 355.0),
        DownforceLevel::MediumHigh => (315.0, 345.0),
        DownforceLevel::High => (305.0, 335.0),
        DownforceLevel::VeryHigh => (300.0, 320.0),
    };
    Band::new(low, high)
}

fn reference_terminal_velocity(params: &Params) -> Option<Velocity> {
    let dynamics = Dynamics::new(params, &AeroConfiguration::reference());
    match terminal_velocity(&dynamics, params.top_speed_solver()) {
        Ok(speed) => Some(speed),
        Err(error) => {
            tracing::warn!(%error, "reference terminal velocity did not converge");
            None
        }
    }
}

/// Solves for the speed at which road-load power equals wheel power.
fn terminal_velocity(
    dynamics: &Dynamics,
    config: &TopSpeedSolverConfig,
) -> Result<Velocity, TopSpeedError> {
    let model = RoadLoadModel::new(dynamics);
    let problem = TerminalVelocityProblem::new(Power::new::<watt>(dynamics.wheel_power()));

    let solution = bisection::solve(
        &model,
        &problem,
        SPEED_BRACKET,
        &config.bisection(),
        |_event: &bisection::Event<'_, _, _>| -> Option<bisection::Action> { None },
    )?;

    if solution.status != bisection::Status::Converged {
        return Err(TopSpeedError::MaxIters {
            residual: Power::new::<watt>(solution.residual),
            iters: solution.iters,
        });
    }

    let speed = solution.snapshot.output.speed;
    tracing::debug!(
        speed_mps = speed.get::<meter_per_second>(),
        iters = solution.iters,
        "reference terminal velocity"
    );
    Ok(speed)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::support::bounds::numeric_domain_violations;

    fn solver() -> TopSpeedSolver {
        TopSpeedSolver::new(&EngineConfig::default().validate().unwrap())
    }

    fn kmh(speed: Velocity) -> f64 {
        speed.get::<kilometer_per_hour>()
    }

    #[test]
    fn reference_terminal_velocity() {
        let reference = solver().reference().unwrap();
        // 0.63874·v³ + 117.39·v = 633 250 W
        assert_relative_eq!(reference.get::<meter_per_second>(), 99.1, epsilon = 0.05);
    }

    #[test]
    fn reference_configuration_sits_on_level_anchor() {
        let solver = solver();
        for level in DownforceLevel::ALL {
            let top = solver.solve(&AeroConfiguration::reference(), level);
            assert_relative_eq!(kmh(top.unclamped), kmh(top.reference), epsilon = 1e-9);
            assert_relative_eq!(
                kmh(top.reference),
                kmh(TopSpeedSolver::level_anchor(level)),
                epsilon = 1e-9
            );
            assert!(TopSpeedSolver::envelope(level).contains(top.speed), "{level}");
        }
    }

    #[test]
    fn more_power_raises_top_speed() {
        let mut config = EngineConfig::default();
        config.vehicle.power = Power::new::<watt>(800_000.0);
        let stronger = TopSpeedSolver::new(&config.validate().unwrap());

        let level = DownforceLevel::Medium;
        let base = solver().solve(&AeroConfiguration::reference(), level);
        let boosted = stronger.solve(&AeroConfiguration::reference(), level);
        assert!(boosted.unclamped > base.unclamped);
        assert!(stronger.reference().unwrap() > solver().reference().unwrap());
    }

    #[test]
    fn calibration_steps() {
        let solver = solver();
        let base = AeroConfiguration::new(0.80, 1.5, 2.0).unwrap();
        let draggier = AeroConfiguration::new(0.81, 1.5, 2.0).unwrap();
        let loaded = AeroConfiguration::new(0.80, 1.55, 2.05).unwrap();

        let level = DownforceLevel::Medium;
        let base = kmh(solver.solve(&base, level).unclamped);
        let draggier = kmh(solver.solve(&draggier, level).unclamped);
        let loaded = kmh(solver.solve(&loaded, level).unclamped);

        assert_relative_eq!(draggier - base, TOP_SPEED_PER_CD_STEP, epsilon = 1e-9);
        assert_relative_eq!(loaded - base, TOP_SPEED_PER_CL_STEP, epsilon = 1e-9);
    }

    #[test]
    fn drag_lowers_top_speed_inside_every_envelope() {
        let solver = solver();
        let base = AeroConfiguration::new(0.70, 1.65, 2.10).unwrap();
        let draggier = AeroConfiguration::new(0.71, 1.65, 2.10).unwrap();
        for level in DownforceLevel::ALL {
            let base = solver.solve(&base, level);
            let draggier = solver.solve(&draggier, level);
            assert!(draggier.speed < base.speed, "{level}");
        }
    }

    #[test]
    fn clamped_into_envelope() {
        let solver = solver();
        let slippery = AeroConfiguration::new(0.65, 1.2, 1.6).unwrap();
        let top = solver.solve(&slippery, DownforceLevel::VeryLow);
        // 362 + 10 + 7 km/h, above the 370 km/h ceiling.
        assert!(kmh(top.unclamped) > 370.0);
        assert_eq!(top.kmh(), 370.0);

        let draggy = AeroConfiguration::new(0.75, 1.8, 2.4).unwrap();
        let top = solver.solve(&draggy, DownforceLevel::VeryHigh);
        // 308 - 10 - 7 km/h, below the 300 km/h floor.
        assert!(kmh(top.unclamped) < 300.0);
        assert_eq!(top.kmh(), 300.0);
    }

    #[test]
    fn envelopes_per_level() {
        let envelope = TopSpeedSolver::envelope(DownforceLevel::Low);
        assert_relative_eq!(kmh(envelope.low()), 340.0, epsilon = 1e-9);
        assert_relative_eq!(kmh(envelope.high()), 362.0, epsilon = 1e-9);
    }

    #[test]
    fn failed_reference_solve_falls_back_to_envelope_floor() {
        let mut config = EngineConfig::default();
        config.top_speed_solver.max_iters = 3;
        let solver = TopSpeedSolver::new(&config.validate().unwrap());
        assert!(solver.reference().is_none());

        let before = numeric_domain_violations();
        let top = solver.solve(&AeroConfiguration::reference(), DownforceLevel::Medium);
        assert!(numeric_domain_violations() > before);
        assert_relative_eq!(kmh(top.speed), 325.0, epsilon = 1e-9);
    }
}
