use twine_solvers::equation::bisection;
use uom::si::{
    f64::{Power, Velocity},
    power::watt,
    velocity::meter_per_second,
};

/// Solver configuration for the reference terminal-velocity solve.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TopSpeedSolverConfig {
    /// Maximum iteration count for the bisection solve.
    pub max_iters: usize,

    /// Absolute tolerance on the speed search variable.
    pub speed_tol: Velocity,

    /// Absolute tolerance on the power residual (road load - available).
    pub power_tol: Power,
}

impl Default for TopSpeedSolverConfig {
    fn default() -> Self {
        Self {
            max_iters: 100,
            speed_tol: Velocity::new::<meter_per_second>(1e-9),
            power_tol: Power::new::<watt>(1e-6),
        }
    }
}

impl TopSpeedSolverConfig {
    /// Converts this configuration into a bisection solver configuration.
    pub(super) fn bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: self.speed_tol.get::<meter_per_second>(),
            x_rel_tol: 0.0,
            residual_tol: self.power_tol.get::<watt>(),
        }
    }
}
