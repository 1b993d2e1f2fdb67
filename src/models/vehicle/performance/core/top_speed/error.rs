use thiserror::Error;
use twine_solvers::equation::bisection;
use uom::si::f64::Power;

/// Errors from the reference terminal-velocity solve.
///
/// Never surfaced to engine callers: a failed solve is recovered as a
/// numeric-domain violation.
#[derive(Debug, Error)]
pub enum TopSpeedError {
    /// The bisection solver encountered an error.
    #[error("bisection solver error")]
    Bisection(#[from] bisection::Error),

    /// The solver reached the iteration limit without converging.
    #[error("solver hit iteration limit: residual={residual:?}")]
    MaxIters {
        /// Smallest power residual (road load minus wheel power) reached.
        residual: Power,

        /// Iteration count performed by the solver.
        iters: usize,
    },
}
