//! Problem formulation for the power-limited terminal velocity.

use std::convert::Infallible;

use twine_core::{EquationProblem, Model};
use uom::si::{
    f64::{Power, Velocity},
    power::watt,
    velocity::meter_per_second,
};

use super::super::dynamics::Dynamics;

/// Road load at a trial speed.
#[derive(Debug, Clone, Copy)]
pub(super) struct RoadLoad {
    pub(super) speed: Velocity,
    pub(super) power: Power,
}

/// Model adapter exposing the road-load power as a function of speed.
pub(super) struct RoadLoadModel<'a> {
    dynamics: &'a Dynamics,
}

impl<'a> RoadLoadModel<'a> {
    pub(super) fn new(dynamics: &'a Dynamics) -> Self {
        Self { dynamics }
    }
}

impl Model for RoadLoadModel<'_> {
    type Input = Velocity;
    type Output = RoadLoad;
    type Error = Infallible;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let power = self
            .dynamics
            .road_load_power(input.get::<meter_per_second>());
        Ok(RoadLoad {
            speed: *input,
            power: Power::new::<watt>(power),
        })
    }
}

/// Equation problem for terminal velocity.
///
/// Computes the residual as `road_load_power - wheel_power`.
pub(super) struct TerminalVelocityProblem {
    wheel_power: Power,
}

impl TerminalVelocityProblem {
    pub(super) fn new(wheel_power: Power) -> Self {
        Self { wheel_power }
    }
}

impl EquationProblem<1> for TerminalVelocityProblem {
    type Input = Velocity;
    type Output = RoadLoad;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(Velocity::new::<meter_per_second>(x[0]))
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        Ok([output.power.get::<watt>() - self.wheel_power.get::<watt>()])
    }
}
