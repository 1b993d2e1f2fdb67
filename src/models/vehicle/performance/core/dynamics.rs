//! Longitudinal point-mass dynamics of one car in one configuration.
//!
//! The straight-line integrator evaluates these functions thousands of times
//! per lap, so coefficients are resolved once into plain SI values.

use uom::si::{
    acceleration::{meter_per_second_squared, standard_gravity},
    f64::{Acceleration, Velocity},
    force::newton,
    mass::kilogram,
    power::watt,
    velocity::meter_per_second,
};

use crate::support::bounds::record_violation;

use super::{AeroConfiguration, Params, aero_force};

#[derive(Debug, Clone, Copy)]
pub(super) struct Dynamics {
    /// kg
    mass: f64,
    /// W at the wheels
    wheel_power: f64,
    /// N
    traction_force: f64,
    /// m/s²
    braking: f64,
    rolling_resistance: f64,
    /// N
    weight: f64,
    /// Drag per (m/s)², N·s²/m²
    drag_coefficient: f64,
    /// Downforce per (m/s)², N·s²/m²
    downforce_coefficient: f64,
}

impl Dynamics {
    pub(super) fn new(params: &Params, config: &AeroConfiguration) -> Self {
        let unit_speed = Velocity::new::<meter_per_second>(1.0);
        let (density, area) = (params.air_density(), params.frontal_area());
        let mass = params.mass().get::<kilogram>();
        Self {
            mass,
            wheel_power: params.wheel_power().get::<watt>(),
            traction_force: mass * params.traction_limit().get::<meter_per_second_squared>(),
            braking: params.braking().get::<meter_per_second_squared>(),
            rolling_resistance: params.rolling_resistance(),
            weight: mass * Acceleration::new::<standard_gravity>(1.0).get::<meter_per_second_squared>(),
            drag_coefficient: aero_force::drag_force(config.cd(), unit_speed, density, area)
                .get::<newton>(),
            downforce_coefficient: aero_force::downforce(
                config.cl_total(),
                unit_speed,
                density,
                area,
            )
            .get::<newton>(),
        }
    }

    /// Re-derives the drag coefficient so that the terminal velocity equals
    /// `top_speed`, m/s.
    ///
    /// Keeps the straights consistent with the calibrated top speed. If the
    /// derived coefficient is not finite and positive the physical one is kept
    /// and a numeric-domain violation is recorded.
    pub(super) fn with_terminal_speed(self, top_speed: f64) -> Self {
        let v = top_speed;
        let drag_coefficient = (self.wheel_power / v - self.rolling_resistance * self.weight)
            / (v * v)
            - self.rolling_resistance * self.downforce_coefficient;
        if drag_coefficient.is_finite() && drag_coefficient > 0.0 {
            Self {
                drag_coefficient,
                ..self
            }
        } else {
            record_violation("effective drag coefficient", drag_coefficient, self.drag_coefficient);
            self
        }
    }

    /// Drag plus rolling resistance on weight and downforce, N.
    pub(super) fn road_load(&self, speed: f64) -> f64 {
        let v2 = speed * speed;
        self.drag_coefficient * v2
            + self.rolling_resistance * (self.weight + self.downforce_coefficient * v2)
    }

    /// Power needed to hold `speed` against the road load, W.
    pub(super) fn road_load_power(&self, speed: f64) -> f64 {
        speed * self.road_load(speed)
    }

    /// Wheel power available, W.
    pub(super) fn wheel_power(&self) -> f64 {
        self.wheel_power
    }

    /// Net forward acceleration at full throttle, m/s².
    ///
    /// Drive force is traction-limited at low speed and power-limited above.
    pub(super) fn acceleration(&self, speed: f64) -> f64 {
        let drive = if speed > 0.0 {
            self.traction_force.min(self.wheel_power / speed)
        } else {
            self.traction_force
        };
        (drive - self.road_load(speed)) / self.mass
    }

    /// Braking deceleration, m/s².
    pub(super) fn braking(&self) -> f64 {
        self.braking
    }
}
