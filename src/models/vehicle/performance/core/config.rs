use uom::si::{
    acceleration::meter_per_second_squared,
    area::square_meter,
    f64::{Acceleration, Area, Length, Mass, MassDensity, Power},
    length::meter,
    mass::kilogram,
    mass_density::kilogram_per_cubic_meter,
    power::{kilowatt, watt},
};

use crate::support::constraint::{
    Constrained, ConstraintResult, NonNegative, StrictlyPositive, UnitIntervalLowerOpen, finite,
};

use super::{EngineError, TopSpeedSolverConfig};

/// The car the aerodynamic configuration is bolted onto.
///
/// Defaults describe a current single-seater at minimum weight.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Vehicle {
    /// Mass including driver.
    pub mass: Mass,

    /// Peak power at the crank.
    pub power: Power,

    /// Fraction of `power` delivered to the road, in `(0, 1]`.
    pub drivetrain_efficiency: f64,

    /// Reference area for all aerodynamic coefficients.
    pub frontal_area: Area,

    /// Rolling-resistance coefficient, applied to weight plus downforce.
    pub rolling_resistance: f64,

    /// Tire friction coefficient; 1.8 is the calibration reference.
    pub tire_friction: f64,

    /// Longitudinal acceleration limit from traction at low speed.
    pub traction_limit: Acceleration,

    /// Braking deceleration on straights.
    pub braking: Acceleration,
}

impl Default for Vehicle {
    fn default() -> Self {
        Self {
            mass: Mass::new::<kilogram>(798.0),
            power: Power::new::<kilowatt>(745.0),
            drivetrain_efficiency: 0.85,
            frontal_area: Area::new::<square_meter>(1.4),
            rolling_resistance: 0.015,
            tire_friction: 1.8,
            traction_limit: Acceleration::new::<meter_per_second_squared>(9.0),
            braking: Acceleration::new::<meter_per_second_squared>(40.0),
        }
    }
}

/// Engine-wide configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EngineConfig {
    pub vehicle: Vehicle,

    /// Air density used for every force computation.
    pub air_density: MassDensity,

    /// Distance step of the straight-line speed profile.
    pub profile_step: Length,

    pub top_speed_solver: TopSpeedSolverConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            vehicle: Vehicle::default(),
            air_density: MassDensity::new::<kilogram_per_cubic_meter>(1.225),
            profile_step: Length::new::<meter>(2.0),
            top_speed_solver: TopSpeedSolverConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Checks every field against its domain.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfiguration`] naming the first field
    /// that is non-finite or outside its domain (e.g. a negative mass).
    pub fn validate(&self) -> Result<Params, EngineError> {
        let v = &self.vehicle;
        Ok(Params {
            mass: positive(v.mass, v.mass.get::<kilogram>())
                .map_err(EngineError::invalid("vehicle.mass"))?,
            power: positive(v.power, v.power.get::<watt>())
                .map_err(EngineError::invalid("vehicle.power"))?,
            drivetrain_efficiency: finite(v.drivetrain_efficiency)
                .and_then(UnitIntervalLowerOpen::new)
                .map_err(EngineError::invalid("vehicle.drivetrain_efficiency"))?,
            frontal_area: positive(v.frontal_area, v.frontal_area.get::<square_meter>())
                .map_err(EngineError::invalid("vehicle.frontal_area"))?,
            rolling_resistance: finite(v.rolling_resistance)
                .and_then(NonNegative::new)
                .map_err(EngineError::invalid("vehicle.rolling_resistance"))?,
            tire_friction: finite(v.tire_friction)
                .and_then(StrictlyPositive::new)
                .map_err(EngineError::invalid("vehicle.tire_friction"))?,
            traction_limit: positive(
                v.traction_limit,
                v.traction_limit.get::<meter_per_second_squared>(),
            )
            .map_err(EngineError::invalid("vehicle.traction_limit"))?,
            braking: positive(v.braking, v.braking.get::<meter_per_second_squared>())
                .map_err(EngineError::invalid("vehicle.braking"))?,
            air_density: positive(
                self.air_density,
                self.air_density.get::<kilogram_per_cubic_meter>(),
            )
            .map_err(EngineError::invalid("air_density"))?,
            profile_step: positive(self.profile_step, self.profile_step.get::<meter>())
                .map_err(EngineError::invalid("profile_step"))?,
            top_speed_solver: self.top_speed_solver,
        })
    }
}

/// Checks that `si` (the quantity's value in SI units) is finite, then that the
/// quantity itself is strictly positive.
fn positive<Q>(quantity: Q, si: f64) -> ConstraintResult<Constrained<Q, StrictlyPositive>>
where
    Q: PartialOrd + num_traits::Zero,
{
    finite(si)?;
    StrictlyPositive::new(quantity)
}

/// A validated [`EngineConfig`].
///
/// Produced by [`EngineConfig::validate`]; every field is known to be inside
/// its domain.
#[derive(Debug, Clone, Copy)]
pub struct Params {
    mass: Constrained<Mass, StrictlyPositive>,
    power: Constrained<Power, StrictlyPositive>,
    drivetrain_efficiency: Constrained<f64, UnitIntervalLowerOpen>,
    frontal_area: Constrained<Area, StrictlyPositive>,
    rolling_resistance: Constrained<f64, NonNegative>,
    tire_friction: Constrained<f64, StrictlyPositive>,
    traction_limit: Constrained<Acceleration, StrictlyPositive>,
    braking: Constrained<Acceleration, StrictlyPositive>,
    air_density: Constrained<MassDensity, StrictlyPositive>,
    profile_step: Constrained<Length, StrictlyPositive>,
    top_speed_solver: TopSpeedSolverConfig,
}

impl Params {
    #[must_use]
    pub fn mass(&self) -> Mass {
        *self.mass.as_ref()
    }

    /// Power delivered to the road: engine power times drivetrain efficiency.
    #[must_use]
    pub fn wheel_power(&self) -> Power {
        *self.power.as_ref() * *self.drivetrain_efficiency.as_ref()
    }

    #[must_use]
    pub fn frontal_area(&self) -> Area {
        *self.frontal_area.as_ref()
    }

    #[must_use]
    pub fn rolling_resistance(&self) -> f64 {
        *self.rolling_resistance.as_ref()
    }

    #[must_use]
    pub fn tire_friction(&self) -> f64 {
        *self.tire_friction.as_ref()
    }

    #[must_use]
    pub fn traction_limit(&self) -> Acceleration {
        *self.traction_limit.as_ref()
    }

    #[must_use]
    pub fn braking(&self) -> Acceleration {
        *self.braking.as_ref()
    }

    #[must_use]
    pub fn air_density(&self) -> MassDensity {
        *self.air_density.as_ref()
    }

    #[must_use]
    pub fn profile_step(&self) -> Length {
        *self.profile_step.as_ref()
    }

    #[must_use]
    pub fn top_speed_solver(&self) -> &TopSpeedSolverConfig {
        &self.top_speed_solver
    }
}
