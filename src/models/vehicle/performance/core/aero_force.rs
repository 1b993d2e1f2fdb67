//! Aerodynamic forces from coefficients and speed.

use std::fmt;

use uom::si::{
    acceleration::standard_gravity,
    f64::{Acceleration, Area, Force, Mass, MassDensity, Pressure, Ratio, Velocity},
    length::millimeter,
    ratio::ratio,
};

use super::AeroConfiguration;

/// Downforce lost to the floor working away from its design ride height.
pub const GROUND_EFFECT_FACTOR: f64 = 0.90;

/// Downforce lost to wing stall margins and interference.
pub const WING_EFFICIENCY: f64 = 0.95;

/// Share of the drag coefficient shed with the rear-wing flap open.
pub const DRS_DRAG_REDUCTION: f64 = 0.10;

/// Share of the rear lift coefficient lost with the rear-wing flap open.
pub const DRS_REAR_DOWNFORCE_LOSS: f64 = 0.15;

/// Front ride height below which the floor starts to stall and recover.
const PORPOISING_ONSET_MM: f64 = 8.0;

/// Lowest ride height a configuration can carry.
const MIN_RIDE_HEIGHT_MM: f64 = 5.0;

fn dynamic_pressure(speed: Velocity, density: MassDensity) -> Pressure {
    density * speed * speed * 0.5
}

/// Drag force `½·ρ·v²·Cd·A`.
#[must_use]
pub fn drag_force(cd: f64, speed: Velocity, density: MassDensity, area: Area) -> Force {
    dynamic_pressure(speed, density) * area * cd
}

/// Downforce `½·ρ·v²·CL·A`, derated by [`GROUND_EFFECT_FACTOR`] and
/// [`WING_EFFICIENCY`].
#[must_use]
pub fn downforce(cl_total: f64, speed: Velocity, density: MassDensity, area: Area) -> Force {
    dynamic_pressure(speed, density) * area * (cl_total * GROUND_EFFECT_FACTOR * WING_EFFICIENCY)
}

/// Total lift coefficient over drag coefficient.
#[must_use]
pub fn lift_to_drag(config: &AeroConfiguration) -> f64 {
    config.lift_to_drag()
}

/// Front share of total downforce.
#[must_use]
pub fn balance(config: &AeroConfiguration) -> Ratio {
    config.balance()
}

/// Aerodynamic loads at one operating point.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AeroForces {
    pub drag: Force,
    pub downforce: Force,

    /// Downforce on the front axle.
    pub front: Force,

    /// Downforce on the rear axle.
    pub rear: Force,
}

impl AeroForces {
    /// Computes the loads on `config` at `speed`.
    #[must_use]
    pub fn at(
        config: &AeroConfiguration,
        speed: Velocity,
        density: MassDensity,
        area: Area,
    ) -> Self {
        let drag = drag_force(config.cd(), speed, density, area);
        let downforce = downforce(config.cl_total(), speed, density, area);
        let front = downforce * config.balance().get::<ratio>();
        Self {
            drag,
            downforce,
            front,
            rear: downforce - front,
        }
    }
}

/// Effect of opening the rear-wing flap at one operating point.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DrsEffect {
    /// Drag coefficient shed.
    pub drag_reduction: f64,

    /// Rear lift coefficient lost.
    pub downforce_loss: f64,

    pub drag_saved: Force,
    pub downforce_lost: Force,

    /// Extra speed the car settles at on the same power, assuming the
    /// straight is drag-limited.
    pub speed_gain: Velocity,
}

/// Opens the rear-wing flap on `config` at `speed`.
///
/// With drag power `∝ Cd·v³` held constant, speed scales with `Cd^(-1/3)`.
#[must_use]
pub fn drs_effect(
    config: &AeroConfiguration,
    speed: Velocity,
    density: MassDensity,
    area: Area,
) -> DrsEffect {
    let drag_reduction = DRS_DRAG_REDUCTION * config.cd();
    let downforce_loss = DRS_REAR_DOWNFORCE_LOSS * config.clr();
    let speed_ratio = (1.0 - DRS_DRAG_REDUCTION).powf(-1.0 / 3.0);
    DrsEffect {
        drag_reduction,
        downforce_loss,
        drag_saved: drag_force(drag_reduction, speed, density, area),
        downforce_lost: downforce(downforce_loss, speed, density, area),
        speed_gain: speed * (speed_ratio - 1.0),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        })
    }
}

/// Porpoising assessment: a low front ride height combined with heavy
/// downforce.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PorpoisingRisk {
    pub level: RiskLevel,

    /// `ride_height_factor × downforce_factor`, in `[0, 1]`.
    pub score: f64,

    /// 0 at or above 8 mm front ride height, 1 at the 5 mm floor.
    pub ride_height_factor: f64,

    /// Downforce over four times the car's weight, capped at 1.
    pub downforce_factor: f64,
}

impl PorpoisingRisk {
    /// Whether the front ride height should be raised.
    #[must_use]
    pub fn raise_ride_height(&self) -> bool {
        self.score > 0.6
    }
}

/// Assesses porpoising risk for `config` at `speed`.
#[must_use]
pub fn porpoising_risk(
    config: &AeroConfiguration,
    speed: Velocity,
    mass: Mass,
    density: MassDensity,
    area: Area,
) -> PorpoisingRisk {
    let front_height = config.front_ride_height().get::<millimeter>();
    let ride_height_factor = ((PORPOISING_ONSET_MM - front_height)
        / (PORPOISING_ONSET_MM - MIN_RIDE_HEIGHT_MM))
        .clamp(0.0, 1.0);

    let weight = mass * Acceleration::new::<standard_gravity>(1.0);
    let load = downforce(config.cl_total(), speed, density, area);
    let downforce_factor = (load / (weight * 4.0)).get::<ratio>().min(1.0);

    let score = ride_height_factor * downforce_factor;
    let level = if score > 0.7 {
        RiskLevel::High
    } else if score > 0.4 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    PorpoisingRisk {
        level,
        score,
        ride_height_factor,
        downforce_factor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        area::square_meter, force::newton, length::millimeter as mm, mass::kilogram,
        mass_density::kilogram_per_cubic_meter, velocity::meter_per_second,
    };

    use uom::si::f64::Length;

    fn air() -> (MassDensity, Area) {
        (
            MassDensity::new::<kilogram_per_cubic_meter>(1.225),
            Area::new::<square_meter>(1.4),
        )
    }

    #[test]
    fn drag_matches_closed_form() {
        let (rho, area) = air();
        let drag = drag_force(0.70, Velocity::new::<meter_per_second>(50.0), rho, area);
        // 0.5 * 1.225 * 2500 * 0.70 * 1.4
        assert_relative_eq!(drag.get::<newton>(), 1500.625, epsilon = 1e-9);
    }

    #[test]
    fn downforce_is_derated() {
        let (rho, area) = air();
        let speed = Velocity::new::<meter_per_second>(50.0);
        let ideal = 0.5 * 1.225 * 2500.0 * 3.5 * 1.4;
        let df = downforce(3.5, speed, rho, area);
        assert_relative_eq!(df.get::<newton>(), ideal * 0.855, epsilon = 1e-9);
    }

    #[test]
    fn forces_split_by_balance() {
        let (rho, area) = air();
        let config = AeroConfiguration::reference();
        let forces = AeroForces::at(&config, Velocity::new::<meter_per_second>(80.0), rho, area);
        assert_relative_eq!(
            (forces.front + forces.rear).get::<newton>(),
            forces.downforce.get::<newton>(),
            epsilon = 1e-9
        );
        assert_relative_eq!(
            (forces.front / forces.downforce).get::<ratio>(),
            1.5 / 3.5,
            epsilon = 1e-12
        );
        assert_relative_eq!(lift_to_drag(&config), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn drs_sheds_drag_and_rear_load() {
        let (rho, area) = air();
        let config = AeroConfiguration::reference();
        let speed = Velocity::new::<meter_per_second>(80.0);
        let drs = drs_effect(&config, speed, rho, area);

        assert_relative_eq!(drs.drag_reduction, 0.07, epsilon = 1e-12);
        assert_relative_eq!(drs.downforce_loss, 0.30, epsilon = 1e-12);
        assert_relative_eq!(
            drs.drag_saved.get::<newton>(),
            drag_force(0.70, speed, rho, area).get::<newton>() * 0.1,
            epsilon = 1e-9
        );
        assert!(drs.downforce_lost < AeroForces::at(&config, speed, rho, area).rear);
        // 80 · (0.9^(-1/3) - 1)
        assert_relative_eq!(drs.speed_gain.get::<meter_per_second>(), 2.859, epsilon = 1e-3);
    }

    #[test]
    fn drs_gain_grows_with_speed() {
        let (rho, area) = air();
        let config = AeroConfiguration::reference();
        let slow = drs_effect(&config, Velocity::new::<meter_per_second>(60.0), rho, area);
        let fast = drs_effect(&config, Velocity::new::<meter_per_second>(90.0), rho, area);
        assert!(fast.speed_gain > slow.speed_gain);
        assert!(fast.drag_saved > slow.drag_saved);
        assert_relative_eq!(fast.drag_reduction, slow.drag_reduction);
    }

    #[test]
    fn porpoising_needs_low_ride_height() {
        let (rho, area) = air();
        let mass = Mass::new::<kilogram>(798.0);
        let speed = Velocity::new::<meter_per_second>(95.0);

        let safe = AeroConfiguration::reference();
        let risk = porpoising_risk(&safe, speed, mass, rho, area);
        assert_eq!(risk.level, RiskLevel::Low);
        assert_relative_eq!(risk.score, 0.0);

        let low = safe
            .with_ride_heights(Length::new::<mm>(5.0), Length::new::<mm>(10.0))
            .unwrap();
        let risk = porpoising_risk(&low, speed, mass, rho, area);
        assert_relative_eq!(risk.ride_height_factor, 1.0, epsilon = 1e-9);
        // ~23.2 kN of downforce against 31.3 kN (4 g of weight).
        assert!(risk.downforce_factor > 0.7 && risk.downforce_factor < 0.8);
        assert_eq!(risk.level, RiskLevel::High);
        assert!(risk.raise_ride_height());
    }
}
