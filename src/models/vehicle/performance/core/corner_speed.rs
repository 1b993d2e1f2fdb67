//! Corner speeds per corner class.
//!
//! Each class starts from the track's reference speed for that class and is
//! moved by the configuration's distance from the calibration reference:
//! downforce above reference adds speed, drag above reference costs speed, and
//! tire friction above reference adds mechanical grip. Both aerodynamic terms
//! grow from slow to fast corners. Downforce beyond the ideal total lift of the
//! track's level keeps only a small share of its gain, since the tires are
//! already saturated there. A bounded periodic term of `(Cd, CL)` then
//! gives each configuration its own signature so that distinct cars never
//! collapse onto identical numbers, and the result is clamped into the class
//! band of the track's downforce level.

use uom::si::{f64::Velocity, velocity::kilometer_per_hour};

use crate::{
    catalog::{CornerClass, DownforceLevel, Track},
    support::bounds::{Band, finite_or},
};

use super::{
    AeroConfiguration, REFERENCE_CD, REFERENCE_CL, REFERENCE_FRICTION, ideal_configuration,
    round_dp,
};

/// Share of the downforce gain kept above the level's ideal total lift.
pub const SATURATED_DOWNFORCE_SHARE: f64 = 0.1;

/// Per-class calibration of the corner-speed solver.
///
/// Gains are in km/h. The signature's slope is bounded by
/// `amplitude · frequency · max(Cd, CL)`; every class keeps that below its
/// saturated downforce gain on the least demanding level and below its drag
/// penalty across the whole configuration range, so the signature never
/// reverses the sign of either sensitivity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassCalibration {
    /// Speed gained per unit of total lift coefficient above reference,
    /// before the level's demand factor.
    pub downforce_gain: f64,

    /// Speed lost per unit of drag coefficient above reference.
    pub drag_penalty: f64,

    /// Speed gained per 0.2 of tire friction above reference.
    pub mechanical_gain: f64,

    pub signature_amplitude: f64,
    pub signature_frequency: f64,
}

impl ClassCalibration {
    #[must_use]
    pub const fn of(class: CornerClass) -> Self {
        match class {
            CornerClass::Slow => Self {
                downforce_gain: 8.0,
                drag_penalty: 20.0,
                mechanical_gain: 2.0,
                signature_amplitude: 0.1,
                signature_frequency: 2.0,
            },
            CornerClass::Medium => Self {
                downforce_gain: 12.0,
                drag_penalty: 40.0,
                mechanical_gain: 3.0,
                signature_amplitude: 0.1,
                signature_frequency: 2.3,
            },
            CornerClass::Fast => Self {
                downforce_gain: 18.0,
                drag_penalty: 120.0,
                mechanical_gain: 1.0,
                signature_amplitude: 0.15,
                signature_frequency: 2.6,
            },
        }
    }
}

/// Deterministic per-configuration offset, km/h.
///
/// `A · sin(ω · Cd · CL)`: a pure function of the two coefficients, so two
/// cars that differ in either get different corner speeds while repeated calls
/// stay bit-identical.
#[must_use]
pub fn team_signature(class: CornerClass, cd: f64, cl_total: f64) -> f64 {
    let calibration = ClassCalibration::of(class);
    calibration.signature_amplitude * (calibration.signature_frequency * cd * cl_total).sin()
}

/// Speed per corner class.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CornerSpeeds {
    pub slow: Velocity,
    pub medium: Velocity,
    pub fast: Velocity,
}

impl CornerSpeeds {
    #[must_use]
    pub fn get(&self, class: CornerClass) -> Velocity {
        match class {
            CornerClass::Slow => self.slow,
            CornerClass::Medium => self.medium,
            CornerClass::Fast => self.fast,
        }
    }

    /// Speed of `class` in km/h, exactly as rounded.
    ///
    /// Speeds are stored in SI units, so reading one back in km/h can be one
    /// ulp off the rounded value.
    #[must_use]
    pub fn kmh(&self, class: CornerClass) -> f64 {
        round_dp(self.get(class).get::<kilometer_per_hour>(), 2)
    }
}

pub struct CornerSpeedSolver;

impl CornerSpeedSolver {
    /// Realistic speed band of a corner class on tracks of a downforce level.
    ///
    /// Nominal bands are slow 140 to 160, medium 205 to 230 and fast 300 to 330 km/h.
    /// Very-low-downforce tracks raise the floor (flowing corners are taken
    /// flat-out); very-high-downforce tracks lower the ceiling (tight corners).
    #[must_use]
    pub fn band(level: DownforceLevel, class: CornerClass) -> Band<Velocity> {
        let band = band_kmh(level, class);
        Band::new(
            Velocity::new::<kilometer_per_hour>(band.low()),
            Velocity::new::<kilometer_per_hour>(band.high()),
        )
    }

    /// Corner speeds of `config` on `track` with the given tire friction.
    #[must_use]
    pub fn solve(config: &AeroConfiguration, track: &Track, tire_friction: f64) -> CornerSpeeds {
        let speed = |class| {
            Velocity::new::<kilometer_per_hour>(class_speed(config, track, tire_friction, class))
        };
        CornerSpeeds {
            slow: speed(CornerClass::Slow),
            medium: speed(CornerClass::Medium),
            fast: speed(CornerClass::Fast),
        }
    }
}

fn class_speed(
    config: &AeroConfiguration,
    track: &Track,
    tire_friction: f64,
    class: CornerClass,
) -> f64 {
    let calibration = ClassCalibration::of(class);
    let level = track.level();
    let band = band_kmh(level, class);

    let base = track.class_reference(class).get::<kilometer_per_hour>();
    let gain = calibration.downforce_gain * demand_factor(level);
    let surplus = (config.cl_total() - ideal_configuration(level).cl_total()).max(0.0);
    let downforce = gain * (config.cl_total() - REFERENCE_CL)
        - gain * (1.0 - SATURATED_DOWNFORCE_SHARE) * surplus;
    let drag = calibration.drag_penalty * (config.cd() - REFERENCE_CD);
    let mechanical = calibration.mechanical_gain * (tire_friction - REFERENCE_FRICTION) / 0.2;
    let signature = team_signature(class, config.cd(), config.cl_total());

    let raw = base + downforce - drag + mechanical + signature;
    round_dp(band.clamp(finite_or(raw, band.low(), "corner speed")), 2)
}

/// How strongly a level rewards downforce in corners.
fn demand_factor(level: DownforceLevel) -> f64 {
    match level {
        DownforceLevel::VeryLow => 0.35,
        DownforceLevel::Low => 0.9,
        DownforceLevel::Medium => 1.5,
        DownforceLevel::MediumHigh => 1.4,
        DownforceLevel::High => 1.6,
        DownforceLevel::VeryHigh => 1.45,
    }
}

/// Fraction of the band width the level shifts a bound by. Positive values
/// raise the floor, negative values lower the ceiling.
fn band_bias(level: DownforceLevel) -> f64 {
    match level {
        DownforceLevel::VeryLow => 0.1,
        DownforceLevel::Low
        | DownforceLevel::Medium
        | DownforceLevel::MediumHigh
        | DownforceLevel::High => 0.0,
        DownforceLevel::VeryHigh => -0.2,
    }
}

fn band_kmh(level: DownforceLevel, class: CornerClass) -> Band<f64> {
    let (low, high) = match class {
        CornerClass::Slow => (140.0, 160.0),
        CornerClass::Medium => (205.0, 230.0),
        CornerClass::Fast => (300.0, 330.0),
    };
    let bias = band_bias(level);
    let width = high - low;
    if bias >= 0.0 {
        Band::new(low + bias * width, high)
    } else {
        Band::new(low, high + bias * width)
    }
}
