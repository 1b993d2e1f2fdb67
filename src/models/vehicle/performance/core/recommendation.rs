//! Setup recommendations against a per-level ideal configuration.

use std::fmt;

use uom::si::{
    angle::degree,
    f64::{Angle, Length, Time},
    length::{kilometer, millimeter},
};

use crate::catalog::{DownforceLevel, Track};

use super::{AeroConfiguration, Evaluator};

/// A configuration field compared by the recommender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SetupField {
    Cd,
    ClTotal,
    Clf,
    Clr,
    FrontWing,
    RearWing,
    FrontRideHeight,
    RearRideHeight,
}

impl SetupField {
    pub const ALL: [SetupField; 8] = [
        Self::Cd,
        Self::ClTotal,
        Self::Clf,
        Self::Clr,
        Self::FrontWing,
        Self::RearWing,
        Self::FrontRideHeight,
        Self::RearRideHeight,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Cd => "Cd",
            Self::ClTotal => "CL total",
            Self::Clf => "CL front",
            Self::Clr => "CL rear",
            Self::FrontWing => "front wing",
            Self::RearWing => "rear wing",
            Self::FrontRideHeight => "front ride height",
            Self::RearRideHeight => "rear ride height",
        }
    }

    #[must_use]
    pub fn unit(self) -> &'static str {
        match self {
            Self::Cd | Self::ClTotal | Self::Clf | Self::Clr => "",
            Self::FrontWing | Self::RearWing => "deg",
            Self::FrontRideHeight | Self::RearRideHeight => "mm",
        }
    }

    /// Differences smaller than this count as optimal.
    #[must_use]
    pub fn tolerance(self) -> f64 {
        match self {
            Self::Cd => 0.01,
            Self::ClTotal => 0.2,
            Self::Clf | Self::Clr => 0.1,
            Self::FrontWing | Self::RearWing | Self::FrontRideHeight | Self::RearRideHeight => 1.0,
        }
    }

    /// Value of this field in `config`, in [`unit`](Self::unit).
    #[must_use]
    pub fn value(self, config: &AeroConfiguration) -> f64 {
        match self {
            Self::Cd => config.cd(),
            Self::ClTotal => config.cl_total(),
            Self::Clf => config.clf(),
            Self::Clr => config.clr(),
            Self::FrontWing => config.front_wing().get::<degree>(),
            Self::RearWing => config.rear_wing().get::<degree>(),
            Self::FrontRideHeight => config.front_ride_height().get::<millimeter>(),
            Self::RearRideHeight => config.rear_ride_height().get::<millimeter>(),
        }
    }

    fn advice(self, direction: Adjustment) -> &'static str {
        match (self, direction) {
            (_, Adjustment::Optimal) => "within tolerance",
            (Self::Cd, Adjustment::Reduce) => "too high - reduce drag",
            (Self::Cd, Adjustment::Increase) => "too low - trade straight-line speed for grip",
            (Self::ClTotal | Self::Clf | Self::Clr, Adjustment::Increase) => {
                "too low - add downforce"
            }
            (Self::ClTotal | Self::Clf | Self::Clr, Adjustment::Reduce) => {
                "too high - shed downforce"
            }
            (Self::FrontWing | Self::RearWing, Adjustment::Increase) => {
                "too flat - add wing angle"
            }
            (Self::FrontWing | Self::RearWing, Adjustment::Reduce) => {
                "too steep - trim wing angle"
            }
            (Self::FrontRideHeight | Self::RearRideHeight, Adjustment::Increase) => {
                "too low - raise ride height"
            }
            (Self::FrontRideHeight | Self::RearRideHeight, Adjustment::Reduce) => {
                "too high - lower ride height"
            }
        }
    }
}

impl fmt::Display for SetupField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Adjustment {
    Optimal,
    Increase,
    Reduce,
}

/// Current versus target value of one field.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SetupDelta {
    pub field: SetupField,
    pub current: f64,
    pub target: f64,

    /// `target - current`.
    pub delta: f64,

    pub direction: Adjustment,
    pub advice: &'static str,
}

impl SetupDelta {
    fn between(field: SetupField, current: &AeroConfiguration, target: &AeroConfiguration) -> Self {
        let (current, target) = (field.value(current), field.value(target));
        let delta = target - current;
        let direction = if delta.abs() < field.tolerance() {
            Adjustment::Optimal
        } else if delta > 0.0 {
            Adjustment::Increase
        } else {
            Adjustment::Reduce
        };
        Self {
            field,
            current,
            target,
            delta,
            direction,
            advice: field.advice(direction),
        }
    }

    /// `|delta|` in units of the field's tolerance.
    #[must_use]
    pub fn normalized(&self) -> f64 {
        self.delta.abs() / self.field.tolerance()
    }
}

/// The single overriding priority for a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Directive {
    MaximizeDownforce,
    MinimizeDrag,
    Balanced,
}

impl Directive {
    #[must_use]
    pub fn for_level(level: DownforceLevel) -> Self {
        match level {
            DownforceLevel::VeryLow | DownforceLevel::Low => Self::MinimizeDrag,
            DownforceLevel::Medium | DownforceLevel::MediumHigh => Self::Balanced,
            DownforceLevel::High | DownforceLevel::VeryHigh => Self::MaximizeDownforce,
        }
    }

    #[must_use]
    pub fn summary(self) -> &'static str {
        match self {
            Self::MaximizeDownforce => "Corner speed critical",
            Self::MinimizeDrag => "Top speed paramount",
            Self::Balanced => "Optimize L/D ratio",
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MaximizeDownforce => "MAXIMIZE_DOWNFORCE",
            Self::MinimizeDrag => "MINIMIZE_DRAG",
            Self::Balanced => "BALANCED",
        })
    }
}

/// Recommended changes for one configuration on one track.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SetupRecommendation {
    pub track: String,
    pub level: DownforceLevel,
    pub ideal: AeroConfiguration,

    /// Every compared field, largest normalized difference first.
    pub deltas: Vec<SetupDelta>,

    pub directive: Directive,
    pub key_focus: String,

    /// Qualifying time saved by switching to `ideal` (negative if the
    /// current configuration is already faster).
    pub qualifying_gain: Time,

    /// Race-lap time saved by switching to `ideal`.
    pub race_gain: Time,
}

/// Target configuration for a downforce level.
#[must_use]
pub fn ideal_configuration(level: DownforceLevel) -> AeroConfiguration {
    let (coefficients, wings, ride_heights) = match level {
        DownforceLevel::VeryLow => ([0.66, 1.15, 1.50], [14.0, 16.0], [15.0, 18.0]),
        DownforceLevel::Low => ([0.68, 1.20, 1.60], [15.0, 18.0], [15.0, 18.0]),
        DownforceLevel::Medium => ([0.70, 1.50, 2.00], [22.0, 26.0], [12.0, 14.0]),
        DownforceLevel::MediumHigh => ([0.72, 1.60, 2.15], [26.0, 30.0], [10.0, 12.0]),
        DownforceLevel::High => ([0.75, 1.80, 2.40], [30.0, 35.0], [8.0, 10.0]),
        DownforceLevel::VeryHigh => ([0.77, 1.90, 2.60], [32.0, 37.0], [8.0, 10.0]),
    };
    AeroConfiguration::clamped(
        coefficients,
        wings.map(Angle::new::<degree>),
        ride_heights.map(Length::new::<millimeter>),
    )
}

/// Compares every [`SetupField`] of `current` against `target`, ranked by
/// normalized difference.
#[must_use]
pub fn setup_deltas(current: &AeroConfiguration, target: &AeroConfiguration) -> Vec<SetupDelta> {
    let mut deltas: Vec<_> = SetupField::ALL
        .into_iter()
        .map(|field| SetupDelta::between(field, current, target))
        .collect();
    deltas.sort_by(|a, b| b.normalized().total_cmp(&a.normalized()));
    deltas
}

fn key_focus(track: &Track) -> String {
    let corners = track.corner_count();
    if corners >= 12 {
        format!("High corner density ({corners} corner zones) - mechanical grip crucial")
    } else if track.length().get::<kilometer>() > 6.0 {
        "Long circuit - aero efficiency over the whole lap matters".to_owned()
    } else {
        "Standard circuit - balanced approach".to_owned()
    }
}

pub(super) fn recommend(
    evaluator: &Evaluator,
    config: &AeroConfiguration,
    track: &Track,
) -> SetupRecommendation {
    let level = track.level();
    let ideal = ideal_configuration(level);

    let current_lap = evaluator.evaluate(config, track).lap_time;
    let ideal_lap = evaluator.evaluate(&ideal, track).lap_time;

    SetupRecommendation {
        track: track.id().to_owned(),
        level,
        ideal,
        deltas: setup_deltas(config, &ideal),
        directive: Directive::for_level(level),
        key_focus: key_focus(track),
        qualifying_gain: current_lap.qualifying - ideal_lap.qualifying,
        race_gain: current_lap.race - ideal_lap.race,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::time::second;

    use crate::models::vehicle::performance::core::test_support::{evaluator, track};

    #[test]
    fn deltas_are_ranked_by_normalized_size() {
        let current = AeroConfiguration::reference();
        let target = ideal_configuration(DownforceLevel::VeryHigh);
        let deltas = setup_deltas(&current, &target);

        assert_eq!(deltas.len(), SetupField::ALL.len());
        for pair in deltas.windows(2) {
            assert!(pair[0].normalized() >= pair[1].normalized());
        }

        let cd = deltas.iter().find(|d| d.field == SetupField::Cd).unwrap();
        assert_relative_eq!(cd.delta, 0.07, epsilon = 1e-12);
        assert_eq!(cd.direction, Adjustment::Increase);

        let front_rh = deltas
            .iter()
            .find(|d| d.field == SetupField::FrontRideHeight)
            .unwrap();
        assert_eq!(front_rh.direction, Adjustment::Reduce);
        assert_eq!(front_rh.advice, "too high - lower ride height");
    }

    #[test]
    fn matching_configuration_is_optimal_everywhere() {
        let ideal = ideal_configuration(DownforceLevel::Medium);
        assert!(
            setup_deltas(&ideal, &ideal)
                .iter()
                .all(|d| d.direction == Adjustment::Optimal)
        );
    }

    #[test]
    fn directive_follows_level() {
        assert_eq!(
            Directive::for_level(DownforceLevel::VeryLow),
            Directive::MinimizeDrag
        );
        assert_eq!(
            Directive::for_level(DownforceLevel::MediumHigh),
            Directive::Balanced
        );
        assert_eq!(
            Directive::for_level(DownforceLevel::VeryHigh).to_string(),
            "MAXIMIZE_DOWNFORCE"
        );
    }

    #[test]
    fn gain_is_difference_of_estimates() {
        let evaluator = evaluator();
        let monaco = track("monaco");
        let current = AeroConfiguration::new(0.66, 1.15, 1.50).unwrap();

        let rec = recommend(&evaluator, &current, monaco);
        let current_q = evaluator.evaluate(&current, monaco).lap_time.qualifying;
        let ideal_q = evaluator.evaluate(&rec.ideal, monaco).lap_time.qualifying;

        assert_eq!(rec.qualifying_gain, current_q - ideal_q);
        assert_eq!(rec.directive, Directive::MaximizeDownforce);
        assert!(rec.key_focus.starts_with("High corner density (13"));
        assert!(rec.qualifying_gain.get::<second>().is_finite());
    }

    #[test]
    fn reference_setup_gains_from_low_drag_ideal_on_monza() {
        let rec = recommend(
            &evaluator(),
            &AeroConfiguration::reference(),
            track("monza"),
        );
        assert_eq!(rec.level, DownforceLevel::VeryLow);
        assert!(rec.qualifying_gain.get::<second>() > 0.5);
        assert!(rec.race_gain > rec.qualifying_gain);
    }

    #[test]
    fn key_focus_by_geometry() {
        assert!(key_focus(track("azerbaijan")).starts_with("Long circuit"));
        assert!(key_focus(track("bahrain")).starts_with("Standard circuit"));
    }
}
