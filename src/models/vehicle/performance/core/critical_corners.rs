//! Corner classes ranked by how much lap time they hold.

use std::fmt;

use uom::si::{
    f64::{Time, Velocity},
    length::meter,
    time::second,
    velocity::{kilometer_per_hour, meter_per_second},
};

use crate::{
    catalog::{CornerClass, DownforceLevel, Track},
    support::bounds::{Band, finite_or},
};

use super::{
    AeroConfiguration, CornerSpeedSolver, CornerSpeeds, Evaluator, PerformanceResult,
    TOP_SPEED_PER_CD_STEP,
    recommendation::{SetupDelta, SetupField, ideal_configuration, setup_deltas},
};

/// Importance of a corner class. Orders most important first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CornerTier {
    Critical,
    High,
    Medium,
}

impl fmt::Display for CornerTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Critical => "CRITICAL",
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
        })
    }
}

/// Lap time lost in a class relative to the ideal configuration.
///
/// Positive values mean the current configuration is slower.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TimeImpact {
    pub per_corner_min: Time,
    pub per_corner_max: Time,
    pub total: Time,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CornerAnnotation {
    pub class: CornerClass,
    pub tier: CornerTier,
    pub speed_band: Band<Velocity>,
    pub current_speed: Velocity,
    pub target_speed: Velocity,

    /// The setup deltas that matter for this class, ranked.
    pub setup: Vec<SetupDelta>,

    pub rationale: String,
    pub impact: TimeImpact,
    pub corner_count: usize,
}

/// Strengths and weaknesses of a configuration's corner speeds.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CornerInsights {
    pub name: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

pub(super) fn analyze(
    evaluator: &Evaluator,
    config: &AeroConfiguration,
    track: &Track,
) -> Vec<CornerAnnotation> {
    let friction = evaluator.params().tire_friction();
    let ideal = ideal_configuration(track.level());
    let current = CornerSpeedSolver::solve(config, track, friction);
    let target = CornerSpeedSolver::solve(&ideal, track, friction);
    let deltas = setup_deltas(config, &ideal);

    let share = corner_time_shares(track, &current);

    let mut annotations: Vec<_> = track
        .classes()
        .into_iter()
        .zip(share)
        .map(|(class, share)| {
            let current_speed = current.get(class);
            let target_speed = target.get(class);
            let gap = (current_speed - target_speed).get::<kilometer_per_hour>().abs();

            let tier = if is_dominant(class, track.level()) || gap >= 5.0 {
                CornerTier::Critical
            } else if gap >= 2.0 || share >= 0.35 {
                CornerTier::High
            } else {
                CornerTier::Medium
            };

            CornerAnnotation {
                class,
                tier,
                speed_band: CornerSpeedSolver::band(track.level(), class),
                current_speed,
                target_speed,
                setup: deltas
                    .iter()
                    .filter(|delta| relevant_fields(class).contains(&delta.field))
                    .cloned()
                    .collect(),
                rationale: rationale(class, track.level()),
                impact: impact(track, class, current_speed, target_speed),
                corner_count: track.zones_of(class).count(),
            }
        })
        .collect();

    annotations.sort_by(|a, b| {
        a.tier.cmp(&b.tier).then_with(|| {
            let a = a.impact.total.get::<second>().abs();
            let b = b.impact.total.get::<second>().abs();
            b.total_cmp(&a)
        })
    });
    annotations
}

/// Share of total corner time spent in each class present on the track.
fn corner_time_shares(track: &Track, speeds: &CornerSpeeds) -> Vec<f64> {
    let times: Vec<f64> = track
        .classes()
        .into_iter()
        .map(|class| {
            let speed = speeds.get(class).get::<meter_per_second>();
            track
                .zones_of(class)
                .map(|zone| zone.length().get::<meter>() / speed)
                .sum()
        })
        .collect();
    let total: f64 = times.iter().sum();
    times
        .into_iter()
        .map(|time| finite_or(time / total, 0.0, "corner time share"))
        .collect()
}

fn is_dominant(class: CornerClass, level: DownforceLevel) -> bool {
    matches!(
        (class, level),
        (
            CornerClass::Fast,
            DownforceLevel::VeryLow | DownforceLevel::Low
        ) | (
            CornerClass::Slow,
            DownforceLevel::High | DownforceLevel::VeryHigh
        )
    )
}

fn relevant_fields(class: CornerClass) -> &'static [SetupField] {
    match class {
        CornerClass::Slow => &[SetupField::ClTotal, SetupField::FrontWing, SetupField::RearWing],
        CornerClass::Medium => &[SetupField::ClTotal, SetupField::Clf, SetupField::Clr],
        CornerClass::Fast => &[
            SetupField::Cd,
            SetupField::ClTotal,
            SetupField::FrontRideHeight,
            SetupField::RearRideHeight,
        ],
    }
}

fn rationale(class: CornerClass, level: DownforceLevel) -> String {
    match class {
        CornerClass::Slow if is_dominant(class, level) => {
            "More time spent cornering makes downforce more valuable; mechanical grip and \
             high aero load are essential"
                .to_owned()
        }
        CornerClass::Slow => {
            "Mechanical grip leads at low speed; rear downforce prevents wheelspin on exit"
                .to_owned()
        }
        CornerClass::Medium => {
            "Aero balance is critical here: keep 38-42% of the load on the front axle".to_owned()
        }
        CornerClass::Fast if is_dominant(class, level) => format!(
            "Every 0.01 Cd costs about {:.0} km/h of top speed; carry only the downforce \
             stability needs",
            TOP_SPEED_PER_CD_STEP.abs()
        ),
        CornerClass::Fast => {
            "Downforce grows with the square of speed; optimize the L/D ratio (target ~4.5)"
                .to_owned()
        }
    }
}

fn impact(track: &Track, class: CornerClass, current: Velocity, target: Velocity) -> TimeImpact {
    let (current, target) = (
        current.get::<meter_per_second>(),
        target.get::<meter_per_second>(),
    );
    let per_zone: Vec<f64> = track
        .zones_of(class)
        .map(|zone| {
            let length = zone.length().get::<meter>();
            finite_or(length / current - length / target, 0.0, "corner time impact")
        })
        .collect();

    let min = per_zone.iter().copied().fold(f64::INFINITY, f64::min);
    let max = per_zone.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let total = per_zone.iter().sum();

    TimeImpact {
        per_corner_min: Time::new::<second>(if min.is_finite() { min } else { 0.0 }),
        per_corner_max: Time::new::<second>(if max.is_finite() { max } else { 0.0 }),
        total: Time::new::<second>(total),
    }
}

/// Judges each corner class of `result` against fixed speed thresholds.
#[must_use]
pub fn corner_insights(result: &PerformanceResult, name: &str) -> CornerInsights {
    let mut strengths = Vec::new();
    let mut weaknesses = Vec::new();

    for class in CornerClass::ALL {
        let speed = result.corner_speeds.get(class).get::<kilometer_per_hour>();
        let (strong, weak) = match class {
            CornerClass::Slow => (155.0, 145.0),
            CornerClass::Medium => (220.0, 212.0),
            CornerClass::Fast => (320.0, 310.0),
        };
        if speed >= strong {
            strengths.push(format!("Strong in {class} corners ({speed:.1} km/h)"));
        } else if speed <= weak {
            weaknesses.push(format!("Weak in {class} corners ({speed:.1} km/h)"));
        }
    }

    CornerInsights {
        name: name.to_owned(),
        strengths,
        weaknesses,
    }
}
