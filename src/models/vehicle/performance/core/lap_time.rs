//! Lap-time estimate from corner speeds, top speed and track geometry.
//!
//! The lap alternates corner zones and the straights between them; the
//! straight after the last zone wraps around the start line into the first.
//! Corner zones are driven at their class speed (never above top speed).
//! Straights are integrated on a fixed distance grid: a forward pass
//! accelerates out of the previous corner under the car's traction and power
//! limits, capped at top speed, and a backward pass brakes into the next
//! corner. The speed profile is the pointwise minimum of the two passes.

use uom::si::{
    f64::{Length, Time, Velocity},
    length::meter,
    time::{millisecond, second},
    velocity::meter_per_second,
};

use crate::{
    catalog::Track,
    support::bounds::{finite_or, record_violation},
};

use super::{CornerSpeeds, dynamics::Dynamics, round_dp};

/// Race lap time over qualifying lap time (fuel load and tire management).
pub const RACE_LAP_PENALTY_FACTOR: f64 = 1.010;

/// Lap-time estimate for one configuration on one track.
///
/// For every track, `length / top_speed ≤ qualifying ≤ length / slowest
/// corner speed` (up to the millisecond rounding).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LapTimeEstimate {
    /// Flying lap, rounded to the millisecond.
    pub qualifying: Time,

    /// `qualifying × RACE_LAP_PENALTY_FACTOR`, rounded to the millisecond.
    pub race: Time,

    /// Time spent between corner zones.
    pub straight_time: Time,

    /// Time spent inside corner zones.
    pub corner_time: Time,
}

/// Estimates a flying lap.
///
/// All speeds are in m/s from here on.
pub(super) fn estimate(
    dynamics: &Dynamics,
    track: &Track,
    corners: &CornerSpeeds,
    top_speed: Velocity,
    step: Length,
) -> LapTimeEstimate {
    let top = top_speed.get::<meter_per_second>();
    let step = step.get::<meter>();
    let length = track.length().get::<meter>();
    let zones = track.zones();

    let (corner_time, straight_time) = if zones.is_empty() {
        (0.0, straight(dynamics, length, top, top, top, step))
    } else {
        let speeds: Vec<f64> = zones
            .iter()
            .map(|zone| corners.get(zone.class()).get::<meter_per_second>().min(top))
            .collect();

        let corner_time = zones
            .iter()
            .zip(&speeds)
            .map(|(zone, &speed)| {
                finite_or(
                    zone.length().get::<meter>() / speed,
                    0.0,
                    "corner zone time",
                )
            })
            .sum();

        let straight_time = zones
            .iter()
            .enumerate()
            .map(|(i, zone)| {
                let next = (i + 1) % zones.len();
                let gap = if next == 0 {
                    length - zone.end().get::<meter>() + zones[0].start().get::<meter>()
                } else {
                    zones[next].start().get::<meter>() - zone.end().get::<meter>()
                };
                straight(dynamics, gap, speeds[i], speeds[next], top, step)
            })
            .sum();

        (corner_time, straight_time)
    };

    let qualifying = round_dp(corner_time + straight_time, 3);
    let race = round_dp(qualifying * RACE_LAP_PENALTY_FACTOR, 3);

    LapTimeEstimate {
        qualifying: Time::new::<second>(qualifying),
        race: Time::new::<second>(race),
        straight_time: Time::new::<second>(straight_time),
        corner_time: Time::new::<second>(corner_time),
    }
}

/// Time to cover a straight of `distance` metres from `entry` to `exit` speed.
fn straight(dynamics: &Dynamics, distance: f64, entry: f64, exit: f64, top: f64, step: f64) -> f64 {
    if distance <= 0.0 {
        return 0.0;
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let steps = (distance / step).ceil().max(1.0) as usize;
    #[allow(clippy::cast_precision_loss)]
    let ds = distance / steps as f64;

    let mut forward = Vec::with_capacity(steps + 1);
    let mut speed = entry.min(top);
    forward.push(speed);
    for _ in 0..steps {
        let squared = speed * speed + 2.0 * dynamics.acceleration(speed) * ds;
        speed = finite_or(squared.max(0.0).sqrt(), speed, "straight acceleration").min(top);
        forward.push(speed);
    }

    let mut profile = forward;
    let mut braking = exit.min(top);
    for k in (0..=steps).rev() {
        if k < steps {
            braking = (braking * braking + 2.0 * dynamics.braking() * ds).sqrt();
        }
        profile[k] = profile[k].min(braking);
    }

    let time: f64 = profile
        .windows(2)
        .map(|pair| ds / (0.5 * (pair[0] + pair[1])))
        .sum();

    if time.is_finite() {
        time
    } else {
        let fallback = distance / entry.min(exit).min(top);
        record_violation("straight time", time, fallback);
        fallback
    }
}

/// Formats a lap time as `M:SS.mmm`.
///
/// ```
/// use downforce_models::models::vehicle::performance::format_lap_time;
/// use uom::si::{f64::Time, time::second};
///
/// assert_eq!(format_lap_time(Time::new::<second>(79.327)), "1:19.327");
/// assert_eq!(format_lap_time(Time::new::<second>(59.9996)), "1:00.000");
/// ```
#[must_use]
pub fn format_lap_time(time: Time) -> String {
    let millis = time.get::<millisecond>();
    if !millis.is_finite() || millis < 0.0 {
        return "-:--.---".to_owned();
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let millis = millis.round() as u64;
    let minutes = millis / 60_000;
    let seconds = (millis % 60_000) / 1000;
    let millis = millis % 1000;
    format!("{minutes}:{seconds:02}.{millis:03}")
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::velocity::kilometer_per_hour;

    use crate::{
        catalog::{CornerClass, CornerZone, DownforceLevel, TrackCatalog},
        models::vehicle::performance::core::{
            AeroConfiguration, CornerSpeedSolver, EngineConfig, TopSpeedSolver,
            test_support::track,
        },
    };

    fn setup(config: &AeroConfiguration, track: &Track) -> (Dynamics, CornerSpeeds, Velocity) {
        let params = EngineConfig::default().validate().unwrap();
        let corners = CornerSpeedSolver::solve(config, track, params.tire_friction());
        let top = TopSpeedSolver::new(&params).solve(config, track.level()).speed;
        let dynamics =
            Dynamics::new(&params, config).with_terminal_speed(top.get::<meter_per_second>());
        (dynamics, corners, top)
    }

    fn step() -> Length {
        Length::new::<meter>(2.0)
    }

    #[test]
    fn lap_time_within_envelope_on_every_track() {
        let config = AeroConfiguration::reference();
        for track in TrackCatalog::builtin().iter() {
            let (dynamics, corners, top) = setup(&config, track);
            let lap = estimate(&dynamics, track, &corners, top, step());

            let length = track.length().get::<meter>();
            let slowest = CornerClass::ALL
                .into_iter()
                .filter(|&class| track.zones_of(class).next().is_some())
                .map(|class| corners.get(class).get::<meter_per_second>())
                .fold(f64::INFINITY, f64::min);
            let q = lap.qualifying.get::<second>();

            assert!(q >= length / top.get::<meter_per_second>() - 1e-3, "{}", track.id());
            assert!(q <= length / slowest + 1e-3, "{}", track.id());
            assert_relative_eq!(
                q,
                (lap.corner_time + lap.straight_time).get::<second>(),
                epsilon = 5e-4
            );
        }
    }

    #[test]
    fn race_lap_is_penalized() {
        let monza = track("monza");
        let (dynamics, corners, top) = setup(&AeroConfiguration::reference(), monza);
        let lap = estimate(&dynamics, monza, &corners, top, step());
        assert_relative_eq!(
            lap.race.get::<second>(),
            lap.qualifying.get::<second>() * RACE_LAP_PENALTY_FACTOR,
            epsilon = 5e-4
        );
        assert!(lap.race > lap.qualifying);
    }

    #[test]
    fn track_without_corners_is_a_flat_out_lap() {
        let oval = Track::new(
            "drag_strip",
            "Drag Strip",
            Length::new::<meter>(3000.0),
            DownforceLevel::VeryLow,
            Vec::new(),
        );
        let (dynamics, corners, top) = setup(&AeroConfiguration::reference(), &oval);
        let lap = estimate(&dynamics, &oval, &corners, top, step());
        // Starts, stays and ends at top speed.
        assert_relative_eq!(
            lap.qualifying.get::<second>(),
            3000.0 / top.get::<meter_per_second>(),
            epsilon = 1e-3
        );
        assert_relative_eq!(lap.corner_time.get::<second>(), 0.0);
    }

    #[test]
    fn single_zone_wraps_around() {
        let zone = CornerZone::new(
            1,
            Length::new::<meter>(1000.0),
            Length::new::<meter>(1200.0),
            CornerClass::Slow,
            "Hairpin",
            Velocity::new::<kilometer_per_hour>(150.0),
        );
        let loop_track = Track::new(
            "loop",
            "Loop",
            Length::new::<meter>(2000.0),
            DownforceLevel::Medium,
            vec![zone],
        );
        let (dynamics, corners, top) = setup(&AeroConfiguration::reference(), &loop_track);
        let lap = estimate(&dynamics, &loop_track, &corners, top, step());

        let slow = corners.slow.get::<meter_per_second>();
        assert_relative_eq!(lap.corner_time.get::<second>(), 200.0 / slow, epsilon = 1e-9);
        // 1800 m of straight, never slower than the hairpin.
        assert!(lap.straight_time.get::<second>() < 1800.0 / slow);
        assert!(lap.straight_time.get::<second>() > 1800.0 / top.get::<meter_per_second>());
    }

    #[test]
    fn straight_profile_is_bounded_by_entry_and_exit() {
        let params = EngineConfig::default().validate().unwrap();
        let dynamics = Dynamics::new(&params, &AeroConfiguration::reference());
        let time = straight(&dynamics, 1000.0, 40.0, 60.0, 95.0, 2.0);
        assert!(time < 1000.0 / 40.0);
        assert!(time > 1000.0 / 95.0);
        assert_relative_eq!(straight(&dynamics, 0.0, 40.0, 60.0, 95.0, 2.0), 0.0);
    }

    #[test]
    fn formats_lap_times() {
        assert_eq!(format_lap_time(Time::new::<second>(70.27)), "1:10.270");
        assert_eq!(format_lap_time(Time::new::<second>(113.159)), "1:53.159");
        assert_eq!(format_lap_time(Time::new::<second>(f64::NAN)), "-:--.---");
    }
}
