//! Side-by-side comparisons, season forecasts, field rankings, parameter
//! sweeps and reference-lap checks.

use std::{cmp::Ordering, fmt};

use uom::si::{
    f64::{Time, Velocity},
    ratio::ratio,
};

use crate::{
    catalog::Track,
    support::constraint::{Constrained, UnitIntervalLowerOpen},
};

use super::{AeroConfiguration, CornerSpeeds, Evaluator, PerformanceResult, round_dp};

/// Number of evenly spaced points in a sensitivity sweep.
pub const SENSITIVITY_POINTS: usize = 11;

/// Which configuration set the quicker qualifying lap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Faster {
    First,
    Second,
    Tie,
}

/// Two configurations evaluated on the same track.
///
/// All deltas are `first − second`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ConfigurationComparison {
    pub first: PerformanceResult,
    pub second: PerformanceResult,
    pub top_speed_delta: Velocity,
    pub corner_deltas: CornerSpeeds,
    pub qualifying_delta: Time,
    pub faster: Faster,
}

pub(super) fn compare(
    evaluator: &Evaluator,
    first: &AeroConfiguration,
    second: &AeroConfiguration,
    track: &Track,
) -> ConfigurationComparison {
    let first = evaluator.evaluate(first, track);
    let second = evaluator.evaluate(second, track);

    let faster = match first
        .lap_time
        .qualifying
        .partial_cmp(&second.lap_time.qualifying)
    {
        Some(Ordering::Less) => Faster::First,
        Some(Ordering::Greater) => Faster::Second,
        _ => Faster::Tie,
    };

    ConfigurationComparison {
        top_speed_delta: first.top_speed.speed - second.top_speed.speed,
        corner_deltas: CornerSpeeds {
            slow: first.corner_speeds.slow - second.corner_speeds.slow,
            medium: first.corner_speeds.medium - second.corner_speeds.medium,
            fast: first.corner_speeds.fast - second.corner_speeds.fast,
        },
        qualifying_delta: first.lap_time.qualifying - second.lap_time.qualifying,
        faster,
        first,
        second,
    }
}

/// One race of a [`SeasonForecast`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RaceForecast {
    pub track: String,
    pub winner: Faster,

    /// Qualifying gap between the two configurations, never negative.
    pub margin: Time,
}

/// Two configurations raced over a list of tracks.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SeasonForecast {
    /// One entry per track, in the order given.
    pub races: Vec<RaceForecast>,

    pub first_wins: usize,
    pub second_wins: usize,
    pub ties: usize,
}

impl SeasonForecast {
    /// The configuration expected to win more races.
    #[must_use]
    pub fn overall(&self) -> Faster {
        match self.first_wins.cmp(&self.second_wins) {
            Ordering::Greater => Faster::First,
            Ordering::Less => Faster::Second,
            Ordering::Equal => Faster::Tie,
        }
    }

    /// Share of races won by the first configuration, percent rounded to 0.1.
    ///
    /// Zero for an empty season.
    #[must_use]
    pub fn first_win_percentage(&self) -> f64 {
        self.win_percentage(self.first_wins)
    }

    /// Share of races won by the second configuration, percent rounded to 0.1.
    #[must_use]
    pub fn second_win_percentage(&self) -> f64 {
        self.win_percentage(self.second_wins)
    }

    fn win_percentage(&self, wins: usize) -> f64 {
        if self.races.is_empty() {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let share = wins as f64 / self.races.len() as f64;
        round_dp(share * 100.0, 1)
    }
}

pub(super) fn forecast_season(
    evaluator: &Evaluator,
    first: &AeroConfiguration,
    second: &AeroConfiguration,
    tracks: &[&Track],
) -> SeasonForecast {
    let races: Vec<_> = tracks
        .iter()
        .map(|track| {
            let comparison = compare(evaluator, first, second, track);
            RaceForecast {
                track: track.id().to_owned(),
                winner: comparison.faster,
                margin: comparison.qualifying_delta.abs(),
            }
        })
        .collect();

    let count = |winner| races.iter().filter(|race| race.winner == winner).count();
    let forecast = SeasonForecast {
        first_wins: count(Faster::First),
        second_wins: count(Faster::Second),
        ties: count(Faster::Tie),
        races,
    };
    tracing::debug!(
        races = forecast.races.len(),
        first_wins = forecast.first_wins,
        second_wins = forecast.second_wins,
        "season forecast"
    );
    forecast
}

/// One entry of a [`TeamRanking`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TeamStanding {
    /// 1-based.
    pub position: usize,
    pub team: String,
    pub result: PerformanceResult,

    /// Qualifying gap to the first entry, zero for the leader.
    pub gap_to_leader: Time,
}

/// A field of configurations ordered by qualifying lap on one track.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TeamRanking {
    pub track: String,

    /// Quickest first; equal laps are ordered by team name.
    pub standings: Vec<TeamStanding>,
}

impl TeamRanking {
    #[must_use]
    pub fn leader(&self) -> Option<&TeamStanding> {
        self.standings.first()
    }

    #[must_use]
    pub fn position_of(&self, team: &str) -> Option<usize> {
        self.standings
            .iter()
            .find(|standing| standing.team.eq_ignore_ascii_case(team))
            .map(|standing| standing.position)
    }
}

pub(super) fn rank<'a>(
    evaluator: &Evaluator,
    entries: impl IntoIterator<Item = (&'a str, AeroConfiguration)>,
    track: &Track,
) -> TeamRanking {
    let mut evaluated: Vec<_> = entries
        .into_iter()
        .map(|(team, config)| (team, evaluator.evaluate(&config, track)))
        .collect();
    evaluated.sort_by(|(a_team, a), (b_team, b)| {
        a.lap_time
            .qualifying
            .partial_cmp(&b.lap_time.qualifying)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a_team.cmp(b_team))
    });

    let track = track.id().to_owned();
    let Some(leader) = evaluated
        .first()
        .map(|(_, result)| result.lap_time.qualifying)
    else {
        return TeamRanking {
            track,
            standings: Vec::new(),
        };
    };

    let standings = evaluated
        .into_iter()
        .enumerate()
        .map(|(i, (team, result))| TeamStanding {
            position: i + 1,
            team: team.to_owned(),
            gap_to_leader: result.lap_time.qualifying - leader,
            result,
        })
        .collect();

    TeamRanking { track, standings }
}

/// Coefficient varied by a sensitivity sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SensitivityParameter {
    Cd,
    Clf,
    Clr,
}

impl SensitivityParameter {
    fn index(self) -> usize {
        match self {
            Self::Cd => 0,
            Self::Clf => 1,
            Self::Clr => 2,
        }
    }
}

impl fmt::Display for SensitivityParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cd => "cd",
            Self::Clf => "clf",
            Self::Clr => "clr",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SensitivityPoint {
    /// Coefficient value after clamping into range.
    pub value: f64,

    pub top_speed: Velocity,
    pub corner_speeds: CornerSpeeds,
    pub qualifying: Time,
}

/// Sweeps `parameter` over `base · (1 ± span)`.
pub(super) fn sensitivity(
    evaluator: &Evaluator,
    config: &AeroConfiguration,
    track: &Track,
    parameter: SensitivityParameter,
    span: Constrained<f64, UnitIntervalLowerOpen>,
) -> Vec<SensitivityPoint> {
    let span = span.into_inner();
    let base = config.coefficients();
    let index = parameter.index();

    #[allow(clippy::cast_precision_loss)]
    let last = (SENSITIVITY_POINTS - 1) as f64;

    (0..SENSITIVITY_POINTS)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let scale = 1.0 - span + 2.0 * span * i as f64 / last;
            let mut coefficients = base;
            coefficients[index] = base[index] * scale;
            let swept = config.with_coefficients(coefficients);

            let result = evaluator.evaluate(&swept, track);
            SensitivityPoint {
                value: swept.coefficients()[index],
                top_speed: result.top_speed.speed,
                corner_speeds: result.corner_speeds,
                qualifying: result.lap_time.qualifying,
            }
        })
        .collect()
}

/// Predicted qualifying lap against the track's reference lap.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ReferenceComparison {
    pub predicted: Time,
    pub reference: Time,

    /// `predicted − reference`.
    pub delta: Time,

    /// `delta` as a percentage of `reference`, rounded to 0.01.
    pub percent: f64,
}

pub(super) fn compare_with_reference(
    result: &PerformanceResult,
    track: &Track,
) -> Option<ReferenceComparison> {
    let reference = track.reference_lap()?;
    let predicted = result.lap_time.qualifying;
    let delta = predicted - reference;
    Some(ReferenceComparison {
        predicted,
        reference,
        delta,
        percent: round_dp((delta / reference).get::<ratio>() * 100.0, 2),
    })
}
