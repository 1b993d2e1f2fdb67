use std::{collections::HashSet, fmt, sync::LazyLock};

use uom::si::{
    f64::{Length, Time, Velocity},
    length::meter,
    velocity::kilometer_per_hour,
};

use super::{CatalogError, CatalogKind, builtin};

/// Coarse aerodynamic regime of a corner.
///
/// A track's corners are bucketed into three classes and analyzed per class
/// rather than individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CornerClass {
    Slow,
    Medium,
    Fast,
}

impl CornerClass {
    /// All classes, slowest first.
    pub const ALL: [CornerClass; 3] = [Self::Slow, Self::Medium, Self::Fast];

    /// Reference speed used when a track has no zone of this class.
    #[must_use]
    pub fn nominal_reference(self) -> Velocity {
        let kmh = match self {
            Self::Slow => 150.0,
            Self::Medium => 217.5,
            Self::Fast => 315.0,
        };
        Velocity::new::<kilometer_per_hour>(kmh)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Slow => "slow",
            Self::Medium => "medium",
            Self::Fast => "fast",
        }
    }
}

impl fmt::Display for CornerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How much downforce a track rewards, from Monza-like to Monaco-like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DownforceLevel {
    VeryLow,
    Low,
    Medium,
    MediumHigh,
    High,
    VeryHigh,
}

impl DownforceLevel {
    pub const ALL: [DownforceLevel; 6] = [
        Self::VeryLow,
        Self::Low,
        Self::Medium,
        Self::MediumHigh,
        Self::High,
        Self::VeryHigh,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::VeryLow => "very_low",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::MediumHigh => "medium_high",
            Self::High => "high",
            Self::VeryHigh => "very_high",
        }
    }
}

impl fmt::Display for DownforceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stretch of track driven at a corner-class speed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CornerZone {
    number: u32,
    start: Length,
    end: Length,
    class: CornerClass,
    label: String,
    ideal_speed: Velocity,
}

impl CornerZone {
    /// Creates a corner zone.
    ///
    /// Zones are validated when their track enters a [`TrackCatalog`].
    #[must_use]
    pub fn new(
        number: u32,
        start: Length,
        end: Length,
        class: CornerClass,
        label: impl Into<String>,
        ideal_speed: Velocity,
    ) -> Self {
        Self {
            number,
            start,
            end,
            class,
            label: label.into(),
            ideal_speed,
        }
    }

    #[must_use]
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Distance from the start line to the zone entry.
    #[must_use]
    pub fn start(&self) -> Length {
        self.start
    }

    /// Distance from the start line to the zone exit.
    #[must_use]
    pub fn end(&self) -> Length {
        self.end
    }

    #[must_use]
    pub fn length(&self) -> Length {
        self.end - self.start
    }

    #[must_use]
    pub fn class(&self) -> CornerClass {
        self.class
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Speed a well-balanced car carries through this zone.
    #[must_use]
    pub fn ideal_speed(&self) -> Velocity {
        self.ideal_speed
    }
}

/// A circuit: its length, corner zones in lap order and downforce demand.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Track {
    id: String,
    name: String,
    length: Length,
    level: DownforceLevel,
    zones: Vec<CornerZone>,
    reference_lap: Option<Time>,
}

impl Track {
    /// Creates a track.
    ///
    /// `zones` must be in lap order; [`TrackCatalog::new`] rejects tracks
    /// whose zones overlap or run past the finish line.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        length: Length,
        level: DownforceLevel,
        zones: Vec<CornerZone>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            length,
            level,
            zones,
            reference_lap: None,
        }
    }

    /// Attaches a reference qualifying lap (e.g. a recent pole time).
    #[must_use]
    pub fn with_reference_lap(mut self, lap: Time) -> Self {
        self.reference_lap = Some(lap);
        self
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn length(&self) -> Length {
        self.length
    }

    #[must_use]
    pub fn level(&self) -> DownforceLevel {
        self.level
    }

    #[must_use]
    pub fn zones(&self) -> &[CornerZone] {
        &self.zones
    }

    #[must_use]
    pub fn corner_count(&self) -> usize {
        self.zones.len()
    }

    #[must_use]
    pub fn reference_lap(&self) -> Option<Time> {
        self.reference_lap
    }

    /// Zones of the given class, in lap order.
    pub fn zones_of(&self, class: CornerClass) -> impl Iterator<Item = &CornerZone> {
        self.zones.iter().filter(move |zone| zone.class == class)
    }

    /// Corner classes present on this track, slowest first.
    #[must_use]
    pub fn classes(&self) -> Vec<CornerClass> {
        CornerClass::ALL
            .into_iter()
            .filter(|&class| self.zones_of(class).next().is_some())
            .collect()
    }

    /// Reference speed of a corner class on this track.
    ///
    /// The mean ideal speed of the track's zones in that class, or
    /// [`CornerClass::nominal_reference`] if the track has none.
    #[must_use]
    pub fn class_reference(&self, class: CornerClass) -> Velocity {
        let (sum, count) = self
            .zones_of(class)
            .fold((0.0, 0_u32), |(sum, count), zone| {
                (sum + zone.ideal_speed.get::<kilometer_per_hour>(), count + 1)
            });
        if count == 0 {
            class.nominal_reference()
        } else {
            Velocity::new::<kilometer_per_hour>(sum / f64::from(count))
        }
    }

    /// Checks the track geometry.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] describing the first problem found.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let length = self.length.get::<meter>();
        if !length.is_finite() || length <= 0.0 {
            return Err(CatalogError::InvalidLength {
                track: self.id.clone(),
            });
        }

        let mut previous: Option<&CornerZone> = None;
        for zone in &self.zones {
            let (start, end) = (zone.start.get::<meter>(), zone.end.get::<meter>());
            if !start.is_finite() || !end.is_finite() || end <= start {
                return Err(CatalogError::EmptyZone {
                    track: self.id.clone(),
                    label: zone.label.clone(),
                });
            }
            if start < 0.0 || end > length {
                return Err(CatalogError::ZoneOutOfBounds {
                    track: self.id.clone(),
                    label: zone.label.clone(),
                });
            }
            let speed = zone.ideal_speed.get::<kilometer_per_hour>();
            if !speed.is_finite() || speed <= 0.0 {
                return Err(CatalogError::InvalidIdealSpeed {
                    track: self.id.clone(),
                    label: zone.label.clone(),
                });
            }
            if let Some(prev) = previous
                && zone.start < prev.end
            {
                return Err(CatalogError::OverlappingZones {
                    track: self.id.clone(),
                    first: prev.label.clone(),
                    second: zone.label.clone(),
                });
            }
            previous = Some(zone);
        }
        Ok(())
    }

    fn matches(&self, key: &str) -> bool {
        self.id.eq_ignore_ascii_case(key) || self.name.eq_ignore_ascii_case(key)
    }
}

/// An immutable registry of tracks.
#[derive(Debug, Clone)]
pub struct TrackCatalog {
    tracks: Vec<Track>,
}

static BUILTIN_TRACKS: LazyLock<TrackCatalog> = LazyLock::new(|| TrackCatalog {
    tracks: builtin::tracks(),
});

impl TrackCatalog {
    /// Builds a catalog from caller-supplied tracks.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if any track fails [`Track::validate`] or two
    /// tracks share an identifier.
    pub fn new(tracks: Vec<Track>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for track in &tracks {
            track.validate()?;
            if !seen.insert(track.id.to_ascii_lowercase()) {
                return Err(CatalogError::Duplicate {
                    kind: CatalogKind::Track,
                    id: track.id.clone(),
                });
            }
        }
        Ok(Self { tracks })
    }

    /// The built-in 2025 calendar.
    #[must_use]
    pub fn builtin() -> &'static TrackCatalog {
        &BUILTIN_TRACKS
    }

    /// Looks up a track by identifier or display name, ignoring ASCII case.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Track> {
        let key = key.trim();
        self.tracks.iter().find(|track| track.matches(key))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn zone(number: u32, start: f64, end: f64, class: CornerClass, speed: f64) -> CornerZone {
        CornerZone::new(
            number,
            Length::new::<meter>(start),
            Length::new::<meter>(end),
            class,
            format!("T{number}"),
            Velocity::new::<kilometer_per_hour>(speed),
        )
    }

    fn short_track(zones: Vec<CornerZone>) -> Track {
        Track::new(
            "test_ring",
            "Test Ring",
            Length::new::<meter>(2000.0),
            DownforceLevel::Medium,
            zones,
        )
    }

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = TrackCatalog::builtin();
        assert_eq!(catalog.len(), 24);
        for track in catalog.iter() {
            assert_eq!(track.validate(), Ok(()), "{}", track.id());
            assert!(track.reference_lap().is_some(), "{}", track.id());
        }
        assert!(TrackCatalog::new(catalog.iter().cloned().collect()).is_ok());
    }

    #[test]
    fn lookup_ignores_case_and_accepts_names() {
        let catalog = TrackCatalog::builtin();
        assert_eq!(catalog.get("MONZA").map(Track::id), Some("monza"));
        assert_eq!(
            catalog.get("Saudi Arabia").map(Track::id),
            Some("saudi_arabia")
        );
        assert_eq!(catalog.get(" las_vegas ").map(Track::id), Some("las_vegas"));
        assert!(catalog.get("nurburgring").is_none());
    }

    #[test]
    fn class_reference_is_mean_ideal_speed() {
        let monza = TrackCatalog::builtin().get("monza").unwrap();
        // Variante del Rettifilo and della Roggia: 145, 148, 150, 152.
        assert_relative_eq!(
            monza.class_reference(CornerClass::Slow).get::<kilometer_per_hour>(),
            148.75,
            epsilon = 1e-9
        );
        assert_eq!(monza.level(), DownforceLevel::VeryLow);
        assert_eq!(monza.corner_count(), 11);
    }

    #[test]
    fn missing_class_falls_back_to_nominal() {
        let canada_like = short_track(vec![
            zone(1, 100.0, 200.0, CornerClass::Slow, 145.0),
            zone(2, 500.0, 650.0, CornerClass::Medium, 215.0),
        ]);
        assert_eq!(
            canada_like.classes(),
            vec![CornerClass::Slow, CornerClass::Medium]
        );
        assert_relative_eq!(
            canada_like
                .class_reference(CornerClass::Fast)
                .get::<kilometer_per_hour>(),
            315.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn rejects_overlapping_zones() {
        let track = short_track(vec![
            zone(1, 100.0, 300.0, CornerClass::Slow, 145.0),
            zone(2, 250.0, 400.0, CornerClass::Medium, 215.0),
        ]);
        assert!(matches!(
            track.validate(),
            Err(CatalogError::OverlappingZones { .. })
        ));
    }

    #[test]
    fn rejects_zone_past_finish_line() {
        let track = short_track(vec![zone(1, 1900.0, 2100.0, CornerClass::Fast, 310.0)]);
        assert!(matches!(
            track.validate(),
            Err(CatalogError::ZoneOutOfBounds { .. })
        ));
    }

    #[test]
    fn rejects_empty_zone_and_bad_length() {
        let track = short_track(vec![zone(1, 300.0, 300.0, CornerClass::Slow, 145.0)]);
        assert!(matches!(
            track.validate(),
            Err(CatalogError::EmptyZone { .. })
        ));

        let track = Track::new(
            "nowhere",
            "Nowhere",
            Length::new::<meter>(0.0),
            DownforceLevel::Low,
            Vec::new(),
        );
        assert!(matches!(
            track.validate(),
            Err(CatalogError::InvalidLength { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let result = TrackCatalog::new(vec![short_track(Vec::new()), short_track(Vec::new())]);
        assert!(matches!(result, Err(CatalogError::Duplicate { .. })));
    }
}
