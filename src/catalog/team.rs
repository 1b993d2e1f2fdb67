use std::{collections::HashSet, sync::LazyLock};

use uom::si::{
    angle::degree,
    f64::{Angle, Length},
    length::millimeter,
};

use crate::{
    models::vehicle::performance::AeroConfiguration,
    support::constraint::{ConstraintError, StrictlyPositive, finite},
};

use super::{CatalogError, CatalogKind};

/// Reference wing angles a team profile is run at, before its offset.
const REFERENCE_FRONT_WING: f64 = 22.0;
const REFERENCE_REAR_WING: f64 = 26.0;

/// Reference ride heights, front and rear, in millimetres.
const REFERENCE_RIDE_HEIGHTS: [f64; 2] = [12.0, 14.0];

/// A team's aerodynamic identity.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TeamAeroProfile {
    name: String,
    cd: f64,
    clf: f64,
    clr: f64,
    wing_offset: Angle,
}

impl TeamAeroProfile {
    /// Creates a profile.
    ///
    /// `wing_offset` shifts both reference wing angles (22° front, 26° rear).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidProfile`] if a coefficient is not finite
    /// and strictly positive, or the offset is not finite.
    pub fn new(
        name: impl Into<String>,
        cd: f64,
        clf: f64,
        clr: f64,
        wing_offset: Angle,
    ) -> Result<Self, CatalogError> {
        let name = name.into();
        let check = |field: &'static str, value: f64| {
            finite(value)
                .and_then(StrictlyPositive::new)
                .map(|v| v.into_inner())
                .map_err(|source| invalid(&name, field, source))
        };
        let cd = check("cd", cd)?;
        let clf = check("clf", clf)?;
        let clr = check("clr", clr)?;
        finite(wing_offset.get::<degree>())
            .map_err(|source| invalid(&name, "wing_offset", source))?;

        Ok(Self {
            name,
            cd,
            clf,
            clr,
            wing_offset,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn cd(&self) -> f64 {
        self.cd
    }

    #[must_use]
    pub fn clf(&self) -> f64 {
        self.clf
    }

    #[must_use]
    pub fn clr(&self) -> f64 {
        self.clr
    }

    #[must_use]
    pub fn wing_offset(&self) -> Angle {
        self.wing_offset
    }

    /// The configuration this team runs: its coefficients at reference wing
    /// angles shifted by the offset, on reference ride heights.
    #[must_use]
    pub fn configuration(&self) -> AeroConfiguration {
        let offset = self.wing_offset.get::<degree>();
        AeroConfiguration::clamped(
            [self.cd, self.clf, self.clr],
            [
                Angle::new::<degree>(REFERENCE_FRONT_WING + offset),
                Angle::new::<degree>(REFERENCE_REAR_WING + offset),
            ],
            REFERENCE_RIDE_HEIGHTS.map(Length::new::<millimeter>),
        )
    }
}

fn invalid(team: &str, field: &'static str, source: ConstraintError) -> CatalogError {
    CatalogError::InvalidProfile {
        team: team.to_owned(),
        field,
        source,
    }
}

/// An immutable registry of team profiles.
#[derive(Debug, Clone)]
pub struct TeamCatalog {
    teams: Vec<TeamAeroProfile>,
}

/// Name, Cd, CLf, CLr and wing offset in degrees.
const TEAMS: [(&str, f64, f64, f64, f64); 10] = [
    ("McLaren", 0.675, 1.75, 2.20, 0.0),
    ("Ferrari", 0.685, 1.70, 2.15, 1.0),
    ("Red Bull Racing", 0.690, 1.65, 2.10, 0.0),
    ("Mercedes", 0.695, 1.68, 2.12, -1.0),
    ("Aston Martin", 0.710, 1.55, 2.00, 1.0),
    ("RB", 0.715, 1.58, 2.02, 0.0),
    ("Alpine", 0.720, 1.50, 1.95, -1.0),
    ("Haas", 0.725, 1.52, 1.98, 0.0),
    ("Williams", 0.730, 1.48, 1.92, -1.0),
    ("Kick Sauber", 0.740, 1.42, 1.88, 1.0),
];

static BUILTIN_TEAMS: LazyLock<TeamCatalog> = LazyLock::new(|| TeamCatalog {
    teams: TEAMS
        .iter()
        .map(|&(name, cd, clf, clr, offset)| TeamAeroProfile {
            name: name.to_owned(),
            cd,
            clf,
            clr,
            wing_offset: Angle::new::<degree>(offset),
        })
        .collect(),
});

impl TeamCatalog {
    /// Builds a catalog from caller-supplied profiles.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Duplicate`] if two profiles share a name.
    pub fn new(teams: Vec<TeamAeroProfile>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for team in &teams {
            if !seen.insert(team.name.to_ascii_lowercase()) {
                return Err(CatalogError::Duplicate {
                    kind: CatalogKind::Team,
                    id: team.name.clone(),
                });
            }
        }
        Ok(Self { teams })
    }

    /// The ten 2025 constructors.
    #[must_use]
    pub fn builtin() -> &'static TeamCatalog {
        &BUILTIN_TEAMS
    }

    /// Looks up a profile by team name, ignoring ASCII case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TeamAeroProfile> {
        let name = name.trim();
        self.teams
            .iter()
            .find(|team| team.name.eq_ignore_ascii_case(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &TeamAeroProfile> {
        self.teams.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.teams.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}
