//! Read-only registries of tracks and team aerodynamic profiles.
//!
//! Catalogs are built once and shared by reference. The built-in catalogs
//! ([`TrackCatalog::builtin`], [`TeamCatalog::builtin`]) are constructed lazily
//! on first use and live for the rest of the process; nothing in this crate
//! mutates a catalog after construction, so a catalog can be read from any
//! number of threads without locking.
//!
//! Callers with their own data build a catalog with [`TrackCatalog::new`] or
//! [`TeamCatalog::new`], which validate every entry up front.

mod builtin;
mod team;
mod track;

use std::fmt;

use thiserror::Error;

use crate::support::constraint::ConstraintError;

pub use team::{TeamAeroProfile, TeamCatalog};
pub use track::{CornerClass, CornerZone, DownforceLevel, Track, TrackCatalog};

/// The kind of catalog entry a lookup was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CatalogKind {
    Track,
    Team,
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Track => f.write_str("track"),
            Self::Team => f.write_str("team"),
        }
    }
}

/// Errors raised while building a catalog from caller-supplied entries.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    /// Two entries share an identifier (compared case-insensitively).
    #[error("duplicate {kind} `{id}`")]
    Duplicate { kind: CatalogKind, id: String },

    /// The track length is not a finite, strictly positive distance.
    #[error("track `{track}` has an invalid length")]
    InvalidLength { track: String },

    /// A corner zone ends at or before its start.
    #[error("track `{track}`: corner zone `{label}` is empty")]
    EmptyZone { track: String, label: String },

    /// A corner zone extends outside `[0, length]`.
    #[error("track `{track}`: corner zone `{label}` lies outside the lap")]
    ZoneOutOfBounds { track: String, label: String },

    /// A corner zone starts before the previous one ends.
    #[error("track `{track}`: corner zone `{second}` overlaps `{first}`")]
    OverlappingZones {
        track: String,
        first: String,
        second: String,
    },

    /// A corner zone's ideal speed is not finite and strictly positive.
    #[error("track `{track}`: corner zone `{label}` has an invalid ideal speed")]
    InvalidIdealSpeed { track: String, label: String },

    /// A team profile coefficient is outside its domain.
    #[error("team `{team}`: invalid {field}")]
    InvalidProfile {
        team: String,
        field: &'static str,
        #[source]
        source: ConstraintError,
    },
}
