use thiserror::Error;

use crate::{catalog::CatalogKind, support::constraint::ConstraintError};

/// Errors surfaced by the performance engine.
///
/// Non-finite intermediates inside the solvers are not errors; they are
/// recovered in place (see [`crate::support::bounds`]).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// The requested track or team is not in the catalog.
    #[error("unknown {kind} `{id}`")]
    NotFound {
        /// Which catalog was searched.
        kind: CatalogKind,

        /// The identifier as supplied by the caller.
        id: String,
    },

    /// A configuration value lies outside its representable domain.
    #[error("invalid configuration value for `{field}`")]
    InvalidConfiguration {
        /// Dotted path of the offending field (e.g. `vehicle.mass`).
        field: &'static str,

        #[source]
        source: ConstraintError,
    },
}

impl EngineError {
    pub(crate) fn track_not_found(id: &str) -> Self {
        Self::NotFound {
            kind: CatalogKind::Track,
            id: id.to_owned(),
        }
    }

    pub(crate) fn team_not_found(id: &str) -> Self {
        Self::NotFound {
            kind: CatalogKind::Team,
            id: id.to_owned(),
        }
    }

    /// Returns a closure mapping a [`ConstraintError`] on `field` into an
    /// [`EngineError::InvalidConfiguration`].
    pub(crate) fn invalid(field: &'static str) -> impl Fn(ConstraintError) -> Self {
        move |source| Self::InvalidConfiguration { field, source }
    }
}
