use crate::catalog::{Track, TrackCatalog};

use super::{EngineConfig, Evaluator};

/// A builtin track by id.
pub(super) fn track(id: &str) -> &'static Track {
    TrackCatalog::builtin()
        .get(id)
        .unwrap_or_else(|| panic!("no builtin track `{id}`"))
}

/// An evaluator for the default vehicle.
pub(super) fn evaluator() -> Evaluator {
    let params = EngineConfig::default()
        .validate()
        .expect("default config is valid");
    Evaluator::new(params)
}
