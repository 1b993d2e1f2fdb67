use std::thread;

use approx::assert_relative_eq;
use downforce_models::{
    catalog::{CatalogKind, CornerClass, DownforceLevel, TeamCatalog, TrackCatalog},
    models::vehicle::performance::{
        AeroConfiguration, CornerSpeedSolver, EngineError, PerformanceEngine, TopSpeedSolver,
        ideal_configuration,
    },
};
use uom::si::{
    length::meter,
    time::second,
    velocity::{kilometer_per_hour, meter_per_second},
};

fn engine() -> PerformanceEngine<'static> {
    PerformanceEngine::builtin().unwrap()
}

fn config(cd: f64, clf: f64, clr: f64) -> AeroConfiguration {
    AeroConfiguration::new(cd, clf, clr).unwrap()
}

fn grid() -> Vec<AeroConfiguration> {
    let mut configs = Vec::new();
    for cd in [0.5, 0.62, 0.70, 0.78, 0.9, 1.0] {
        for (clf, clr) in [(0.5, 0.5), (1.2, 1.6), (1.5, 2.0), (1.9, 2.6), (3.0, 3.0)] {
            configs.push(config(cd, clf, clr));
        }
    }
    configs
}

#[test]
fn more_drag_lowers_top_speed() {
    let engine = engine();
    let speeds: Vec<f64> = [0.70, 0.71, 0.72, 0.74]
        .into_iter()
        .map(|cd| {
            engine
                .estimate_performance(&config(cd, 1.5, 2.0), "bahrain")
                .unwrap()
                .top_speed
                .speed
                .get::<kilometer_per_hour>()
        })
        .collect();
    for pair in speeds.windows(2) {
        assert!(pair[1] < pair[0], "{speeds:?}");
    }
}

#[test]
fn drag_costs_every_team_top_speed_on_every_track() {
    let engine = engine();
    for track in TrackCatalog::builtin().iter() {
        for team in TeamCatalog::builtin().iter() {
            let base = config(team.cd(), team.clf(), team.clr());
            let draggier = config(team.cd() + 0.01, team.clf(), team.clr());
            let base = engine.estimate_performance(&base, track.id()).unwrap();
            let draggier = engine.estimate_performance(&draggier, track.id()).unwrap();
            assert!(
                draggier.top_speed.speed < base.top_speed.speed,
                "{} on {}",
                team.name(),
                track.id()
            );
        }
    }
}

#[test]
fn teams_reach_different_top_speeds() {
    let engine = engine();
    for track in ["monza", "bahrain", "monaco"] {
        let mut speeds: Vec<f64> = TeamCatalog::builtin()
            .iter()
            .map(|team| {
                engine
                    .estimate_performance(&team.configuration(), track)
                    .unwrap()
                    .top_speed
                    .kmh()
            })
            .collect();
        speeds.sort_by(f64::total_cmp);
        speeds.dedup();
        assert!(speeds.len() > 1, "{track} {speeds:?}");
    }
}

#[test]
fn level_ideal_beats_every_other_ideal() {
    let engine = engine();
    for track in TrackCatalog::builtin().iter() {
        let own = engine
            .estimate_performance(&ideal_configuration(track.level()), track.id())
            .unwrap()
            .lap_time
            .qualifying;
        for level in DownforceLevel::ALL {
            if level == track.level() {
                continue;
            }
            let other = engine
                .estimate_performance(&ideal_configuration(level), track.id())
                .unwrap()
                .lap_time
                .qualifying;
            assert!(own < other, "{} ideal loses to {level}", track.id());
        }
    }
}

#[test]
fn moving_to_the_ideal_never_costs_time() {
    let engine = engine();
    for track in TrackCatalog::builtin().iter() {
        for level in DownforceLevel::ALL {
            let current = ideal_configuration(level);
            let recommendation = engine.recommend_setup(&current, track.id()).unwrap();
            assert!(
                recommendation.qualifying_gain.get::<second>() >= 0.0,
                "{} from {level}",
                track.id()
            );
        }
        let recommendation = engine
            .recommend_setup(&AeroConfiguration::reference(), track.id())
            .unwrap();
        assert!(recommendation.qualifying_gain.get::<second>() >= 0.0, "{}", track.id());
    }
}

#[test]
fn more_downforce_trades_top_speed_for_corner_speed() {
    let engine = engine();
    let base = engine
        .estimate_performance(&config(0.72, 1.5, 2.0), "bahrain")
        .unwrap();
    let loaded = engine
        .estimate_performance(&config(0.72, 1.6, 2.1), "bahrain")
        .unwrap();

    assert!(loaded.top_speed.speed < base.top_speed.speed);
    for class in CornerClass::ALL {
        assert!(
            loaded.corner_speeds.get(class) > base.corner_speeds.get(class),
            "{class}"
        );
    }
}

#[test]
fn every_output_is_finite_and_bounded() {
    let engine = engine();
    for track in TrackCatalog::builtin().iter() {
        let envelope = TopSpeedSolver::envelope(track.level());
        for config in grid() {
            let result = engine.estimate_performance(&config, track.id()).unwrap();

            let top = result.top_speed.speed;
            assert!(envelope.contains(top), "{} top {top:?}", track.id());

            let mut slowest = f64::INFINITY;
            for class in CornerClass::ALL {
                let speed = result.corner_speeds.get(class);
                let band = CornerSpeedSolver::band(track.level(), class);
                assert!(band.contains(speed), "{} {class} {speed:?}", track.id());
                if track.zones_of(class).next().is_some() {
                    slowest = slowest.min(speed.get::<meter_per_second>());
                }
            }

            let q = result.lap_time.qualifying.get::<second>();
            let race = result.lap_time.race.get::<second>();
            let length = track.length().get::<meter>();
            assert!(q.is_finite() && race.is_finite(), "{}", track.id());
            assert!(race > q);
            assert!(q >= length / top.get::<meter_per_second>() - 1e-3, "{}", track.id());
            assert!(q <= length / slowest + 1e-3, "{}", track.id());

            assert!(result.lift_to_drag.is_finite());
            assert!(result.porpoising.score.is_finite());
        }
    }
}

#[test]
fn distinct_teams_differ_on_every_track() {
    let engine = engine();
    let teams: Vec<_> = TeamCatalog::builtin().iter().collect();
    for track in TrackCatalog::builtin().iter() {
        for (i, first) in teams.iter().enumerate() {
            for other in &teams[i + 1..] {
                let a = engine
                    .estimate_performance(&first.configuration(), track.id())
                    .unwrap();
                let b = engine
                    .estimate_performance(&other.configuration(), track.id())
                    .unwrap();
                assert!(
                    CornerClass::ALL
                        .into_iter()
                        .any(|class| a.corner_speeds.get(class) != b.corner_speeds.get(class)),
                    "{} and {} identical on {}",
                    first.name(),
                    other.name(),
                    track.id()
                );
            }
        }
    }
}

#[test]
fn repeated_and_concurrent_calls_agree() {
    let engine = engine();
    let config = config(0.71, 1.62, 2.08);
    let expected = engine.estimate_performance(&config, "suzuka").unwrap();
    assert_eq!(engine.estimate_performance(&config, "suzuka").unwrap(), expected);

    thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| engine.estimate_performance(&config, "suzuka").unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn recommendation_gain_matches_independent_estimates() {
    let engine = engine();
    for (track, current) in [
        ("monaco", config(0.66, 1.15, 1.50)),
        ("monza", config(0.77, 1.90, 2.60)),
        ("silverstone", AeroConfiguration::reference()),
    ] {
        let recommendation = engine.recommend_setup(&current, track).unwrap();
        let current_lap = engine.estimate_performance(&current, track).unwrap().lap_time;
        let ideal_lap = engine
            .estimate_performance(&recommendation.ideal, track)
            .unwrap()
            .lap_time;

        assert_eq!(
            recommendation.qualifying_gain,
            current_lap.qualifying - ideal_lap.qualifying
        );
        assert_eq!(recommendation.race_gain, current_lap.race - ideal_lap.race);
    }
}

#[test]
fn low_drag_car_on_very_low_downforce_track() {
    let result = engine()
        .estimate_performance(&config(0.65, 1.2, 1.6), "monza")
        .unwrap();
    let top = result.top_speed.speed.get::<kilometer_per_hour>();
    assert!((355.0..=370.0).contains(&top));
}

#[test]
fn high_downforce_car_on_very_high_downforce_track() {
    let engine = engine();
    let low_drag = engine
        .estimate_performance(&config(0.65, 1.2, 1.6), "monza")
        .unwrap();
    let high_downforce = engine
        .estimate_performance(&config(0.75, 1.8, 2.4), "monaco")
        .unwrap();

    let top = high_downforce.top_speed.speed.get::<kilometer_per_hour>();
    assert!((300.0..=320.0).contains(&top));
    assert!(high_downforce.top_speed.speed < low_drag.top_speed.speed);
}

#[test]
fn opposite_philosophies_differ_in_every_class() {
    let engine = engine();
    let low_drag = config(0.65, 1.2, 1.6);
    let high_downforce = config(0.75, 1.8, 2.4);
    for track in ["monza", "bahrain", "monaco"] {
        let comparison = engine
            .compare_configurations(&low_drag, &high_downforce, track)
            .unwrap();
        for class in CornerClass::ALL {
            assert!(
                comparison.corner_deltas.get(class).get::<kilometer_per_hour>() != 0.0,
                "{track} {class}"
            );
        }
    }
}

#[test]
fn unknown_track_fails_every_entry_point() {
    let engine = engine();
    let config = AeroConfiguration::reference();
    let not_found = EngineError::NotFound {
        kind: CatalogKind::Track,
        id: "kyalami".to_owned(),
    };

    assert_eq!(
        engine.estimate_performance(&config, "kyalami").unwrap_err(),
        not_found
    );
    assert_eq!(
        engine.recommend_setup(&config, "kyalami").unwrap_err(),
        not_found
    );
    assert_eq!(
        engine
            .analyze_critical_corners("kyalami", &config)
            .unwrap_err(),
        not_found
    );
}

#[test]
fn team_comparison_uses_catalog_profiles() {
    let engine = engine();
    let comparison = engine.compare_teams("McLaren", "Kick Sauber", "monza").unwrap();
    let mclaren = engine
        .estimate_performance(&engine.team("mclaren").unwrap().configuration(), "monza")
        .unwrap();
    assert_eq!(comparison.first, mclaren);
    assert_relative_eq!(
        comparison.qualifying_delta.get::<second>(),
        (comparison.first.lap_time.qualifying - comparison.second.lap_time.qualifying)
            .get::<second>()
    );
}

/// The zone model leaves out minor corners, so predictions run quick; none
/// should be more than a quarter under or a tenth over the pole lap.
#[test]
fn ideal_laps_land_within_band_of_reference() {
    let engine = engine();
    for track in TrackCatalog::builtin().iter() {
        let ideal = ideal_configuration(track.level());
        let comparison = engine
            .compare_with_reference(&ideal, track.id())
            .unwrap()
            .unwrap();
        assert!(
            (-25.0..=10.0).contains(&comparison.percent),
            "{} {}%",
            track.id(),
            comparison.percent
        );
    }
}
