use std::fs;

use tilehop::config::*;
use tilehop::error::ConfigError;

#[test]
fn partial_file_overrides_only_what_it_lists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tuning.json");
    fs::write(
        &path,
        r#"{ "player": { "jump_speed": 0.7, "spawn_tile": [2, 3] }, "scene": { "countdown_time": 0.0 } }"#,
    )
    .unwrap();

    let tuning = Tuning::load(&path).unwrap();
    assert_eq!(tuning.player.jump_speed, 0.7);
    assert_eq!(tuning.player.spawn_tile, [2, 3]);
    assert_eq!(tuning.player.max_air_jumps, PlayerTuning::default().max_air_jumps);
    assert_eq!(tuning.enemy, EnemyTuning::default());
    assert_eq!(tuning.scene.countdown_time, 0.0);
    assert_eq!(tuning.scene.fade_time, SceneTuning::default().fade_time);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Tuning::load(dir.path().join("absent.json"));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn defaults_match_the_stage_feel() {
    let t = Tuning::default();
    assert_eq!(t.player.max_air_jumps, 2);
    assert_eq!(t.player.wall_jump_speed, [0.4, 0.6]);
    assert!(t.player.ground_check_offset > t.player.clearance);
    assert_eq!(t.enemy.spawn_count, 3);
    assert_eq!(t.scene.firework_interval, [0.20, 0.45]);
}

#[test]
fn inverted_firework_interval_is_rejected() {
    let result = Tuning::from_json(r#"{ "scene": { "firework_interval": [0.45, 0.20] } }"#);
    match result {
        Err(ConfigError::Invalid(msg)) => assert!(msg.contains("firework_interval"), "{msg}"),
        other => panic!("expected Invalid, got {other:?}"),
    }
}

#[test]
fn zero_turn_times_are_rejected() {
    let player = Tuning::from_json(r#"{ "player": { "turn_time": 0.0 } }"#);
    assert!(matches!(player, Err(ConfigError::Invalid(ref m)) if m.contains("player.turn_time")));

    let enemy = Tuning::from_json(r#"{ "enemy": { "turn_time": 0.0 } }"#);
    assert!(matches!(enemy, Err(ConfigError::Invalid(ref m)) if m.contains("enemy.turn_time")));
}

#[test]
fn negative_durations_are_rejected_but_zero_countdown_is_fine() {
    assert!(matches!(
        Tuning::from_json(r#"{ "scene": { "fade_time": -1.0 } }"#),
        Err(ConfigError::Invalid(_))
    ));
    assert!(Tuning::from_json(r#"{ "scene": { "countdown_time": 0.0, "start_banner_time": 0.0 } }"#).is_ok());
}

#[test]
fn load_reports_invalid_tuning() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, r#"{ "player": { "dash_time": 0 } }"#).unwrap();
    let err = Tuning::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
    assert!(err.to_string().starts_with("Invalid tuning"));
}
