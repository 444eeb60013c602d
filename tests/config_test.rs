//! Tests for loading configuration files.

use crossline::{ConfigOverrides, GameConfig, OpponentKind, Side};
use std::fs;
use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("crossline.toml");
    fs::write(&path, content).expect("Failed to write config");
    path
}

#[test]
fn test_load_full_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"search_depth = 3
opponent = "human"
ai_color = "black"
max_plies = 50
seed = 99
"#,
    );

    let config = GameConfig::from_file(&path).unwrap();
    assert_eq!(*config.search_depth(), 3);
    assert_eq!(*config.opponent(), OpponentKind::Human);
    assert_eq!(*config.ai_color(), Side::Black);
    assert_eq!(*config.max_plies(), 50);
    assert_eq!(*config.seed(), Some(99));
}

#[test]
fn test_missing_file_is_error() {
    let dir = TempDir::new().unwrap();
    let err = GameConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.starts_with("Failed to read config file"));
}

#[test]
fn test_priority_file_env_cli() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "search_depth = 3\nmax_plies = 50\nseed = 1\n");

    let env = ConfigOverrides::from_lookup(|key| match key {
        "CROSSLINE_MAX_PLIES" => Some("80".to_string()),
        "CROSSLINE_SEED" => Some("2".to_string()),
        _ => None,
    })
    .unwrap();
    let cli = ConfigOverrides {
        seed: Some(3),
        ..Default::default()
    };

    let config = GameConfig::resolve(Some(path.as_path()), &env, &cli).unwrap();
    assert_eq!(*config.search_depth(), 3);
    assert_eq!(*config.max_plies(), 80);
    assert_eq!(*config.seed(), Some(3));
}

#[test]
fn test_override_out_of_range_rejected() {
    let cli = ConfigOverrides {
        search_depth: Some(12),
        ..Default::default()
    };
    assert!(GameConfig::resolve(None, &ConfigOverrides::default(), &cli).is_err());
}
