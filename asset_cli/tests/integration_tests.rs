//! Integration tests for the asset host

use asset_cli::{effective_config, parse_args, AssetHost, HostError, CLI_ROOT_TOKEN};
use services_settings::{BridgeConfig, ConfigError};
use std::fs;
use tempfile::TempDir;

fn game_dir() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("Data/Textures/cache")).unwrap();
    fs::create_dir_all(root.join("Scripts")).unwrap();
    fs::write(root.join("Data/Textures/ground.raw"), [0u8, 1, 2, 3, 255]).unwrap();
    fs::write(root.join("Scripts/info.dat"), b"info").unwrap();
    temp_dir
}

fn run_line(line: &[&str]) -> Result<(bool, Vec<u8>), HostError> {
    let args: Vec<String> = std::iter::once("asset_cli")
        .chain(line.iter().copied())
        .map(String::from)
        .collect();
    let cli = parse_args(&args).unwrap();
    let host = AssetHost::from_config(&effective_config(&cli)?)?;
    let mut out = Vec::new();
    let found = host.execute(&cli.command, &mut out)?;
    Ok((found, out))
}

#[test]
fn test_root_listing_and_binary_cat() {
    let dir = game_dir();
    let root = dir.path().to_str().unwrap();

    let (found, out) = run_line(&["--root", root, "ls", "--recursive"]).unwrap();
    assert!(found);
    let mut lines: Vec<&str> = std::str::from_utf8(&out).unwrap().lines().collect();
    lines.sort();
    assert_eq!(lines, vec!["Data/Textures/ground.raw", "Scripts/info.dat"]);

    let (found, out) = run_line(&["--root", root, "cat", "Data/Textures/ground.raw"]).unwrap();
    assert!(found);
    assert_eq!(out, [0u8, 1, 2, 3, 255]);
}

#[test]
fn test_config_file_grants() {
    let dir = game_dir();
    let config_dir = TempDir::new().unwrap();
    let config_path = config_dir.path().join("bridge.json");

    let mut config = BridgeConfig::default();
    config.grant("games", dir.path());
    config.game_path = Some("games".to_string());
    fs::write(&config_path, config.to_json_bytes().unwrap()).unwrap();

    let config_arg = config_path.to_str().unwrap();
    let (found, out) = run_line(&["--config", config_arg, "exists", "Scripts/info.dat"]).unwrap();
    assert!(found);
    assert_eq!(out, b"true\n");

    let (found, out) = run_line(&["--config", config_arg, "ls", "Data/Textures/cache"]).unwrap();
    assert!(found);
    assert!(out.is_empty());
}

#[test]
fn test_root_flag_overrides_config_game_path() {
    let dir = game_dir();
    let other = TempDir::new().unwrap();
    let config_dir = TempDir::new().unwrap();
    let config_path = config_dir.path().join("bridge.json");

    let mut config = BridgeConfig::default();
    config.grant("other", other.path());
    config.game_path = Some("other".to_string());
    fs::write(&config_path, config.to_json_bytes().unwrap()).unwrap();

    let args: Vec<String> = [
        "asset_cli",
        "--config",
        config_path.to_str().unwrap(),
        "--root",
        dir.path().to_str().unwrap(),
        "exists",
        "Data",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    let effective = effective_config(&parse_args(&args).unwrap()).unwrap();
    assert_eq!(effective.game_path.as_deref(), Some(CLI_ROOT_TOKEN));
    assert_eq!(effective.grants.len(), 2);
}

#[test]
fn test_ungranted_game_path_is_rejected() {
    let config_dir = TempDir::new().unwrap();
    let config_path = config_dir.path().join("bridge.json");
    fs::write(
        &config_path,
        br#"{ "version": 1, "game_path": "missing", "grants": { "games": "/srv/games" } }"#,
    )
    .unwrap();

    let result = run_line(&["--config", config_path.to_str().unwrap(), "ls"]);
    assert!(matches!(
        result,
        Err(HostError::Config(ConfigError::UngrantedGamePath(_)))
    ));
}

#[test]
fn test_vanished_grant_is_an_error() {
    let dir = game_dir();
    let root = dir.path().join("Data");
    let root_arg = root.to_str().unwrap().to_string();
    fs::remove_dir_all(&root).unwrap();

    let result = run_line(&["--root", &root_arg, "cat", "Textures/ground.raw"]);
    assert!(matches!(result, Err(HostError::Asset(_))));
}
