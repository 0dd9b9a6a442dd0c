//! Asset host runtime
//!
//! Builds a host-directory capability store from a bridge configuration and
//! runs one command against it.

use crate::args::{CliArgs, CliCommand};
use services_asset_fs::{join_entry, AssetError, AssetFileSystem};
use services_fs_view::TreeOperations;
use services_settings::{BridgeConfig, ConfigError};
use services_storage::HostTree;
use std::io::{self, Write};
use thiserror::Error;
use tracing::{info, warn};

/// Token `--root` grants its directory under
pub const CLI_ROOT_TOKEN: &str = "cli-root";

/// Asset host error types
#[derive(Debug, Error)]
pub enum HostError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("No game path configured; pass --root or set game_path")]
    NoGamePath,

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Merges the configuration file with the command-line overrides
pub fn effective_config(args: &CliArgs) -> Result<BridgeConfig, HostError> {
    let mut config = match &args.config {
        Some(path) => BridgeConfig::load_from_file(path)?,
        None => BridgeConfig::default(),
    };
    if let Some(root) = &args.root {
        config.grant(CLI_ROOT_TOKEN, root.clone());
        config.game_path = Some(CLI_ROOT_TOKEN.to_string());
    }
    if args.verbose {
        config.log_filter = "debug".to_string();
    }
    config.validate()?;
    Ok(config)
}

/// Asset file system over granted host directories
pub struct AssetHost {
    assets: AssetFileSystem<HostTree>,
}

impl AssetHost {
    pub fn from_config(config: &BridgeConfig) -> Result<Self, HostError> {
        let root = config.root_capability().ok_or(HostError::NoGamePath)?;
        info!(root = %root, grants = config.grants.len(), "Asset host ready");

        let tree = HostTree::from_grants(config.grants.clone());
        let mut assets = AssetFileSystem::new(tree, config.read_strategy);
        assets.set_game_path(root);
        Ok(Self { assets })
    }

    pub fn assets(&self) -> &AssetFileSystem<HostTree> {
        &self.assets
    }

    /// Runs `command`, writing its output to `out`
    ///
    /// Returns `false` when the named asset does not exist.
    pub fn execute<W: Write>(&self, command: &CliCommand, out: &mut W) -> Result<bool, HostError> {
        let found = match command {
            CliCommand::List { path, recursive } => {
                let root = self.assets.game_path().ok_or(HostError::NoGamePath)?;
                match self.assets.reader().list(root, path, *recursive) {
                    Ok(entries) => {
                        for entry in entries {
                            writeln!(out, "{}", join_entry(path, &entry))?;
                        }
                        true
                    }
                    Err(e) if e.is_not_found() => {
                        warn!(path = %path, error = %e, "No such directory");
                        false
                    }
                    Err(e) => return Err(AssetError::from(e).into()),
                }
            }
            CliCommand::Cat { path } => match self.assets.open(path) {
                Ok(stream) => {
                    out.write_all(stream.as_bytes())?;
                    true
                }
                Err(e) if e.is_not_found() => {
                    warn!(path = %path, error = %e, "No such file");
                    false
                }
                Err(e) => return Err(e.into()),
            },
            CliCommand::Exists { path } => {
                let exists = self.assets.exists(path);
                writeln!(out, "{}", exists)?;
                exists
            }
        };
        out.flush()?;
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn cli(root: Option<PathBuf>, command: CliCommand) -> CliArgs {
        CliArgs {
            config: None,
            root,
            verbose: false,
            command,
        }
    }

    fn game_dir() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("Data/Textures")).unwrap();
        fs::write(temp_dir.path().join("Data/Textures/sky.raw"), b"sky").unwrap();
        temp_dir
    }

    fn run(host: &AssetHost, command: CliCommand) -> (bool, Vec<u8>) {
        let mut out = Vec::new();
        let found = host.execute(&command, &mut out).unwrap();
        (found, out)
    }

    #[test]
    fn test_root_flag_grants_cli_token() {
        let dir = game_dir();
        let args = cli(
            Some(dir.path().to_path_buf()),
            CliCommand::Exists {
                path: "Data".to_string(),
            },
        );
        let config = effective_config(&args).unwrap();
        assert_eq!(config.game_path.as_deref(), Some(CLI_ROOT_TOKEN));
        assert_eq!(config.grants.get(CLI_ROOT_TOKEN), Some(&dir.path().to_path_buf()));
    }

    #[test]
    fn test_verbose_lowers_log_filter() {
        let mut args = cli(
            None,
            CliCommand::List {
                path: String::new(),
                recursive: false,
            },
        );
        args.verbose = true;
        assert_eq!(effective_config(&args).unwrap().log_filter, "debug");
    }

    #[test]
    fn test_missing_game_path() {
        let config = BridgeConfig::default();
        assert!(matches!(
            AssetHost::from_config(&config),
            Err(HostError::NoGamePath)
        ));
    }

    #[test]
    fn test_commands() {
        let dir = game_dir();
        let mut config = BridgeConfig::default();
        config.grant("games", dir.path());
        config.game_path = Some("games".to_string());
        let host = AssetHost::from_config(&config).unwrap();

        let (found, out) = run(
            &host,
            CliCommand::List {
                path: "Data".to_string(),
                recursive: true,
            },
        );
        assert!(found);
        assert_eq!(out, b"Data/Textures/sky.raw\n");

        let (found, out) = run(
            &host,
            CliCommand::Cat {
                path: "Data/Textures/sky.raw".to_string(),
            },
        );
        assert!(found);
        assert_eq!(out, b"sky");

        let (found, out) = run(
            &host,
            CliCommand::Exists {
                path: "Data/Models".to_string(),
            },
        );
        assert!(!found);
        assert_eq!(out, b"false\n");
    }

    #[test]
    fn test_missing_assets_are_not_errors() {
        let dir = game_dir();
        let args = cli(
            Some(dir.path().to_path_buf()),
            CliCommand::Cat {
                path: "Data/none.raw".to_string(),
            },
        );
        let host = AssetHost::from_config(&effective_config(&args).unwrap()).unwrap();

        let (found, out) = run(&host, args.command.clone());
        assert!(!found);
        assert!(out.is_empty());

        let (found, _) = run(
            &host,
            CliCommand::List {
                path: "Scripts".to_string(),
                recursive: false,
            },
        );
        assert!(!found);
    }
}
