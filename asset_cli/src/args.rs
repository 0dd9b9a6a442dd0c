//! Command-line parsing

use std::path::PathBuf;
use thiserror::Error;

/// Argument error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgsError {
    #[error("Missing value for {0}")]
    MissingValue(String),

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("No command given")]
    MissingCommand,

    #[error("Missing argument: {0}")]
    MissingArgument(String),

    #[error("Unexpected argument: {0}")]
    UnexpectedArgument(String),

    #[error("--recursive only applies to ls")]
    RecursiveWithoutList,

    #[error("Help requested")]
    HelpRequested,
}

/// Host commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// List files below a directory (the root when no path is given)
    List { path: String, recursive: bool },

    /// Write a file's bytes to stdout
    Cat { path: String },

    /// Report whether a path resolves
    Exists { path: String },
}

/// Parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    pub root: Option<PathBuf>,
    pub verbose: bool,
    pub command: CliCommand,
}

/// Parses `args`, where `args[0]` is the program name
///
/// Options may appear anywhere on the line. The first positional argument
/// names the command.
pub fn parse_args(args: &[String]) -> Result<CliArgs, ArgsError> {
    let mut config = None;
    let mut root = None;
    let mut verbose = false;
    let mut recursive = false;
    let mut positional = Vec::new();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                i += 1;
                let value = args
                    .get(i)
                    .ok_or_else(|| ArgsError::MissingValue("--config".to_string()))?;
                config = Some(PathBuf::from(value));
            }
            "--root" => {
                i += 1;
                let value = args
                    .get(i)
                    .ok_or_else(|| ArgsError::MissingValue("--root".to_string()))?;
                root = Some(PathBuf::from(value));
            }
            "--verbose" | "-v" => {
                verbose = true;
            }
            "--recursive" | "-r" => {
                recursive = true;
            }
            "--help" | "-h" => {
                return Err(ArgsError::HelpRequested);
            }
            other if other.starts_with('-') && other.len() > 1 => {
                return Err(ArgsError::UnknownOption(other.to_string()));
            }
            other => positional.push(other.to_string()),
        }
        i += 1;
    }

    let mut positional = positional.into_iter();
    let name = positional.next().ok_or(ArgsError::MissingCommand)?;
    let command = match name.as_str() {
        "ls" => CliCommand::List {
            path: positional.next().unwrap_or_default(),
            recursive,
        },
        "cat" => CliCommand::Cat {
            path: positional
                .next()
                .ok_or_else(|| ArgsError::MissingArgument("cat PATH".to_string()))?,
        },
        "exists" => CliCommand::Exists {
            path: positional
                .next()
                .ok_or_else(|| ArgsError::MissingArgument("exists PATH".to_string()))?,
        },
        other => return Err(ArgsError::UnknownCommand(other.to_string())),
    };

    if let Some(extra) = positional.next() {
        return Err(ArgsError::UnexpectedArgument(extra));
    }
    if recursive && !matches!(command, CliCommand::List { .. }) {
        return Err(ArgsError::RecursiveWithoutList);
    }

    Ok(CliArgs {
        config,
        root,
        verbose,
        command,
    })
}

/// Usage text for `program`
pub fn usage(program: &str) -> String {
    format!(
        "Usage: {program} [OPTIONS] <COMMAND>

Commands:
  ls [PATH] [--recursive]  List files below PATH (default: the game path root)
  cat PATH                 Write the contents of PATH to stdout
  exists PATH              Print true if PATH exists, false otherwise

Options:
  -c, --config <FILE>      Bridge configuration file (JSON)
  --root <DIR>             Grant DIR as the game path
  -r, --recursive          Descend into subdirectories (ls only)
  -v, --verbose            Log at debug level unless RUST_LOG is set
  -h, --help               Show this help message

Examples:
  {program} --root /srv/games ls Data/Textures --recursive
  {program} --config bridge.json cat Scripts/info.dat"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> Vec<String> {
        std::iter::once("asset_cli")
            .chain(line.split_whitespace())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_ls() {
        let parsed = parse_args(&args("ls")).unwrap();
        assert_eq!(
            parsed.command,
            CliCommand::List {
                path: String::new(),
                recursive: false
            }
        );

        let parsed = parse_args(&args("--root /srv/games ls Data -r")).unwrap();
        assert_eq!(parsed.root, Some(PathBuf::from("/srv/games")));
        assert_eq!(
            parsed.command,
            CliCommand::List {
                path: "Data".to_string(),
                recursive: true
            }
        );
    }

    #[test]
    fn test_parse_cat_and_exists() {
        let parsed = parse_args(&args("-c bridge.json -v cat Scripts/info.dat")).unwrap();
        assert_eq!(parsed.config, Some(PathBuf::from("bridge.json")));
        assert!(parsed.verbose);
        assert_eq!(
            parsed.command,
            CliCommand::Cat {
                path: "Scripts/info.dat".to_string()
            }
        );

        let parsed = parse_args(&args("exists Data")).unwrap();
        assert_eq!(
            parsed.command,
            CliCommand::Exists {
                path: "Data".to_string()
            }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_args(&args("")), Err(ArgsError::MissingCommand));
        assert_eq!(
            parse_args(&args("rm Data")),
            Err(ArgsError::UnknownCommand("rm".to_string()))
        );
        assert_eq!(
            parse_args(&args("cat")),
            Err(ArgsError::MissingArgument("cat PATH".to_string()))
        );
        assert_eq!(
            parse_args(&args("ls --root")),
            Err(ArgsError::MissingValue("--root".to_string()))
        );
        assert_eq!(
            parse_args(&args("ls --all")),
            Err(ArgsError::UnknownOption("--all".to_string()))
        );
        assert_eq!(
            parse_args(&args("cat a b")),
            Err(ArgsError::UnexpectedArgument("b".to_string()))
        );
        assert_eq!(
            parse_args(&args("cat a --recursive")),
            Err(ArgsError::RecursiveWithoutList)
        );
        assert_eq!(parse_args(&args("--help")), Err(ArgsError::HelpRequested));
    }

    #[test]
    fn test_usage_names_program() {
        assert!(usage("asset_cli").starts_with("Usage: asset_cli"));
    }
}
