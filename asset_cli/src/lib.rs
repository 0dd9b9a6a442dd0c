//! # Asset Host
//!
//! A command-line host for the asset bridge.
//!
//! ## Philosophy
//!
//! - Host directories are only reachable once granted under a token
//! - The host owns I/O; the library crates only return bytes and paths
//! - No shell features: one command per invocation
//!
//! ## Commands
//!
//! - `ls [PATH] [--recursive]` - List the files below a directory
//! - `cat PATH` - Write the raw contents of a file to stdout
//! - `exists PATH` - Print whether a file or directory exists

pub mod args;
pub mod host;

pub use args::{parse_args, usage, ArgsError, CliArgs, CliCommand};
pub use host::{effective_config, AssetHost, HostError, CLI_ROOT_TOKEN};
