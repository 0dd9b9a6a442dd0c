//! Tree operations
//!
//! This module defines the operations provided by the tree reader service.

use core_types::{NodeKind, RootCapability};
use fs_view::ResolveError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during tree operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The root capability could not be opened
    #[error("Capability invalid: {0}")]
    CapabilityInvalid(String),

    /// Some path segment has no matching child
    #[error("Not found: {segment:?} (segment {index})")]
    SegmentNotFound { index: usize, segment: String },

    /// The storage failed while a segment was looked up
    #[error("Storage unreachable at segment {index}: {reason}")]
    Unreachable { index: usize, reason: String },

    /// The node resolved but its content stream could not be opened
    #[error("Stream unavailable: {0}")]
    StreamUnavailable(String),

    /// IO error while reading the stream
    #[error("Read failure: {0}")]
    ReadFailure(String),
}

impl TreeError {
    /// Whether the error means the path does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, TreeError::SegmentNotFound { .. })
    }
}

impl From<ResolveError> for TreeError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::CapabilityInvalid(msg) => TreeError::CapabilityInvalid(msg),
            ResolveError::SegmentNotFound { index, segment } => {
                TreeError::SegmentNotFound { index, segment }
            }
            ResolveError::Unreachable { index, reason } => TreeError::Unreachable { index, reason },
        }
    }
}

/// How whole-file reads drain a stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadStrategy {
    /// Read until end of stream into a growable buffer
    #[default]
    ToCompletion,
    /// Allocate the stream's available-byte count and issue a single read
    ///
    /// Streams that report availability conservatively are under-read.
    BoundedAvailable,
}

/// Metadata about a resolved node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatInfo {
    /// Node kind
    pub kind: NodeKind,
    /// Entry name; empty for the root
    pub name: String,
    /// Path relative to the root, without no-op segments
    pub path: String,
}

/// Tree operations trait
///
/// This trait defines the operations that can be performed on a tree.
pub trait TreeOperations {
    /// Describe the node at a path
    fn stat(&self, root: &RootCapability, path: &str) -> Result<StatInfo, TreeError>;

    /// List the files below a directory
    ///
    /// Returns paths relative to the listed directory, in enumeration order.
    /// Directories are never listed themselves; with `recursive` they are
    /// descended into.
    fn list(
        &self,
        root: &RootCapability,
        path: &str,
        recursive: bool,
    ) -> Result<Vec<String>, TreeError>;

    /// Read the whole contents of a file
    fn read_file(&self, root: &RootCapability, path: &str) -> Result<Vec<u8>, TreeError>;
}
