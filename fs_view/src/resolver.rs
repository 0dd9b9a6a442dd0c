//! Path resolution logic
//!
//! This module walks a capability-scoped tree one segment at a time.

use crate::handle::NodeHandle;
use crate::path::PathSpec;
use core_types::{NodeKind, RootCapability};
use services_storage::{ProviderError, TreeProvider};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during path resolution
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The root capability could not be opened
    #[error("Capability invalid: {0}")]
    CapabilityInvalid(String),

    /// Path segment not found during traversal
    #[error("Not found: {segment:?} (segment {index})")]
    SegmentNotFound { index: usize, segment: String },

    /// The provider failed while looking a segment up
    #[error("Storage unreachable at segment {index}: {reason}")]
    Unreachable { index: usize, reason: String },
}

impl ResolveError {
    /// Index of the segment resolution stopped at; 0 for the root itself
    pub fn segment_index(&self) -> usize {
        match self {
            ResolveError::CapabilityInvalid(_) => 0,
            ResolveError::SegmentNotFound { index, .. } | ResolveError::Unreachable { index, .. } => {
                *index
            }
        }
    }
}

/// Path resolver
///
/// Turns a root capability and a [`PathSpec`] into a [`NodeHandle`].
pub struct PathResolver;

impl PathResolver {
    /// Resolves `path` below the root `root` grants
    ///
    /// `.` segments are skipped. Every other segment must name a direct child
    /// of the node reached so far, by exact case-sensitive match, and the
    /// child must still exist. The first failing segment aborts resolution.
    /// A path without lookups resolves to the root.
    pub fn resolve<P: TreeProvider>(
        provider: &P,
        root: &RootCapability,
        path: &PathSpec,
    ) -> Result<NodeHandle<P::Node>, ResolveError> {
        let mut current = provider.open_root(root).map_err(|e| {
            debug!(root = %root, error = %e, "Root capability could not be opened");
            ResolveError::CapabilityInvalid(e.to_string())
        })?;
        let mut kind = NodeKind::Directory;
        let mut name = String::new();

        for (index, segment) in path.lookups() {
            let not_found = || {
                debug!(root = %root, index, segment, "Path segment not found");
                ResolveError::SegmentNotFound {
                    index,
                    segment: segment.to_string(),
                }
            };

            if kind.is_file() {
                return Err(not_found());
            }

            let child = match provider.find_child(&current, segment) {
                Ok(Some(child)) => child,
                Ok(None) | Err(ProviderError::Gone(_)) | Err(ProviderError::NotADirectory(_)) => {
                    return Err(not_found())
                }
                Err(e) => {
                    debug!(root = %root, index, segment, error = %e, "Lookup failed");
                    return Err(ResolveError::Unreachable {
                        index,
                        reason: e.to_string(),
                    });
                }
            };

            if !provider.exists(&child.node) {
                return Err(not_found());
            }

            current = child.node;
            kind = child.kind;
            name = child.name;
        }

        Ok(NodeHandle::new(current, kind, name, path.to_string()))
    }

    /// Parses `path` and resolves it
    pub fn resolve_str<P: TreeProvider>(
        provider: &P,
        root: &RootCapability,
        path: &str,
    ) -> Result<NodeHandle<P::Node>, ResolveError> {
        Self::resolve(provider, root, &PathSpec::parse(path))
    }
}
