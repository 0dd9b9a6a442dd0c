//! Resolved node handles

use core_types::NodeKind;

/// A resolved entry of a capability-scoped tree
///
/// Handles are transient: one is produced per successful resolution and
/// consumed by a single list or read.
#[derive(Debug)]
pub struct NodeHandle<N> {
    node: N,
    kind: NodeKind,
    name: String,
    path: String,
}

impl<N> NodeHandle<N> {
    pub(crate) fn new(node: N, kind: NodeKind, name: String, path: String) -> Self {
        Self {
            node,
            kind,
            name,
            path,
        }
    }

    /// Provider node this handle points at
    pub fn node(&self) -> &N {
        &self.node
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_directory(&self) -> bool {
        self.kind.is_directory()
    }

    /// Entry name within its parent; empty for the root
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path relative to the root, without no-op segments
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Whether this handle denotes the root itself
    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }
}
