//! Node kinds

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a tree node is
///
/// A capability-scoped tree only distinguishes containers from leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Holds named children
    Directory,
    /// Holds bytes
    File,
}

impl NodeKind {
    pub fn is_directory(self) -> bool {
        self == NodeKind::Directory
    }

    pub fn is_file(self) -> bool {
        self == NodeKind::File
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Directory => write!(f, "Directory"),
            NodeKind::File => write!(f, "File"),
        }
    }
}
