//! The storage collaborator interface

use core_types::{CapabilityError, NodeKind, RootCapability};
use std::io::{self, Cursor, Read};
use thiserror::Error;

/// Errors a storage provider can report
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The root capability could not be opened
    #[error("Capability error: {0}")]
    Capability(#[from] CapabilityError),

    /// The node existed when it was handed out but is gone now
    #[error("Node no longer exists: {0}")]
    Gone(String),

    /// Children were requested from a file
    #[error("Not a directory: {0}")]
    NotADirectory(String),

    /// The node cannot be opened for reading
    #[error("Stream unavailable: {0}")]
    StreamUnavailable(String),

    /// A child with this name already exists
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// The name cannot be a single path segment
    #[error("Invalid entry name: {0:?}")]
    InvalidName(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Whether `name` can name a child entry
///
/// Entry names are single lookup segments: non-empty, not `.` or `..`,
/// and free of `/` and `\`.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

/// A readable byte stream over one node's contents
pub trait ByteStream: Read {
    /// Number of bytes that can be read without blocking
    ///
    /// This is a hint. Some backends report it conservatively, so it can be
    /// smaller than the remaining length of the node.
    fn available(&mut self) -> io::Result<usize>;
}

impl<T: AsRef<[u8]>> ByteStream for Cursor<T> {
    fn available(&mut self) -> io::Result<usize> {
        let len = self.get_ref().as_ref().len() as u64;
        Ok(len.saturating_sub(self.position()) as usize)
    }
}

impl<S: ByteStream + ?Sized> ByteStream for Box<S> {
    fn available(&mut self) -> io::Result<usize> {
        (**self).available()
    }
}

/// A direct child of a directory node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildEntry<N> {
    /// Name of this entry within its parent
    pub name: String,
    /// Kind of node
    pub kind: NodeKind,
    /// Provider node for the child
    pub node: N,
}

impl<N> ChildEntry<N> {
    /// Creates a new child entry
    pub fn new(name: impl Into<String>, kind: NodeKind, node: N) -> Self {
        Self {
            name: name.into(),
            kind,
            node,
        }
    }

    /// Replaces the provider node, keeping name and kind
    pub fn map_node<M>(self, f: impl FnOnce(N) -> M) -> ChildEntry<M> {
        ChildEntry {
            name: self.name,
            kind: self.kind,
            node: f(self.node),
        }
    }
}

/// A service that grants traversable trees for root capabilities
///
/// Nodes are whatever the provider needs to find an entry again. They are
/// only ever produced by the provider itself: from [`open_root`] or from a
/// directory enumeration.
///
/// [`open_root`]: TreeProvider::open_root
pub trait TreeProvider {
    /// Provider-specific node reference
    type Node;

    /// Opens the directory a root capability points at
    fn open_root(&self, root: &RootCapability) -> Result<Self::Node, ProviderError>;

    /// Enumerates the direct children of a directory, in provider order
    fn children(&self, dir: &Self::Node) -> Result<Vec<ChildEntry<Self::Node>>, ProviderError>;

    /// Looks up a direct child by exact, case-sensitive name
    ///
    /// The default scans [`children`](TreeProvider::children).
    fn find_child(
        &self,
        dir: &Self::Node,
        name: &str,
    ) -> Result<Option<ChildEntry<Self::Node>>, ProviderError> {
        Ok(self
            .children(dir)?
            .into_iter()
            .find(|child| child.name == name))
    }

    /// Whether a node handed out earlier still exists and is accessible
    fn exists(&self, node: &Self::Node) -> bool;

    /// Opens a byte stream over a file node
    fn open_stream(&self, node: &Self::Node) -> Result<Box<dyn ByteStream + '_>, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_available_tracks_position() {
        let mut cursor = Cursor::new(vec![1u8, 2, 3, 4]);
        assert_eq!(cursor.available().unwrap(), 4);

        let mut buf = [0u8; 3];
        cursor.read_exact(&mut buf).unwrap();
        assert_eq!(cursor.available().unwrap(), 1);
    }

    #[test]
    fn test_boxed_stream_available() {
        let mut stream: Box<dyn ByteStream> = Box::new(Cursor::new(b"abc".to_vec()));
        assert_eq!(stream.available().unwrap(), 3);
    }

    #[test]
    fn test_child_entry_map_node() {
        let entry = ChildEntry::new("a.txt", NodeKind::File, 7u32);
        let mapped = entry.map_node(|n| n * 2);
        assert_eq!(mapped.name, "a.txt");
        assert_eq!(mapped.kind, NodeKind::File);
        assert_eq!(mapped.node, 14);
    }

    #[test]
    fn test_valid_names() {
        assert!(is_valid_name("ground.raw"));
        assert!(is_valid_name("..."));
        assert!(is_valid_name(".hidden"));
        for name in ["", ".", "..", "a/b", "a\\b", "/"] {
            assert!(!is_valid_name(name), "{name:?} should be rejected");
        }
    }

    #[test]
    fn test_provider_error_from_capability() {
        let err: ProviderError = CapabilityError::Unknown("t".to_string()).into();
        assert!(matches!(err, ProviderError::Capability(CapabilityError::Unknown(_))));
    }
}
