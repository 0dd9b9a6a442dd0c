//! Host directory trees
//!
//! Grants opaque tokens to real directories on the host. Nodes are paths,
//! but callers never supply them: every node comes from the granted root or
//! from enumerating a directory that did.
//!
//! Symbolic links are omitted from enumeration, so a lookup can never leave
//! the granted directory through one.

use crate::provider::{is_valid_name, ByteStream, ChildEntry, ProviderError, TreeProvider};
use core_types::{CapabilityError, NodeKind, RootCapability};
use std::collections::{BTreeMap, BTreeSet};
use std::fs::{self, File, Metadata};
use std::io::{self, Read, Seek};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Capability store backed by host directories
#[derive(Debug, Clone, Default)]
pub struct HostTree {
    grants: BTreeMap<String, PathBuf>,
    revoked: BTreeSet<String>,
}

impl HostTree {
    /// Creates a store with no grants
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store from `(token, directory)` pairs
    pub fn from_grants<I, T, P>(grants: I) -> Self
    where
        I: IntoIterator<Item = (T, P)>,
        T: Into<String>,
        P: Into<PathBuf>,
    {
        let mut tree = Self::new();
        for (token, dir) in grants {
            tree.grant(token, dir);
        }
        tree
    }

    /// Grants `dir` under `token`
    pub fn grant(&mut self, token: impl Into<String>, dir: impl Into<PathBuf>) -> RootCapability {
        let token = token.into();
        self.revoked.remove(&token);
        self.grants.insert(token.clone(), dir.into());
        RootCapability::from_token(token)
    }

    /// Revokes a previously granted token
    pub fn revoke(&mut self, root: &RootCapability) {
        self.revoked.insert(root.token().to_string());
    }

    /// Whether `token` is currently granted
    pub fn is_granted(&self, root: &RootCapability) -> bool {
        self.grants.contains_key(root.token()) && !self.revoked.contains(root.token())
    }
}

fn kind_of(metadata: &Metadata) -> Option<NodeKind> {
    let file_type = metadata.file_type();
    if file_type.is_dir() {
        Some(NodeKind::Directory)
    } else if file_type.is_file() {
        Some(NodeKind::File)
    } else {
        None
    }
}

fn classify(path: &Path) -> io::Result<Option<NodeKind>> {
    Ok(kind_of(&fs::symlink_metadata(path)?))
}

/// Checks that the opened file is the regular file examined before opening
///
/// `File::open` follows symlinks, so an entry swapped for one in between
/// must not be read.
fn ensure_same_file(node: &Path, expected: &Metadata, opened: &Metadata) -> Result<(), ProviderError> {
    if opened.is_file() && same_identity(expected, opened) {
        Ok(())
    } else {
        Err(ProviderError::StreamUnavailable(format!(
            "{} changed while opening",
            node.display()
        )))
    }
}

#[cfg(unix)]
fn same_identity(a: &Metadata, b: &Metadata) -> bool {
    use std::os::unix::fs::MetadataExt;
    a.dev() == b.dev() && a.ino() == b.ino()
}

#[cfg(not(unix))]
fn same_identity(a: &Metadata, b: &Metadata) -> bool {
    a.len() == b.len() && a.modified().ok() == b.modified().ok()
}

impl TreeProvider for HostTree {
    type Node = PathBuf;

    fn open_root(&self, root: &RootCapability) -> Result<PathBuf, ProviderError> {
        if self.revoked.contains(root.token()) {
            return Err(CapabilityError::Revoked(root.token().to_string()).into());
        }
        let dir = self
            .grants
            .get(root.token())
            .ok_or_else(|| CapabilityError::Unknown(root.token().to_string()))?;
        match fs::metadata(dir) {
            Ok(metadata) if metadata.is_dir() => Ok(dir.clone()),
            _ => Err(CapabilityError::TargetUnavailable(root.token().to_string()).into()),
        }
    }

    fn children(&self, dir: &PathBuf) -> Result<Vec<ChildEntry<PathBuf>>, ProviderError> {
        let entries = fs::read_dir(dir).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ProviderError::Gone(dir.display().to_string()),
            _ if dir.is_file() => ProviderError::NotADirectory(dir.display().to_string()),
            _ => ProviderError::Io(e),
        })?;

        let mut children = Vec::new();
        for entry_result in entries {
            let entry = match entry_result {
                Ok(e) => e,
                Err(e) => {
                    warn!(dir = ?dir, error = %e, "Skipping unreadable directory entry");
                    continue;
                }
            };
            let Ok(name) = entry.file_name().into_string() else {
                warn!(path = ?entry.path(), "Skipping entry with non UTF-8 name");
                continue;
            };
            let file_type = match entry.file_type() {
                Ok(t) => t,
                Err(e) => {
                    warn!(path = ?entry.path(), error = %e, "Skipping entry without file type");
                    continue;
                }
            };
            let kind = if file_type.is_dir() {
                NodeKind::Directory
            } else if file_type.is_file() {
                NodeKind::File
            } else {
                debug!(path = ?entry.path(), "Omitting symlink or special file");
                continue;
            };
            children.push(ChildEntry::new(name, kind, entry.path()));
        }
        Ok(children)
    }

    // Exact match, even on case-insensitive host filesystems
    fn find_child(
        &self,
        dir: &PathBuf,
        name: &str,
    ) -> Result<Option<ChildEntry<PathBuf>>, ProviderError> {
        if !is_valid_name(name) {
            return Ok(None);
        }
        Ok(self.children(dir)?.into_iter().find(|child| child.name == name))
    }

    fn exists(&self, node: &PathBuf) -> bool {
        matches!(classify(node), Ok(Some(_)))
    }

    fn open_stream(&self, node: &PathBuf) -> Result<Box<dyn ByteStream + '_>, ProviderError> {
        let expected = match fs::symlink_metadata(node) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ProviderError::Gone(node.display().to_string()))
            }
            Err(e) => return Err(ProviderError::Io(e)),
        };
        match kind_of(&expected) {
            Some(NodeKind::File) => {}
            Some(NodeKind::Directory) => {
                return Err(ProviderError::StreamUnavailable(format!(
                    "{} is a directory",
                    node.display()
                )))
            }
            None => {
                return Err(ProviderError::StreamUnavailable(format!(
                    "{} is not a regular file",
                    node.display()
                )))
            }
        }

        let file = File::open(node).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ProviderError::Gone(node.display().to_string()),
            io::ErrorKind::PermissionDenied => {
                ProviderError::StreamUnavailable(format!("{}: {}", node.display(), e))
            }
            _ => ProviderError::Io(e),
        })?;
        ensure_same_file(node, &expected, &file.metadata()?)?;
        Ok(Box::new(HostFileStream::new(file)))
    }
}

/// Byte stream over an open host file
#[derive(Debug)]
pub struct HostFileStream {
    file: File,
}

impl HostFileStream {
    pub fn new(file: File) -> Self {
        Self { file }
    }
}

impl Read for HostFileStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

impl ByteStream for HostFileStream {
    fn available(&mut self) -> io::Result<usize> {
        let len = self.file.metadata()?.len();
        let position = self.file.stream_position()?;
        Ok(len.saturating_sub(position) as usize)
    }
}
