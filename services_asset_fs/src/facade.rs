//! The engine-facing asset file system

use crate::stream::MemoryStream;
use core_types::RootCapability;
use services_fs_view::{ReadStrategy, TreeError, TreeOperations, TreeReaderService};
use services_storage::TreeProvider;
use thiserror::Error;
use tracing::{debug, error};

/// Errors returned by [`AssetFileSystem::open`] and [`AssetFileSystem::find_path`]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssetError {
    #[error("Empty asset path")]
    EmptyPath,

    #[error("No game path has been set")]
    NoGamePath,

    #[error(transparent)]
    Tree(#[from] TreeError),
}

impl AssetError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, AssetError::Tree(e) if e.is_not_found())
    }
}

/// Asset access relative to a game path
///
/// The game path is a root capability. Until one is set every lookup fails
/// with [`AssetError::NoGamePath`].
pub struct AssetFileSystem<P: TreeProvider> {
    reader: TreeReaderService<P>,
    game_path: Option<RootCapability>,
}

impl<P: TreeProvider> AssetFileSystem<P> {
    pub fn new(provider: P, strategy: ReadStrategy) -> Self {
        Self {
            reader: TreeReaderService::with_strategy(provider, strategy),
            game_path: None,
        }
    }

    pub fn set_game_path(&mut self, root: RootCapability) {
        debug!(root = %root, "Game path set");
        self.game_path = Some(root);
    }

    pub fn game_path(&self) -> Option<&RootCapability> {
        self.game_path.as_ref()
    }

    /// Assets cannot be streamed lazily from a capability tree
    pub fn prefer_buffer(&self) -> bool {
        true
    }

    pub fn reader(&self) -> &TreeReaderService<P> {
        &self.reader
    }

    pub fn reader_mut(&mut self) -> &mut TreeReaderService<P> {
        &mut self.reader
    }

    fn root_for(&self, path: &str) -> Result<&RootCapability, AssetError> {
        if path.is_empty() {
            return Err(AssetError::EmptyPath);
        }
        self.game_path.as_ref().ok_or(AssetError::NoGamePath)
    }

    /// Resolves an asset and returns its path without no-op segments
    pub fn find_path(&self, path: &str) -> Result<String, AssetError> {
        let root = self.root_for(path)?;
        let handle = self.reader.resolve(root, path)?;
        Ok(handle.path().to_string())
    }

    /// Whether `path` names an existing file or directory
    ///
    /// The empty path never exists.
    pub fn exists(&self, path: &str) -> bool {
        self.find_path(path).is_ok()
    }

    /// Opens an asset as a fully buffered stream
    pub fn open(&self, path: &str) -> Result<MemoryStream, AssetError> {
        let root = self.root_for(path)?;
        let bytes = self.reader.read_file(root, path)?;
        Ok(MemoryStream::new(bytes))
    }

    /// Reads a whole asset, or returns no bytes on failure
    pub fn read_all(&self, path: &str) -> Vec<u8> {
        match self.root_for(path) {
            Ok(root) => self.reader.read_file_or_empty(root, path),
            Err(e) => {
                error!(path, error = %e, "Error reading asset");
                Vec::new()
            }
        }
    }

    /// Calls `f` with the path of every file listed below `path`
    ///
    /// Paths passed to `f` are `path` joined with each listed entry, or the
    /// bare entry when `path` is empty or `.`. Failures are logged and
    /// produce no calls.
    pub fn iterate<F>(&self, path: &str, recursive: bool, mut f: F)
    where
        F: FnMut(&str),
    {
        let Some(root) = self.game_path.as_ref() else {
            error!(path, "Cannot iterate assets without a game path");
            return;
        };
        for entry in self.reader.list_or_empty(root, path, recursive) {
            f(&join_entry(path, &entry));
        }
    }
}

/// Prefixes a listed entry with the directory it was listed from
pub fn join_entry(dir: &str, entry: &str) -> String {
    if dir.is_empty() || dir == "." {
        entry.to_string()
    } else if dir.ends_with('/') {
        format!("{}{}", dir, entry)
    } else {
        format!("{}/{}", dir, entry)
    }
}
