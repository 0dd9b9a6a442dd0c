//! Tree Reader Service implementation
//!
//! This module provides the service that implements tree operations over a
//! storage provider.

use crate::listing::list_node;
use crate::operations::{ReadStrategy, StatInfo, TreeError, TreeOperations};
use crate::reader::read_node;
use core_types::RootCapability;
use fs_view::{NodeHandle, PathResolver};
use services_storage::TreeProvider;
use tracing::error;

/// The Tree Reader Service
///
/// Owns a storage provider and answers list and read requests against any
/// root capability that provider recognises.
pub struct TreeReaderService<P: TreeProvider> {
    provider: P,
    strategy: ReadStrategy,
}

impl<P: TreeProvider> TreeReaderService<P> {
    /// Creates a service that reads files to completion
    pub fn new(provider: P) -> Self {
        Self::with_strategy(provider, ReadStrategy::default())
    }

    /// Creates a service with an explicit read strategy
    pub fn with_strategy(provider: P, strategy: ReadStrategy) -> Self {
        Self { provider, strategy }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    pub fn into_provider(self) -> P {
        self.provider
    }

    pub fn strategy(&self) -> ReadStrategy {
        self.strategy
    }

    pub fn set_strategy(&mut self, strategy: ReadStrategy) {
        self.strategy = strategy;
    }

    /// Resolves a path to a transient handle
    pub fn resolve(
        &self,
        root: &RootCapability,
        path: &str,
    ) -> Result<NodeHandle<P::Node>, TreeError> {
        Ok(PathResolver::resolve_str(&self.provider, root, path)?)
    }

    /// Lists files, or returns an empty listing if anything fails
    ///
    /// The failure is logged. An empty result cannot be told apart from a
    /// directory without files.
    pub fn list_or_empty(&self, root: &RootCapability, path: &str, recursive: bool) -> Vec<String> {
        self.list(root, path, recursive).unwrap_or_else(|e| {
            error!(root = %root, path, error = %e, "Listing failed");
            Vec::new()
        })
    }

    /// Reads a file, or returns no bytes if anything fails
    ///
    /// The failure is logged. An empty result cannot be told apart from an
    /// empty file.
    pub fn read_file_or_empty(&self, root: &RootCapability, path: &str) -> Vec<u8> {
        self.read_file(root, path).unwrap_or_else(|e| {
            error!(root = %root, path, error = %e, "Error reading file");
            Vec::new()
        })
    }
}

impl<P: TreeProvider> TreeOperations for TreeReaderService<P> {
    fn stat(&self, root: &RootCapability, path: &str) -> Result<StatInfo, TreeError> {
        let handle = self.resolve(root, path)?;
        Ok(StatInfo {
            kind: handle.kind(),
            name: handle.name().to_string(),
            path: handle.path().to_string(),
        })
    }

    fn list(
        &self,
        root: &RootCapability,
        path: &str,
        recursive: bool,
    ) -> Result<Vec<String>, TreeError> {
        let handle = self.resolve(root, path)?;
        Ok(list_node(&self.provider, &handle, recursive))
    }

    fn read_file(&self, root: &RootCapability, path: &str) -> Result<Vec<u8>, TreeError> {
        let handle = self.resolve(root, path)?;
        read_node(&self.provider, &handle, self.strategy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::NodeKind;
    use services_storage::MemoryTree;

    fn service() -> (TreeReaderService<MemoryTree>, RootCapability) {
        let mut tree = MemoryTree::new();
        let cap = tree.grant("games");
        tree.add_file_at(&cap, "Data/Textures/ground.raw", b"ground".to_vec())
            .unwrap();
        tree.add_file_at(&cap, "Data/readme.txt", b"hi".to_vec())
            .unwrap();
        (TreeReaderService::new(tree), cap)
    }

    #[test]
    fn test_service_defaults() {
        let (service, _) = service();
        assert_eq!(service.strategy(), ReadStrategy::ToCompletion);
    }

    #[test]
    fn test_stat_root_and_file() {
        let (service, cap) = service();

        let root = service.stat(&cap, "").unwrap();
        assert_eq!(root.kind, NodeKind::Directory);
        assert_eq!(root.name, "");

        let file = service.stat(&cap, "Data/./Textures/ground.raw").unwrap();
        assert_eq!(file.kind, NodeKind::File);
        assert_eq!(file.name, "ground.raw");
        assert_eq!(file.path, "Data/Textures/ground.raw");
    }

    #[test]
    fn test_list_and_read() {
        let (service, cap) = service();
        assert_eq!(service.list(&cap, "Data", false).unwrap(), vec!["readme.txt"]);
        assert_eq!(
            service.list(&cap, "Data", true).unwrap(),
            vec!["Textures/ground.raw", "readme.txt"]
        );
        assert_eq!(service.read_file(&cap, "Data/readme.txt").unwrap(), b"hi");
    }

    #[test]
    fn test_missing_paths_are_tagged() {
        let (service, cap) = service();
        assert!(service.list(&cap, "Scripts", true).unwrap_err().is_not_found());
        assert!(service.read_file(&cap, "Data/nope").unwrap_err().is_not_found());
    }

    #[test]
    fn test_compat_mode_collapses_failures() {
        let (service, cap) = service();
        assert!(service.list_or_empty(&cap, "Scripts", true).is_empty());
        assert!(service.read_file_or_empty(&cap, "Data/nope").is_empty());
        assert!(service
            .read_file_or_empty(&RootCapability::from_token("revoked"), "Data/readme.txt")
            .is_empty());
    }

    #[test]
    fn test_set_strategy() {
        let (mut service, cap) = service();
        service.set_strategy(ReadStrategy::BoundedAvailable);
        assert_eq!(service.read_file(&cap, "Data/readme.txt").unwrap(), b"hi");
    }

    #[test]
    fn test_provider_mut_sees_new_files() {
        let (mut service, cap) = service();
        service
            .provider_mut()
            .add_file_at(&cap, "Data/new.txt", b"n".to_vec())
            .unwrap();
        assert_eq!(service.read_file(&cap, "Data/new.txt").unwrap(), b"n");
    }
}
