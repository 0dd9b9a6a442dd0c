//! In-memory capability tree
//!
//! Directories keep their children in insertion order, which is the order
//! enumeration reports them in.

use crate::provider::{is_valid_name, ByteStream, ChildEntry, ProviderError, TreeProvider};
use core_types::{CapabilityError, NodeId, NodeKind, RootCapability};
use std::collections::{HashMap, HashSet};
use std::io::Cursor;

#[derive(Debug, Clone)]
enum MemoryNode {
    Directory { name: String, children: Vec<NodeId> },
    File { name: String, data: Vec<u8> },
}

impl MemoryNode {
    fn name(&self) -> &str {
        match self {
            MemoryNode::Directory { name, .. } | MemoryNode::File { name, .. } => name,
        }
    }

    fn kind(&self) -> NodeKind {
        match self {
            MemoryNode::Directory { .. } => NodeKind::Directory,
            MemoryNode::File { .. } => NodeKind::File,
        }
    }
}

/// A tree of directories and byte files held in memory
///
/// Each granted root capability owns its own root directory; trees of
/// different capabilities never share nodes.
#[derive(Debug, Clone, Default)]
pub struct MemoryTree {
    nodes: HashMap<NodeId, MemoryNode>,
    grants: HashMap<String, NodeId>,
    revoked: HashSet<String>,
}

impl MemoryTree {
    /// Creates an empty tree with no grants
    pub fn new() -> Self {
        Self::default()
    }

    /// Grants a fresh, empty root directory under `token`
    ///
    /// Granting an existing token replaces its tree.
    pub fn grant(&mut self, token: impl Into<String>) -> RootCapability {
        let token = token.into();
        let root_id = NodeId::new();
        self.nodes.insert(
            root_id,
            MemoryNode::Directory {
                name: String::new(),
                children: Vec::new(),
            },
        );
        if let Some(old_root) = self.grants.insert(token.clone(), root_id) {
            self.drop_subtree(old_root);
        }
        self.revoked.remove(&token);
        RootCapability::from_token(token)
    }

    /// Revokes a capability; its tree stays in memory but cannot be opened
    pub fn revoke(&mut self, root: &RootCapability) {
        self.revoked.insert(root.token().to_string());
    }

    /// Returns the root directory of a granted capability
    pub fn root_of(&self, root: &RootCapability) -> Option<NodeId> {
        self.grants.get(root.token()).copied()
    }

    /// Adds an empty directory under `parent`
    pub fn add_dir(&mut self, parent: NodeId, name: &str) -> Result<NodeId, ProviderError> {
        self.attach(
            parent,
            MemoryNode::Directory {
                name: name.to_string(),
                children: Vec::new(),
            },
        )
    }

    /// Adds a file under `parent`
    pub fn add_file(
        &mut self,
        parent: NodeId,
        name: &str,
        data: impl Into<Vec<u8>>,
    ) -> Result<NodeId, ProviderError> {
        self.attach(
            parent,
            MemoryNode::File {
                name: name.to_string(),
                data: data.into(),
            },
        )
    }

    /// Creates every directory along a `/`-separated path below `root`
    ///
    /// Empty segments are skipped, so `a//b/` creates `a` and `a/b`.
    pub fn add_dir_at(&mut self, root: &RootCapability, path: &str) -> Result<NodeId, ProviderError> {
        let names: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if let Some(bad) = names.iter().find(|name| !is_valid_name(name)) {
            return Err(ProviderError::InvalidName(bad.to_string()));
        }
        let mut current = self.open_root(root)?;
        for name in names {
            current = match self.child_named(current, name) {
                Some((id, NodeKind::Directory)) => id,
                Some((_, NodeKind::File)) => return Err(ProviderError::NotADirectory(name.to_string())),
                None => self.add_dir(current, name)?,
            };
        }
        Ok(current)
    }

    /// Adds a file at a `/`-separated path below `root`, creating parents
    ///
    /// The final component is the file name and must not be empty.
    pub fn add_file_at(
        &mut self,
        root: &RootCapability,
        path: &str,
        data: impl Into<Vec<u8>>,
    ) -> Result<NodeId, ProviderError> {
        let (parent_path, name) = match path.rsplit_once('/') {
            Some((parent, name)) => (parent, name),
            None => ("", path),
        };
        if !is_valid_name(name) {
            return Err(ProviderError::InvalidName(path.to_string()));
        }
        let parent = self.add_dir_at(root, parent_path)?;
        self.add_file(parent, name, data)
    }

    /// Detaches and drops the child `name` of `parent`, with its subtree
    pub fn remove(&mut self, parent: NodeId, name: &str) -> Result<(), ProviderError> {
        let (child, _) = self
            .child_named(parent, name)
            .ok_or_else(|| ProviderError::Gone(name.to_string()))?;
        if let Some(MemoryNode::Directory { children, .. }) = self.nodes.get_mut(&parent) {
            children.retain(|id| *id != child);
        }
        self.drop_subtree(child);
        Ok(())
    }

    /// Number of nodes currently held, roots included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn attach(&mut self, parent: NodeId, node: MemoryNode) -> Result<NodeId, ProviderError> {
        if !is_valid_name(node.name()) {
            return Err(ProviderError::InvalidName(node.name().to_string()));
        }
        if self.child_named(parent, node.name()).is_some() {
            return Err(ProviderError::AlreadyExists(node.name().to_string()));
        }
        let id = NodeId::new();
        match self.nodes.get_mut(&parent) {
            Some(MemoryNode::Directory { children, .. }) => children.push(id),
            Some(MemoryNode::File { name, .. }) => {
                return Err(ProviderError::NotADirectory(name.clone()))
            }
            None => return Err(ProviderError::Gone(parent.to_string())),
        }
        self.nodes.insert(id, node);
        Ok(id)
    }

    fn child_named(&self, parent: NodeId, name: &str) -> Option<(NodeId, NodeKind)> {
        match self.nodes.get(&parent)? {
            MemoryNode::Directory { children, .. } => children.iter().find_map(|id| {
                let node = self.nodes.get(id)?;
                (node.name() == name).then(|| (*id, node.kind()))
            }),
            MemoryNode::File { .. } => None,
        }
    }

    fn drop_subtree(&mut self, id: NodeId) {
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(MemoryNode::Directory { children, .. }) = self.nodes.remove(&next) {
                pending.extend(children);
            }
        }
    }
}

impl TreeProvider for MemoryTree {
    type Node = NodeId;

    fn open_root(&self, root: &RootCapability) -> Result<NodeId, ProviderError> {
        if self.revoked.contains(root.token()) {
            return Err(CapabilityError::Revoked(root.token().to_string()).into());
        }
        let id = self
            .grants
            .get(root.token())
            .copied()
            .ok_or_else(|| CapabilityError::Unknown(root.token().to_string()))?;
        if !self.nodes.contains_key(&id) {
            return Err(CapabilityError::TargetUnavailable(root.token().to_string()).into());
        }
        Ok(id)
    }

    fn children(&self, dir: &NodeId) -> Result<Vec<ChildEntry<NodeId>>, ProviderError> {
        match self.nodes.get(dir) {
            Some(MemoryNode::Directory { children, .. }) => Ok(children
                .iter()
                .filter_map(|id| {
                    let node = self.nodes.get(id)?;
                    Some(ChildEntry::new(node.name(), node.kind(), *id))
                })
                .collect()),
            Some(MemoryNode::File { name, .. }) => Err(ProviderError::NotADirectory(name.clone())),
            None => Err(ProviderError::Gone(dir.to_string())),
        }
    }

    fn exists(&self, node: &NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    fn open_stream(&self, node: &NodeId) -> Result<Box<dyn ByteStream + '_>, ProviderError> {
        match self.nodes.get(node) {
            Some(MemoryNode::File { data, .. }) => Ok(Box::new(Cursor::new(data.as_slice()))),
            Some(MemoryNode::Directory { name, .. }) => {
                Err(ProviderError::StreamUnavailable(format!("{} is a directory", name)))
            }
            None => Err(ProviderError::Gone(node.to_string())),
        }
    }
}
