//! # Storage Service
//!
//! This crate defines the boundary to the storage service that hands out
//! capability-scoped trees.
//!
//! ## Philosophy
//!
//! **The tree is reached through a capability, never through a path.**
//!
//! The operating system (or any other store) grants an opaque root token.
//! Everything below it is reached by asking the provider for children of a
//! node it already gave us. There is no ambient root and no way to name a
//! node the provider did not produce.
//!
//! ## Design
//!
//! - **TreeProvider**: open a root, enumerate children, open byte streams
//! - **ByteStream**: `Read` plus an `available()` hint
//! - **MemoryTree**: in-memory provider for embedders and tests
//! - **HostTree**: provider that grants tokens to real host directories
//! - **FailingTree**: wrapper that injects storage failures for tests

pub mod failing_tree;
pub mod host_tree;
pub mod memory_tree;
pub mod provider;

pub use failing_tree::{FailingTree, FailurePolicy, TrackedNode};
pub use host_tree::{HostFileStream, HostTree};
pub use memory_tree::MemoryTree;
pub use provider::{is_valid_name, ByteStream, ChildEntry, ProviderError, TreeProvider};
