//! # Core Types
//!
//! This crate defines the vocabulary shared by every Treecap crate.
//!
//! ## Philosophy
//!
//! - **Capabilities, not paths**: access to a tree starts from an opaque
//!   [`RootCapability`] that was granted elsewhere. A raw path string never
//!   stands in for one.
//! - **Two kinds of node**: a tree only holds directories and files.
//!
//! ## Key Types
//!
//! - [`RootCapability`]: Opaque token naming a granted storage subtree
//! - [`CapabilityError`]: Why a root capability could not be opened
//! - [`NodeKind`]: Directory or file
//! - [`NodeId`]: Identifier for nodes of in-memory trees

pub mod capability;
pub mod ids;
pub mod node;

pub use capability::{CapabilityError, RootCapability};
pub use ids::NodeId;
pub use node::NodeKind;
