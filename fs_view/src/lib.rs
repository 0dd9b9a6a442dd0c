//! # Filesystem View
//!
//! This crate provides path resolution over capability-scoped trees.
//!
//! ## Philosophy
//!
//! - **Paths are views, not authority**: Path resolution never grants access you don't have
//! - **There is no global root**: a "root" is simply a capability given to you
//! - **Resolution walks one segment at a time**: every lookup must succeed before the next
//! - **All or nothing**: a failed resolution returns no handle at all
//!
//! ## Design
//!
//! - [`PathSpec`] splits a `/`-separated path into segments; `.` is a no-op
//! - [`PathResolver`] walks a [`TreeProvider`](services_storage::TreeProvider) from its root
//! - [`NodeHandle`] is the transient result of one resolution

pub mod handle;
pub mod path;
pub mod resolver;

pub use handle::NodeHandle;
pub use path::PathSpec;
pub use resolver::{PathResolver, ResolveError};
