//! # Tree Reader Service
//!
//! This service lists and reads capability-scoped trees.
//!
//! ## Philosophy
//!
//! - All operations start from a root capability
//! - Service never escalates authority
//! - Read only: there is no write, rename or delete
//! - Failures are tagged; callers that cannot handle them get an
//!   empty-on-failure compatibility mode
//!
//! ## Operations
//!
//! - `stat(path)`: Resolve a path and describe the node
//! - `list(path, recursive)`: Relative paths of the files below a directory
//! - `read_file(path)`: Whole contents of one file

pub mod listing;
pub mod operations;
pub mod reader;
pub mod service;

pub use listing::list_node;
pub use operations::{ReadStrategy, StatInfo, TreeError, TreeOperations};
pub use reader::read_node;
pub use service::TreeReaderService;
