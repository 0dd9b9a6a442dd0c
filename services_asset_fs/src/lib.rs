//! # Asset File System
//!
//! The interface the game engine uses to load its assets, layered on top of
//! the tree reader service.
//!
//! ## Philosophy
//!
//! - The engine names assets relative to a game path, which is a root
//!   capability and never a host path
//! - Assets are always fully buffered before they are handed out
//! - Loaders that cannot handle errors use the empty-on-failure calls;
//!   `open` keeps the failure kind
//!
//! ## Example
//!
//! ```
//! use services_asset_fs::{AssetFileSystem, paths};
//! use services_fs_view::ReadStrategy;
//! use services_storage::MemoryTree;
//!
//! let mut tree = MemoryTree::new();
//! let cap = tree.grant("games");
//! tree.add_file_at(&cap, "Data/Textures/sky.raw", b"sky".to_vec()).unwrap();
//!
//! let mut assets = AssetFileSystem::new(tree, ReadStrategy::ToCompletion);
//! assets.set_game_path(cap);
//! assert!(assets.exists(paths::TEXTURES));
//! assert_eq!(assets.read_all("Data/Textures/sky.raw"), b"sky");
//! ```

pub mod facade;
pub mod paths;
pub mod stream;

pub use facade::{join_entry, AssetError, AssetFileSystem};
pub use paths::fix_path;
pub use stream::MemoryStream;
