//! virtual-file-tree - An in-memory, path-addressable file tree
//!
//! Emulates a minimal filesystem: named folders containing folders or
//! files, files holding opaque byte payloads, operations to create,
//! read, write, delete, enumerate and stat them, whole-tree
//! serialization, and import from a real directory through the host
//! bridge. Everything is synchronous and in-memory; there is no
//! persistence and no internal locking.

pub mod bridge;
pub mod resolver;
pub mod snapshot;
pub mod tree;
pub mod types;

pub use bridge::{HostFs, StdFs};
pub use snapshot::Snapshot;
pub use tree::FileTree;
pub use types::{FileEncoding, FsError, Node, NodeStat, ReadFolderOptions};
