//! Virtual File Tree Types
//!
//! Core types for the virtual file tree: the node model, the error
//! taxonomy, stat results, listing options and text encodings.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use indexmap::IndexMap;
use thiserror::Error;

/// Child map of a folder: name to node, names unique within one folder.
pub type Children = IndexMap<String, Node>;

/// Virtual file tree errors
#[derive(Error, Debug)]
pub enum FsError {
    #[error("ENOENT: no such file or folder, {operation} '{path}'")]
    NotFound { path: String, operation: String },

    #[error("ENOTDIR: not a folder, {operation} '{path}'")]
    NotAFolder { path: String, operation: String },

    #[error("EISDIR: illegal operation on a folder, {operation} '{path}'")]
    NotAFile { path: String, operation: String },

    #[error("EINVAL: invalid argument, {operation} '{path}'")]
    InvalidArgument { path: String, operation: String },

    #[error("invalid snapshot document: {message}")]
    InvalidSnapshot { message: String },

    #[error("EIO: host filesystem error, {operation} '{path}'")]
    Io {
        path: String,
        operation: String,
        #[source]
        source: std::io::Error,
    },
}

/// A node in the tree: a folder exclusively owning its children, or a
/// file holding an opaque byte payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Folder { children: Children },
    File { data: Vec<u8> },
}

impl Node {
    /// New empty folder node.
    pub fn folder() -> Self {
        Node::Folder {
            children: Children::new(),
        }
    }

    /// New file node holding `data`.
    pub fn file(data: impl Into<Vec<u8>>) -> Self {
        Node::File { data: data.into() }
    }

    /// Check if node is a file
    pub fn is_file(&self) -> bool {
        matches!(self, Node::File { .. })
    }

    /// Check if node is a folder
    pub fn is_folder(&self) -> bool {
        matches!(self, Node::Folder { .. })
    }
}

/// Text renderings of a file payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileEncoding {
    #[default]
    Utf8,
    Base64,
    Hex,
}

impl FileEncoding {
    /// Parse encoding from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "utf8" | "utf-8" => Some(Self::Utf8),
            "base64" => Some(Self::Base64),
            "hex" => Some(Self::Hex),
            _ => None,
        }
    }
}

/// Stat result: byte length for files, recursive descendant count for
/// folders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStat {
    Folder { entries: usize },
    File { size: usize },
}

/// Options for read_folder
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadFolderOptions {
    /// Descend into child folders, concatenating results depth-first.
    pub recursive: bool,
    /// Render entries as full paths from the tree root instead of bare
    /// names.
    pub full_path: bool,
    /// Drop folder entries from the listing (recursion still descends).
    pub only_files: bool,
}

// ============================================================================
// Encoding utilities
// ============================================================================

/// Render bytes as text in the given encoding. Utf8 is lossy: invalid
/// sequences become replacement characters.
pub fn encode_bytes(data: &[u8], encoding: FileEncoding) -> String {
    match encoding {
        FileEncoding::Utf8 => String::from_utf8_lossy(data).into_owned(),
        FileEncoding::Base64 => STANDARD.encode(data),
        FileEncoding::Hex => hex_encode(data),
    }
}

fn hex_encode(data: &[u8]) -> String {
    data.iter().map(|b| format!("{:02x}", b)).collect()
}

// ============================================================================
// Tests
// ============================================================================
