//! Virtual File Tree
//!
//! The tree itself plus the mutation and read operations built on the
//! path resolver.

use crate::resolver::{resolve_children, resolve_children_mut, split_path};
use crate::types::{
    encode_bytes, Children, FileEncoding, FsError, Node, NodeStat, ReadFolderOptions,
};

/// An in-memory, path-addressable tree of folders and files.
///
/// The root is always a folder; it is held here directly as its child
/// map, so the invariant is true by construction. Construct one value per
/// logical virtual filesystem. Not thread-safe: wrap it in a lock if it
/// has to be shared.
///
/// Create and write are force-operations: they replace whatever node
/// currently occupies the final name, folder or file. That clobbering
/// behavior is a documented contract, not an accident.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileTree {
    pub(crate) root: Children,
}

impl FileTree {
    /// Create a new empty tree: a root folder with no children.
    pub fn new() -> Self {
        Self {
            root: Children::new(),
        }
    }

    /// Create a folder, replacing any node that already occupies the
    /// final name. With `recursive`, missing ancestors are created along
    /// the way; otherwise a missing ancestor fails `NotFound`. The empty
    /// path is accepted as a no-op, since the root always exists.
    pub fn create_folder(&mut self, path: &str, recursive: bool) -> Result<(), FsError> {
        let segments = split_path(path);
        match segments.split_last() {
            None => Ok(()),
            Some((name, ancestors)) => {
                let parent = resolve_children_mut(&mut self.root, ancestors, recursive, "mkdir")?;
                parent.insert((*name).to_string(), Node::folder());
                Ok(())
            }
        }
    }

    /// Write a file, replacing any node that already occupies the final
    /// name. With `recursive`, missing ancestors are created along the
    /// way. The empty path is invalid: the root cannot become a file.
    pub fn write_file(&mut self, path: &str, data: &[u8], recursive: bool) -> Result<(), FsError> {
        let segments = split_path(path);
        match segments.split_last() {
            None => Err(FsError::InvalidArgument {
                path: path.to_string(),
                operation: "write".to_string(),
            }),
            Some((name, ancestors)) => {
                let parent = resolve_children_mut(&mut self.root, ancestors, recursive, "write")?;
                parent.insert((*name).to_string(), Node::file(data));
                Ok(())
            }
        }
    }

    /// Delete the node at `path`, folder or file. Removing an absent
    /// final name is a silent no-op, so delete is idempotent; invalid
    /// ancestor segments still fail `NotFound`/`NotAFolder`. The empty
    /// path is invalid: the root cannot be deleted.
    pub fn delete(&mut self, path: &str) -> Result<(), FsError> {
        let segments = split_path(path);
        match segments.split_last() {
            None => Err(FsError::InvalidArgument {
                path: path.to_string(),
                operation: "rm".to_string(),
            }),
            Some((name, ancestors)) => {
                let parent = resolve_children_mut(&mut self.root, ancestors, false, "rm")?;
                parent.shift_remove(*name);
                Ok(())
            }
        }
    }

    /// List a folder. Direct children are sorted by name. `only_files`
    /// drops folder entries from the listing while recursion still
    /// descends into them; `full_path` renders entries as paths from the
    /// tree root; `recursive` walks depth-first, a child folder's entries
    /// following immediately after its own entry.
    pub fn read_folder(
        &self,
        path: &str,
        options: &ReadFolderOptions,
    ) -> Result<Vec<String>, FsError> {
        let segments = split_path(path);
        let children = resolve_children(&self.root, &segments, "scandir")?;
        let mut listing = Vec::new();
        collect_listing(children, &segments.join("/"), options, &mut listing);
        Ok(listing)
    }

    /// Read a file's raw bytes.
    pub fn read_file(&self, path: &str) -> Result<&[u8], FsError> {
        let segments = split_path(path);
        match segments.split_last() {
            // The root is a folder, never a file.
            None => Err(FsError::NotAFile {
                path: path.to_string(),
                operation: "read".to_string(),
            }),
            Some((name, ancestors)) => {
                let parent = resolve_children(&self.root, ancestors, "read")?;
                match parent.get(*name) {
                    Some(Node::File { data }) => Ok(data.as_slice()),
                    Some(Node::Folder { .. }) => Err(FsError::NotAFile {
                        path: segments.join("/"),
                        operation: "read".to_string(),
                    }),
                    None => Err(FsError::NotFound {
                        path: segments.join("/"),
                        operation: "read".to_string(),
                    }),
                }
            }
        }
    }

    /// Read a file rendered as text in the given encoding.
    pub fn read_file_text(&self, path: &str, encoding: FileEncoding) -> Result<String, FsError> {
        let data = self.read_file(path)?;
        Ok(encode_bytes(data, encoding))
    }

    /// Check whether `path` names an existing node. Never fails: a
    /// missing ancestor or a file in a folder position both answer
    /// `false`. The root always exists, so the empty path is `true`.
    pub fn exist(&self, path: &str) -> bool {
        let segments = split_path(path);
        match segments.split_last() {
            None => true,
            Some((name, ancestors)) => {
                let mut current = &self.root;
                for segment in ancestors {
                    match current.get(*segment) {
                        Some(Node::Folder { children }) => current = children,
                        _ => return false,
                    }
                }
                current.contains_key(*name)
            }
        }
    }

    /// Stat a node: byte length for files, recursive descendant count
    /// for folders. The empty path stats the whole tree.
    pub fn stat(&self, path: &str) -> Result<NodeStat, FsError> {
        let segments = split_path(path);
        match segments.split_last() {
            None => Ok(NodeStat::Folder {
                entries: count_descendants(&self.root),
            }),
            Some((name, ancestors)) => {
                let parent = resolve_children(&self.root, ancestors, "stat")?;
                match parent.get(*name) {
                    Some(Node::File { data }) => Ok(NodeStat::File { size: data.len() }),
                    Some(Node::Folder { children }) => Ok(NodeStat::Folder {
                        entries: count_descendants(children),
                    }),
                    None => Err(FsError::NotFound {
                        path: segments.join("/"),
                        operation: "stat".to_string(),
                    }),
                }
            }
        }
    }
}

fn collect_listing(
    children: &Children,
    prefix: &str,
    options: &ReadFolderOptions,
    listing: &mut Vec<String>,
) {
    let mut entries: Vec<(&String, &Node)> = children.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    for (name, node) in entries {
        let full = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{}/{}", prefix, name)
        };
        if !options.only_files || node.is_file() {
            listing.push(if options.full_path {
                full.clone()
            } else {
                name.clone()
            });
        }
        if options.recursive {
            if let Node::Folder { children } = node {
                collect_listing(children, &full, options, listing);
            }
        }
    }
}

fn count_descendants(children: &Children) -> usize {
    children
        .values()
        .map(|node| match node {
            Node::Folder { children } => 1 + count_descendants(children),
            Node::File { .. } => 1,
        })
        .sum()
}

// ============================================================================
// Tests
// ============================================================================
