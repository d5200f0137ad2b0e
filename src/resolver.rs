//! Path Resolver
//!
//! Pure traversal: normalizes a virtual path into segments and walks a
//! folder's child map, optionally creating missing intermediate folders.

use indexmap::map::Entry;

use crate::types::{Children, FsError, Node};

/// Split a virtual path into its normalized segments. Empty segments are
/// discarded, so leading, trailing and repeated separators all collapse
/// to the same sequence. The empty path yields zero segments (the root).
pub fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|segment| !segment.is_empty()).collect()
}

/// Walk `segments` from `root`, descending one folder per segment, and
/// return the child map of the folder the walk ends in.
///
/// With `create_missing`, an absent name becomes a new empty folder;
/// otherwise the walk fails `NotFound`. A file at any walked position
/// fails `NotAFolder`. Errors carry the path prefix consumed so far.
///
/// Callers that need a *parent* folder pass all segments but the last
/// and decide themselves how to treat the final name (read, insert or
/// remove).
pub fn resolve_children_mut<'a>(
    root: &'a mut Children,
    segments: &[&str],
    create_missing: bool,
    operation: &str,
) -> Result<&'a mut Children, FsError> {
    let mut current = root;
    for (depth, segment) in segments.iter().enumerate() {
        let node = match current.entry((*segment).to_string()) {
            Entry::Occupied(slot) => slot.into_mut(),
            Entry::Vacant(slot) => {
                if !create_missing {
                    return Err(FsError::NotFound {
                        path: segments[..=depth].join("/"),
                        operation: operation.to_string(),
                    });
                }
                slot.insert(Node::folder())
            }
        };
        current = match node {
            Node::Folder { children } => children,
            Node::File { .. } => {
                return Err(FsError::NotAFolder {
                    path: segments[..=depth].join("/"),
                    operation: operation.to_string(),
                });
            }
        };
    }
    Ok(current)
}

/// Read-only walk over all of `segments`; used by folder-targeted reads,
/// which resolve the full path rather than the parent.
pub fn resolve_children<'a>(
    root: &'a Children,
    segments: &[&str],
    operation: &str,
) -> Result<&'a Children, FsError> {
    let mut current = root;
    for (depth, segment) in segments.iter().enumerate() {
        current = match current.get(*segment) {
            Some(Node::Folder { children }) => children,
            Some(Node::File { .. }) => {
                return Err(FsError::NotAFolder {
                    path: segments[..=depth].join("/"),
                    operation: operation.to_string(),
                });
            }
            None => {
                return Err(FsError::NotFound {
                    path: segments[..=depth].join("/"),
                    operation: operation.to_string(),
                });
            }
        };
    }
    Ok(current)
}

// ============================================================================
// Tests
// ============================================================================
