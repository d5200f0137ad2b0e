//! Snapshot Serialization
//!
//! Flatten the tree into a single JSON document mapping full virtual
//! paths to base64 file contents, and rebuild a tree from one. The
//! format is file-driven: folders are implicit in path prefixes, so a
//! folder with no files anywhere beneath it does not appear in the
//! document and is lost on a save/load round trip.

use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::tree::FileTree;
use crate::types::{FsError, ReadFolderOptions};

/// The serialized document: absolute virtual path (no leading slash) to
/// base64-encoded file contents. A `BTreeMap` keeps key order stable
/// across saves of the same tree.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(pub BTreeMap<String, String>);

impl FileTree {
    /// Serialize every file in the tree into one JSON document.
    ///
    /// Empty folders are not representable in the output. Callers that
    /// round-trip through `save`/`load` lose them; that limitation is
    /// part of the wire format.
    pub fn save(&self) -> Result<String, FsError> {
        let options = ReadFolderOptions {
            recursive: true,
            full_path: true,
            only_files: true,
        };
        let mut snapshot = Snapshot::default();
        for path in self.read_folder("", &options)? {
            let data = self.read_file(&path)?;
            snapshot.0.insert(path, STANDARD.encode(data));
        }
        serde_json::to_string(&snapshot).map_err(|err| FsError::InvalidSnapshot {
            message: err.to_string(),
        })
    }

    /// Replace the whole tree with the contents of a serialized
    /// document: the root's children are discarded, then every entry is
    /// written with ancestors created on demand. Entry order does not
    /// affect the final tree, since each entry targets a distinct full
    /// path; a key that is a folder-prefix of another key fails
    /// `NotAFolder` through the resolver.
    pub fn load(&mut self, document: &str) -> Result<(), FsError> {
        let snapshot: Snapshot =
            serde_json::from_str(document).map_err(|err| FsError::InvalidSnapshot {
                message: err.to_string(),
            })?;
        self.root.clear();
        for (path, encoded) in snapshot.0 {
            let data = STANDARD
                .decode(encoded.as_bytes())
                .map_err(|err| FsError::InvalidSnapshot {
                    message: format!("'{}': {}", path, err),
                })?;
            self.write_file(&path, &data, true)?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_load_round_trip() {
        let mut tree = FileTree::new();
        tree.write_file("docs/readme.txt", b"Hello", true).unwrap();
        tree.write_file("docs/sub/data.bin", &[0x00, 0xff, 0x10], true).unwrap();
        tree.write_file("top.txt", b"", false).unwrap();

        let document = tree.save().unwrap();
        let mut restored = FileTree::new();
        restored.load(&document).unwrap();

        assert_eq!(restored, tree);
        assert_eq!(restored.read_file("docs/readme.txt").unwrap(), b"Hello");
        assert_eq!(
            restored.read_file("docs/sub/data.bin").unwrap(),
            &[0x00, 0xff, 0x10]
        );
        assert_eq!(restored.read_file("top.txt").unwrap(), b"");
    }

    #[test]
    fn test_save_document_shape() {
        let mut tree = FileTree::new();
        tree.write_file("docs/readme.txt", b"Hello", true).unwrap();

        let document = tree.save().unwrap();
        assert_eq!(document, r#"{"docs/readme.txt":"SGVsbG8="}"#);
    }

    #[test]
    fn test_empty_folders_vanish_on_round_trip() {
        let mut tree = FileTree::new();
        tree.write_file("kept/file.txt", b"x", true).unwrap();
        tree.create_folder("hollow/nested", true).unwrap();

        let document = tree.save().unwrap();
        let mut restored = FileTree::new();
        restored.load(&document).unwrap();

        assert!(restored.exist("kept/file.txt"));
        assert!(!restored.exist("hollow"));
        assert!(!restored.exist("hollow/nested"));
    }

    #[test]
    fn test_load_replaces_previous_contents() {
        let mut tree = FileTree::new();
        tree.write_file("old/stale.txt", b"stale", true).unwrap();

        tree.load(r#"{"fresh.txt":"SGVsbG8="}"#).unwrap();
        assert!(!tree.exist("old"));
        assert!(!tree.exist("old/stale.txt"));
        assert_eq!(tree.read_file("fresh.txt").unwrap(), b"Hello");
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let mut tree = FileTree::new();
        assert!(matches!(
            tree.load("not json"),
            Err(FsError::InvalidSnapshot { .. })
        ));
        assert!(matches!(
            tree.load(r#"{"a.txt": 7}"#),
            Err(FsError::InvalidSnapshot { .. })
        ));
    }

    #[test]
    fn test_load_rejects_undecodable_base64() {
        let mut tree = FileTree::new();
        let err = tree.load(r#"{"a.txt":"@@not-base64@@"}"#).unwrap_err();
        match err {
            FsError::InvalidSnapshot { message } => assert!(message.contains("a.txt")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_fails_when_key_is_a_prefix_of_another() {
        // "a" becomes a file first (BTreeMap order), so "a/b.txt" walks
        // through a file position.
        let mut tree = FileTree::new();
        let err = tree
            .load(r#"{"a":"eA==","a/b.txt":"eA=="}"#)
            .unwrap_err();
        match err {
            FsError::NotAFolder { path, .. } => assert_eq!(path, "a"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_empty_document_yields_empty_tree() {
        let mut tree = FileTree::new();
        tree.write_file("x.txt", b"x", false).unwrap();
        tree.load("{}").unwrap();
        assert_eq!(tree, FileTree::new());
        assert_eq!(FileTree::new().save().unwrap(), "{}");
    }
}
