//! Host Filesystem Bridge
//!
//! External collaborator: the capability surface the core needs from a
//! real filesystem, plus import routines that mirror a real directory
//! subtree into the virtual tree. Everything here is synchronous and
//! blocking, like the rest of the core.

use std::fs;
use std::io;
use std::path::Path;

use crate::resolver::split_path;
use crate::tree::FileTree;
use crate::types::FsError;

/// What the import routines require from the environment.
pub trait HostFs {
    fn path_exists(&self, path: &Path) -> bool;
    fn is_dir(&self, path: &Path) -> bool;
    fn is_file(&self, path: &Path) -> bool;
    fn list_dir(&self, path: &Path) -> io::Result<Vec<String>>;
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// `std::fs`-backed bridge.
pub struct StdFs;

impl HostFs for StdFs {
    fn path_exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(path)? {
            names.push(entry?.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }
}

impl FileTree {
    /// Mirror a real directory subtree into the tree at `virtual_path`.
    ///
    /// The target virtual folder is force-created first (with
    /// `recursive`, missing virtual ancestors too); then every real
    /// entry is copied, directories by recursing and files by reading
    /// their bytes. Fails `NotFound` if the real path is missing and
    /// `NotAFolder` if it is not a directory. Host I/O failures surface
    /// as `Io`.
    pub fn import_folder(
        &mut self,
        host: &dyn HostFs,
        real_path: &Path,
        virtual_path: &str,
        recursive: bool,
    ) -> Result<(), FsError> {
        if !host.path_exists(real_path) {
            return Err(FsError::NotFound {
                path: real_path.display().to_string(),
                operation: "import".to_string(),
            });
        }
        if !host.is_dir(real_path) {
            return Err(FsError::NotAFolder {
                path: real_path.display().to_string(),
                operation: "import".to_string(),
            });
        }

        self.create_folder(virtual_path, recursive)?;

        let names = host.list_dir(real_path).map_err(|err| FsError::Io {
            path: real_path.display().to_string(),
            operation: "scandir".to_string(),
            source: err,
        })?;
        for name in names {
            let real_child = real_path.join(&name);
            let virtual_child = join_virtual(virtual_path, &name);
            if host.is_dir(&real_child) {
                self.import_folder(host, &real_child, &virtual_child, recursive)?;
            } else if host.is_file(&real_child) {
                let data = host.read_file(&real_child).map_err(|err| FsError::Io {
                    path: real_child.display().to_string(),
                    operation: "read".to_string(),
                    source: err,
                })?;
                self.write_file(&virtual_child, &data, recursive)?;
            }
            // Anything that is neither (sockets, dangling links on the
            // host side) is skipped.
        }
        Ok(())
    }

    /// Copy one real file into the tree at `virtual_path`. Fails
    /// `NotFound` if the real path is missing and `NotAFile` if it is
    /// not a regular file.
    pub fn import_file(
        &mut self,
        host: &dyn HostFs,
        real_path: &Path,
        virtual_path: &str,
        recursive: bool,
    ) -> Result<(), FsError> {
        if !host.path_exists(real_path) {
            return Err(FsError::NotFound {
                path: real_path.display().to_string(),
                operation: "import".to_string(),
            });
        }
        if !host.is_file(real_path) {
            return Err(FsError::NotAFile {
                path: real_path.display().to_string(),
                operation: "import".to_string(),
            });
        }
        let data = host.read_file(real_path).map_err(|err| FsError::Io {
            path: real_path.display().to_string(),
            operation: "read".to_string(),
            source: err,
        })?;
        self.write_file(virtual_path, &data, recursive)
    }
}

fn join_virtual(base: &str, name: &str) -> String {
    let segments = split_path(base);
    if segments.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", segments.join("/"), name)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ReadFolderOptions;

    fn populate_host_dir(dir: &Path) {
        fs::create_dir(dir.join("sub")).unwrap();
        fs::write(dir.join("top.txt"), b"top").unwrap();
        fs::write(dir.join("sub").join("inner.bin"), [0x01, 0x02]).unwrap();
    }

    #[test]
    fn test_import_folder_mirrors_directory() {
        let dir = tempfile::tempdir().unwrap();
        populate_host_dir(dir.path());

        let mut tree = FileTree::new();
        tree.import_folder(&StdFs, dir.path(), "staged/input", true).unwrap();

        let listing = tree
            .read_folder(
                "staged/input",
                &ReadFolderOptions {
                    recursive: true,
                    full_path: true,
                    only_files: true,
                },
            )
            .unwrap();
        assert_eq!(
            listing,
            vec!["staged/input/sub/inner.bin", "staged/input/top.txt"]
        );
        assert_eq!(tree.read_file("staged/input/top.txt").unwrap(), b"top");
        assert_eq!(
            tree.read_file("staged/input/sub/inner.bin").unwrap(),
            &[0x01, 0x02]
        );
    }

    #[test]
    fn test_import_folder_into_root() {
        let dir = tempfile::tempdir().unwrap();
        populate_host_dir(dir.path());

        let mut tree = FileTree::new();
        tree.import_folder(&StdFs, dir.path(), "", false).unwrap();
        assert!(tree.exist("top.txt"));
        assert!(tree.exist("sub/inner.bin"));
    }

    #[test]
    fn test_import_folder_missing_real_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut tree = FileTree::new();
        let err = tree
            .import_folder(&StdFs, &dir.path().join("absent"), "x", true)
            .unwrap_err();
        assert!(matches!(err, FsError::NotFound { .. }));
    }

    #[test]
    fn test_import_folder_rejects_real_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        fs::write(&file, b"x").unwrap();

        let mut tree = FileTree::new();
        let err = tree.import_folder(&StdFs, &file, "x", true).unwrap_err();
        assert!(matches!(err, FsError::NotAFolder { .. }));
    }

    #[test]
    fn test_import_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        fs::write(&file, b"payload").unwrap();

        let mut tree = FileTree::new();
        tree.import_file(&StdFs, &file, "deep/copy.txt", true).unwrap();
        assert_eq!(tree.read_file("deep/copy.txt").unwrap(), b"payload");

        let err = tree
            .import_file(&StdFs, dir.path(), "dir-as-file", true)
            .unwrap_err();
        assert!(matches!(err, FsError::NotAFile { .. }));
    }
}
