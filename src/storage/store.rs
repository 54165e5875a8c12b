//! Served-Root File Store
//!
//! Read-only view over the directory whose files the server exposes.
//!
//! ## Design Decisions
//!
//! 1. **No caching**: every request stats and reads the filesystem fresh, so
//!    a file disappearing between a listing and a later request is a normal
//!    runtime condition, not a bug.
//! 2. **Blocking I/O**: operations use `std::fs`. Each connection runs them
//!    sequentially inside its own task, so one slow read cannot stall another
//!    connection's requests.
//! 3. **Immediate regular files only**: directories and anything below them
//!    are never listed or served by the listing.
//!
//! Names are joined to the root as relative path components without
//! traversal sanitization, matching the reference behavior this server
//! replicates. A hardened deployment should confine resolved paths to the
//! served root.

use std::fs::{self, File};
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors reported by file store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The named file does not exist in the served root.
    #[error("file not found")]
    NotFound,

    /// Any other filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Read-only view over the served root directory.
///
/// One instance is shared across connections behind an `Arc`; it holds no
/// mutable state.
#[derive(Debug, Clone)]
pub struct FileStore {
    /// The directory whose immediate regular files are served.
    root: PathBuf,
}

impl FileStore {
    /// Creates a store over `root`, creating the directory if absent.
    ///
    /// Creation is idempotent: an existing directory is left untouched.
    pub fn new(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Returns the served root path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a client-supplied name against the served root.
    fn resolve(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Lists the immediate regular files in the served root.
    ///
    /// Names are sorted lexicographically so listings are deterministic;
    /// non-UTF-8 names are rendered lossily.
    pub fn list_regular_files(&self) -> StoreResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Reports whether `name` resolves to an existing path.
    pub fn exists(&self, name: &str) -> bool {
        self.resolve(name).exists()
    }

    /// Returns the byte size of the named file.
    pub fn size(&self, name: &str) -> StoreResult<u64> {
        match fs::metadata(self.resolve(name)) {
            Ok(meta) => Ok(meta.len()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(StoreError::NotFound),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    /// Reads exactly `len` bytes starting at `offset` from the named file.
    ///
    /// The caller is expected to have bounds-checked `offset`/`len` against
    /// the file size; a file shrinking underneath us surfaces as an I/O
    /// error rather than a short read.
    pub fn read_range(&self, name: &str, offset: u64, len: u64) -> StoreResult<Vec<u8>> {
        let mut file = match File::open(self.resolve(name)) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(StoreError::NotFound),
            Err(e) => return Err(StoreError::Io(e)),
        };

        file.seek(SeekFrom::Start(offset))?;
        let mut data = vec![0u8; len as usize];
        file.read_exact(&mut data)?;
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn store_with_files(files: &[(&str, &[u8])]) -> (TempDir, FileStore) {
        let dir = TempDir::new().unwrap();
        for (name, contents) in files {
            let mut f = File::create(dir.path().join(name)).unwrap();
            f.write_all(contents).unwrap();
        }
        let store = FileStore::new(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_new_creates_missing_root() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("served");
        assert!(!root.exists());

        let store = FileStore::new(&root).unwrap();
        assert!(root.is_dir());

        // Idempotent over an existing directory
        let again = FileStore::new(&root).unwrap();
        assert_eq!(store.root(), again.root());
    }

    #[test]
    fn test_list_regular_files_sorted() {
        let (_dir, store) = store_with_files(&[("b.bin", b"xy"), ("a.txt", b"ABCD")]);
        assert_eq!(store.list_regular_files().unwrap(), vec!["a.txt", "b.bin"]);
    }

    #[test]
    fn test_list_skips_directories() {
        let (dir, store) = store_with_files(&[("a.txt", b"ABCD")]);
        fs::create_dir(dir.path().join("subdir")).unwrap();
        assert_eq!(store.list_regular_files().unwrap(), vec!["a.txt"]);
    }

    #[test]
    fn test_size() {
        let (_dir, store) = store_with_files(&[("a.txt", b"ABCD")]);
        assert_eq!(store.size("a.txt").unwrap(), 4);
        assert!(matches!(store.size("missing.txt"), Err(StoreError::NotFound)));
    }

    #[test]
    fn test_exists() {
        let (_dir, store) = store_with_files(&[("a.txt", b"ABCD")]);
        assert!(store.exists("a.txt"));
        assert!(!store.exists("missing.txt"));
    }

    #[test]
    fn test_read_range() {
        let (_dir, store) = store_with_files(&[("a.txt", b"ABCD")]);
        assert_eq!(store.read_range("a.txt", 1, 2).unwrap(), b"BC");
        assert_eq!(store.read_range("a.txt", 0, 4).unwrap(), b"ABCD");
        assert_eq!(store.read_range("a.txt", 4, 0).unwrap(), b"");
    }

    #[test]
    fn test_read_range_missing_file() {
        let (_dir, store) = store_with_files(&[]);
        assert!(matches!(
            store.read_range("missing.txt", 0, 1),
            Err(StoreError::NotFound)
        ));
    }
}
