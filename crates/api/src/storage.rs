//! Uploaded-document storage under the media root.
//!
//! Stored names are UUID-prefixed so concurrent uploads with the same
//! client filename never collide. Only the relative stored name goes into
//! the database.

use std::io;
use std::path::{Path, PathBuf};

use uuid::Uuid;

/// Filesystem store for uploaded document blobs.
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    /// Create a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Persist `data` under a UUID-prefixed version of `filename`.
    ///
    /// Returns the stored name (relative to the media root). Path components
    /// in the client-supplied filename are stripped.
    pub async fn save(&self, filename: &str, data: &[u8]) -> io::Result<String> {
        let base = Path::new(filename)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload");
        let stored_name = format!("{}_{}", Uuid::new_v4(), base);
        tokio::fs::write(self.root.join(&stored_name), data).await?;
        Ok(stored_name)
    }

    /// Read a stored blob back.
    pub async fn read(&self, stored_name: &str) -> io::Result<Vec<u8>> {
        tokio::fs::read(self.root.join(stored_name)).await
    }

    /// Remove a stored blob. Missing files are not an error; the database
    /// row is authoritative.
    pub async fn remove(&self, stored_name: &str) -> io::Result<()> {
        match tokio::fs::remove_file(self.root.join(stored_name)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_and_read_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = MediaStore::open(dir.path()).expect("open should succeed");

        let stored = store.save("report.pdf", b"contents").await.expect("save");
        assert!(stored.ends_with("_report.pdf"));

        let data = store.read(&stored).await.expect("read");
        assert_eq!(data, b"contents");
    }

    #[tokio::test]
    async fn test_same_filename_never_collides() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = MediaStore::open(dir.path()).expect("open should succeed");

        let a = store.save("notes.txt", b"a").await.expect("save");
        let b = store.save("notes.txt", b"b").await.expect("save");
        assert_ne!(a, b);
        assert_eq!(store.read(&a).await.expect("read"), b"a");
        assert_eq!(store.read(&b).await.expect("read"), b"b");
    }

    #[tokio::test]
    async fn test_path_components_are_stripped() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = MediaStore::open(dir.path()).expect("open should succeed");

        let stored = store.save("../../etc/passwd", b"x").await.expect("save");
        assert!(stored.ends_with("_passwd"));
        assert!(!stored.contains(".."));
    }

    #[tokio::test]
    async fn test_remove_missing_is_ok() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = MediaStore::open(dir.path()).expect("open should succeed");
        store.remove("does-not-exist.bin").await.expect("remove");
    }
}
