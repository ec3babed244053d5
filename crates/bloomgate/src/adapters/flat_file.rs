//! Flat-file record log.
//!
//! Persists identifiers as newline-delimited UTF-8 text, one per line.
//! Reads trim surrounding whitespace and skip blank lines; a missing file is
//! an empty log, not an error. Rewrites go through a temp file that is
//! fsynced and renamed over the target, so a failed rewrite never leaves a
//! partially written log behind.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::error::RecordStoreError;
use crate::ports::RecordStore;

/// Newline-delimited text file implementing the [`RecordStore`] contract.
pub struct FlatFileRecordStore {
    path: PathBuf,
}

impl FlatFileRecordStore {
    /// Create a store backed by the given file path.
    ///
    /// The file (and its parent directories) are created lazily on the first
    /// write; a store over a nonexistent path reads as empty.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn ensure_parent_dir(&self) -> Result<(), RecordStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| RecordStoreError::WriteFailed(e.to_string()))?;
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for FlatFileRecordStore {
    async fn read_all(&self) -> Result<Vec<String>, RecordStoreError> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(RecordStoreError::ReadFailed(e.to_string())),
        };

        Ok(contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect())
    }

    async fn append_one(&self, identifier: &str) -> Result<(), RecordStoreError> {
        self.ensure_parent_dir().await?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| RecordStoreError::WriteFailed(e.to_string()))?;

        file.write_all(format!("{}\n", identifier).as_bytes())
            .await
            .map_err(|e| RecordStoreError::WriteFailed(e.to_string()))?;
        file.flush()
            .await
            .map_err(|e| RecordStoreError::WriteFailed(e.to_string()))?;

        Ok(())
    }

    async fn overwrite_all(&self, records: &[String]) -> Result<(), RecordStoreError> {
        self.ensure_parent_dir().await?;

        let mut contents = String::new();
        for record in records {
            contents.push_str(record);
            contents.push('\n');
        }

        // Write atomically via temp file + rename.
        let temp_path = self.path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path)
            .await
            .map_err(|e| RecordStoreError::WriteFailed(e.to_string()))?;
        file.write_all(contents.as_bytes())
            .await
            .map_err(|e| RecordStoreError::WriteFailed(e.to_string()))?;
        file.sync_all()
            .await
            .map_err(|e| RecordStoreError::WriteFailed(e.to_string()))?;

        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| RecordStoreError::WriteFailed(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> FlatFileRecordStore {
        FlatFileRecordStore::new(dir.path().join("records.txt"))
    }

    #[tokio::test]
    async fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert_eq!(store.path(), dir.path().join("records.txt"));
        assert!(store.read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_append_then_read_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.append_one("alice").await.unwrap();
        store.append_one("bob").await.unwrap();
        store.append_one("carol").await.unwrap();

        assert_eq!(
            store.read_all().await.unwrap(),
            vec!["alice", "bob", "carol"]
        );
    }

    #[tokio::test]
    async fn test_read_trims_and_skips_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.txt");
        std::fs::write(&path, "alice\n\n  bob  \n\t\ncarol\n").unwrap();

        let store = FlatFileRecordStore::new(&path);

        assert_eq!(
            store.read_all().await.unwrap(),
            vec!["alice", "bob", "carol"]
        );
    }

    #[tokio::test]
    async fn test_overwrite_replaces_contents() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.append_one("alice").await.unwrap();
        store.append_one("bob").await.unwrap();

        store
            .overwrite_all(&["bob".to_string(), "carol".to_string()])
            .await
            .unwrap();

        assert_eq!(store.read_all().await.unwrap(), vec!["bob", "carol"]);
    }

    #[tokio::test]
    async fn test_overwrite_with_empty_list_empties_the_log() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.append_one("alice").await.unwrap();

        store.overwrite_all(&[]).await.unwrap();

        assert!(store.read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_overwrite_leaves_no_temp_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.overwrite_all(&["alice".to_string()]).await.unwrap();

        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(leftovers, vec!["records.txt"]);
    }

    #[tokio::test]
    async fn test_append_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = FlatFileRecordStore::new(dir.path().join("data").join("records.txt"));

        store.append_one("alice").await.unwrap();

        assert_eq!(store.read_all().await.unwrap(), vec!["alice"]);
    }
}
