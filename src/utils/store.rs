use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use async_trait::async_trait;
use crate::core::library::{LibraryError, LibraryResult};

// DocumentStore reads and writes the whole catalog document in one piece.
#[async_trait]
pub trait DocumentStore: Sync + Send {
    // returns None when the document does not exist yet
    async fn read(&self) -> LibraryResult<Option<String>>;

    // replaces the whole document
    async fn write(&self, contents: &str) -> LibraryResult<()>;

    fn location(&self) -> String;
}

#[derive(Debug, Clone)]
pub struct FileDocumentStore {
    path: PathBuf,
    atomic: bool,
}

impl FileDocumentStore {
    pub fn new(path: impl AsRef<Path>, atomic: bool) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            atomic,
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "catalog".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl DocumentStore for FileDocumentStore {
    async fn read(&self) -> LibraryResult<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(LibraryError::storage(
                format!("failed to read {} due to {}", self.path.display(), err).as_str(),
                Some(format!("{:?}", err.kind())))),
        }
    }

    async fn write(&self, contents: &str) -> LibraryResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        if self.atomic {
            let temp = self.temp_path();
            tokio::fs::write(&temp, contents).await?;
            if let Err(err) = tokio::fs::rename(&temp, &self.path).await {
                let _ = tokio::fs::remove_file(&temp).await;
                return Err(LibraryError::from(err));
            }
            Ok(())
        } else {
            tokio::fs::write(&self.path, contents).await.map_err(LibraryError::from)
        }
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

// MemoryDocumentStore holds the document in process. Clones share state, so a test can keep
// a handle to inspect writes or make the next ones fail.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    contents: Arc<Mutex<Option<String>>>,
    fail_writes: Arc<AtomicBool>,
    writes: Arc<AtomicUsize>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: &str) -> Self {
        let store = Self::default();
        if let Ok(mut current) = store.contents.lock() {
            *current = Some(contents.to_string());
        }
        store
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|current| current.clone())
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn read(&self) -> LibraryResult<Option<String>> {
        let current = self.contents.lock().map_err(|err| LibraryError::runtime(
            format!("memory document poisoned {}", err).as_str(), None))?;
        Ok(current.clone())
    }

    async fn write(&self, contents: &str) -> LibraryResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(LibraryError::storage("memory document rejected write", Some("injected".to_string())));
        }
        let mut current = self.contents.lock().map_err(|err| LibraryError::runtime(
            format!("memory document poisoned {}", err).as_str(), None))?;
        *current = Some(contents.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use crate::core::library::LibraryError;
    use crate::utils::store::{DocumentStore, FileDocumentStore, MemoryDocumentStore};

    #[tokio::test]
    async fn test_should_read_missing_file_as_none() {
        let dir = TempDir::new().expect("should create dir");
        let store = FileDocumentStore::new(dir.path().join("missing.json"), true);
        assert_eq!(None, store.read().await.expect("should read"));
    }

    #[tokio::test]
    async fn test_should_write_atomically() {
        let dir = TempDir::new().expect("should create dir");
        let path = dir.path().join("nested").join("database.json");
        let store = FileDocumentStore::new(&path, true);
        store.write("{\"books\": []}").await.expect("should write");
        store.write("{\"books\": [1]}").await.expect("should overwrite");
        assert_eq!(Some("{\"books\": [1]}".to_string()), store.read().await.expect("should read"));
        assert!(!dir.path().join("nested").join("database.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_should_write_in_place() {
        let dir = TempDir::new().expect("should create dir");
        let store = FileDocumentStore::new(dir.path().join("database.json"), false);
        store.write("{}").await.expect("should write");
        assert_eq!(Some("{}".to_string()), store.read().await.expect("should read"));
    }

    #[tokio::test]
    async fn test_should_fail_memory_writes_on_demand() {
        let store = MemoryDocumentStore::with_contents("{}");
        let handle = store.clone();
        handle.fail_writes(true);
        let res = store.write("{\"books\": []}").await;
        assert!(matches!(res, Err(LibraryError::Storage { .. })));
        assert_eq!(Some("{}".to_string()), handle.contents());
        assert_eq!(0, handle.write_count());
    }
}
