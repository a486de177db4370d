//! Dataset loading.
//!
//! The dataset is a single JSON file. By default it is read and parsed again for every request,
//! so edits to the file are visible immediately. Optionally the parsed document may be cached, in
//! which case it is reused until the modification time of the file changes.

use crate::error::DatavizError;
use crate::metrics::DATASET_LOADS;
use crate::types::DValue;

use cached::{Cached, SizedCache};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::Mutex;
use tracing::{event, Level};

/// A parsed dataset and the modification time of the file it was parsed from.
#[derive(Clone)]
struct CachedDataset {
    modified: SystemTime,
    document: Arc<DValue>,
}

/// Loads the dataset document from a file.
pub struct DatasetLoader {
    /// Path to the dataset file
    path: PathBuf,
    /// Optional cache of the parsed document, keyed by path
    cache: Option<Mutex<SizedCache<PathBuf, CachedDataset>>>,
}

impl DatasetLoader {
    /// Returns a new DatasetLoader object.
    ///
    /// # Arguments
    ///
    /// * `path`: Path to the dataset file
    /// * `use_cache`: Whether to keep the parsed document between requests
    pub fn new(path: impl Into<PathBuf>, use_cache: bool) -> Self {
        Self {
            path: path.into(),
            cache: use_cache.then(|| Mutex::new(SizedCache::with_size(1))),
        }
    }

    /// Returns the path to the dataset file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the dataset document.
    pub async fn load(&self) -> Result<Arc<DValue>, DatavizError> {
        match &self.cache {
            Some(cache) => self.load_cached(cache).await,
            None => self.read().await.map(Arc::new),
        }
    }

    /// Return the cached document if the file is unchanged, otherwise read it and update the
    /// cache.
    async fn load_cached(
        &self,
        cache: &Mutex<SizedCache<PathBuf, CachedDataset>>,
    ) -> Result<Arc<DValue>, DatavizError> {
        let modified = tokio::fs::metadata(&self.path)
            .await
            .and_then(|metadata| metadata.modified())
            .map_err(|source| DatavizError::DatasetRead {
                path: self.path.clone(),
                source,
            })?;
        // Hold the lock while reading so that concurrent misses parse the file once.
        let mut cache = cache.lock().await;
        if let Some(cached) = cache.cache_get(&self.path) {
            if cached.modified == modified {
                DATASET_LOADS.with_label_values(&["cache"]).inc();
                return Ok(cached.document.clone());
            }
            event!(Level::DEBUG, path = %self.path.display(), "dataset modified, reloading");
        }
        let document = Arc::new(self.read().await?);
        cache.cache_set(
            self.path.clone(),
            CachedDataset {
                modified,
                document: document.clone(),
            },
        );
        Ok(document)
    }

    /// Read and parse the dataset file.
    async fn read(&self) -> Result<DValue, DatavizError> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| DatavizError::DatasetRead {
                path: self.path.clone(),
                source,
            })?;
        DATASET_LOADS.with_label_values(&["file"]).inc();
        serde_json::from_str(&contents).map_err(|source| DatavizError::DatasetParse {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils;

    use serde_json::json;
    use std::fs::File;
    use std::time::Duration;

    // Rewrite a file and set its modification time.
    fn rewrite(path: &Path, contents: &str, modified: SystemTime) {
        std::fs::write(path, contents).unwrap();
        File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(modified)
            .unwrap();
    }

    #[tokio::test]
    async fn load_uncached() {
        let path = test_utils::write_test_dataset(r#"{"temp": [1]}"#);
        let loader = DatasetLoader::new(&path, false);
        assert_eq!(json!({"temp": [1]}), *loader.load().await.unwrap());
        std::fs::write(&path, r#"{"temp": [2]}"#).unwrap();
        assert_eq!(json!({"temp": [2]}), *loader.load().await.unwrap());
        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn load_cached_until_modified() {
        let path = test_utils::write_test_dataset("{}");
        let t1 = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000);
        let t2 = t1 + Duration::from_secs(60);
        rewrite(&path, r#"{"temp": [1]}"#, t1);
        let loader = DatasetLoader::new(&path, true);
        let first = loader.load().await.unwrap();
        assert_eq!(json!({"temp": [1]}), *first);

        // Same modification time: the cached document is returned.
        rewrite(&path, r#"{"temp": [2]}"#, t1);
        let second = loader.load().await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        // New modification time: the file is read again.
        rewrite(&path, r#"{"temp": [3]}"#, t2);
        let third = loader.load().await.unwrap();
        assert_eq!(json!({"temp": [3]}), *third);
        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn load_preserves_key_order() {
        let path = test_utils::write_test_dataset(r#"{"b": 1, "a": 2, "c": 3}"#);
        let loader = DatasetLoader::new(&path, false);
        let document = loader.load().await.unwrap();
        let keys: Vec<&str> = document
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(vec!["b", "a", "c"], keys);
        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn load_missing_file() {
        for use_cache in [false, true] {
            let loader = DatasetLoader::new("does/not/exist.json", use_cache);
            match loader.load().await {
                Err(DatavizError::DatasetRead { path, source }) => {
                    assert_eq!(Path::new("does/not/exist.json"), path);
                    assert_eq!(std::io::ErrorKind::NotFound, source.kind());
                }
                other => panic!("unexpected result {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn load_malformed_file() {
        let path = test_utils::write_test_dataset(r#"{"temp": [1,"#);
        let loader = DatasetLoader::new(&path, false);
        assert!(matches!(
            loader.load().await,
            Err(DatavizError::DatasetParse { .. })
        ));
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn loader_path() {
        let loader = DatasetLoader::new("data.json", false);
        assert_eq!(Path::new("data.json"), loader.path());
    }
}
