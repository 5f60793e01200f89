use std::collections::BTreeMap;
use std::fs::File;
use std::io::{ErrorKind, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ScrapeError;
use crate::models::ShoeRecord;

/// Scraped records keyed by page URL. Entries are never evicted.
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cache {
    records: BTreeMap<String, ShoeRecord>,
}

impl Cache {
    /// Reads the cache file, or starts empty when it does not exist yet.
    pub fn load(path: &Path) -> Result<Self, ScrapeError> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no cache file, starting empty");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ScrapeError::CacheIo {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        serde_json::from_str(&json).map_err(|source| ScrapeError::CacheFormat {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Overwrites the cache file with pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), ScrapeError> {
        let io_err = |source: std::io::Error| ScrapeError::CacheIo {
            path: path.to_path_buf(),
            source,
        };

        let json = serde_json::to_string_pretty(self).map_err(|source| {
            ScrapeError::CacheFormat {
                path: path.to_path_buf(),
                source,
            }
        })?;
        let mut file = File::create(path).map_err(io_err)?;
        file.write_all(json.as_bytes()).map_err(io_err)?;
        Ok(())
    }

    pub fn contains(&self, url: &str) -> bool {
        self.records.contains_key(url)
    }

    #[cfg(test)]
    pub fn get(&self, url: &str) -> Option<&ShoeRecord> {
        self.records.get(url)
    }

    pub fn insert(&mut self, record: ShoeRecord) {
        self.records.insert(record.url.clone(), record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn record(url: &str) -> ShoeRecord {
        ShoeRecord {
            url: url.to_string(),
            title: Some("Adidas Adizero Boston 12".to_string()),
            pros: vec!["Fast".to_string()],
            lab_results: [("Drop".to_string(), "6.5 mm".to_string())].into(),
            main_image: Some("https://cdn.example/boston.jpg".to_string()),
            ..ShoeRecord::default()
        }
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let cache = Cache::load(&dir.path().join("shoes.json")).unwrap();
        assert!(cache.is_empty());
    }

    #[test]
    fn save_after_load_is_byte_identical() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shoes.json");

        let mut cache = Cache::default();
        cache.insert(record("https://runrepeat.com/b"));
        cache.insert(record("https://runrepeat.com/a"));
        cache.save(&path).unwrap();
        let first = std::fs::read(&path).unwrap();

        let loaded = Cache::load(&path).unwrap();
        assert_eq!(loaded, cache);
        loaded.save(&path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), first);
    }

    #[test]
    fn file_is_url_keyed_object_with_nulls() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shoes.json");
        let mut cache = Cache::default();
        cache.insert(record("https://runrepeat.com/a"));
        cache.save(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let entry = &value["https://runrepeat.com/a"];
        assert_eq!(entry["url"], "https://runrepeat.com/a");
        assert!(entry["verdict"].is_null());
        assert_eq!(entry["lab_results"]["Drop"], "6.5 mm");
        assert_eq!(entry["cons"], serde_json::json!([]));
    }

    #[test]
    fn record_with_missing_collections_still_loads() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shoes.json");
        std::fs::write(
            &path,
            r#"{"https://runrepeat.com/x": {"url": "https://runrepeat.com/x", "title": null, "verdict": null, "main_image": null}}"#,
        )
        .unwrap();

        let cache = Cache::load(&path).unwrap();
        let shoe = cache.get("https://runrepeat.com/x").unwrap();
        assert!(shoe.pros.is_empty());
        assert!(shoe.brand_specs.is_empty());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shoes.json");
        std::fs::write(&path, "{ truncated").unwrap();
        assert!(matches!(
            Cache::load(&path),
            Err(ScrapeError::CacheFormat { .. })
        ));
    }
}
