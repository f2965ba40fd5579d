// Tue Aug 18 2026 - Alex

use crate::cache::CacheError;
use crate::heap::ObjectAddress;
use crate::utils::time;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// What the scanner remembers about one already-analyzed object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub address: ObjectAddress,
    pub type_name: String,
    pub root_path_count: usize,
    /// Unix seconds of the analysis this entry came from
    pub analyzed_at: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exported_files: Vec<PathBuf>,
}

/// On-disk record of analyzed objects, keyed by address.
///
/// Interrupted scans resume from the last saved state: anything recorded
/// and saved before the interrupt is skipped on restart. Addresses are only
/// stable across runs for snapshot files; for live processes the cache is
/// best effort.
pub struct AnalysisCache {
    path: PathBuf,
    entries: HashMap<u64, CacheEntry>,
}

impl AnalysisCache {
    /// Read the cache file if one exists. A missing file starts an empty
    /// cache; an unreadable one is logged and left on disk untouched, and
    /// the scan proceeds as if the cache were empty.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let entries = match fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<HashMap<u64, CacheEntry>>(&text) {
                Ok(entries) => {
                    log::debug!("Loaded {} cache entries from {}", entries.len(), path.display());
                    entries
                }
                Err(e) => {
                    log::error!(
                        "Cache file {} is not valid JSON ({}); continuing with an empty cache",
                        path.display(),
                        e
                    );
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                log::error!(
                    "Could not read cache file {} ({}); continuing with an empty cache",
                    path.display(),
                    e
                );
                HashMap::new()
            }
        };

        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_analyzed(&self, address: ObjectAddress) -> bool {
        self.entries.contains_key(&address.as_u64())
    }

    pub fn get(&self, address: ObjectAddress) -> Option<&CacheEntry> {
        self.entries.get(&address.as_u64())
    }

    /// Insert or overwrite the entry for `address`, stamped with the
    /// current time. In-memory only; call `save` to persist.
    pub fn record(
        &mut self,
        address: ObjectAddress,
        type_name: &str,
        root_path_count: usize,
        exported_files: Vec<PathBuf>,
    ) {
        self.entries.insert(
            address.as_u64(),
            CacheEntry {
                address,
                type_name: type_name.to_string(),
                root_path_count,
                analyzed_at: time::unix_now(),
                exported_files,
            },
        );
    }

    /// Persist the whole map as pretty JSON.
    ///
    /// The data goes to a sibling temp file first and is renamed over the
    /// real file, so a crash mid-write leaves the previous cache intact.
    /// `verbose` only selects the level of the save log line.
    pub fn save(&self, verbose: bool) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(&self.entries)?;
        let tmp_path = self.path.with_extension("tmp");

        {
            let mut file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&tmp_path)?;
            file.write_all(json.as_bytes())?;
            file.sync_all()?;
        }

        fs::rename(&tmp_path, &self.path)?;

        if verbose {
            log::info!("Saved {} cache entries to {}", self.entries.len(), self.path.display());
        } else {
            log::debug!("Saved {} cache entries to {}", self.entries.len(), self.path.display());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cache_path(temp: &TempDir) -> PathBuf {
        temp.path().join("analysis-cache.json")
    }

    #[test]
    fn test_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = cache_path(&temp);

        let mut cache = AnalysisCache::load(&path);
        assert!(cache.is_empty());

        cache.record(
            ObjectAddress::new(0xAAA),
            "App.SafeFileHandle",
            3,
            vec![PathBuf::from("reports/App.SafeFileHandle/0xaaa.txt")],
        );
        cache.record(ObjectAddress::new(0xBBB), "App.Socket", 0, Vec::new());
        cache.save(false).unwrap();

        let reloaded = AnalysisCache::load(&path);
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded.is_analyzed(ObjectAddress::new(0xAAA)));

        let entry = reloaded.get(ObjectAddress::new(0xAAA)).unwrap();
        assert_eq!(entry.type_name, "App.SafeFileHandle");
        assert_eq!(entry.root_path_count, 3);
        assert_eq!(entry.exported_files.len(), 1);
        assert!(entry.analyzed_at > 0);

        let orphan = reloaded.get(ObjectAddress::new(0xBBB)).unwrap();
        assert!(orphan.exported_files.is_empty());
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let temp = TempDir::new().unwrap();
        let path = cache_path(&temp);

        let mut cache = AnalysisCache::load(&path);
        cache.record(ObjectAddress::new(0x1), "App.A", 1, Vec::new());
        cache.save(true).unwrap();
        cache.record(ObjectAddress::new(0x2), "App.B", 1, Vec::new());
        cache.save(true).unwrap();

        let tmp_files: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension() == Some(std::ffi::OsStr::new("tmp")))
            .collect();
        assert_eq!(tmp_files.len(), 0);
        assert_eq!(AnalysisCache::load(&path).len(), 2);
    }

    #[test]
    fn test_corrupt_file_kept_on_disk() {
        let temp = TempDir::new().unwrap();
        let path = cache_path(&temp);
        fs::write(&path, "{ this is not json").unwrap();

        let cache = AnalysisCache::load(&path);
        assert!(cache.is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ this is not json");
    }

    #[test]
    fn test_missing_file_not_created_by_load() {
        let temp = TempDir::new().unwrap();
        let path = cache_path(&temp);

        let cache = AnalysisCache::load(&path);
        assert!(cache.is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn test_record_overwrites_same_address() {
        let temp = TempDir::new().unwrap();
        let mut cache = AnalysisCache::load(cache_path(&temp));

        cache.record(ObjectAddress::new(0x5), "App.First", 1, Vec::new());
        cache.record(ObjectAddress::new(0x5), "App.Second", 4, Vec::new());

        assert_eq!(cache.len(), 1);
        let entry = cache.get(ObjectAddress::new(0x5)).unwrap();
        assert_eq!(entry.type_name, "App.Second");
        assert_eq!(entry.root_path_count, 4);
    }

    #[test]
    fn test_stray_temp_file_does_not_poison_cache() {
        let temp = TempDir::new().unwrap();
        let path = cache_path(&temp);

        let mut cache = AnalysisCache::load(&path);
        cache.record(ObjectAddress::new(0x9), "App.Survivor", 2, Vec::new());
        cache.save(false).unwrap();

        // A crash between temp write and rename leaves a stray temp file.
        fs::write(path.with_extension("tmp"), "garbage from a dead run").unwrap();

        let reloaded = AnalysisCache::load(&path);
        assert!(reloaded.is_analyzed(ObjectAddress::new(0x9)));

        reloaded.save(false).unwrap();
        assert!(!path.with_extension("tmp").exists());
        assert!(AnalysisCache::load(&path).is_analyzed(ObjectAddress::new(0x9)));
    }
}
