// Wed Aug 19 2026 - Alex

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Live process to signal for a fresh snapshot.
    pub pid: Option<i32>,
    /// Pre-captured snapshot file to analyze instead.
    pub dump: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub cache_file: PathBuf,
    /// User type-name suffixes; empty means the built-in wrapper table.
    pub type_suffixes: Vec<String>,
    pub export_graph: bool,
    /// Re-analyze cached addresses so reports can be regenerated.
    pub refresh_exports: bool,
    pub show_progress: bool,
    pub verbose: u8,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            pid: None,
            dump: None,
            output_dir: PathBuf::from("reports"),
            cache_file: PathBuf::from("analysis-cache.json"),
            type_suffixes: Vec::new(),
            export_graph: false,
            refresh_exports: false,
            show_progress: true,
            verbose: 0,
        }
    }
}

impl ScanConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pid(mut self, pid: i32) -> Self {
        self.pid = Some(pid);
        self
    }

    pub fn with_dump(mut self, dump: PathBuf) -> Self {
        self.dump = Some(dump);
        self
    }

    pub fn with_output_dir(mut self, output_dir: PathBuf) -> Self {
        self.output_dir = output_dir;
        self
    }

    pub fn with_cache_file(mut self, cache_file: PathBuf) -> Self {
        self.cache_file = cache_file;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.pid.is_none() && self.dump.is_none() {
            return Err("Either --pid or --dump must be given".to_string());
        }
        if self.pid.is_some() && self.dump.is_some() {
            return Err("--pid and --dump are mutually exclusive".to_string());
        }
        if let Some(pid) = self.pid {
            if pid <= 0 {
                return Err(format!("Invalid pid: {}", pid));
            }
        }
        Ok(())
    }
}
