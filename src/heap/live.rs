// Wed Aug 19 2026 - Alex

use crate::heap::{HeapError, SnapshotProvider};
use libc::pid_t;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Environment override for where the agent drops snapshot files.
pub const SNAPSHOT_DIR_ENV: &str = "HEAP_SNAPSHOT_DIR";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Requests a snapshot from a running process and waits for the agent to
/// write it out.
///
/// The in-process agent listens for SIGUSR2 and serializes the heap to
/// `heap-snapshot-<pid>.json` in the snapshot directory. We poll until the
/// file stops growing before parsing it, since the agent writes it
/// incrementally.
pub struct LiveCapture {
    pid: i32,
    timeout: Duration,
    poll_interval: Duration,
}

impl LiveCapture {
    pub fn new(pid: i32) -> Self {
        Self {
            pid,
            timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Where the agent will write the snapshot for this pid.
    pub fn snapshot_path(&self) -> PathBuf {
        let dir = match std::env::var_os(SNAPSHOT_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => std::env::temp_dir(),
        };
        dir.join(format!("heap-snapshot-{}.json", self.pid))
    }

    pub fn capture(&self) -> Result<SnapshotProvider, HeapError> {
        if unsafe { libc::kill(self.pid as pid_t, 0) } != 0 {
            return Err(HeapError::ProcessNotFound(self.pid));
        }

        let path = self.snapshot_path();

        // A stale snapshot from an earlier run must not satisfy the poll.
        let _ = fs::remove_file(&path);

        if unsafe { libc::kill(self.pid as pid_t, libc::SIGUSR2) } != 0 {
            let errno = std::io::Error::last_os_error().raw_os_error().unwrap_or(0);
            return Err(HeapError::SignalFailed {
                pid: self.pid,
                errno,
            });
        }

        log::info!(
            "Requested heap snapshot from pid {}, waiting for {}",
            self.pid,
            path.display()
        );

        wait_for_stable_file(&path, self.pid, self.timeout, self.poll_interval)?;
        SnapshotProvider::load(&path)
    }
}

/// Poll until `path` exists with a size that held steady across two polls.
fn wait_for_stable_file(
    path: &Path,
    pid: i32,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<(), HeapError> {
    let deadline = Instant::now() + timeout;
    let mut last_len: Option<u64> = None;

    loop {
        if let Ok(metadata) = fs::metadata(path) {
            let len = metadata.len();
            if len > 0 && last_len == Some(len) {
                return Ok(());
            }
            last_len = Some(len);
        }

        if Instant::now() >= deadline {
            return Err(HeapError::CaptureTimeout(pid));
        }

        std::thread::sleep(poll_interval);
    }
}
