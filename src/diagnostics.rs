//! Best-effort process memory sampling for ad hoc profiling.
//!
//! Purely diagnostic: the sampler's absence or failure never alters a
//! call's behavior or return value. On platforms without an RSS reader
//! the samples simply carry `None`.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use serde::Serialize;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Current process RSS (Resident Set Size) in bytes, or `None` on
/// unsupported platforms.
///
/// Linux: second field of `/proc/self/statm` (pages) times the kernel
/// page size from `sysconf(_SC_PAGESIZE)`.
pub fn get_rss_bytes() -> Option<u64> {
    #[cfg(target_os = "linux")]
    {
        read_statm_rss()
    }
    #[cfg(not(target_os = "linux"))]
    {
        None
    }
}

#[cfg(target_os = "linux")]
fn read_statm_rss() -> Option<u64> {
    let statm = std::fs::read_to_string("/proc/self/statm").ok()?;
    let pages: u64 = statm.split_whitespace().nth(1)?.parse().ok()?;
    // SAFETY: sysconf takes no pointers and cannot fault.
    let page_size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    if page_size <= 0 {
        return None;
    }
    Some(pages * page_size as u64)
}

/// One RSS observation. Serializable so profiling runs can be dumped.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RssSample {
    /// Time since the sampler started.
    pub elapsed: Duration,
    /// RSS at sample time, `None` where unreadable.
    pub rss_bytes: Option<u64>,
}

/// Background task polling process RSS on a fixed interval.
pub struct RssSampler {
    samples: Arc<Mutex<Vec<RssSample>>>,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl RssSampler {
    /// Spawn the sampling task. The first sample lands immediately, then
    /// one per `interval`.
    pub fn start(interval: Duration) -> Self {
        let samples = Arc::new(Mutex::new(Vec::new()));
        let cancel = CancellationToken::new();
        let task_samples = Arc::clone(&samples);
        let task_cancel = cancel.clone();

        let handle = tokio::spawn(async move {
            let started = Instant::now();
            let mut ticker = tokio::time::interval(interval);
            loop {
                tokio::select! {
                    _ = task_cancel.cancelled() => {
                        debug!("RSS sampler stopping");
                        return;
                    }
                    _ = ticker.tick() => {}
                }
                let sample = RssSample {
                    elapsed: started.elapsed(),
                    rss_bytes: get_rss_bytes(),
                };
                task_samples
                    .lock()
                    .unwrap_or_else(|e| e.into_inner())
                    .push(sample);
            }
        });

        Self {
            samples,
            cancel,
            handle,
        }
    }

    /// Stop sampling and return everything collected.
    pub async fn stop(self) -> Vec<RssSample> {
        self.cancel.cancel();
        let _ = self.handle.await;
        self.samples
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Largest observed RSS across `samples`, if any were readable.
    pub fn peak_rss_bytes(samples: &[RssSample]) -> Option<u64> {
        samples.iter().filter_map(|s| s.rss_bytes).max()
    }
}
