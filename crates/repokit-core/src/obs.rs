//! Metadata cache counters.
//!
//! Counters are best-effort only. Relaxed atomics are sufficient because the
//! numbers are never used for correctness.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

///
/// CacheStats
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct CacheStats {
    /// Index populations performed (one per type per index kind).
    pub registrations: u64,
    pub lookups: u64,
    pub misses: u64,
    pub resets: u64,
}

///
/// CacheCounters
///

#[derive(Debug, Default)]
pub(crate) struct CacheCounters {
    registrations: AtomicU64,
    lookups: AtomicU64,
    misses: AtomicU64,
    resets: AtomicU64,
}

impl CacheCounters {
    pub(crate) fn record_registrations(&self, populated: u64) {
        self.registrations.fetch_add(populated, Ordering::Relaxed);
    }

    pub(crate) fn record_lookup(&self, hit: bool) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        if !hit {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn record_reset(&self) {
        self.resets.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> CacheStats {
        CacheStats {
            registrations: self.registrations.load(Ordering::Relaxed),
            lookups: self.lookups.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            resets: self.resets.load(Ordering::Relaxed),
        }
    }
}
