use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex, OnceLock,
        atomic::{AtomicU64, Ordering},
    },
};

use crate::{
    foundation::error::PlacementError,
    model::pictograph::PictographData,
    pipeline::{
        batch::PictographPlacement,
        fingerprint::{PictographFingerprint, fingerprint_pictograph},
    },
};

type Slot = Arc<OnceLock<Result<Arc<PictographPlacement>, PlacementError>>>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Finished placements keyed by pictograph fingerprint.
///
/// Each distinct pictograph is computed at most once while its entry is held;
/// concurrent callers for the same pictograph wait on the first. Failures are
/// dropped, not cached.
///
/// [`PlacementCache::new`] grows without limit until [`PlacementCache::clear`].
/// A bounded cache empties itself when a new pictograph would exceed its capacity.
#[derive(Debug, Default)]
pub struct PlacementCache {
    slots: Mutex<HashMap<PictographFingerprint, Slot>>,
    capacity: Option<usize>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl PlacementCache {
    /// Unbounded cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache holding at most `capacity` pictographs (at least one).
    pub fn bounded(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity.max(1)),
            ..Self::default()
        }
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn get_or_place(
        &self,
        pictograph: &PictographData,
        compute: impl FnOnce(&PictographData) -> Result<PictographPlacement, PlacementError>,
    ) -> Result<Arc<PictographPlacement>, PlacementError> {
        let key = fingerprint_pictograph(pictograph);
        let slot = {
            let mut slots = self.lock();
            if let Some(cap) = self.capacity
                && slots.len() >= cap
                && !slots.contains_key(&key)
            {
                tracing::debug!(entries = slots.len(), "placement cache full, clearing");
                slots.clear();
            }
            Arc::clone(slots.entry(key).or_default())
        };

        let mut computed = false;
        let result = slot
            .get_or_init(|| {
                computed = true;
                compute(pictograph).map(Arc::new)
            })
            .clone();

        // A failure from another caller's computation is not a reuse.
        if computed || result.is_err() {
            self.misses.fetch_add(1, Ordering::Relaxed);
        } else {
            self.hits.fetch_add(1, Ordering::Relaxed);
        }
        if result.is_err() {
            let mut slots = self.lock();
            if slots.get(&key).is_some_and(|s| Arc::ptr_eq(s, &slot)) {
                slots.remove(&key);
            }
        }
        result
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.lock().len(),
        }
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    // Map operations never leave a slot half-written, so a poisoned lock is still usable.
    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<PictographFingerprint, Slot>> {
        self.slots.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/cache.rs"]
mod tests;
