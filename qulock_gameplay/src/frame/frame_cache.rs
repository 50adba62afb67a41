/// Frame-scoped caching.
///
/// `FrameCache` maps a key to `(FrameId, value)`; `FrameValue` is the
/// single-slot form. Reads compare the stored frame with the caller's
/// current frame and return `None` on mismatch, so a value written in
/// frame N is never observed in frame N+1.

use std::hash::Hash;
use rustc_hash::FxHashMap;

/// Monotonically increasing simulation frame number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FrameId(pub u64);

impl FrameId {
    /// Frame that follows this one
    pub fn next(self) -> Self {
        FrameId(self.0 + 1)
    }
}

/// Owner of the current frame number
///
/// The host calls `advance()` once per simulation tick, before any
/// per-actor logic runs.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    current: FrameId,
}

impl FrameClock {
    /// Clock positioned at frame 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Frame currently being simulated
    pub fn current(&self) -> FrameId {
        self.current
    }

    /// Move to the next frame and return it
    pub fn advance(&mut self) -> FrameId {
        self.current = self.current.next();
        self.current
    }
}

/// Keyed cache whose entries expire when the frame changes
#[derive(Debug, Clone)]
pub struct FrameCache<K, V> {
    entries: FxHashMap<K, (FrameId, V)>,
}

impl<K: Eq + Hash, V> FrameCache<K, V> {
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }

    /// Store `value` for `key`, stamped with `frame`
    pub fn insert(&mut self, key: K, frame: FrameId, value: V) {
        self.entries.insert(key, (frame, value));
    }

    /// Value for `key` if it was written during `frame`
    pub fn get(&self, key: &K, frame: FrameId) -> Option<&V> {
        match self.entries.get(key) {
            Some((stamp, value)) if *stamp == frame => Some(value),
            _ => None,
        }
    }

    /// Whether `key` holds a value written during `frame`
    pub fn contains(&self, key: &K, frame: FrameId) -> bool {
        self.get(key, frame).is_some()
    }

    /// Drop the entry for `key`, whatever its frame
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.entries.remove(key).map(|(_, value)| value)
    }

    /// Drop every entry not written during `frame`
    pub fn retain_frame(&mut self, frame: FrameId) {
        self.entries.retain(|_, (stamp, _)| *stamp == frame);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of stored entries, stale ones included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Eq + Hash, V> Default for FrameCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Single value valid for one frame
#[derive(Debug, Clone)]
pub struct FrameValue<V> {
    slot: Option<(FrameId, V)>,
}

impl<V> FrameValue<V> {
    pub fn new() -> Self {
        Self { slot: None }
    }

    /// Value if it was set during `frame`
    pub fn get(&self, frame: FrameId) -> Option<&V> {
        match &self.slot {
            Some((stamp, value)) if *stamp == frame => Some(value),
            _ => None,
        }
    }

    /// Whether a value was set during `frame`
    pub fn is_set(&self, frame: FrameId) -> bool {
        self.get(frame).is_some()
    }

    pub fn set(&mut self, frame: FrameId, value: V) {
        self.slot = Some((frame, value));
    }

    /// Cached value for `frame`, computing and storing it on first access
    pub fn get_or_insert_with<F: FnOnce() -> V>(&mut self, frame: FrameId, compute: F) -> &V {
        let fresh = matches!(&self.slot, Some((stamp, _)) if *stamp == frame);
        if !fresh {
            self.slot = None;
        }
        &self.slot.get_or_insert_with(|| (frame, compute())).1
    }

    pub fn reset(&mut self) {
        self.slot = None;
    }
}

impl<V> Default for FrameValue<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "frame_cache_tests.rs"]
mod tests;
