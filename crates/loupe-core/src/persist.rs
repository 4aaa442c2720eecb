use std::sync::atomic::{AtomicU32, Ordering};

use crate::params::FilterMode;

/// Persistent storage for the last-selected filter mode.
///
/// Loaded once at startup, written on every filter change. Implementations
/// must never fail the caller; storage problems degrade to the default.
pub trait SettingsStore: Send + Sync {
    fn load_filter_mode(&self) -> FilterMode;
    fn save_filter_mode(&self, mode: FilterMode);
}

/// In-memory store for tests and headless use.
pub struct MemorySettingsStore {
    mode: AtomicU32,
}

impl MemorySettingsStore {
    pub fn new(mode: FilterMode) -> Self {
        Self {
            mode: AtomicU32::new(mode as u32),
        }
    }
}

impl Default for MemorySettingsStore {
    fn default() -> Self {
        Self::new(FilterMode::Normal)
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load_filter_mode(&self) -> FilterMode {
        FilterMode::from_index(self.mode.load(Ordering::Acquire))
    }

    fn save_filter_mode(&self, mode: FilterMode) {
        self.mode.store(mode as u32, Ordering::Release);
    }
}
