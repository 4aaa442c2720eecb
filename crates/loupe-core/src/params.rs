use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, OnceLock};

use crate::schedule::RenderScheduler;

/// Atomic f32 wrapper for lock-free cross-context access.
///
/// Stores are published with `Release` and loads use `Acquire`, so the
/// render context never observes a half-written value. Each field is a
/// single-writer/single-reader cell; no locks are involved.
#[derive(Debug)]
pub struct AtomicF32(AtomicU32);

impl AtomicF32 {
    pub fn new(val: f32) -> Self {
        Self(AtomicU32::new(val.to_bits()))
    }

    pub fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Acquire))
    }

    pub fn store(&self, val: f32) {
        self.0.store(val.to_bits(), Ordering::Release);
    }
}

impl Default for AtomicF32 {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Whole-image color transform applied by the compositor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum FilterMode {
    Normal = 0,
    Amber = 1,
    Grayscale = 2,
}

pub const FILTER_MODE_COUNT: usize = 3;

impl FilterMode {
    pub fn from_index(index: u32) -> Self {
        match index {
            1 => FilterMode::Amber,
            2 => FilterMode::Grayscale,
            _ => FilterMode::Normal,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Next mode in display order, wrapping after the last.
    pub fn next(self) -> Self {
        Self::from_index(((self.index() + 1) % FILTER_MODE_COUNT) as u32)
    }

    /// Previous mode in display order, wrapping before the first.
    pub fn prev(self) -> Self {
        Self::from_index(((self.index() + FILTER_MODE_COUNT - 1) % FILTER_MODE_COUNT) as u32)
    }

    pub fn label(self) -> &'static str {
        match self {
            FilterMode::Normal => "Normal",
            FilterMode::Amber => "Amber",
            FilterMode::Grayscale => "Grayscale",
        }
    }
}

/// Which tunable a menu item or store write refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    Filter,
    Zoom,
    Brightness,
    Contrast,
    Sharpness,
    ScreenBrightness,
}

impl ParameterKind {
    pub fn title(self) -> &'static str {
        match self {
            ParameterKind::Filter => "Filters",
            ParameterKind::Zoom => "Zoom",
            ParameterKind::Brightness => "Brightness",
            ParameterKind::Contrast => "Contrast",
            ParameterKind::Sharpness => "Sharpness",
            ParameterKind::ScreenBrightness => "Screen Brightness",
        }
    }

    /// Physical (min, max) range. `Filter` is not a scalar and has no range.
    pub fn range(self) -> (f32, f32) {
        match self {
            ParameterKind::Filter => (0.0, 0.0),
            ParameterKind::Zoom => (1.0, 10.0),
            ParameterKind::Brightness => (-1.0, 1.0),
            ParameterKind::Contrast => (0.0, 2.0),
            ParameterKind::Sharpness => (0.0, 1.0),
            ParameterKind::ScreenBrightness => (0.0, 1.0),
        }
    }

    /// Map a physical value into the 0–100 menu percentage.
    pub fn to_percent(self, value: f32) -> i32 {
        let (min, max) = self.range();
        if max == min {
            return 0;
        }
        (((value - min) / (max - min)) * 100.0).round() as i32
    }

    /// Map a 0–100 menu percentage back to the physical range.
    pub fn from_percent(self, percent: i32) -> f32 {
        let (min, max) = self.range();
        min + (max - min) * percent as f32 / 100.0
    }
}

/// Snapshot of the live render state consumed by the compositor.
///
/// Each field is published independently; the compositor reads every field
/// on its own, so no cross-field consistency is needed beyond per-field
/// atomicity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewParameters {
    pub zoom: f32,
    pub brightness: f32,
    pub contrast: f32,
    pub sharpness: f32,
    pub filter_mode: FilterMode,
}

impl Default for ViewParameters {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            brightness: 0.0,
            contrast: 1.0,
            sharpness: 0.0,
            filter_mode: FilterMode::Normal,
        }
    }
}

/// Thread-safe holder of the current view parameters.
///
/// Written only from the interaction context, read from the render context.
/// Every setter clamps to the field's declared range before publishing and
/// then notifies the attached scheduler; out-of-range writes are never an
/// error. Screen brightness lives here too but is not part of the render
/// snapshot (it drives the display directly, not the GPU pipeline).
pub struct ParameterStore {
    zoom: AtomicF32,
    brightness: AtomicF32,
    contrast: AtomicF32,
    sharpness: AtomicF32,
    screen_brightness: AtomicF32,
    filter: AtomicU32,
    scheduler: OnceLock<Arc<RenderScheduler>>,
}

impl ParameterStore {
    pub fn new() -> Self {
        let defaults = ViewParameters::default();
        Self {
            zoom: AtomicF32::new(defaults.zoom),
            brightness: AtomicF32::new(defaults.brightness),
            contrast: AtomicF32::new(defaults.contrast),
            sharpness: AtomicF32::new(defaults.sharpness),
            screen_brightness: AtomicF32::new(1.0),
            filter: AtomicU32::new(defaults.filter_mode as u32),
            scheduler: OnceLock::new(),
        }
    }

    /// Attach the scheduler notified on every write. One-time wiring at
    /// startup; later calls are ignored.
    pub fn bind_scheduler(&self, scheduler: Arc<RenderScheduler>) {
        if self.scheduler.set(scheduler).is_err() {
            log::warn!("parameter store scheduler already bound");
        }
    }

    pub fn snapshot(&self) -> ViewParameters {
        ViewParameters {
            zoom: self.zoom.load(),
            brightness: self.brightness.load(),
            contrast: self.contrast.load(),
            sharpness: self.sharpness.load(),
            filter_mode: self.filter_mode(),
        }
    }

    pub fn filter_mode(&self) -> FilterMode {
        FilterMode::from_index(self.filter.load(Ordering::Acquire))
    }

    pub fn screen_brightness(&self) -> f32 {
        self.screen_brightness.load()
    }

    /// Current physical value for a scalar parameter kind.
    pub fn value(&self, kind: ParameterKind) -> f32 {
        match kind {
            ParameterKind::Zoom => self.zoom.load(),
            ParameterKind::Brightness => self.brightness.load(),
            ParameterKind::Contrast => self.contrast.load(),
            ParameterKind::Sharpness => self.sharpness.load(),
            ParameterKind::ScreenBrightness => self.screen_brightness.load(),
            ParameterKind::Filter => {
                debug_assert!(false, "filter mode is not a scalar parameter");
                0.0
            }
        }
    }

    /// Clamp and publish a scalar parameter, then request a redraw.
    pub fn set(&self, kind: ParameterKind, value: f32) {
        let (min, max) = kind.range();
        let clamped = value.clamp(min, max);
        match kind {
            ParameterKind::Zoom => self.zoom.store(clamped),
            ParameterKind::Brightness => self.brightness.store(clamped),
            ParameterKind::Contrast => self.contrast.store(clamped),
            ParameterKind::Sharpness => self.sharpness.store(clamped),
            ParameterKind::ScreenBrightness => self.screen_brightness.store(clamped),
            ParameterKind::Filter => {
                debug_assert!(false, "use set_filter_mode for filter changes");
                return;
            }
        }
        self.notify(kind, false);
    }

    pub fn set_zoom(&self, zoom: f32) {
        self.set(ParameterKind::Zoom, zoom);
    }

    /// Publish a filter mode. Returns whether the mode actually changed;
    /// only a real transition schedules the deferred settle redraw.
    pub fn set_filter_mode(&self, mode: FilterMode) -> bool {
        let previous = self.filter.swap(mode as u32, Ordering::AcqRel);
        let changed = previous != mode as u32;
        self.notify(ParameterKind::Filter, changed);
        changed
    }

    fn notify(&self, kind: ParameterKind, filter_transition: bool) {
        if let Some(scheduler) = self.scheduler.get() {
            scheduler.parameter_changed(kind, filter_transition);
        }
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atomic_f32_roundtrip() {
        let a = AtomicF32::new(3.25);
        assert_eq!(a.load(), 3.25);
        a.store(-0.5);
        assert_eq!(a.load(), -0.5);
    }

    #[test]
    fn filter_mode_cycles() {
        assert_eq!(FilterMode::Normal.next(), FilterMode::Amber);
        assert_eq!(FilterMode::Grayscale.next(), FilterMode::Normal);
        assert_eq!(FilterMode::Normal.prev(), FilterMode::Grayscale);
    }

    #[test]
    fn percent_mappings_are_exact() {
        assert_eq!(ParameterKind::Zoom.to_percent(1.0), 0);
        assert_eq!(ParameterKind::Zoom.to_percent(10.0), 100);
        assert_eq!(ParameterKind::Zoom.from_percent(25), 3.25);
        assert_eq!(ParameterKind::Brightness.to_percent(0.0), 50);
        assert_eq!(ParameterKind::Brightness.from_percent(0), -1.0);
        assert_eq!(ParameterKind::Contrast.to_percent(1.0), 50);
        assert_eq!(ParameterKind::Contrast.from_percent(100), 2.0);
        assert_eq!(ParameterKind::Sharpness.to_percent(0.35), 35);
        assert_eq!(ParameterKind::ScreenBrightness.from_percent(100), 1.0);
    }

    #[test]
    fn percent_roundtrip_all_kinds() {
        let kinds = [
            ParameterKind::Zoom,
            ParameterKind::Brightness,
            ParameterKind::Contrast,
            ParameterKind::Sharpness,
            ParameterKind::ScreenBrightness,
        ];
        for kind in kinds {
            for pct in 0..=100 {
                let physical = kind.from_percent(pct);
                let back = kind.to_percent(physical);
                assert!(
                    (back - pct).abs() <= 1,
                    "{:?}: {} -> {} -> {}",
                    kind,
                    pct,
                    physical,
                    back
                );
            }
        }
    }

    #[test]
    fn setters_clamp_to_declared_range() {
        let store = ParameterStore::new();
        store.set(ParameterKind::Contrast, 3.0);
        assert_eq!(store.snapshot().contrast, 2.0);
        store.set(ParameterKind::Zoom, 0.25);
        assert_eq!(store.snapshot().zoom, 1.0);
        store.set(ParameterKind::Brightness, -5.0);
        assert_eq!(store.snapshot().brightness, -1.0);
        store.set(ParameterKind::ScreenBrightness, 1.5);
        assert_eq!(store.screen_brightness(), 1.0);
    }

    #[test]
    fn filter_change_reports_transition() {
        let store = ParameterStore::new();
        assert!(store.set_filter_mode(FilterMode::Grayscale));
        assert!(!store.set_filter_mode(FilterMode::Grayscale));
        assert_eq!(store.filter_mode(), FilterMode::Grayscale);
    }
}
