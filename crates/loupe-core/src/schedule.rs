use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;
use std::time::Duration;

use crate::params::ParameterKind;

/// Extra redraw issued after a filter-mode transition to mask the one-frame
/// lag of asynchronous parameter propagation.
pub const FILTER_SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Host-side hook the scheduler uses to wake the render context.
pub trait RedrawHandle: Send + Sync {
    fn redraw(&self);
    fn redraw_after(&self, delay: Duration);
}

/// Demand-driven draw scheduling.
///
/// Exactly two things request a draw: a new frame from the source and a
/// parameter change that needs a visible refresh. Requests arriving before
/// the next draw coalesce into the pending flag; there is no frame queue.
/// Screen brightness bypasses the GPU pipeline entirely and never requests
/// a redraw.
pub struct RenderScheduler {
    pending: AtomicBool,
    handle: OnceLock<Box<dyn RedrawHandle>>,
}

impl RenderScheduler {
    pub fn new() -> Self {
        Self {
            pending: AtomicBool::new(false),
            handle: OnceLock::new(),
        }
    }

    /// Attach the host waker. One-time wiring; later calls are ignored.
    pub fn attach(&self, handle: Box<dyn RedrawHandle>) {
        if self.handle.set(handle).is_err() {
            log::warn!("render scheduler handle already attached");
        }
    }

    /// Called by the frame source when a new frame has been published.
    pub fn frame_ready(&self) {
        self.request();
    }

    /// Called by the parameter store after every write. `filter_transition`
    /// is set only when the filter mode actually changed.
    pub fn parameter_changed(&self, kind: ParameterKind, filter_transition: bool) {
        if kind == ParameterKind::ScreenBrightness {
            return;
        }
        if kind == ParameterKind::Filter && !filter_transition {
            return;
        }
        self.request();
        if filter_transition {
            if let Some(handle) = self.handle.get() {
                handle.redraw_after(FILTER_SETTLE_DELAY);
            }
        }
    }

    /// Drain the coalesced request. The render context calls this once per
    /// draw opportunity.
    pub fn take_pending(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }

    fn request(&self) {
        self.pending.store(true, Ordering::Release);
        if let Some(handle) = self.handle.get() {
            handle.redraw();
        }
    }
}

impl Default for RenderScheduler {
    fn default() -> Self {
        Self::new()
    }
}
