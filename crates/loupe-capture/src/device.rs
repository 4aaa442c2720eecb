use std::sync::Arc;

use thiserror::Error;

use crate::slot::PixelFrame;

/// A native capture resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureSize {
    pub width: u32,
    pub height: u32,
}

impl CaptureSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("no camera device available")]
    DeviceUnavailable,
    #[error("camera permission denied")]
    PermissionDenied,
    #[error("stream configuration failed: {0}")]
    Configuration(String),
    #[error("camera stream error: {0}")]
    Stream(String),
    #[error("camera disconnected")]
    Disconnected,
}

/// What a running producer can deliver to its sink.
pub enum SourceEvent {
    Frame(PixelFrame),
    Error(CaptureError),
}

/// Callback invoked by the producer on its own thread for every event.
pub type EventSink = Arc<dyn Fn(SourceEvent) + Send + Sync>;

/// The external video producer's lifecycle, as narrow as the core needs it.
///
/// Implementations deliver events on an arbitrary producer-owned thread.
/// Events arriving after `close()` must be tolerated by the consumer; the
/// producer only guarantees that the stream stops eventually.
pub trait CameraDevice: Send {
    /// Native resolutions the device can stream.
    fn stream_sizes(&self) -> Vec<CaptureSize>;

    /// Pick the stream resolution. Returns the size the device actually
    /// confirmed, which may differ from the request.
    fn configure(&mut self, size: CaptureSize) -> Result<CaptureSize, CaptureError>;

    /// Start delivering frames to `sink` until closed.
    fn start(&mut self, sink: EventSink) -> Result<(), CaptureError>;

    /// Stop the stream and release the device.
    fn close(&mut self);
}

/// Opens a concrete device. A real backend picks the first back-facing
/// sensor the platform enumerates; desktop backends take the first device.
pub trait CameraBackend {
    fn open(&self) -> Result<Box<dyn CameraDevice>, CaptureError>;
}
