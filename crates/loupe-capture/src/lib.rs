pub mod device;
pub mod pattern;
pub mod select;
pub mod slot;
pub mod source;
#[cfg(feature = "camera")]
pub mod webcam;

pub use device::{CameraBackend, CameraDevice, CaptureError, CaptureSize, EventSink, SourceEvent};
pub use pattern::{PatternBackend, TestPatternCamera};
pub use select::best_capture_size;
pub use slot::{FrameSlot, PixelFrame};
pub use source::FrameSource;
#[cfg(feature = "camera")]
pub use webcam::WebcamBackend;
