use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam::channel::{bounded, Receiver, Sender};
use loupe_core::RenderScheduler;

use crate::device::{CameraBackend, CameraDevice, CaptureError, CaptureSize, SourceEvent};
use crate::select::best_capture_size;
use crate::slot::FrameSlot;

/// Owns the external video producer and the live frame handle.
///
/// Produced frames overwrite the slot and wake the scheduler; the state
/// machine and render context never see the producer directly. A producer
/// error flips the source closed and surfaces exactly one failure through
/// [`FrameSource::take_failure`]; there is no automatic retry. Callbacks
/// that race past `close()` are dropped.
pub struct FrameSource {
    device: Option<Box<dyn CameraDevice>>,
    slot: Arc<FrameSlot>,
    open: Arc<AtomicBool>,
    scheduler: Arc<RenderScheduler>,
    failure_tx: Sender<CaptureError>,
    failure_rx: Receiver<CaptureError>,
}

impl FrameSource {
    pub fn new(scheduler: Arc<RenderScheduler>) -> Self {
        let (failure_tx, failure_rx) = bounded(1);
        Self {
            device: None,
            slot: Arc::new(FrameSlot::new()),
            open: Arc::new(AtomicBool::new(false)),
            scheduler,
            failure_tx,
            failure_rx,
        }
    }

    /// The frame handle the render context drains.
    pub fn slot(&self) -> Arc<FrameSlot> {
        self.slot.clone()
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    pub fn open(&mut self, backend: &dyn CameraBackend) -> Result<(), CaptureError> {
        let device = backend.open()?;
        self.device = Some(device);
        self.open.store(true, Ordering::Release);
        Ok(())
    }

    /// Pick and apply the best native resolution for the target surface.
    pub fn configure(
        &mut self,
        target_width: u32,
        target_height: u32,
    ) -> Result<CaptureSize, CaptureError> {
        let device = self
            .device
            .as_mut()
            .ok_or(CaptureError::DeviceUnavailable)?;
        let sizes = device.stream_sizes();
        let best = best_capture_size(&sizes, target_width, target_height).ok_or_else(|| {
            CaptureError::Configuration("device reports no stream sizes".into())
        })?;
        let confirmed = device.configure(best)?;
        log::info!(
            "capture configured: {}x{} (target {}x{})",
            confirmed.width,
            confirmed.height,
            target_width,
            target_height
        );
        Ok(confirmed)
    }

    /// Start the producer. Each frame updates the slot and requests a draw;
    /// a producer error closes the source and is surfaced once.
    pub fn start(&mut self) -> Result<(), CaptureError> {
        let device = self
            .device
            .as_mut()
            .ok_or(CaptureError::DeviceUnavailable)?;

        let slot = self.slot.clone();
        let open = self.open.clone();
        let scheduler = self.scheduler.clone();
        let failure_tx = self.failure_tx.clone();

        device.start(Arc::new(move |event| match event {
            SourceEvent::Frame(frame) => {
                // A late frame after close is a no-op.
                if open.load(Ordering::Acquire) {
                    slot.publish(frame);
                    scheduler.frame_ready();
                }
            }
            SourceEvent::Error(err) => {
                if open.swap(false, Ordering::AcqRel) {
                    log::warn!("camera stream failed: {err}");
                    let _ = failure_tx.try_send(err);
                }
            }
        }))
    }

    /// One-shot failure notification from the producer, if any.
    pub fn take_failure(&self) -> Option<CaptureError> {
        self.failure_rx.try_recv().ok()
    }

    pub fn close(&mut self) {
        self.open.store(false, Ordering::Release);
        if let Some(mut device) = self.device.take() {
            device.close();
        }
    }
}

impl Drop for FrameSource {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::EventSink;
    use crate::slot::PixelFrame;
    use std::sync::Mutex;

    /// Hand-cranked device: the test drives the sink directly, standing in
    /// for the producer's own thread.
    struct ManualCamera {
        sink: Arc<Mutex<Option<EventSink>>>,
        sizes: Vec<CaptureSize>,
    }

    struct ManualBackend {
        sink: Arc<Mutex<Option<EventSink>>>,
    }

    impl CameraBackend for ManualBackend {
        fn open(&self) -> Result<Box<dyn CameraDevice>, CaptureError> {
            Ok(Box::new(ManualCamera {
                sink: self.sink.clone(),
                sizes: vec![CaptureSize::new(640, 480), CaptureSize::new(1280, 720)],
            }))
        }
    }

    impl CameraDevice for ManualCamera {
        fn stream_sizes(&self) -> Vec<CaptureSize> {
            self.sizes.clone()
        }

        fn configure(&mut self, size: CaptureSize) -> Result<CaptureSize, CaptureError> {
            Ok(size)
        }

        fn start(&mut self, sink: EventSink) -> Result<(), CaptureError> {
            *self.sink.lock().unwrap() = Some(sink);
            Ok(())
        }

        fn close(&mut self) {}
    }

    fn rig() -> (FrameSource, Arc<Mutex<Option<EventSink>>>, Arc<RenderScheduler>) {
        let scheduler = Arc::new(RenderScheduler::new());
        let sink = Arc::new(Mutex::new(None));
        let mut source = FrameSource::new(scheduler.clone());
        source
            .open(&ManualBackend { sink: sink.clone() })
            .unwrap();
        source.configure(1280, 720).unwrap();
        source.start().unwrap();
        (source, sink, scheduler)
    }

    fn frame(tag: u8) -> PixelFrame {
        PixelFrame::new(1, 1, vec![tag, 0, 0, 255])
    }

    #[test]
    fn frames_reach_slot_and_wake_scheduler() {
        let (source, sink, scheduler) = rig();
        let sink = sink.lock().unwrap().clone().unwrap();
        (*sink)(SourceEvent::Frame(frame(7)));
        assert_eq!(source.slot().take().unwrap().rgba[0], 7);
        assert!(scheduler.take_pending());
    }

    #[test]
    fn late_frames_after_close_are_dropped() {
        let (mut source, sink, scheduler) = rig();
        let sink = sink.lock().unwrap().clone().unwrap();
        source.close();
        (*sink)(SourceEvent::Frame(frame(9)));
        assert!(source.slot().take().is_none());
        assert!(!scheduler.take_pending());
    }

    #[test]
    fn producer_error_closes_source_and_surfaces_once() {
        let (source, sink, _scheduler) = rig();
        let sink = sink.lock().unwrap().clone().unwrap();
        (*sink)(SourceEvent::Error(CaptureError::Disconnected));
        (*sink)(SourceEvent::Error(CaptureError::Disconnected));
        assert!(!source.is_open());
        assert!(matches!(
            source.take_failure(),
            Some(CaptureError::Disconnected)
        ));
        assert!(source.take_failure().is_none());
    }

    #[test]
    fn configure_picks_aspect_match() {
        let scheduler = Arc::new(RenderScheduler::new());
        let sink = Arc::new(Mutex::new(None));
        let mut source = FrameSource::new(scheduler);
        source.open(&ManualBackend { sink }).unwrap();
        let size = source.configure(1920, 1080).unwrap();
        assert_eq!(size, CaptureSize::new(1280, 720));
    }
}
