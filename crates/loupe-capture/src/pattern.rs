use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::device::{CameraBackend, CameraDevice, CaptureError, CaptureSize, EventSink, SourceEvent};
use crate::slot::PixelFrame;

const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Synthetic producer: a slowly drifting gradient with a center marker, so
/// zoom and the color filters are visible without any camera hardware.
/// Default backend for the standalone binary and the capture tests.
pub struct TestPatternCamera {
    size: CaptureSize,
    running: Arc<AtomicBool>,
    thread: Option<thread::JoinHandle<()>>,
}

impl TestPatternCamera {
    pub fn new() -> Self {
        Self {
            size: CaptureSize::new(1280, 720),
            running: Arc::new(AtomicBool::new(false)),
            thread: None,
        }
    }
}

impl Default for TestPatternCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraDevice for TestPatternCamera {
    fn stream_sizes(&self) -> Vec<CaptureSize> {
        vec![
            CaptureSize::new(640, 480),
            CaptureSize::new(1280, 720),
            CaptureSize::new(1920, 1080),
        ]
    }

    fn configure(&mut self, size: CaptureSize) -> Result<CaptureSize, CaptureError> {
        self.size = size;
        Ok(size)
    }

    fn start(&mut self, sink: EventSink) -> Result<(), CaptureError> {
        if self.thread.is_some() {
            return Err(CaptureError::Stream("pattern stream already running".into()));
        }
        self.running.store(true, Ordering::Release);
        let running = self.running.clone();
        let size = self.size;

        let thread = thread::Builder::new()
            .name("pattern-camera".to_string())
            .spawn(move || {
                let mut tick: u32 = 0;
                while running.load(Ordering::Acquire) {
                    (*sink)(SourceEvent::Frame(render_pattern(size, tick)));
                    tick = tick.wrapping_add(1);
                    thread::sleep(FRAME_INTERVAL);
                }
            })
            .map_err(|e| CaptureError::Stream(e.to_string()))?;

        self.thread = Some(thread);
        Ok(())
    }

    fn close(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for TestPatternCamera {
    fn drop(&mut self) {
        self.close();
    }
}

/// Backend yielding the built-in pattern camera.
pub struct PatternBackend;

impl CameraBackend for PatternBackend {
    fn open(&self) -> Result<Box<dyn CameraDevice>, CaptureError> {
        Ok(Box::new(TestPatternCamera::new()))
    }
}

fn render_pattern(size: CaptureSize, tick: u32) -> PixelFrame {
    let (w, h) = (size.width, size.height);
    let mut rgba = vec![0u8; (w * h * 4) as usize];
    let drift = (tick % 256) as u32;

    for y in 0..h {
        for x in 0..w {
            let i = ((y * w + x) * 4) as usize;
            rgba[i] = (((x * 255) / w + drift) % 256) as u8;
            rgba[i + 1] = ((y * 255) / h) as u8;
            rgba[i + 2] = (255 - ((x * 255) / w)) as u8;
            rgba[i + 3] = 255;

            // White crosshair through the center, for eyeballing zoom.
            let (cx, cy) = (w / 2, h / 2);
            if x.abs_diff(cx) < 2 || y.abs_diff(cy) < 2 {
                rgba[i] = 255;
                rgba[i + 1] = 255;
                rgba[i + 2] = 255;
            }
        }
    }
    PixelFrame::new(w, h, rgba)
}
