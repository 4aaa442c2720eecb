//! Real webcam capture via nokhwa, behind the `camera` feature.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{
    CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
};
use nokhwa::Camera;

use crate::device::{CameraBackend, CameraDevice, CaptureError, CaptureSize, EventSink, SourceEvent};
use crate::slot::PixelFrame;

const REQUESTED_FPS: u32 = 30;

/// Opens the platform webcam at the given enumeration index. Desktop
/// platforms have no facing metadata, so index 0 stands in for "first
/// back-facing sensor".
pub struct WebcamBackend {
    index: u32,
}

impl WebcamBackend {
    pub fn new(index: u32) -> Self {
        Self { index }
    }
}

impl CameraBackend for WebcamBackend {
    fn open(&self) -> Result<Box<dyn CameraDevice>, CaptureError> {
        let index = CameraIndex::Index(self.index);
        let probe = RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestResolution);
        let mut camera = Camera::new(index.clone(), probe)
            .map_err(|e| CaptureError::Configuration(e.to_string()))?;
        let mut sizes: Vec<CaptureSize> = camera
            .compatible_camera_formats()
            .map_err(|e| CaptureError::Configuration(e.to_string()))?
            .iter()
            .map(|f| CaptureSize::new(f.resolution().width(), f.resolution().height()))
            .collect();
        sizes.dedup();
        if sizes.is_empty() {
            return Err(CaptureError::DeviceUnavailable);
        }
        // The probe camera is dropped here; the stream thread opens its own
        // handle so the device never crosses threads.
        Ok(Box::new(WebcamCamera {
            index,
            sizes,
            size: CaptureSize::new(1280, 720),
            running: Arc::new(AtomicBool::new(false)),
            thread: None,
        }))
    }
}

pub struct WebcamCamera {
    index: CameraIndex,
    sizes: Vec<CaptureSize>,
    size: CaptureSize,
    running: Arc<AtomicBool>,
    thread: Option<thread::JoinHandle<()>>,
}

impl CameraDevice for WebcamCamera {
    fn stream_sizes(&self) -> Vec<CaptureSize> {
        self.sizes.clone()
    }

    fn configure(&mut self, size: CaptureSize) -> Result<CaptureSize, CaptureError> {
        self.size = size;
        Ok(size)
    }

    fn start(&mut self, sink: EventSink) -> Result<(), CaptureError> {
        if self.thread.is_some() {
            return Err(CaptureError::Stream("webcam stream already running".into()));
        }
        self.running.store(true, Ordering::Release);
        let running = self.running.clone();
        let index = self.index.clone();
        let size = self.size;

        let thread = thread::Builder::new()
            .name("webcam-camera".to_string())
            .spawn(move || stream_loop(index, size, running, sink))
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

impl Drop for WebcamCamera {
    fn drop(&mut self) {
        self.close();
    }
}

fn stream_loop(index: CameraIndex, size: CaptureSize, running: Arc<AtomicBool>, sink: EventSink) {
    let format = CameraFormat::new(
        Resolution::new(size.width, size.height),
        FrameFormat::MJPEG,
        REQUESTED_FPS,
    );
    let requested = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(format));

    let mut camera = match Camera::new(index, requested) {
        Ok(camera) => camera,
        Err(e) => {
            (*sink)(SourceEvent::Error(CaptureError::Stream(e.to_string())));
            return;
        }
    };
    if let Err(e) = camera.open_stream() {
        (*sink)(SourceEvent::Error(CaptureError::Stream(e.to_string())));
        return;
    }
    log::info!("webcam stream open at {}", camera.camera_format());

    while running.load(Ordering::Acquire) {
        let buffer = match camera.frame() {
            Ok(buffer) => buffer,
            Err(e) => {
                log::warn!("webcam frame failed: {e}");
                (*sink)(SourceEvent::Error(CaptureError::Disconnected));
                break;
            }
        };
        match buffer.decode_image::<RgbFormat>() {
            Ok(rgb) => {
                let (width, height) = (rgb.width(), rgb.height());
                let mut rgba = Vec::with_capacity((width * height * 4) as usize);
                for px in rgb.pixels() {
                    rgba.extend_from_slice(&[px[0], px[1], px[2], 255]);
                }
                (*sink)(SourceEvent::Frame(PixelFrame::new(width, height, rgba)));
            }
            Err(e) => {
                (*sink)(SourceEvent::Error(CaptureError::Stream(e.to_string())));
                break;
            }
        }
    }
    let _ = camera.stop_stream();
}
