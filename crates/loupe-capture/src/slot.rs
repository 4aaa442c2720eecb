use crossbeam::atomic::AtomicCell;

/// One decoded video frame, tightly packed RGBA8.
pub struct PixelFrame {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl PixelFrame {
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Self {
        debug_assert_eq!(rgba.len(), (width * height * 4) as usize);
        Self { width, height, rgba }
    }
}

/// The single live frame handle.
///
/// The producer overwrites it in place on every arrival and the render
/// context drains it; no history is kept. `Option<Box<_>>` is pointer
/// sized, so the cell's swap is one atomic exchange: single writer, single
/// reader, no locks.
pub struct FrameSlot {
    latest: AtomicCell<Option<Box<PixelFrame>>>,
}

impl FrameSlot {
    pub fn new() -> Self {
        Self {
            latest: AtomicCell::new(None),
        }
    }

    /// Publish a frame, replacing (and dropping) any unconsumed one.
    pub fn publish(&self, frame: PixelFrame) {
        self.latest.swap(Some(Box::new(frame)));
    }

    /// Take the most recent frame, leaving the slot empty.
    pub fn take(&self) -> Option<Box<PixelFrame>> {
        self.latest.take()
    }
}

impl Default for FrameSlot {
    fn default() -> Self {
        Self::new()
    }
}
