use crate::device::CaptureSize;

/// How far a native aspect ratio may deviate from the target's to count as
/// a match.
pub const ASPECT_TOLERANCE: f32 = 0.1;

/// Pick the best native capture resolution for a target surface.
///
/// Prefers the largest width among sizes whose aspect ratio is within
/// [`ASPECT_TOLERANCE`] of the target's; if none matches, falls back to the
/// largest available size regardless of aspect. `None` only when the device
/// reports no sizes at all.
pub fn best_capture_size(
    sizes: &[CaptureSize],
    target_width: u32,
    target_height: u32,
) -> Option<CaptureSize> {
    if sizes.is_empty() {
        return None;
    }
    let target_ratio = target_width as f32 / target_height as f32;

    let mut best: Option<CaptureSize> = None;
    for &size in sizes {
        if (size.aspect() - target_ratio).abs() < ASPECT_TOLERANCE
            && best.map_or(true, |b| size.width > b.width)
        {
            best = Some(size);
        }
    }
    best.or_else(|| sizes.iter().copied().max_by_key(|s| s.width))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZES: [CaptureSize; 4] = [
        CaptureSize { width: 640, height: 480 },
        CaptureSize { width: 1280, height: 720 },
        CaptureSize { width: 1920, height: 1080 },
        CaptureSize { width: 800, height: 600 },
    ];

    #[test]
    fn prefers_largest_width_among_aspect_matches() {
        let best = best_capture_size(&SIZES, 1280, 720).unwrap();
        assert_eq!(best, CaptureSize::new(1920, 1080));
    }

    #[test]
    fn matches_within_tolerance() {
        // 4:3 target: 640x480 and 800x600 match, widest wins.
        let best = best_capture_size(&SIZES, 1024, 768).unwrap();
        assert_eq!(best, CaptureSize::new(800, 600));
    }

    #[test]
    fn falls_back_to_largest_when_no_aspect_matches() {
        // Portrait target matches nothing; largest width wins.
        let best = best_capture_size(&SIZES, 720, 1280).unwrap();
        assert_eq!(best, CaptureSize::new(1920, 1080));
    }

    #[test]
    fn empty_size_list_yields_none() {
        assert!(best_capture_size(&[], 1280, 720).is_none());
    }
}
