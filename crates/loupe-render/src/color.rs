//! CPU reference of the fragment pipeline.
//!
//! These functions mirror the GLSL in `shaders.rs` formula for formula; the
//! property tests exercise the pipeline here because the math must be
//! identical on both sides.

use loupe_core::{FilterMode, ViewParameters};

/// Texel offset of the four sharpening taps.
pub const SHARPEN_TAP_OFFSET: f32 = 0.01;

/// Remap a texture coordinate so the fetch crops toward the frame center as
/// zoom increases. No clamping: the zoom range is enforced at the parameter
/// level, not here.
pub fn zoomed_coord(uv: [f32; 2], zoom: f32) -> [f32; 2] {
    [(uv[0] - 0.5) / zoom + 0.5, (uv[1] - 0.5) / zoom + 0.5]
}

/// Color-filter stage.
pub fn apply_filter(mode: FilterMode, rgb: [f32; 3]) -> [f32; 3] {
    match mode {
        FilterMode::Normal => rgb,
        FilterMode::Amber => [rgb[0], rgb[1] * 0.7, 0.0],
        FilterMode::Grayscale => {
            let luma = rgb[0] * 0.299 + rgb[1] * 0.587 + rgb[2] * 0.114;
            [luma, luma, luma]
        }
    }
}

/// Contrast/brightness stage, clamped per channel to [0, 1].
pub fn contrast_brightness(rgb: [f32; 3], contrast: f32, brightness: f32) -> [f32; 3] {
    let mut out = [0.0; 3];
    for (o, c) in out.iter_mut().zip(rgb) {
        *o = ((c - 0.5) * contrast + 0.5 + brightness).clamp(0.0, 1.0);
    }
    out
}

/// Unsharp mask: amplify the difference between the processed color and a
/// blur estimate of the raw neighborhood.
pub fn sharpen(rgb: [f32; 3], blurred: [f32; 3], sharpness: f32) -> [f32; 3] {
    let mut out = [0.0; 3];
    for i in 0..3 {
        out[i] = rgb[i] + (rgb[i] - blurred[i]) * sharpness;
    }
    out
}

/// Run the full per-pixel pipeline against a sampling function, exactly as
/// the shader does: zoom remap, one texel fetch, filter, contrast/
/// brightness, optional unsharp mask, then the framebuffer's [0, 1] store
/// clamp.
pub fn shade_pixel<F>(params: &ViewParameters, sample: F, uv: [f32; 2]) -> [f32; 3]
where
    F: Fn([f32; 2]) -> [f32; 3],
{
    let coord = zoomed_coord(uv, params.zoom);
    let mut rgb = apply_filter(params.filter_mode, sample(coord));
    rgb = contrast_brightness(rgb, params.contrast, params.brightness);

    // The extra taps are skipped entirely at zero sharpness.
    if params.sharpness > 0.0 {
        let taps = [
            [SHARPEN_TAP_OFFSET, 0.0],
            [-SHARPEN_TAP_OFFSET, 0.0],
            [0.0, SHARPEN_TAP_OFFSET],
            [0.0, -SHARPEN_TAP_OFFSET],
        ];
        let mut blurred = [0.0f32; 3];
        for tap in taps {
            let s = sample([coord[0] + tap[0], coord[1] + tap[1]]);
            for (b, v) in blurred.iter_mut().zip(s) {
                *b += v * 0.25;
            }
        }
        rgb = sharpen(rgb, blurred, params.sharpness);
    }

    [
        rgb[0].clamp(0.0, 1.0),
        rgb[1].clamp(0.0, 1.0),
        rgb[2].clamp(0.0, 1.0),
    ]
}
