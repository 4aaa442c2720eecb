use glow::HasContext;
use loupe_capture::PixelFrame;
use loupe_core::ViewParameters;

use crate::compositor::Compositor;
use crate::frame_texture::FrameTexture;
use crate::quad::FullscreenQuad;

/// Source transform for frames with top-down rows (camera order) drawn into
/// a bottom-up GL surface. Column-major.
#[rustfmt::skip]
pub const FLIP_Y_MATRIX: [f32; 16] = [
    1.0,  0.0, 0.0, 0.0,
    0.0, -1.0, 0.0, 0.0,
    0.0,  0.0, 1.0, 0.0,
    0.0,  1.0, 0.0, 1.0,
];

/// Saved GL state so the host toolkit's context survives our draw.
struct SavedGlState {
    viewport: [i32; 4],
    blend_enabled: bool,
    scissor_enabled: bool,
    program: Option<glow::Program>,
    vao: Option<glow::VertexArray>,
    active_texture: i32,
    bound_texture: Option<glow::Texture>,
}

impl SavedGlState {
    unsafe fn save(gl: &glow::Context) -> Self {
        let mut viewport = [0i32; 4];
        gl.get_parameter_i32_slice(glow::VIEWPORT, &mut viewport);

        let program_id = gl.get_parameter_i32(glow::CURRENT_PROGRAM);
        let program = if program_id == 0 {
            None
        } else {
            Some(glow::NativeProgram(
                std::num::NonZeroU32::new(program_id as u32).unwrap(),
            ))
        };

        let vao_id = gl.get_parameter_i32(glow::VERTEX_ARRAY_BINDING);
        let vao = if vao_id == 0 {
            None
        } else {
            Some(glow::NativeVertexArray(
                std::num::NonZeroU32::new(vao_id as u32).unwrap(),
            ))
        };

        let active_texture = gl.get_parameter_i32(glow::ACTIVE_TEXTURE);
        gl.active_texture(glow::TEXTURE0);
        let tex_id = gl.get_parameter_i32(glow::TEXTURE_BINDING_2D);
        let bound_texture = if tex_id == 0 {
            None
        } else {
            Some(glow::NativeTexture(
                std::num::NonZeroU32::new(tex_id as u32).unwrap(),
            ))
        };

        Self {
            viewport,
            blend_enabled: gl.is_enabled(glow::BLEND),
            scissor_enabled: gl.is_enabled(glow::SCISSOR_TEST),
            program,
            vao,
            active_texture,
            bound_texture,
        }
    }

    unsafe fn restore(&self, gl: &glow::Context) {
        gl.viewport(
            self.viewport[0],
            self.viewport[1],
            self.viewport[2],
            self.viewport[3],
        );
        if self.blend_enabled {
            gl.enable(glow::BLEND);
        } else {
            gl.disable(glow::BLEND);
        }
        if self.scissor_enabled {
            gl.enable(glow::SCISSOR_TEST);
        } else {
            gl.disable(glow::SCISSOR_TEST);
        }
        gl.use_program(self.program);
        gl.bind_vertex_array(self.vao);
        gl.active_texture(glow::TEXTURE0);
        gl.bind_texture(glow::TEXTURE_2D, self.bound_texture);
        gl.active_texture(self.active_texture as u32);
    }
}

/// Owns the GPU objects of the magnifier and runs one demand-driven draw.
///
/// A shader build failure leaves the compositor slot empty: the condition
/// is logged once and this renderer never draws, per the fail-stop policy
/// for render targets.
pub struct MagnifierRenderer {
    compositor: Option<Compositor>,
    quad: FullscreenQuad,
    frame: FrameTexture,
    have_frame: bool,
}

impl MagnifierRenderer {
    /// Create the renderer. Must be called with a current GL context.
    pub fn new(gl: &glow::Context) -> Self {
        let compositor = match Compositor::new(gl) {
            Ok(compositor) => Some(compositor),
            Err(e) => {
                log::error!("magnifier program failed to build, disabling draws: {e}");
                None
            }
        };
        Self {
            compositor,
            quad: FullscreenQuad::new(gl),
            frame: FrameTexture::new(gl),
            have_frame: false,
        }
    }

    /// Draw the magnified view.
    ///
    /// `new_frame` is the latest frame drained from the source slot, if one
    /// arrived since the previous draw; otherwise the texture already
    /// uploaded is reused. `viewport` is [x, y, width, height] in physical
    /// pixels.
    pub fn render(
        &mut self,
        gl: &glow::Context,
        new_frame: Option<&PixelFrame>,
        params: &ViewParameters,
        viewport: [i32; 4],
    ) {
        unsafe {
            let saved = SavedGlState::save(gl);
            gl.disable(glow::SCISSOR_TEST);
            gl.disable(glow::BLEND);

            if let Some(frame) = new_frame {
                self.frame.upload(gl, frame);
                self.have_frame = true;
            }

            gl.viewport(viewport[0], viewport[1], viewport[2], viewport[3]);
            if self.have_frame {
                if let Some(compositor) = &self.compositor {
                    compositor.render(gl, &self.frame, params, &FLIP_Y_MATRIX, &self.quad);
                }
            }

            saved.restore(gl);
        }
    }

    pub fn destroy(&self, gl: &glow::Context) {
        if let Some(compositor) = &self.compositor {
            compositor.destroy(gl);
        }
        self.quad.destroy(gl);
        self.frame.destroy(gl);
    }
}
