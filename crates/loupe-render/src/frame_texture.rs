use glow::HasContext;
use loupe_capture::PixelFrame;

/// The GPU side of the frame handle: one RGBA8 texture, re-uploaded in
/// place per frame and reallocated only when the stream size changes.
pub struct FrameTexture {
    texture: glow::Texture,
    width: u32,
    height: u32,
}

impl FrameTexture {
    pub fn new(gl: &glow::Context) -> Self {
        unsafe {
            let texture = gl.create_texture().expect("create frame texture");
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::LINEAR as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_S,
                glow::CLAMP_TO_EDGE as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_T,
                glow::CLAMP_TO_EDGE as i32,
            );
            gl.bind_texture(glow::TEXTURE_2D, None);

            Self {
                texture,
                width: 0,
                height: 0,
            }
        }
    }

    pub fn texture(&self) -> glow::Texture {
        self.texture
    }

    /// Upload the latest frame, overwriting the previous contents.
    pub fn upload(&mut self, gl: &glow::Context, frame: &PixelFrame) {
        unsafe {
            gl.bind_texture(glow::TEXTURE_2D, Some(self.texture));
            if frame.width != self.width || frame.height != self.height {
                gl.tex_image_2d(
                    glow::TEXTURE_2D,
                    0,
                    glow::RGBA8 as i32,
                    frame.width as i32,
                    frame.height as i32,
                    0,
                    glow::RGBA,
                    glow::UNSIGNED_BYTE,
                    glow::PixelUnpackData::Slice(Some(&frame.rgba)),
                );
                self.width = frame.width;
                self.height = frame.height;
            } else {
                gl.tex_sub_image_2d(
                    glow::TEXTURE_2D,
                    0,
                    0,
                    0,
                    frame.width as i32,
                    frame.height as i32,
                    glow::RGBA,
                    glow::UNSIGNED_BYTE,
                    glow::PixelUnpackData::Slice(Some(&frame.rgba)),
                );
            }
            gl.bind_texture(glow::TEXTURE_2D, None);
        }
    }

    pub fn destroy(&self, gl: &glow::Context) {
        unsafe {
            gl.delete_texture(self.texture);
        }
    }
}
