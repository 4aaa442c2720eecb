use glow::HasContext;
use loupe_core::ViewParameters;

use crate::frame_texture::FrameTexture;
use crate::quad::FullscreenQuad;
use crate::shaders;

/// The one-pass magnifier draw: reads the current frame texture and the
/// view parameters, writes straight to the bound surface. No intermediate
/// framebuffer, no history.
pub struct Compositor {
    program: glow::Program,
    loc_frame: glow::UniformLocation,
    loc_tex_matrix: glow::UniformLocation,
    loc_zoom: glow::UniformLocation,
    loc_filter_mode: glow::UniformLocation,
    loc_brightness: glow::UniformLocation,
    loc_contrast: glow::UniformLocation,
    loc_sharpness: glow::UniformLocation,
}

impl Compositor {
    /// Build the shader program. A compile or link failure is fatal for
    /// this render target: the caller logs it and never draws.
    pub fn new(gl: &glow::Context) -> Result<Self, String> {
        let program = compile_program(gl, shaders::MAGNIFY_VERTEX, shaders::MAGNIFY_FRAGMENT)?;

        unsafe {
            let loc = |name: &str| {
                gl.get_uniform_location(program, name)
                    .ok_or_else(|| format!("missing uniform {name}"))
            };
            Ok(Self {
                loc_frame: loc("u_frame")?,
                loc_tex_matrix: loc("u_tex_matrix")?,
                loc_zoom: loc("u_zoom")?,
                loc_filter_mode: loc("u_filter_mode")?,
                loc_brightness: loc("u_brightness")?,
                loc_contrast: loc("u_contrast")?,
                loc_sharpness: loc("u_sharpness")?,
                program,
            })
        }
    }

    pub fn render(
        &self,
        gl: &glow::Context,
        frame: &FrameTexture,
        params: &ViewParameters,
        tex_matrix: &[f32; 16],
        quad: &FullscreenQuad,
    ) {
        unsafe {
            gl.use_program(Some(self.program));

            gl.active_texture(glow::TEXTURE0);
            gl.bind_texture(glow::TEXTURE_2D, Some(frame.texture()));
            gl.uniform_1_i32(Some(&self.loc_frame), 0);

            gl.uniform_matrix_4_f32_slice(Some(&self.loc_tex_matrix), false, tex_matrix);
            gl.uniform_1_f32(Some(&self.loc_zoom), params.zoom);
            gl.uniform_1_i32(Some(&self.loc_filter_mode), params.filter_mode.index() as i32);
            gl.uniform_1_f32(Some(&self.loc_brightness), params.brightness);
            gl.uniform_1_f32(Some(&self.loc_contrast), params.contrast);
            gl.uniform_1_f32(Some(&self.loc_sharpness), params.sharpness);

            quad.draw(gl);

            gl.use_program(None);
        }
    }

    pub fn destroy(&self, gl: &glow::Context) {
        unsafe {
            gl.delete_program(self.program);
        }
    }
}

fn compile_program(
    gl: &glow::Context,
    vert_src: &str,
    frag_src: &str,
) -> Result<glow::Program, String> {
    unsafe {
        let program = gl.create_program().map_err(|e| format!("create program: {e}"))?;

        let compile = |kind: u32, src: &str, label: &str| -> Result<glow::Shader, String> {
            let shader = gl
                .create_shader(kind)
                .map_err(|e| format!("create {label} shader: {e}"))?;
            gl.shader_source(shader, src);
            gl.compile_shader(shader);
            if !gl.get_shader_compile_status(shader) {
                let info = gl.get_shader_info_log(shader);
                gl.delete_shader(shader);
                return Err(format!("{label} shader failed:\n{info}"));
            }
            Ok(shader)
        };

        let vert = compile(glow::VERTEX_SHADER, vert_src, "vertex")?;
        let frag = match compile(glow::FRAGMENT_SHADER, frag_src, "fragment") {
            Ok(frag) => frag,
            Err(e) => {
                gl.delete_shader(vert);
                return Err(e);
            }
        };

        gl.attach_shader(program, vert);
        gl.attach_shader(program, frag);
        gl.link_program(program);
        gl.delete_shader(vert);
        gl.delete_shader(frag);

        if !gl.get_program_link_status(program) {
            let info = gl.get_program_info_log(program);
            gl.delete_program(program);
            return Err(format!("program linking failed:\n{info}"));
        }
        Ok(program)
    }
}
