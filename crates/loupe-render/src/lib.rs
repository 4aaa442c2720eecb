pub mod color;
pub mod compositor;
pub mod frame_texture;
pub mod quad;
pub mod renderer;
pub mod shaders;

pub use compositor::Compositor;
pub use frame_texture::FrameTexture;
pub use quad::FullscreenQuad;
pub use renderer::{MagnifierRenderer, FLIP_Y_MATRIX};
