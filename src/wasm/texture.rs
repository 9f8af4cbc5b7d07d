use web_sys::{HtmlImageElement, WebGlRenderingContext as GL, WebGlTexture};

use super::probe::js_error;
use crate::error::WaterError;

/// GPU copy of the source photograph. Always replaced as a whole.
pub struct SourceTexture {
    texture: WebGlTexture,
    dirty: bool,
    uploads: u32,
}

impl SourceTexture {
    pub fn create(gl: &GL) -> Result<Self, WaterError> {
        let texture = gl
            .create_texture()
            .ok_or_else(|| WaterError::Browser("unable to create texture".to_owned()))?;
        Ok(Self {
            texture,
            dirty: true,
            uploads: 0,
        })
    }

    /// The next [`upload`](Self::upload) is due.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn uploads(&self) -> u32 {
        self.uploads
    }

    /// Copies `image` at native resolution: clamp-to-edge, linear, no mipmaps.
    pub fn upload(&mut self, gl: &GL, image: &HtmlImageElement) -> Result<(), WaterError> {
        gl.bind_texture(GL::TEXTURE_2D, Some(&self.texture));
        gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_S, GL::CLAMP_TO_EDGE as i32);
        gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_T, GL::CLAMP_TO_EDGE as i32);
        gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MIN_FILTER, GL::LINEAR as i32);
        gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MAG_FILTER, GL::LINEAR as i32);
        gl.tex_image_2d_with_u32_and_u32_and_image(
            GL::TEXTURE_2D,
            0,
            GL::RGBA as i32,
            GL::RGBA,
            GL::UNSIGNED_BYTE,
            image,
        )
        .map_err(js_error)?;

        self.dirty = false;
        self.uploads += 1;
        Ok(())
    }

    /// Binds the texture to unit 0.
    pub fn bind(&self, gl: &GL) {
        gl.active_texture(GL::TEXTURE0);
        gl.bind_texture(GL::TEXTURE_2D, Some(&self.texture));
    }
}
