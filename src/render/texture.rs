//! GL textures for the two disk faces.

use web_sys::{HtmlImageElement, HtmlVideoElement, WebGl2RenderingContext as Gl, WebGlTexture};

use crate::error::DiskError;

/// Per-frame "needs re-upload" flag for a video-backed texture.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RefreshFlag {
    dirty: bool,
    uploads: u64,
}

impl RefreshFlag {
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Clears the flag, returning whether an upload is due.
    pub fn take(&mut self) -> bool {
        let due = std::mem::take(&mut self.dirty);
        if due {
            self.uploads += 1;
        }
        due
    }

    pub fn uploads(&self) -> u64 {
        self.uploads
    }
}

pub struct FaceTexture {
    texture: WebGlTexture,
    has_content: bool,
}

impl FaceTexture {
    pub fn new(gl: &Gl) -> Result<Self, DiskError> {
        let texture = gl
            .create_texture()
            .ok_or(DiskError::GlAllocation("texture"))?;
        gl.bind_texture(Gl::TEXTURE_2D, Some(&texture));
        // Video frames are rarely power-of-two: no mipmaps, clamp at edges.
        gl.tex_parameteri(Gl::TEXTURE_2D, Gl::TEXTURE_MIN_FILTER, Gl::LINEAR as i32);
        gl.tex_parameteri(Gl::TEXTURE_2D, Gl::TEXTURE_MAG_FILTER, Gl::LINEAR as i32);
        gl.tex_parameteri(Gl::TEXTURE_2D, Gl::TEXTURE_WRAP_S, Gl::CLAMP_TO_EDGE as i32);
        gl.tex_parameteri(Gl::TEXTURE_2D, Gl::TEXTURE_WRAP_T, Gl::CLAMP_TO_EDGE as i32);
        gl.bind_texture(Gl::TEXTURE_2D, None);
        Ok(Self {
            texture,
            has_content: false,
        })
    }

    pub fn has_content(&self) -> bool {
        self.has_content
    }

    pub fn upload_video(&mut self, gl: &Gl, video: &HtmlVideoElement) -> Result<(), DiskError> {
        gl.bind_texture(Gl::TEXTURE_2D, Some(&self.texture));
        gl.tex_image_2d_with_u32_and_u32_and_html_video_element(
            Gl::TEXTURE_2D,
            0,
            Gl::RGBA as i32,
            Gl::RGBA,
            Gl::UNSIGNED_BYTE,
            video,
        )?;
        self.has_content = true;
        Ok(())
    }

    pub fn upload_image(&mut self, gl: &Gl, image: &HtmlImageElement) -> Result<(), DiskError> {
        gl.bind_texture(Gl::TEXTURE_2D, Some(&self.texture));
        gl.tex_image_2d_with_u32_and_u32_and_html_image_element(
            Gl::TEXTURE_2D,
            0,
            Gl::RGBA as i32,
            Gl::RGBA,
            Gl::UNSIGNED_BYTE,
            image,
        )?;
        self.has_content = true;
        Ok(())
    }

    pub fn bind(&self, gl: &Gl, unit: u32) {
        gl.active_texture(Gl::TEXTURE0 + unit);
        gl.bind_texture(Gl::TEXTURE_2D, Some(&self.texture));
    }

    pub fn dispose(self, gl: &Gl) {
        gl.delete_texture(Some(&self.texture));
    }
}
