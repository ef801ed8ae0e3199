//! WebGL2 renderer for the disk: one interleaved mesh, one program, three
//! draw calls (rim, video face, image face).

use glam::{Mat4, Vec3};
use js_sys::{Float32Array, Uint16Array};
use wasm_bindgen::JsCast;
use web_sys::{
    HtmlCanvasElement, HtmlImageElement, HtmlVideoElement, WebGl2RenderingContext as Gl,
    WebGlBuffer, WebGlProgram, WebGlUniformLocation, WebGlVertexArrayObject,
};

use super::color::ColorAdjust;
use super::gl::{link_program, uniform};
use super::mesh::{DiskMesh, FLOATS_PER_VERTEX, Submesh, cylinder};
use super::texture::{FaceTexture, RefreshFlag};
use crate::error::DiskError;
use crate::model::{
    BACKGROUND, DISK_HEIGHT, DISK_RADIUS, DISK_SEGMENTS, DiskPose, RIM_COLOR, UNTEXTURED_COLOR,
};
use crate::state::Camera;

const VERTEX_SHADER: &str = r"#version 300 es
layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_normal;
layout(location = 2) in vec2 a_uv;

uniform mat4 u_model;
uniform mat4 u_view_proj;

out vec3 v_normal;
out vec2 v_uv;

void main() {
    v_normal = mat3(u_model) * a_normal;
    v_uv = a_uv;
    gl_Position = u_view_proj * u_model * vec4(a_position, 1.0);
}
";

const FRAGMENT_MAIN: &str = r"
in vec3 v_normal;
in vec2 v_uv;

uniform sampler2D u_texture;
uniform bool u_textured;
uniform bool u_adjust;
uniform vec3 u_color;
uniform vec3 u_light_dir;

out vec4 frag_color;

void main() {
    if (u_textured) {
        vec3 texel = texture(u_texture, v_uv).rgb;
        frag_color = vec4(u_adjust ? color_adjust(texel) : texel, 1.0);
    } else {
        float lambert = max(dot(normalize(v_normal), u_light_dir), 0.0);
        frag_color = vec4(u_color * (0.35 + 0.65 * lambert), 1.0);
    }
}
";

/// Vertex attribute locations, matching the `layout` qualifiers above.
const ATTR_POSITION: u32 = 0;
const ATTR_NORMAL: u32 = 1;
const ATTR_UV: u32 = 2;

pub fn fragment_shader(color: &ColorAdjust) -> String {
    format!(
        "#version 300 es\nprecision highp float;\n{}{}",
        color.glsl(),
        FRAGMENT_MAIN
    )
}

struct Uniforms {
    model: Option<WebGlUniformLocation>,
    view_proj: Option<WebGlUniformLocation>,
    texture: Option<WebGlUniformLocation>,
    textured: Option<WebGlUniformLocation>,
    adjust: Option<WebGlUniformLocation>,
    color: Option<WebGlUniformLocation>,
    light_dir: Option<WebGlUniformLocation>,
}

enum Face<'a> {
    Flat([f32; 3]),
    Textured { texture: &'a FaceTexture, adjust: bool },
}

pub struct DiskRenderer {
    gl: Gl,
    program: WebGlProgram,
    vao: WebGlVertexArrayObject,
    vertex_buffer: WebGlBuffer,
    index_buffer: WebGlBuffer,
    uniforms: Uniforms,
    side: Submesh,
    top: Submesh,
    bottom: Submesh,
    video: FaceTexture,
    video_refresh: RefreshFlag,
    video_upload_failed: bool,
    image: FaceTexture,
}

impl DiskRenderer {
    pub fn new(canvas: &HtmlCanvasElement, color: &ColorAdjust) -> Result<Self, DiskError> {
        let gl: Gl = canvas
            .get_context("webgl2")?
            .ok_or(DiskError::NoWebGl2)?
            .dyn_into()
            .map_err(|_| DiskError::NoWebGl2)?;

        let program = link_program(&gl, VERTEX_SHADER, &fragment_shader(color))?;
        let uniforms = Uniforms {
            model: uniform(&gl, &program, "u_model"),
            view_proj: uniform(&gl, &program, "u_view_proj"),
            texture: uniform(&gl, &program, "u_texture"),
            textured: uniform(&gl, &program, "u_textured"),
            adjust: uniform(&gl, &program, "u_adjust"),
            color: uniform(&gl, &program, "u_color"),
            light_dir: uniform(&gl, &program, "u_light_dir"),
        };

        let mesh = cylinder(DISK_RADIUS, DISK_HEIGHT, DISK_SEGMENTS);
        let (vao, vertex_buffer, index_buffer) = upload_mesh(&gl, &mesh)?;
        let video = FaceTexture::new(&gl)?;
        let image = FaceTexture::new(&gl)?;
        log::info!(
            "disk renderer ready: {} vertices, {} indices",
            mesh.vertex_count(),
            mesh.indices.len()
        );

        Ok(Self {
            gl,
            program,
            vao,
            vertex_buffer,
            index_buffer,
            uniforms,
            side: mesh.side,
            top: mesh.top,
            bottom: mesh.bottom,
            video,
            video_refresh: RefreshFlag::default(),
            video_upload_failed: false,
            image,
        })
    }

    /// Requests a re-upload of the current video frame before the next draw.
    pub fn mark_video_dirty(&mut self) {
        self.video_refresh.mark_dirty();
    }

    pub fn set_image(&mut self, image: &HtmlImageElement) {
        if let Err(e) = self.image.upload_image(&self.gl, image) {
            log::warn!("underside texture upload failed: {e}");
        }
    }

    pub fn draw(&mut self, pose: &DiskPose, camera: &Camera, video: &HtmlVideoElement) {
        if self.video_refresh.take() {
            match self.video.upload_video(&self.gl, video) {
                Ok(()) => self.video_upload_failed = false,
                Err(e) => {
                    if !self.video_upload_failed {
                        log::warn!("video texture upload failed: {e}");
                    }
                    self.video_upload_failed = true;
                }
            }
        }

        let gl = &self.gl;
        gl.viewport(0, 0, gl.drawing_buffer_width(), gl.drawing_buffer_height());
        let [r, g, b, a] = BACKGROUND;
        gl.clear_color(r, g, b, a);
        gl.clear(Gl::COLOR_BUFFER_BIT | Gl::DEPTH_BUFFER_BIT);
        gl.enable(Gl::DEPTH_TEST);

        gl.use_program(Some(&self.program));
        gl.bind_vertex_array(Some(&self.vao));

        let model = Mat4::from_scale_rotation_translation(
            Vec3::splat(pose.scale),
            pose.orientation,
            Vec3::ZERO,
        );
        gl.uniform_matrix4fv_with_f32_array(
            self.uniforms.model.as_ref(),
            false,
            &model.to_cols_array(),
        );
        gl.uniform_matrix4fv_with_f32_array(
            self.uniforms.view_proj.as_ref(),
            false,
            &camera.view_projection().to_cols_array(),
        );
        let light = Vec3::new(0.4, 0.7, 1.0).normalize();
        gl.uniform3f(self.uniforms.light_dir.as_ref(), light.x, light.y, light.z);
        gl.uniform1i(self.uniforms.texture.as_ref(), 0);

        self.draw_face(self.side, Face::Flat(RIM_COLOR));
        self.draw_face(self.top, self.face_for(&self.video, true));
        self.draw_face(self.bottom, self.face_for(&self.image, false));

        gl.bind_vertex_array(None);
    }

    fn face_for<'a>(&self, texture: &'a FaceTexture, adjust: bool) -> Face<'a> {
        if texture.has_content() {
            Face::Textured { texture, adjust }
        } else {
            Face::Flat(UNTEXTURED_COLOR)
        }
    }

    fn draw_face(&self, range: Submesh, face: Face<'_>) {
        let gl = &self.gl;
        match face {
            Face::Flat([r, g, b]) => {
                gl.uniform1i(self.uniforms.textured.as_ref(), 0);
                gl.uniform1i(self.uniforms.adjust.as_ref(), 0);
                gl.uniform3f(self.uniforms.color.as_ref(), r, g, b);
            }
            Face::Textured { texture, adjust } => {
                texture.bind(gl, 0);
                gl.uniform1i(self.uniforms.textured.as_ref(), 1);
                gl.uniform1i(self.uniforms.adjust.as_ref(), i32::from(adjust));
            }
        }
        gl.draw_elements_with_i32(
            Gl::TRIANGLES,
            range.count as i32,
            Gl::UNSIGNED_SHORT,
            (range.first * std::mem::size_of::<u16>()) as i32,
        );
    }

    pub fn video_uploads(&self) -> u64 {
        self.video_refresh.uploads()
    }

    pub fn dispose(self) {
        let gl = &self.gl;
        self.video.dispose(gl);
        self.image.dispose(gl);
        gl.delete_buffer(Some(&self.vertex_buffer));
        gl.delete_buffer(Some(&self.index_buffer));
        gl.delete_vertex_array(Some(&self.vao));
        gl.delete_program(Some(&self.program));
    }
}

fn upload_mesh(
    gl: &Gl,
    mesh: &DiskMesh,
) -> Result<(WebGlVertexArrayObject, WebGlBuffer, WebGlBuffer), DiskError> {
    let vao = gl
        .create_vertex_array()
        .ok_or(DiskError::GlAllocation("vertex array"))?;
    let vertex_buffer = gl
        .create_buffer()
        .ok_or(DiskError::GlAllocation("vertex buffer"))?;
    let index_buffer = gl
        .create_buffer()
        .ok_or(DiskError::GlAllocation("index buffer"))?;

    gl.bind_vertex_array(Some(&vao));

    gl.bind_buffer(Gl::ARRAY_BUFFER, Some(&vertex_buffer));
    let vertices = Float32Array::from(mesh.vertices.as_slice());
    gl.buffer_data_with_array_buffer_view(Gl::ARRAY_BUFFER, &vertices, Gl::STATIC_DRAW);

    gl.bind_buffer(Gl::ELEMENT_ARRAY_BUFFER, Some(&index_buffer));
    let indices = Uint16Array::from(mesh.indices.as_slice());
    gl.buffer_data_with_array_buffer_view(Gl::ELEMENT_ARRAY_BUFFER, &indices, Gl::STATIC_DRAW);

    let float = std::mem::size_of::<f32>() as i32;
    let stride = FLOATS_PER_VERTEX as i32 * float;
    for (location, size, offset) in [(ATTR_POSITION, 3, 0), (ATTR_NORMAL, 3, 3), (ATTR_UV, 2, 6)] {
        gl.enable_vertex_attrib_array(location);
        gl.vertex_attrib_pointer_with_i32(location, size, Gl::FLOAT, false, stride, offset * float);
    }

    gl.bind_vertex_array(None);
    Ok((vao, vertex_buffer, index_buffer))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_shader_injects_colour_adjust() {
        let src = fragment_shader(&ColorAdjust::IDENTITY);
        assert!(src.starts_with("#version 300 es\n"));
        let defined = src.find("vec3 color_adjust(vec3 rgb)");
        let called = src.find("color_adjust(texel)");
        assert!(matches!((defined, called), (Some(d), Some(c)) if d < c));
    }
}
