// Shader/program helpers over WebGL2.
use web_sys::{WebGl2RenderingContext as Gl, WebGlProgram, WebGlShader, WebGlUniformLocation};

use crate::error::DiskError;

pub fn compile_shader(gl: &Gl, kind: u32, source: &str) -> Result<WebGlShader, DiskError> {
    let shader = gl
        .create_shader(kind)
        .ok_or(DiskError::GlAllocation("shader"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);
    let ok = gl
        .get_shader_parameter(&shader, Gl::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false);
    if ok {
        Ok(shader)
    } else {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(DiskError::ShaderCompile(log))
    }
}

pub fn link_program(gl: &Gl, vertex: &str, fragment: &str) -> Result<WebGlProgram, DiskError> {
    let vs = compile_shader(gl, Gl::VERTEX_SHADER, vertex)?;
    let fs = match compile_shader(gl, Gl::FRAGMENT_SHADER, fragment) {
        Ok(fs) => fs,
        Err(e) => {
            gl.delete_shader(Some(&vs));
            return Err(e);
        }
    };
    let linked = gl
        .create_program()
        .ok_or(DiskError::GlAllocation("program"))
        .and_then(|program| {
            gl.attach_shader(&program, &vs);
            gl.attach_shader(&program, &fs);
            gl.link_program(&program);
            check_link(gl, program)
        });
    // Shaders are no longer needed once linked, failed, or never attached.
    gl.delete_shader(Some(&vs));
    gl.delete_shader(Some(&fs));
    linked
}

fn check_link(gl: &Gl, program: WebGlProgram) -> Result<WebGlProgram, DiskError> {
    let ok = gl
        .get_program_parameter(&program, Gl::LINK_STATUS)
        .as_bool()
        .unwrap_or(false);
    if ok {
        Ok(program)
    } else {
        let log = gl.get_program_info_log(&program).unwrap_or_default();
        gl.delete_program(Some(&program));
        Err(DiskError::ProgramLink(log))
    }
}

/// Uniforms the compiler strips show up as `None`; treat them as optional.
pub fn uniform(gl: &Gl, program: &WebGlProgram, name: &str) -> Option<WebGlUniformLocation> {
    let loc = gl.get_uniform_location(program, name);
    if loc.is_none() {
        log::debug!("uniform {name} not active");
    }
    loc
}
