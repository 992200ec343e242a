use glow::HasContext;

use crate::gl::{
    error::{ShaderError, ShaderStage},
    math::Mat4,
};

/// A linked vertex + fragment program.
#[derive(Debug)]
pub struct Shader<G: HasContext> {
    program: G::Program,
}

impl<G: HasContext> Shader<G> {
    /// Compile both stages and link them. Failures are logged with the driver info log and
    /// returned; intermediate GL objects are always deleted.
    pub fn compile(gl: &G, vertex_src: &str, fragment_src: &str) -> Result<Self, ShaderError> {
        let vertex = compile_stage(gl, ShaderStage::Vertex, vertex_src)?;
        let fragment = match compile_stage(gl, ShaderStage::Fragment, fragment_src) {
            Ok(s) => s,
            Err(e) => {
                unsafe { gl.delete_shader(vertex) };
                return Err(e);
            }
        };

        let linked = unsafe { link(gl, vertex, fragment) };
        unsafe {
            gl.delete_shader(vertex);
            gl.delete_shader(fragment);
        }
        Ok(Self { program: linked? })
    }

    pub fn program(&self) -> G::Program {
        self.program
    }

    pub fn use_program(&self, gl: &G) {
        unsafe { gl.use_program(Some(self.program)) };
    }

    /// Upload a 4×4 matrix uniform; with `use_first` the program is bound beforehand.
    pub fn set_matrix4(&self, gl: &G, name: &str, value: &Mat4, use_first: bool) {
        if use_first {
            self.use_program(gl);
        }
        unsafe {
            let loc = gl.get_uniform_location(self.program, name);
            gl.uniform_matrix_4_f32_slice(loc.as_ref(), false, value);
        }
    }

    pub fn set_vec3(&self, gl: &G, name: &str, value: [f32; 3], use_first: bool) {
        if use_first {
            self.use_program(gl);
        }
        unsafe {
            let loc = gl.get_uniform_location(self.program, name);
            gl.uniform_3_f32(loc.as_ref(), value[0], value[1], value[2]);
        }
    }

    pub fn set_i32(&self, gl: &G, name: &str, value: i32, use_first: bool) {
        if use_first {
            self.use_program(gl);
        }
        unsafe {
            let loc = gl.get_uniform_location(self.program, name);
            gl.uniform_1_i32(loc.as_ref(), value);
        }
    }

    pub fn delete(self, gl: &G) {
        unsafe { gl.delete_program(self.program) };
    }
}

fn compile_stage<G: HasContext>(
    gl: &G,
    stage: ShaderStage,
    src: &str,
) -> Result<G::Shader, ShaderError> {
    let kind = match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    };
    unsafe {
        let shader = gl
            .create_shader(kind)
            .map_err(|reason| ShaderError::Create { stage, reason })?;
        gl.shader_source(shader, src);
        gl.compile_shader(shader);
        if gl.get_shader_compile_status(shader) {
            return Ok(shader);
        }
        let log = gl.get_shader_info_log(shader);
        gl.delete_shader(shader);
        tracing::error!(%stage, %log, "shader compilation failed");
        Err(ShaderError::Compile { stage, log })
    }
}

unsafe fn link<G: HasContext>(
    gl: &G,
    vertex: G::Shader,
    fragment: G::Shader,
) -> Result<G::Program, ShaderError> {
    unsafe {
        let program = gl
            .create_program()
            .map_err(|reason| ShaderError::Allocate {
                what: "program",
                reason,
            })?;
        gl.attach_shader(program, vertex);
        gl.attach_shader(program, fragment);
        gl.link_program(program);
        gl.detach_shader(program, vertex);
        gl.detach_shader(program, fragment);
        if gl.get_program_link_status(program) {
            return Ok(program);
        }
        let log = gl.get_program_info_log(program);
        gl.delete_program(program);
        tracing::error!(%log, "shader program link failed");
        Err(ShaderError::Link { log })
    }
}
