use super::shader::ShaderStage;

/// The slice of the current GL context needed to build shader programs.
///
/// Every call must be issued from the thread that owns the context. Handles
/// are the raw GL object names; `0` is never a valid object.
pub trait ShaderDevice {
    fn create_shader(&self, stage: ShaderStage) -> u32;
    fn shader_source(&self, shader: u32, source: &str);
    fn compile_shader(&self, shader: u32);
    fn compile_status(&self, shader: u32) -> bool;
    fn shader_info_log(&self, shader: u32) -> Option<String>;
    fn delete_shader(&self, shader: u32);

    fn create_program(&self) -> u32;
    fn attach_shader(&self, program: u32, shader: u32);
    fn detach_shader(&self, program: u32, shader: u32);
    fn link_program(&self, program: u32);
    fn link_status(&self, program: u32) -> bool;
    fn program_info_log(&self, program: u32) -> Option<String>;
    fn delete_program(&self, program: u32);

    fn use_program(&self, program: u32);
}

/// `ShaderDevice` backed by the globally loaded `gl` function pointers.
///
/// Only valid once `gl::load_with` has run against a current context.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlDevice;

impl GlDevice {
    fn read_info_log(
        len: i32,
        read: impl FnOnce(i32, &mut i32, *mut gl::types::GLchar),
    ) -> Option<String> {
        if len <= 0 {
            return None;
        }

        let mut log = vec![0u8; len as usize];
        let mut written = 0;
        read(log.len() as i32, &mut written, log.as_mut_ptr() as *mut _);
        log.truncate(written.max(0) as usize);

        Some(String::from_utf8_lossy(&log).into_owned())
    }
}

impl ShaderDevice for GlDevice {
    fn create_shader(&self, stage: ShaderStage) -> u32 {
        unsafe { gl::CreateShader(stage.into()) }
    }

    fn shader_source(&self, shader: u32, source: &str) {
        let source_ptr = source.as_ptr() as *const gl::types::GLchar;
        let source_len = source.len() as gl::types::GLint;

        unsafe { gl::ShaderSource(shader, 1, &source_ptr, &source_len) };
    }

    fn compile_shader(&self, shader: u32) {
        unsafe { gl::CompileShader(shader) };
    }

    fn compile_status(&self, shader: u32) -> bool {
        let mut status = 0;
        unsafe { gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut status) };

        status == gl::TRUE as i32
    }

    fn shader_info_log(&self, shader: u32) -> Option<String> {
        let mut log_len = 0;
        unsafe { gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut log_len) };

        Self::read_info_log(log_len, |len, written, buffer| unsafe {
            gl::GetShaderInfoLog(shader, len, written, buffer)
        })
    }

    fn delete_shader(&self, shader: u32) {
        unsafe { gl::DeleteShader(shader) };
    }

    fn create_program(&self) -> u32 {
        unsafe { gl::CreateProgram() }
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        unsafe { gl::AttachShader(program, shader) };
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        unsafe { gl::DetachShader(program, shader) };
    }

    fn link_program(&self, program: u32) {
        unsafe { gl::LinkProgram(program) };
    }

    fn link_status(&self, program: u32) -> bool {
        let mut status = 0;
        unsafe { gl::GetProgramiv(program, gl::LINK_STATUS, &mut status) };

        status == gl::TRUE as i32
    }

    fn program_info_log(&self, program: u32) -> Option<String> {
        let mut log_len = 0;
        unsafe { gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut log_len) };

        Self::read_info_log(log_len, |len, written, buffer| unsafe {
            gl::GetProgramInfoLog(program, len, written, buffer)
        })
    }

    fn delete_program(&self, program: u32) {
        unsafe { gl::DeleteProgram(program) };
    }

    fn use_program(&self, program: u32) {
        unsafe { gl::UseProgram(program) };
    }
}
