//! Thin wrappers around the OpenGL objects the demos are made of.

mod device;
mod vertex_array_object;
pub mod buffer;
pub mod shader;

pub use device::*;
pub use vertex_array_object::*;

pub trait OpenGLObject {
    fn handle(&self) -> u32;
}

/// Drains the GL error queue, logging every pending error code.
///
/// Returns `true` if any error was pending.
pub fn check_errors() -> bool {
    let mut found = false;

    loop {
        let error = unsafe { gl::GetError() };
        if error == gl::NO_ERROR {
            break;
        }

        warn!("OpenGL error: {} ({:#06x})", error_name(error), error);
        found = true;
    }

    found
}

fn error_name(error: u32) -> &'static str {
    match error {
        gl::INVALID_ENUM => "GL_INVALID_ENUM",
        gl::INVALID_VALUE => "GL_INVALID_VALUE",
        gl::INVALID_OPERATION => "GL_INVALID_OPERATION",
        gl::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        gl::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        gl::STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
        gl::STACK_OVERFLOW => "GL_STACK_OVERFLOW",
        _ => "unknown error",
    }
}
