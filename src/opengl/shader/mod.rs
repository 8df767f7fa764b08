mod builder;
#[cfg(test)]
pub(crate) mod fake_device;

pub use builder::*;

use crate::opengl::{OpenGLObject, ShaderDevice};
use num_enum::{IntoPrimitive, TryFromPrimitive};

#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
pub enum ShaderStage {
    Vertex = 35633,
    Fragment = 35632,
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// GLSL text tagged with the stage it is written for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    stage: ShaderStage,
    text: String,
}

impl ShaderSource {
    pub fn new(stage: ShaderStage, text: impl Into<String>) -> Self {
        Self {
            stage,
            text: text.into(),
        }
    }

    pub fn vertex(text: impl Into<String>) -> Self {
        Self::new(ShaderStage::Vertex, text)
    }

    pub fn fragment(text: impl Into<String>) -> Self {
        Self::new(ShaderStage::Fragment, text)
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A single diagnostic produced while building a shader program.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ShaderError {
    #[error("failed to compile {stage} shader:\n{log}")]
    Compile { stage: ShaderStage, log: String },

    #[error("failed to link shader program:\n{log}")]
    Link { log: String },

    #[error("OpenGL returned no handle for a new {object} object")]
    Allocation { object: &'static str },

    #[error("expected {expected} shader source, found {found} shader source")]
    StageMismatch {
        expected: ShaderStage,
        found: ShaderStage,
    },
}

impl ShaderError {
    /// The stage this diagnostic belongs to, or `None` for program-level errors.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn stage(&self) -> Option<ShaderStage> {
        match self {
            ShaderError::Compile { stage, .. } => Some(*stage),
            ShaderError::StageMismatch { expected, .. } => Some(*expected),
            ShaderError::Link { .. } | ShaderError::Allocation { .. } => None,
        }
    }
}

/// Every diagnostic of one failed build, vertex stage first, link last.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("shader program build failed with {} diagnostic(s)", .diagnostics.len())]
pub struct BuildFailure {
    diagnostics: Vec<ShaderError>,
}

impl BuildFailure {
    pub fn diagnostics(&self) -> &[ShaderError] {
        &self.diagnostics
    }
}

impl From<ShaderError> for BuildFailure {
    fn from(error: ShaderError) -> Self {
        Self {
            diagnostics: vec![error],
        }
    }
}

impl From<Vec<ShaderError>> for BuildFailure {
    fn from(diagnostics: Vec<ShaderError>) -> Self {
        Self { diagnostics }
    }
}

/// A linked vertex + fragment program. Deleted from the device on drop.
pub struct ShaderProgram<'d, D: ShaderDevice> {
    device: &'d D,
    handle: u32,
}

impl<'d, D: ShaderDevice> ShaderProgram<'d, D> {
    pub fn bind(&self) {
        self.device.use_program(self.handle);
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn destroy(self) {
        drop(self);
    }
}

impl<'d, D: ShaderDevice> OpenGLObject for ShaderProgram<'d, D> {
    fn handle(&self) -> u32 {
        self.handle
    }
}

impl<'d, D: ShaderDevice> std::fmt::Debug for ShaderProgram<'d, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShaderProgram")
            .field("handle", &self.handle)
            .finish()
    }
}

impl<'d, D: ShaderDevice> Drop for ShaderProgram<'d, D> {
    fn drop(&mut self) {
        debug!("Deleting shader program #{}.", self.handle);
        self.device.delete_program(self.handle);
    }
}
