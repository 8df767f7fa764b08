use crate::opengl::{shader::ShaderProgram, ShaderDevice};

/// The program a mesh is drawn with.
pub struct Material<'d, D: ShaderDevice> {
    pub program: ShaderProgram<'d, D>,
}

impl<'d, D: ShaderDevice> Material<'d, D> {
    pub fn new(program: ShaderProgram<'d, D>) -> Self {
        Self { program }
    }

    pub fn bind(&self) {
        self.program.bind();
    }
}
