use crate::opengl::{
    buffer::{Buffer, BufferDraw},
    OpenGLObject, VertexArrayObject, VertexFormat,
};

/// Number of `f32` components per position in mesh vertex data.
pub const POSITION_DIMENSIONS: usize = 3;

/// Triangles from a `vec3` position buffer bound at attribute location 0,
/// optionally indexed through an element buffer.
pub struct VertexArrayMesh {
    vertices: Buffer<f32>,
    indices: Option<Buffer<u32>>,
    vao: VertexArrayObject,
}

impl VertexArrayMesh {
    pub fn new(vertices: &[f32], indices: Option<&[u32]>) -> Self {
        let vertices = Buffer::new_data(vertices, BufferDraw::Static);
        let indices = indices.map(|indices| Buffer::new_data(indices, BufferDraw::Static));

        let mut vao = VertexArrayObject::new();
        vao.allocate_vertex_attribute(
            0,
            POSITION_DIMENSIONS as i32,
            0,
            0,
            VertexFormat::F32(false),
        );
        vao.allocate_vertex_buffer_binding(0, &vertices, 0);
        vao.commit(indices.as_ref().map(|ebo| ebo as &dyn OpenGLObject));

        Self {
            vertices,
            indices,
            vao,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.data_len() / POSITION_DIMENSIONS
    }

    pub fn draw(&self) {
        self.vao.bind();

        unsafe {
            match &self.indices {
                Some(indices) => gl::DrawElements(
                    gl::TRIANGLES,
                    indices.data_len() as i32,
                    gl::UNSIGNED_INT,
                    std::ptr::null(),
                ),
                None => gl::DrawArrays(gl::TRIANGLES, 0, self.vertex_count() as i32),
            }
        }
    }
}
