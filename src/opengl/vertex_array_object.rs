use std::collections::BTreeMap;

use super::OpenGLObject;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexFormat {
    /// `f32` components; `true` normalizes fixed-point input.
    F32(bool),
}

impl VertexFormat {
    fn component_size(&self) -> u32 {
        match self {
            VertexFormat::F32(_) => std::mem::size_of::<f32>() as u32,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct VertexAttribute {
    index: u32,
    dimensions: i32,
    offset: u32,
    binding_index: u32,
    format: VertexFormat,
}

impl VertexAttribute {
    fn stride(&self) -> u32 {
        self.dimensions as u32 * self.format.component_size()
    }

    fn commit_vao_format(&self, vao_handle: u32) {
        unsafe {
            match self.format {
                VertexFormat::F32(normalized) => gl::VertexArrayAttribFormat(
                    vao_handle,
                    self.index,
                    self.dimensions,
                    gl::FLOAT,
                    normalized as u8,
                    self.offset,
                ),
            }
        }
    }
}

struct VertexBufferObjectBinding {
    handle: u32,
    vertex_offset: isize,
}

pub struct VertexArrayObject {
    handle: u32,
    vertex_attribs: Vec<VertexAttribute>,
    vertex_buffer_bindings: BTreeMap<u32, VertexBufferObjectBinding>,
}

impl VertexArrayObject {
    pub fn new() -> Self {
        let mut handle = 0;
        unsafe { gl::CreateVertexArrays(1, &mut handle) };
        debug!("Created vertex array #{}.", handle);

        Self {
            handle,
            vertex_attribs: Vec::new(),
            vertex_buffer_bindings: BTreeMap::new(),
        }
    }

    pub fn allocate_vertex_attribute(
        &mut self,
        index: u32,
        dimensions: i32,
        offset: u32,
        binding_index: u32,
        format: VertexFormat,
    ) {
        self.vertex_attribs.push(VertexAttribute {
            index,
            dimensions,
            offset,
            binding_index,
            format,
        });
    }

    pub fn allocate_vertex_buffer_binding(
        &mut self,
        binding_index: u32,
        buffer: &dyn OpenGLObject,
        vertex_offset: isize,
    ) {
        self.vertex_buffer_bindings.insert(
            binding_index,
            VertexBufferObjectBinding {
                handle: buffer.handle(),
                vertex_offset,
            },
        );
    }

    pub fn commit(&self, element_buffer_object: Option<&dyn OpenGLObject>) {
        let strides = binding_strides(&self.vertex_attribs);

        for vertex_attrib in self.vertex_attribs.iter() {
            unsafe {
                gl::EnableVertexArrayAttrib(self.handle(), vertex_attrib.index);
                vertex_attrib.commit_vao_format(self.handle());
                gl::VertexArrayAttribBinding(
                    self.handle(),
                    vertex_attrib.index,
                    vertex_attrib.binding_index,
                );
            }
        }

        // Commit the VBO bindings.
        for (binding_index, binding) in self.vertex_buffer_bindings.iter() {
            let stride = strides.get(binding_index).copied().unwrap_or(0);

            unsafe {
                gl::VertexArrayVertexBuffer(
                    self.handle(),
                    *binding_index,
                    binding.handle,
                    binding.vertex_offset,
                    stride as i32,
                );
            }
        }

        if let Some(ebo) = element_buffer_object {
            unsafe { gl::VertexArrayElementBuffer(self.handle(), ebo.handle()) };
        }
    }

    pub fn bind(&self) {
        unsafe { gl::BindVertexArray(self.handle()) };
    }
}

/// Total stride of every binding index, summed over its attributes.
fn binding_strides(vertex_attribs: &[VertexAttribute]) -> BTreeMap<u32, u32> {
    let mut strides = BTreeMap::new();

    for vertex_attrib in vertex_attribs {
        *strides.entry(vertex_attrib.binding_index).or_insert(0) += vertex_attrib.stride();
    }

    strides
}

impl OpenGLObject for VertexArrayObject {
    fn handle(&self) -> u32 {
        self.handle
    }
}

impl Drop for VertexArrayObject {
    fn drop(&mut self) {
        unsafe { gl::DeleteVertexArrays(1, &self.handle) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attribute(index: u32, dimensions: i32, binding_index: u32) -> VertexAttribute {
        VertexAttribute {
            index,
            dimensions,
            offset: 0,
            binding_index,
            format: VertexFormat::F32(false),
        }
    }

    #[test]
    fn strides_sum_per_binding() {
        let strides = binding_strides(&[attribute(0, 3, 0), attribute(1, 2, 0), attribute(2, 4, 1)]);

        assert_eq!(strides.get(&0), Some(&20));
        assert_eq!(strides.get(&1), Some(&16));
        assert_eq!(strides.get(&2), None);
    }
}
