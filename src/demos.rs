use crate::{
    config::Demo,
    opengl::{
        shader::{BuildFailure, ShaderProgram, ShaderProgramBuilder, ShaderSource},
        ShaderDevice,
    },
    render::{self, mesh::VertexArrayMesh, ClearMask, Material, PolygonMode},
};

const POSITION_VERTEX_SRC: &str = r#"
    #version 330 core

    layout (location = 0) in vec3 a_pos;

    void main() {
        gl_Position = vec4(a_pos.x, a_pos.y, a_pos.z, 1.0);
    }
"#;

const ORANGE_FRAGMENT_SRC: &str = r#"
    #version 330 core

    out vec4 f_color;

    void main() {
        f_color = vec4(1.0, 0.5, 0.2, 1.0);
    }
"#;

const OLIVE_FRAGMENT_SRC: &str = r#"
    #version 330 core

    out vec4 f_color;

    void main() {
        f_color = vec4(0.5, 0.5, 0.1, 1.0);
    }
"#;

#[rustfmt::skip]
const TRIANGLE_VERTICES: [f32; 9] = [
    -0.5, -0.5, 0.0,
    0.5, -0.5, 0.0,
    0.0, 0.5, 0.0,
];

#[rustfmt::skip]
const RECTANGLE_VERTICES: [f32; 12] = [
    0.5, 0.5, 0.0,   // top right
    0.5, -0.5, 0.0,  // bottom right
    -0.5, -0.5, 0.0, // bottom left
    -0.5, 0.5, 0.0,  // top left
];

const RECTANGLE_INDICES: [u32; 6] = [0, 1, 3, 1, 2, 3];

#[rustfmt::skip]
const TWIN_TRIANGLE_VERTICES: [f32; 15] = [
    -0.5, 0.5, 0.0,  // left top
    -1.0, -0.5, 0.0, // left left
    0.0, -0.5, 0.0,  // shared corner
    0.5, 0.5, 0.0,   // right top
    1.0, -0.5, 0.0,  // right right
];

const LEFT_TRIANGLE_INDICES: [u32; 3] = [0, 1, 2];
const RIGHT_TRIANGLE_INDICES: [u32; 3] = [2, 3, 4];

/// One draw call: a fragment shader over the demo's vertices.
#[derive(Debug, Clone, Copy)]
pub struct DrawPass {
    pub fragment_src: &'static str,
    pub indices: Option<&'static [u32]>,
}

const TRIANGLE_PASSES: [DrawPass; 1] = [DrawPass {
    fragment_src: ORANGE_FRAGMENT_SRC,
    indices: None,
}];

const RECTANGLE_PASSES: [DrawPass; 1] = [DrawPass {
    fragment_src: ORANGE_FRAGMENT_SRC,
    indices: Some(&RECTANGLE_INDICES),
}];

const TWIN_TRIANGLE_PASSES: [DrawPass; 2] = [
    DrawPass {
        fragment_src: OLIVE_FRAGMENT_SRC,
        indices: Some(&LEFT_TRIANGLE_INDICES),
    },
    DrawPass {
        fragment_src: ORANGE_FRAGMENT_SRC,
        indices: Some(&RIGHT_TRIANGLE_INDICES),
    },
];

impl Demo {
    pub fn vertex_src(&self) -> &'static str {
        POSITION_VERTEX_SRC
    }

    pub fn vertices(&self) -> &'static [f32] {
        match self {
            Demo::Triangle => &TRIANGLE_VERTICES,
            Demo::Rectangle => &RECTANGLE_VERTICES,
            Demo::DifferentShaders => &TWIN_TRIANGLE_VERTICES,
        }
    }

    pub fn passes(&self) -> &'static [DrawPass] {
        match self {
            Demo::Triangle => &TRIANGLE_PASSES,
            Demo::Rectangle => &RECTANGLE_PASSES,
            Demo::DifferentShaders => &TWIN_TRIANGLE_PASSES,
        }
    }

    /// Builds one program per pass, every one sharing the demo's vertex shader.
    pub fn build_programs<'d, D: ShaderDevice>(
        &self,
        builder: &ShaderProgramBuilder<'d, D>,
    ) -> Result<Vec<ShaderProgram<'d, D>>, BuildFailure> {
        let fragments: Vec<ShaderSource> = self
            .passes()
            .iter()
            .map(|pass| ShaderSource::fragment(pass.fragment_src))
            .collect();

        builder.build_all(&ShaderSource::vertex(self.vertex_src()), &fragments)
    }
}

/// Everything drawn each frame for one demo.
pub struct Scene<'d, D: ShaderDevice> {
    demo: Demo,
    passes: Vec<(Material<'d, D>, VertexArrayMesh)>,
    polygon_mode: PolygonMode,
}

impl<'d, D: ShaderDevice> Scene<'d, D> {
    /// Requires a current GL context with loaded function pointers.
    pub fn new(
        demo: Demo,
        builder: &ShaderProgramBuilder<'d, D>,
    ) -> Result<Self, BuildFailure> {
        let programs = demo.build_programs(builder)?;

        let passes = programs
            .into_iter()
            .zip(demo.passes())
            .map(|(program, pass)| {
                (
                    Material::new(program),
                    VertexArrayMesh::new(demo.vertices(), pass.indices),
                )
            })
            .collect();

        info!(
            "Built {:?} scene with {} draw pass(es).",
            demo,
            demo.passes().len()
        );

        Ok(Self {
            demo,
            passes,
            polygon_mode: PolygonMode::Fill,
        })
    }

    pub fn demo(&self) -> Demo {
        self.demo
    }

    pub fn set_polygon_mode(&mut self, polygon_mode: PolygonMode) {
        if self.polygon_mode != polygon_mode {
            debug!("Switching polygon mode to {:?}.", polygon_mode);
            polygon_mode.apply();
            self.polygon_mode = polygon_mode;
        }
    }

    pub fn render(&self) {
        render::clear(self.demo.clear_color(), ClearMask::COLOR);

        for (material, mesh) in self.passes.iter() {
            material.bind();
            mesh.draw();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opengl::{shader::fake_device::FakeDevice, OpenGLObject};

    const DEMOS: [Demo; 3] = [Demo::Triangle, Demo::Rectangle, Demo::DifferentShaders];

    #[test]
    fn every_demo_builds_one_program_per_pass() {
        for demo in DEMOS {
            let device = FakeDevice::default();
            let builder = ShaderProgramBuilder::new(&device);
            let programs = demo.build_programs(&builder).unwrap();

            assert_eq!(programs.len(), demo.passes().len());
            assert!(programs.iter().all(|program| device.is_linked(program.handle())));
            assert_eq!(device.live_shaders(), 0);
        }
    }

    #[test]
    fn indices_stay_within_vertex_data() {
        for demo in DEMOS {
            let vertex_count = demo.vertices().len() / render::mesh::POSITION_DIMENSIONS;
            assert_eq!(demo.vertices().len() % render::mesh::POSITION_DIMENSIONS, 0);

            for pass in demo.passes() {
                if let Some(indices) = pass.indices {
                    assert_eq!(indices.len() % 3, 0);
                    assert!(indices.iter().all(|index| (*index as usize) < vertex_count));
                }
            }
        }
    }

    #[test]
    fn different_shaders_demo_uses_distinct_fragments() {
        let passes = Demo::DifferentShaders.passes();

        assert_eq!(passes.len(), 2);
        assert_ne!(passes[0].fragment_src, passes[1].fragment_src);
    }
}
