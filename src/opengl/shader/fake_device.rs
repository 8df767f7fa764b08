use crate::opengl::{shader::ShaderStage, ShaderDevice};
use std::{cell::RefCell, collections::HashMap};

pub const VALID_VERTEX: &str = r#"
    #version 330 core
    layout (location = 0) in vec3 a_pos;

    void main() {
        gl_Position = vec4(a_pos, 1.0);
    }
"#;

pub const VALID_FRAGMENT: &str = r#"
    #version 330 core
    out vec4 f_color;

    void main() {
        f_color = vec4(1.0, 0.5, 0.2, 1.0);
    }
"#;

pub const BROKEN_SOURCE: &str = "#version 330 core\nvoid main() { gl_Position = vec4(0.0 }";

struct FakeShader {
    stage: ShaderStage,
    source: String,
    compiled: bool,
}

#[derive(Default)]
struct FakeProgram {
    attached: Vec<u32>,
    linked: bool,
    log: Option<String>,
}

#[derive(Default)]
struct State {
    next_handle: u32,
    shaders: HashMap<u32, FakeShader>,
    programs: HashMap<u32, FakeProgram>,
    bound_program: Option<u32>,
    compile_calls: usize,
    link_calls: usize,
    fail_next_shader: bool,
    fail_next_program: bool,
    log_padding: usize,
}

/// In-memory `ShaderDevice` that accepts GLSL by a few shape rules and
/// counts every live object it hands out.
#[derive(Default)]
pub struct FakeDevice {
    state: RefCell<State>,
}

impl FakeDevice {
    pub fn live_shaders(&self) -> usize {
        self.state.borrow().shaders.len()
    }

    pub fn live_programs(&self) -> usize {
        self.state.borrow().programs.len()
    }

    pub fn compile_calls(&self) -> usize {
        self.state.borrow().compile_calls
    }

    pub fn link_calls(&self) -> usize {
        self.state.borrow().link_calls
    }

    pub fn bound_program(&self) -> Option<u32> {
        self.state.borrow().bound_program
    }

    pub fn is_linked(&self, program: u32) -> bool {
        self.state
            .borrow()
            .programs
            .get(&program)
            .map_or(false, |program| program.linked)
    }

    pub fn fail_next_shader(&self) {
        self.state.borrow_mut().fail_next_shader = true;
    }

    pub fn fail_next_program(&self) {
        self.state.borrow_mut().fail_next_program = true;
    }

    /// Appends `padding` bytes of filler to every log, to exercise truncation.
    pub fn set_log_padding(&self, padding: usize) {
        self.state.borrow_mut().log_padding = padding;
    }

    fn padded(state: &State, log: &str) -> String {
        format!("{}{}", log, "x".repeat(state.log_padding))
    }

    fn is_well_formed(source: &str) -> bool {
        let mut depth = 0i32;
        for c in source.chars() {
            match c {
                '{' | '(' => depth += 1,
                '}' | ')' => depth -= 1,
                _ => {}
            }

            if depth < 0 {
                return false;
            }
        }

        depth == 0 && source.contains("void main")
    }
}

impl ShaderDevice for FakeDevice {
    fn create_shader(&self, stage: ShaderStage) -> u32 {
        let mut state = self.state.borrow_mut();
        if state.fail_next_shader {
            state.fail_next_shader = false;
            return 0;
        }

        state.next_handle += 1;
        let handle = state.next_handle;
        state.shaders.insert(
            handle,
            FakeShader {
                stage,
                source: String::new(),
                compiled: false,
            },
        );

        handle
    }

    fn shader_source(&self, shader: u32, source: &str) {
        if let Some(shader) = self.state.borrow_mut().shaders.get_mut(&shader) {
            shader.source = source.to_owned();
        }
    }

    fn compile_shader(&self, shader: u32) {
        let mut state = self.state.borrow_mut();
        state.compile_calls += 1;
        if let Some(shader) = state.shaders.get_mut(&shader) {
            shader.compiled = Self::is_well_formed(&shader.source);
        }
    }

    fn compile_status(&self, shader: u32) -> bool {
        self.state
            .borrow()
            .shaders
            .get(&shader)
            .map_or(false, |shader| shader.compiled)
    }

    fn shader_info_log(&self, shader: u32) -> Option<String> {
        let state = self.state.borrow();
        match state.shaders.get(&shader) {
            Some(shader) if !shader.compiled => {
                Some(Self::padded(&state, "ERROR: 0:1: syntax error\n\0"))
            }
            _ => None,
        }
    }

    fn delete_shader(&self, shader: u32) {
        let mut state = self.state.borrow_mut();
        let attached = state
            .programs
            .values()
            .any(|program| program.attached.contains(&shader));
        assert!(!attached, "shader #{} deleted while still attached", shader);
        assert!(
            state.shaders.remove(&shader).is_some(),
            "shader #{} deleted twice",
            shader
        );
    }

    fn create_program(&self) -> u32 {
        let mut state = self.state.borrow_mut();
        if state.fail_next_program {
            state.fail_next_program = false;
            return 0;
        }

        state.next_handle += 1;
        let handle = state.next_handle;
        state.programs.insert(handle, FakeProgram::default());

        handle
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        if let Some(program) = self.state.borrow_mut().programs.get_mut(&program) {
            program.attached.push(shader);
        }
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        if let Some(program) = self.state.borrow_mut().programs.get_mut(&program) {
            program.attached.retain(|attached| *attached != shader);
        }
    }

    fn link_program(&self, program: u32) {
        let mut state = self.state.borrow_mut();
        state.link_calls += 1;

        let attached = match state.programs.get(&program) {
            Some(program) => program.attached.clone(),
            None => return,
        };
        let stages: Vec<_> = attached
            .iter()
            .filter_map(|handle| state.shaders.get(handle))
            .filter(|shader| shader.compiled)
            .map(|shader| (shader.stage, shader.source.contains("out vec4")))
            .collect();

        let has_vertex = stages.iter().any(|(stage, _)| *stage == ShaderStage::Vertex);
        let fragment_output = stages
            .iter()
            .any(|(stage, writes)| *stage == ShaderStage::Fragment && *writes);

        let log = if !has_vertex {
            Some("ERROR: no vertex shader attached".to_owned())
        } else if !fragment_output {
            Some("ERROR: fragment shader does not write an output".to_owned())
        } else {
            None
        };
        let log = log.map(|log| Self::padded(&state, &log));

        if let Some(program) = state.programs.get_mut(&program) {
            program.linked = log.is_none();
            program.log = log;
        }
    }

    fn link_status(&self, program: u32) -> bool {
        self.is_linked(program)
    }

    fn program_info_log(&self, program: u32) -> Option<String> {
        self.state
            .borrow()
            .programs
            .get(&program)
            .and_then(|program| program.log.clone())
    }

    fn delete_program(&self, program: u32) {
        let mut state = self.state.borrow_mut();
        assert!(
            state.programs.remove(&program).is_some(),
            "program #{} deleted twice",
            program
        );
        if state.bound_program == Some(program) {
            state.bound_program = None;
        }
    }

    fn use_program(&self, program: u32) {
        let mut state = self.state.borrow_mut();
        assert!(state.programs.get(&program).map_or(false, |p| p.linked));
        state.bound_program = Some(program);
    }
}
