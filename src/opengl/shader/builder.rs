use super::{BuildFailure, ShaderError, ShaderProgram, ShaderSource, ShaderStage};
use crate::opengl::ShaderDevice;

/// Upper bound, in bytes, on any compile or link log carried by a diagnostic.
pub const INFO_LOG_LIMIT: usize = 512;

/// A compiled shader object. Deleted from the device when dropped, so every
/// exit path of a build releases it.
struct CompiledUnit<'d, D: ShaderDevice> {
    device: &'d D,
    handle: u32,
    stage: ShaderStage,
}

impl<'d, D: ShaderDevice> Drop for CompiledUnit<'d, D> {
    fn drop(&mut self) {
        self.device.delete_shader(self.handle);
    }
}

/// Compiles and links vertex + fragment pairs into programs on one device.
pub struct ShaderProgramBuilder<'d, D: ShaderDevice> {
    device: &'d D,
    log_limit: usize,
}

impl<'d, D: ShaderDevice> ShaderProgramBuilder<'d, D> {
    pub fn new(device: &'d D) -> Self {
        Self {
            device,
            log_limit: INFO_LOG_LIMIT,
        }
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn with_log_limit(mut self, log_limit: usize) -> Self {
        self.log_limit = log_limit;
        self
    }

    pub fn build(
        &self,
        vertex_src: &str,
        fragment_src: &str,
    ) -> Result<ShaderProgram<'d, D>, BuildFailure> {
        // Both stages are compiled before checking either, so a build that is
        // broken in both reports both.
        let vertex = self.compile(ShaderStage::Vertex, vertex_src);
        let fragment = self.compile(ShaderStage::Fragment, fragment_src);

        let (vertex, fragment) = match (vertex, fragment) {
            (Ok(vertex), Ok(fragment)) => (vertex, fragment),
            (vertex, fragment) => {
                let diagnostics: Vec<ShaderError> = vertex
                    .err()
                    .into_iter()
                    .chain(fragment.err())
                    .collect();
                diagnostics.iter().for_each(|error| debug!("{}", error));

                return Err(BuildFailure::from(diagnostics));
            }
        };

        self.link(&vertex, &fragment).map_err(|error| {
            debug!("{}", error);
            BuildFailure::from(error)
        })
    }

    pub fn build_source(
        &self,
        vertex: &ShaderSource,
        fragment: &ShaderSource,
    ) -> Result<ShaderProgram<'d, D>, BuildFailure> {
        let stages = [
            (ShaderStage::Vertex, vertex),
            (ShaderStage::Fragment, fragment),
        ];
        let mismatches: Vec<ShaderError> = stages
            .iter()
            .filter(|(expected, source)| source.stage() != *expected)
            .map(|(expected, source)| ShaderError::StageMismatch {
                expected: *expected,
                found: source.stage(),
            })
            .collect();

        if !mismatches.is_empty() {
            return Err(BuildFailure::from(mismatches));
        }

        self.build(vertex.text(), fragment.text())
    }

    /// Builds one program per fragment source, each paired with `vertex`.
    ///
    /// On failure every program already built by this call is released and
    /// the failure of the first broken pair is returned.
    pub fn build_all(
        &self,
        vertex: &ShaderSource,
        fragments: &[ShaderSource],
    ) -> Result<Vec<ShaderProgram<'d, D>>, BuildFailure> {
        fragments
            .iter()
            .map(|fragment| self.build_source(vertex, fragment))
            .collect()
    }

    fn compile(
        &self,
        stage: ShaderStage,
        source: &str,
    ) -> Result<CompiledUnit<'d, D>, ShaderError> {
        let handle = self.device.create_shader(stage);
        if handle == 0 {
            return Err(ShaderError::Allocation { object: "shader" });
        }

        // Owned from here on, so the early return below still releases it.
        let unit = CompiledUnit {
            device: self.device,
            handle,
            stage,
        };

        self.device.shader_source(unit.handle, source);
        self.device.compile_shader(unit.handle);

        if !self.device.compile_status(unit.handle) {
            let log = self.device.shader_info_log(unit.handle);
            return Err(ShaderError::Compile {
                stage,
                log: self.bounded_log(log),
            });
        }

        debug!("Compiled {} shader #{}.", unit.stage, unit.handle);
        Ok(unit)
    }

    fn link(
        &self,
        vertex: &CompiledUnit<'d, D>,
        fragment: &CompiledUnit<'d, D>,
    ) -> Result<ShaderProgram<'d, D>, ShaderError> {
        let handle = self.device.create_program();
        if handle == 0 {
            return Err(ShaderError::Allocation { object: "program" });
        }

        let program = ShaderProgram {
            device: self.device,
            handle,
        };

        self.device.attach_shader(program.handle, vertex.handle);
        self.device.attach_shader(program.handle, fragment.handle);
        self.device.link_program(program.handle);
        let linked = self.device.link_status(program.handle);

        self.device.detach_shader(program.handle, vertex.handle);
        self.device.detach_shader(program.handle, fragment.handle);

        if !linked {
            let log = self.device.program_info_log(program.handle);
            return Err(ShaderError::Link {
                log: self.bounded_log(log),
            });
        }

        debug!(
            "Linked shader program #{} from {} shader #{} and {} shader #{}.",
            program.handle, vertex.stage, vertex.handle, fragment.stage, fragment.handle
        );
        Ok(program)
    }

    fn bounded_log(&self, log: Option<String>) -> String {
        truncate_log(log.as_deref().unwrap_or_default(), self.log_limit)
    }
}

/// Trims trailing NULs and whitespace, then cuts `log` to at most `limit`
/// bytes on a character boundary.
pub fn truncate_log(log: &str, limit: usize) -> String {
    let log = log.trim_end_matches(|c: char| c == '\0' || c.is_whitespace());

    if log.len() <= limit {
        return log.to_owned();
    }

    let mut end = limit;
    while !log.is_char_boundary(end) {
        end -= 1;
    }

    log[..end].to_owned()
}
