use glam::Vec4;
use log::LevelFilter;
use std::str::FromStr;

pub const WIDTH: u32 = 800;
pub const HEIGHT: u32 = 600;

/// Environment variable holding the max log level.
pub const LOG_LEVEL_VAR: &str = "GL_TUTORIALS_LOG";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown demo `{0}`, expected one of: triangle, rectangle, shaders")]
    UnknownDemo(String),

    #[error("invalid log level `{0}`, expected one of: off, error, warn, info, debug, trace")]
    InvalidLogLevel(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Demo {
    Triangle,
    Rectangle,
    DifferentShaders,
}

impl Demo {
    pub fn title(&self) -> &'static str {
        match self {
            Demo::Triangle => "Triangle",
            Demo::Rectangle => "Element Buffer Object Rectangle",
            Demo::DifferentShaders => "Different Shaders Test",
        }
    }

    pub fn clear_color(&self) -> Vec4 {
        match self {
            Demo::Triangle | Demo::Rectangle => Vec4::new(0.2, 0.3, 0.3, 1.0),
            Demo::DifferentShaders => Vec4::ONE,
        }
    }

    /// Picks the demo named by the first argument after the program name.
    pub fn from_args(mut args: impl Iterator<Item = String>) -> Result<Self, ConfigError> {
        args.nth(1)
            .as_deref()
            .map_or(Ok(Demo::Triangle), Demo::from_str)
    }
}

impl FromStr for Demo {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "triangle" => Ok(Demo::Triangle),
            "rectangle" | "ebo" => Ok(Demo::Rectangle),
            "shaders" | "different-shaders" => Ok(Demo::DifferentShaders),
            _ => Err(ConfigError::UnknownDemo(s.to_owned())),
        }
    }
}

/// Parses the value of `LOG_LEVEL_VAR`, defaulting when it is unset.
pub fn log_level(value: Option<&str>) -> Result<LevelFilter, ConfigError> {
    match value {
        Some(value) => LevelFilter::from_str(value.trim())
            .map_err(|_| ConfigError::InvalidLogLevel(value.to_owned())),
        None => Ok(DEFAULT_LOG_LEVEL),
    }
}
