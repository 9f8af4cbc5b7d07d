use std::fmt;

use thiserror::Error;

/// Programmable pipeline stage a compile diagnostic belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Everything that can keep the water effect from running.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WaterError {
    #[error("no WebGL context available")]
    ContextUnavailable,

    #[error("{stage} shader failed to compile: {log}")]
    Compile { stage: ShaderStage, log: String },

    #[error("shader program failed to link: {0}")]
    Link(String),

    #[error("invalid value {value:?} for data-{key}")]
    Config { key: &'static str, value: String },

    #[error("browser call failed: {0}")]
    Browser(String),
}

impl WaterError {
    /// The environment cannot run the effect at all; retrying is pointless.
    pub fn is_fatal_for_session(&self) -> bool {
        matches!(
            self,
            WaterError::ContextUnavailable | WaterError::Compile { .. } | WaterError::Link(_)
        )
    }
}
