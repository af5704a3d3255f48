//! Error types for the shader build pipeline.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::shader::ShaderStage;

/// Everything that can go wrong between reading shader source text and a
/// linked, validated program object.
///
/// The build is strictly sequential and short-circuits on the first failure,
/// so exactly one of these describes why a build stopped; there is no
/// partial-success state. Wherever the driver produces a diagnostic log it
/// is carried verbatim (trimmed of trailing padding).
#[derive(Debug, Error)]
pub enum BuildError {
    /// The driver refused to allocate an object. Usually resource
    /// exhaustion; not worth retrying.
    #[error("error creating {what}")]
    ResourceCreationFailed { what: &'static str },

    /// A shader stage failed to compile.
    #[error("error compiling {stage} shader: '{log}'")]
    CompileFailed { stage: ShaderStage, log: String },

    /// The program object failed to link.
    #[error("error linking shader program: '{log}'")]
    LinkFailed { log: String },

    /// The linked program failed validation against the currently bound
    /// pipeline state. Distinct from [`BuildError::LinkFailed`]: the
    /// program linked fine but cannot execute with what is bound right now.
    #[error("invalid shader program: '{log}'")]
    ValidationFailed { log: String },

    /// A shader source file could not be read. Raised before any driver
    /// object is allocated.
    #[error("unable to read shader source {}: {source}", path.display())]
    FileUnreadable { path: PathBuf, source: io::Error },

    /// A compiled unit of the wrong stage was handed to the linker.
    #[error("expected a {expected} shader, got a {actual} shader")]
    StageMismatch {
        expected: ShaderStage,
        actual: ShaderStage,
    },

    /// The linked program declares no active uniform with this name.
    /// Matching is exact and case-sensitive, and the linker discards
    /// uniforms the shader never reads.
    #[error("no active uniform named '{name}'")]
    UniformNotFound { name: String },

    /// Shader source text contained an interior NUL byte and cannot be
    /// handed to the driver as a C string.
    #[error("{stage} shader source contains an interior NUL byte")]
    InvalidSource { stage: ShaderStage },
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn compile_failure_names_the_stage_and_carries_the_log() {
        let err = BuildError::CompileFailed {
            stage: ShaderStage::Vertex,
            log: String::from("0:3(1): error: syntax error, unexpected '{'"),
        };

        let msg = err.to_string();
        assert!(msg.contains("vertex"));
        assert!(msg.contains("syntax error"));
    }

    #[test]
    fn link_and_validation_failures_read_differently() {
        let link = BuildError::LinkFailed {
            log: String::from("x"),
        };
        let validate = BuildError::ValidationFailed {
            log: String::from("x"),
        };

        assert_ne!(link.to_string(), validate.to_string());
    }

    #[test]
    fn file_errors_name_the_path() {
        let err = BuildError::FileUnreadable {
            path: PathBuf::from("shaders/missing.vs"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };

        assert!(err.to_string().contains("shaders/missing.vs"));
    }
}
