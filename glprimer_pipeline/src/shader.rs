//! Compiling a single shader stage from source text.

use std::ffi::CString;
use std::fmt;
use std::fs;
use std::path::Path;

use gl;
use gl::types::*;
use log::debug;

use crate::error::BuildError;
use crate::glutil;

/// One of the two programmable pipeline steps this crate links together.
///
/// Geometry, tessellation and compute stages are deliberately not covered;
/// the primer programs never use them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub(crate) fn gl_enum(self) -> GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// Shader source text ready to hand to the driver: a stage tag plus the
/// NUL-terminated text and its byte length.
///
/// Construction never touches the driver, so a bad path or bad text fails
/// before any GL object exists. The text itself is not inspected beyond the
/// NUL check; empty or nonsensical source is passed through and rejected by
/// the driver's own compiler.
#[derive(Debug)]
pub struct ShaderSource {
    stage: ShaderStage,
    text: CString,
    len: GLint,
}

impl ShaderSource {
    /// Wraps in-memory source text for the given stage.
    pub fn new(stage: ShaderStage, text: &str) -> Result<Self, BuildError> {
        let len = text.len() as GLint;
        let text =
            CString::new(text).map_err(|_| BuildError::InvalidSource { stage })?;

        Ok(Self { stage, text, len })
    }

    /// Reads a whole source file into memory. By convention vertex shaders
    /// use a `.vs` extension and fragment shaders `.fs`, but nothing is
    /// inferred from the name; the caller says which stage it is.
    pub fn from_file<P: AsRef<Path>>(stage: ShaderStage, path: P) -> Result<Self, BuildError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| BuildError::FileUnreadable {
            path: path.to_path_buf(),
            source,
        })?;

        Self::new(stage, &text)
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    /// Byte length of the source text, excluding the terminator.
    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// A compiled, not-yet-linked shader object owned by the driver.
///
/// Only a successful compile produces one of these, so holding a unit means
/// its stage compiled cleanly. Units are consumed by value by
/// [`ShaderProgram::build`](crate::program::ShaderProgram::build) and are
/// never reused across programs; dropping one, attached or abandoned, marks
/// the driver object for deletion so nothing leaks on any path.
pub struct CompiledShaderUnit {
    id: GLuint,
    stage: ShaderStage,
}

impl CompiledShaderUnit {
    /// Compiles one shader stage synchronously; blocks until the driver's
    /// compiler finishes.
    pub fn compile(source: &ShaderSource) -> Result<Self, BuildError> {
        let id = unsafe { gl::CreateShader(source.stage.gl_enum()) };
        if id == 0 {
            return Err(BuildError::ResourceCreationFailed {
                what: "shader object",
            });
        }

        unsafe {
            let texts = [source.text.as_ptr()];
            let lengths = [source.len];
            gl::ShaderSource(id, 1, texts.as_ptr(), lengths.as_ptr());
            gl::CompileShader(id);
        }

        let mut status = gl::FALSE as GLint;
        unsafe {
            gl::GetShaderiv(id, gl::COMPILE_STATUS, &mut status);
        }

        if status != gl::TRUE as GLint {
            let log = glutil::shader_info_log(id);
            unsafe {
                gl::DeleteShader(id);
            }
            return Err(BuildError::CompileFailed {
                stage: source.stage,
                log,
            });
        }

        debug!("compiled {} shader (object {})", source.stage, id);

        Ok(Self {
            id,
            stage: source.stage,
        })
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    pub(crate) fn id(&self) -> GLuint {
        self.id
    }
}

impl Drop for CompiledShaderUnit {
    fn drop(&mut self) {
        // Deferred by the driver while any program still references the
        // object, so this is safe to run right after attaching.
        unsafe {
            gl::DeleteShader(self.id);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn source_keeps_its_stage_and_byte_length() {
        let src = ShaderSource::new(ShaderStage::Fragment, "void main() {}").unwrap();

        assert_eq!(src.stage(), ShaderStage::Fragment);
        assert_eq!(src.len(), 14);
        assert!(!src.is_empty());
    }

    #[test]
    fn interior_nul_bytes_are_rejected_up_front() {
        let err = ShaderSource::new(ShaderStage::Vertex, "void\0main() {}").unwrap_err();

        match err {
            BuildError::InvalidSource { stage } => assert_eq!(stage, ShaderStage::Vertex),
            other => panic!("expected InvalidSource, got {:?}", other),
        }
    }

    #[test]
    fn missing_source_file_fails_before_any_driver_call() {
        // No GL context exists in this test; reaching the driver would
        // crash, so an error here proves the read failed first.
        let err =
            ShaderSource::from_file(ShaderStage::Vertex, "no/such/shader.vs").unwrap_err();

        match err {
            BuildError::FileUnreadable { path, .. } => {
                assert_eq!(path, Path::new("no/such/shader.vs"))
            }
            other => panic!("expected FileUnreadable, got {:?}", other),
        }
    }

    #[test]
    fn stages_map_to_the_matching_driver_constants() {
        assert_eq!(ShaderStage::Vertex.gl_enum(), gl::VERTEX_SHADER);
        assert_eq!(ShaderStage::Fragment.gl_enum(), gl::FRAGMENT_SHADER);
    }
}
