//! Linking compiled shader units into a usable program object.

use std::ffi::CString;
use std::path::Path;

use gl;
use gl::types::*;
use log::debug;

use crate::error::BuildError;
use crate::glutil;
use crate::shader::{CompiledShaderUnit, ShaderSource, ShaderStage};
use crate::uniform::UniformLocation;

/// A linked and validated shader program.
///
/// A value of this type only ever exists after every build step has
/// succeeded, so having one in hand is the proof that the program is
/// immediately usable for draw calls. None of the failure paths in
/// [`build`](ShaderProgram::build) construct one, which is what enforces
/// the "never query an unlinked program" rule: there is nothing to query.
///
/// Building does not bind the program. "Current program" is process-wide
/// driver state, so the decision to mutate it is left with the caller via
/// [`bind`](ShaderProgram::bind).
pub struct ShaderProgram {
    id: GLuint,
}

impl ShaderProgram {
    /// Links one vertex unit and one fragment unit into a program object,
    /// then validates it against the currently bound pipeline state.
    ///
    /// The steps run in a fixed order and the first failure is terminal:
    /// allocate the program object, attach both units, link, flag the units
    /// for deletion, validate. Validation inspects *current* state, not
    /// just the program itself, so the vertex array configuration the
    /// program will draw with must already be bound when this is called.
    ///
    /// Both units are consumed regardless of outcome; their driver objects
    /// are flagged for deletion either way and the driver deallocates them
    /// once no program references them. A program that fails to link is
    /// left to the driver's process-exit cleanup.
    pub fn build(
        vertex: CompiledShaderUnit,
        fragment: CompiledShaderUnit,
    ) -> Result<Self, BuildError> {
        if vertex.stage() != ShaderStage::Vertex {
            return Err(BuildError::StageMismatch {
                expected: ShaderStage::Vertex,
                actual: vertex.stage(),
            });
        }
        if fragment.stage() != ShaderStage::Fragment {
            return Err(BuildError::StageMismatch {
                expected: ShaderStage::Fragment,
                actual: fragment.stage(),
            });
        }

        let id = unsafe { gl::CreateProgram() };
        if id == 0 {
            return Err(BuildError::ResourceCreationFailed {
                what: "program object",
            });
        }

        unsafe {
            gl::AttachShader(id, vertex.id());
            gl::AttachShader(id, fragment.id());
            gl::LinkProgram(id);
        }

        let mut status = gl::FALSE as GLint;
        unsafe {
            gl::GetProgramiv(id, gl::LINK_STATUS, &mut status);
        }
        if status != gl::TRUE as GLint {
            return Err(BuildError::LinkFailed {
                log: glutil::program_info_log(id),
            });
        }

        // Flag the shaders for deletion; the driver keeps them alive while
        // the program references them.
        drop(vertex);
        drop(fragment);

        unsafe {
            gl::ValidateProgram(id);
        }

        let mut status = gl::FALSE as GLint;
        unsafe {
            gl::GetProgramiv(id, gl::VALIDATE_STATUS, &mut status);
        }
        if status != gl::TRUE as GLint {
            return Err(BuildError::ValidationFailed {
                log: glutil::program_info_log(id),
            });
        }

        debug!("linked and validated shader program {}", id);

        Ok(Self { id })
    }

    /// Reads, compiles and links a vertex/fragment source file pair.
    ///
    /// The convenience wrapper every primer program actually calls. Stops
    /// at the first failure: a bad vertex shader is reported before the
    /// fragment file is even opened.
    pub fn from_files<P: AsRef<Path>>(vert_path: P, frag_path: P) -> Result<Self, BuildError> {
        let vert_source = ShaderSource::from_file(ShaderStage::Vertex, vert_path)?;
        let vertex = CompiledShaderUnit::compile(&vert_source)?;

        let frag_source = ShaderSource::from_file(ShaderStage::Fragment, frag_path)?;
        let fragment = CompiledShaderUnit::compile(&frag_source)?;

        Self::build(vertex, fragment)
    }

    /// Makes this the current program for subsequent draw calls, replacing
    /// whichever program was bound before.
    pub fn bind(&self) {
        unsafe {
            gl::UseProgram(self.id);
        }
    }

    /// Looks up the location of a named uniform variable.
    ///
    /// A pure lookup against the linker's output: repeatable, idempotent,
    /// and stable for the lifetime of this program object. The name must
    /// match the shader source exactly, case included. "Not declared" is a
    /// real error value here, distinct from a uniform that happens to live
    /// at location 0.
    pub fn uniform(&self, name: &str) -> Result<UniformLocation, BuildError> {
        let c_name = CString::new(name).map_err(|_| BuildError::UniformNotFound {
            name: name.to_owned(),
        })?;

        let location = unsafe { gl::GetUniformLocation(self.id, c_name.as_ptr()) };
        if location < 0 {
            return Err(BuildError::UniformNotFound {
                name: name.to_owned(),
            });
        }

        Ok(UniformLocation::new(location))
    }

    pub fn id(&self) -> GLuint {
        self.id
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteProgram(self.id);
        }
    }
}
