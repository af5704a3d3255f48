//! Resolved uniform locations and per-frame value pushes.

use std::collections::HashMap;

use gl;
use gl::types::*;

use crate::error::BuildError;
use crate::program::ShaderProgram;

/// A resolved uniform location, valid for the lifetime of the program it
/// was resolved against.
///
/// Pushing a value requires the owning program to be currently bound; the
/// location itself carries no program reference, matching the driver's own
/// model. Relinking is not supported here, so a location never goes stale
/// while its program exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformLocation(GLint);

impl UniformLocation {
    pub(crate) fn new(location: GLint) -> Self {
        Self(location)
    }

    /// Pushes a single float, e.g. an animation scale factor.
    pub fn push_float(self, value: f32) {
        unsafe {
            gl::Uniform1f(self.0, value);
        }
    }

    /// Pushes a row-major 4x4 matrix. The driver stores matrices
    /// column-major, so the upload asks it to transpose.
    pub fn push_matrix4x4(self, matrix: &[f32; 16]) {
        unsafe {
            gl::UniformMatrix4fv(self.0, 1, gl::TRUE, matrix.as_ptr());
        }
    }
}

/// Memoized name-to-location lookups for a single program.
///
/// Resolution is an idempotent driver query, so the cache exists purely to
/// skip repeated C-string round trips when the same names are resolved at
/// startup. One cache serves one program; entries are meaningless for any
/// other program object.
#[derive(Default)]
pub struct UniformCache {
    locations: HashMap<String, UniformLocation>,
}

impl UniformCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached location for `name`, querying the program on the
    /// first miss. A name the program never declared fails with
    /// [`BuildError::UniformNotFound`] every time; misses are not cached.
    pub fn resolve(
        &mut self,
        program: &ShaderProgram,
        name: &str,
    ) -> Result<UniformLocation, BuildError> {
        if let Some(&location) = self.locations.get(name) {
            return Ok(location);
        }

        let location = program.uniform(name)?;
        self.locations.insert(name.to_owned(), location);

        Ok(location)
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}
