//! A safe shader-program build pipeline over the raw OpenGL API.
//!
//! Every primer program in this repository needs the same five-step dance
//! before it can draw anything: read shader source text, compile a vertex
//! and a fragment shader, link them into a program object, validate the
//! linked program against the current pipeline state, and look up the
//! uniform locations the render loop will push values through. Written
//! against `gl` directly that is a few hundred lines of cryptic, unsafe
//! function calls repeated in every program, so this crate wraps the dance
//! in a small safe interface instead.
//!
//! The wrapper is deliberately thin. It owns no context, spawns no threads
//! and retains no state between calls; all driver calls block on the one
//! thread that owns the GL context, and every failure comes back as a
//! [`BuildError`] carrying the driver's diagnostic text so the host program
//! can decide whether to abort, fall back or report.
//!
//! A knowledge of OpenGL is *necessary* to understand any of this. The
//! classic [Learn OpenGL](https://learnopengl.com/) tutorials cover the
//! concepts, and [docs.gl](http://docs.gl/) documents the individual calls
//! wrapped here.

pub mod error;
pub mod program;
pub mod shader;
pub mod uniform;

mod glutil;

pub use error::BuildError;
pub use program::ShaderProgram;
pub use shader::{CompiledShaderUnit, ShaderSource, ShaderStage};
pub use uniform::{UniformCache, UniformLocation};
