//! Shader compilation and program linking.
//!
//! The whole pipeline is one-shot: sources go in, a linked [`Program`]
//! comes out, and every failure carries the backend's info log instead of
//! being printed from here. There is no recompile or hot-reload path; a
//! caller wanting new shaders runs the pipeline again and swaps programs
//! between frames.

use std::ffi::CString;
use std::fmt;
use std::ptr::null;

use gl::types::{GLenum, GLint, GLuint};
use thiserror::Error;

use super::diagnostics::DiagnosticLog;

/// The two pipeline stages this program uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn gl_enum(self) -> GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("failed to compile the {stage} shader: {log}")]
    Compile {
        stage: ShaderStage,
        log: DiagnosticLog,
    },

    #[error("failed to link the shader program: {log}")]
    Link { log: DiagnosticLog },
}

/// A compiled shader object. A value of this type existing at all means
/// compilation succeeded; half-built objects are deleted before the error
/// leaves [`Shader::compile`].
pub struct Shader {
    id: GLuint,
    stage: ShaderStage,
}

impl Shader {
    /// Compiles GLSL source for one stage. No syntax checking happens on
    /// this side; everything is delegated to the driver's compiler, and a
    /// rejection comes back with the driver's own diagnostic text.
    pub fn compile(source: &str, stage: ShaderStage) -> Result<Self, ShaderError> {
        // The one local precondition: the source has to survive the trip
        // through a C string before the backend ever sees it.
        let source = CString::new(source).map_err(|_| ShaderError::Compile {
            stage,
            log: DiagnosticLog::from_text("shader source contains an interior NUL byte"),
        })?;

        let id = unsafe { gl::CreateShader(stage.gl_enum()) };
        unsafe {
            gl::ShaderSource(id, 1, &source.as_ptr(), null());
            gl::CompileShader(id);
        }

        let mut success = 0;
        unsafe {
            gl::GetShaderiv(id, gl::COMPILE_STATUS, &mut success);
        }

        if success == 0 {
            let log = DiagnosticLog::read(|capacity, written, buf| unsafe {
                gl::GetShaderInfoLog(id, capacity, written, buf);
            });
            unsafe {
                gl::DeleteShader(id);
            }
            return Err(ShaderError::Compile { stage, log });
        }

        Ok(Self { id, stage })
    }

    pub fn vertex(source: &str) -> Result<Self, ShaderError> {
        Self::compile(source, ShaderStage::Vertex)
    }

    pub fn fragment(source: &str) -> Result<Self, ShaderError> {
        Self::compile(source, ShaderStage::Fragment)
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteShader(self.id);
        }
    }
}

/// A linked shader program. Only a successful link produces one, so any
/// `Program` in hand is usable for drawing; there is no partial state.
pub struct Program {
    id: GLuint,
}

impl Program {
    /// Links a compiled vertex/fragment pair into a program. Both shader
    /// objects are consumed: the program carries the linked binary, so the
    /// individual objects are deleted when this returns, whether linking
    /// succeeded or not.
    pub fn link(vertex: Shader, fragment: Shader) -> Result<Self, ShaderError> {
        debug_assert_eq!(vertex.stage(), ShaderStage::Vertex);
        debug_assert_eq!(fragment.stage(), ShaderStage::Fragment);

        let id = unsafe { gl::CreateProgram() };
        unsafe {
            gl::AttachShader(id, vertex.id());
            gl::AttachShader(id, fragment.id());
            gl::LinkProgram(id);
        }

        let mut success = 0;
        unsafe {
            gl::GetProgramiv(id, gl::LINK_STATUS, &mut success);
        }

        if success == 0 {
            let log = DiagnosticLog::read(|capacity, written, buf| unsafe {
                gl::GetProgramInfoLog(id, capacity, written, buf);
            });
            unsafe {
                gl::DeleteProgram(id);
            }
            return Err(ShaderError::Link { log });
        }

        unsafe {
            gl::DetachShader(id, vertex.id());
            gl::DetachShader(id, fragment.id());
        }

        Ok(Self { id })
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn set_used(&self) {
        unsafe {
            gl::UseProgram(self.id);
        }
    }

    /// Resolves a uniform name to its location. A name that is not an
    /// active uniform yields the backend's -1 sentinel rather than an
    /// error; uploading to -1 is a silent no-op, so callers check the
    /// location themselves before using it.
    pub fn uniform_location(&self, name: &str) -> GLint {
        let name = match CString::new(name) {
            Ok(name) => name,
            Err(_) => return -1,
        };
        unsafe { gl::GetUniformLocation(self.id, name.as_ptr()) }
    }

    pub fn set_uniform4f(&self, location: GLint, x: f32, y: f32, z: f32, w: f32) {
        unsafe {
            gl::Uniform4f(location, x, y, z, w);
        }
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteProgram(self.id);
        }
    }
}
