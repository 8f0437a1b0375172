//! RAII wrappers for vertex-array, vertex-buffer, and element-buffer
//! objects, plus attribute layout configuration.

use std::mem::size_of;
use std::os::raw::c_void;

use gl::types::{GLsizei, GLsizeiptr, GLuint};

/// A vertex array object capturing attribute layout and element-buffer
/// binding for a piece of geometry.
pub struct VertexArray {
    id: GLuint,
}

impl VertexArray {
    pub fn generate() -> Self {
        let mut id = 0;
        unsafe {
            gl::GenVertexArrays(1, &mut id);
        }
        Self { id }
    }

    pub fn bind(&self) {
        unsafe {
            gl::BindVertexArray(self.id);
        }
    }

    pub fn id(&self) -> GLuint {
        self.id
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteVertexArrays(1, &self.id);
        }
    }
}

/// A vertex buffer object holding per-vertex float attribute data.
pub struct VertexBuffer {
    id: GLuint,
}

impl VertexBuffer {
    pub fn init(data: &[f32]) -> Self {
        let vbo = Self::generate();
        vbo.bind();
        unsafe {
            gl::BufferData(
                gl::ARRAY_BUFFER,
                (data.len() * size_of::<f32>()) as GLsizeiptr,
                data.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            );
        }
        vbo
    }

    pub fn generate() -> Self {
        let mut id = 0;
        unsafe {
            gl::GenBuffers(1, &mut id);
        }
        Self { id }
    }

    pub fn bind(&self) {
        unsafe {
            gl::BindBuffer(gl::ARRAY_BUFFER, self.id);
        }
    }

    pub fn id(&self) -> GLuint {
        self.id
    }
}

impl Drop for VertexBuffer {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, &self.id);
        }
    }
}

/// An element buffer object holding vertex indices, so shared corners are
/// uploaded once and referenced twice.
pub struct ElementBuffer {
    id: GLuint,
}

impl ElementBuffer {
    pub fn init(data: &[u32]) -> Self {
        let ebo = Self::generate();
        ebo.bind();
        unsafe {
            gl::BufferData(
                gl::ELEMENT_ARRAY_BUFFER,
                (data.len() * size_of::<u32>()) as GLsizeiptr,
                data.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            );
        }
        ebo
    }

    pub fn generate() -> Self {
        let mut id = 0;
        unsafe {
            gl::GenBuffers(1, &mut id);
        }
        Self { id }
    }

    pub fn bind(&self) {
        unsafe {
            gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, self.id);
        }
    }

    pub fn id(&self) -> GLuint {
        self.id
    }
}

impl Drop for ElementBuffer {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, &self.id);
        }
    }
}

/// Enables one float attribute and describes its layout. `offset` and
/// `stride` are in floats, not bytes.
pub fn set_vertex_attrib(index: u32, offset: usize, size: i32, stride: usize) {
    unsafe {
        gl::EnableVertexAttribArray(index);
        gl::VertexAttribPointer(
            index,
            size,
            gl::FLOAT,
            gl::FALSE,
            (stride * size_of::<f32>()) as GLsizei,
            (offset * size_of::<f32>()) as *const c_void,
        );
    }
}
