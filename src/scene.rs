//! The one thing this program draws: a unit quad colored by a uniform.

use std::ptr::null;

use gl::types::GLint;
use log::warn;

use crate::graphics::buffer::{set_vertex_attrib, ElementBuffer, VertexArray, VertexBuffer};
use crate::graphics::shader::{Program, Shader, ShaderError};

/// Four corners, three components each.
pub const QUAD_VERTICES: [f32; 12] = [
    0.5, 0.5, 0.0, // top right
    0.5, -0.5, 0.0, // bottom right
    -0.5, -0.5, 0.0, // bottom left
    -0.5, 0.5, 0.0, // top left
];

/// Two triangles sharing the top-right/bottom-left diagonal.
pub const QUAD_INDICES: [u32; 6] = [
    0, 1, 3, //
    1, 2, 3,
];

pub const COLOR_UNIFORM: &str = "our_color";

const VERTEX_SRC: &str = include_str!("shaders/quad.vert");
const FRAGMENT_SRC: &str = include_str!("shaders/quad.frag");

/// The quad's GPU-side state. The buffers have to outlive the vertex
/// array that references them, so they are kept alongside it.
pub struct Quad {
    vao: VertexArray,
    _vbo: VertexBuffer,
    _ebo: ElementBuffer,
}

impl Quad {
    pub fn upload() -> Self {
        let vao = VertexArray::generate();
        vao.bind();

        let vbo = VertexBuffer::init(&QUAD_VERTICES);
        let ebo = ElementBuffer::init(&QUAD_INDICES);

        set_vertex_attrib(0, 0, 3, 3);

        Self {
            vao,
            _vbo: vbo,
            _ebo: ebo,
        }
    }

    pub fn draw(&self) {
        self.vao.bind();
        unsafe {
            gl::DrawElements(
                gl::TRIANGLES,
                QUAD_INDICES.len() as i32,
                gl::UNSIGNED_INT,
                null(),
            );
        }
    }
}

pub struct Scene {
    program: Program,
    color_location: GLint,
    quad: Quad,
}

impl Scene {
    /// Runs the whole shader pipeline and uploads the quad. Any compile or
    /// link failure propagates up with its diagnostic attached.
    pub fn build() -> Result<Self, ShaderError> {
        let vertex = Shader::vertex(VERTEX_SRC)?;
        let fragment = Shader::fragment(FRAGMENT_SRC)?;
        let program = Program::link(vertex, fragment)?;

        let color_location = program.uniform_location(COLOR_UNIFORM);
        if color_location < 0 {
            // Not an error: uploads to -1 are no-ops, the quad just stays
            // whatever color the fragment shader defaults to.
            warn!(
                "uniform {:?} is not active in the quad program; color animation is off",
                COLOR_UNIFORM
            );
        }

        let quad = Quad::upload();

        Ok(Self {
            program,
            color_location,
            quad,
        })
    }

    /// Draws one frame, pulsing the green channel over time.
    pub fn draw(&self, elapsed_seconds: f32) {
        self.program.set_used();

        if self.color_location >= 0 {
            let green = elapsed_seconds.sin() / 2.0 + 0.5;
            self.program
                .set_uniform4f(self.color_location, 0.0, green, 0.0, 1.0);
        }

        self.quad.draw();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn the_quad_is_four_vertices_and_two_triangles() {
        assert_eq!(QUAD_VERTICES.len(), 4 * 3);
        assert_eq!(QUAD_INDICES.len(), 6);
    }

    #[test]
    fn every_index_points_at_a_real_vertex() {
        let vertex_count = (QUAD_VERTICES.len() / 3) as u32;
        for &index in QUAD_INDICES.iter() {
            assert!(index < vertex_count);
        }
    }

    #[test]
    fn the_triangles_share_the_diagonal() {
        let first = &QUAD_INDICES[..3];
        let second = &QUAD_INDICES[3..];

        let shared: Vec<u32> = first
            .iter()
            .filter(|index| second.contains(index))
            .copied()
            .collect();

        assert_eq!(shared.len(), 2);
    }

    #[test]
    fn embedded_sources_are_compilable_text() {
        for source in [VERTEX_SRC, FRAGMENT_SRC].iter() {
            assert!(!source.is_empty());
            assert!(!source.contains('\0'));
        }
    }

    #[test]
    fn the_sources_agree_with_the_scene_on_names() {
        assert!(VERTEX_SRC.contains("a_pos"));
        assert!(FRAGMENT_SRC.contains(COLOR_UNIFORM));
    }
}
