use js_sys::Float32Array;
use web_sys::{WebGlBuffer, WebGlRenderingContext as GL};

use super::program::ShaderProgram;
use crate::error::WaterError;
use crate::geometry::{self, POSITION_OFFSET, STRIDE_BYTES, TEXCOORD_OFFSET};

/// Static vertex buffer holding [`geometry::QUAD_VERTICES`].
pub struct QuadBuffer {
    _buffer: WebGlBuffer,
}

impl QuadBuffer {
    /// Uploads the quad once and points both attributes of `program` at it.
    pub fn upload(gl: &GL, program: &ShaderProgram) -> Result<Self, WaterError> {
        let buffer = gl
            .create_buffer()
            .ok_or_else(|| WaterError::Browser("unable to create vertex buffer".to_owned()))?;
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));

        let vertices = Float32Array::from(&geometry::QUAD_VERTICES[..]);
        gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &vertices, GL::STATIC_DRAW);

        gl.enable_vertex_attrib_array(program.a_pos);
        gl.enable_vertex_attrib_array(program.a_uv);
        gl.vertex_attrib_pointer_with_i32(program.a_pos, 2, GL::FLOAT, false, STRIDE_BYTES, POSITION_OFFSET);
        gl.vertex_attrib_pointer_with_i32(program.a_uv, 2, GL::FLOAT, false, STRIDE_BYTES, TEXCOORD_OFFSET);

        Ok(Self { _buffer: buffer })
    }

    pub fn draw(&self, gl: &GL) {
        gl.draw_arrays(GL::TRIANGLE_STRIP, 0, geometry::VERTEX_COUNT);
    }
}
