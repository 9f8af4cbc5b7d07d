//! Full-frame quad drawn as a triangle strip.

/// Floats per vertex: position.xy then texcoord.xy.
pub const FLOATS_PER_VERTEX: usize = 4;
pub const VERTEX_COUNT: i32 = 4;
pub const STRIDE_BYTES: i32 = (FLOATS_PER_VERTEX * std::mem::size_of::<f32>()) as i32;
pub const POSITION_OFFSET: i32 = 0;
pub const TEXCOORD_OFFSET: i32 = 2 * std::mem::size_of::<f32>() as i32;

/// Interleaved vertices. The image top edge maps to v = 0, so v grows downward
/// exactly like the horizon math expects.
#[rustfmt::skip]
pub const QUAD_VERTICES: [f32; FLOATS_PER_VERTEX * VERTEX_COUNT as usize] = [
    // pos        uv
    -1.0, -1.0,   0.0, 1.0, // bottom-left
     1.0, -1.0,   1.0, 1.0, // bottom-right
    -1.0,  1.0,   0.0, 0.0, // top-left
     1.0,  1.0,   1.0, 0.0, // top-right
];

/// Position and texture coordinate of vertex `index`.
pub fn vertex(index: usize) -> ([f32; 2], [f32; 2]) {
    let v = &QUAD_VERTICES[index * FLOATS_PER_VERTEX..(index + 1) * FLOATS_PER_VERTEX];
    ([v[0], v[1]], [v[2], v[3]])
}
