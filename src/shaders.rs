//! GLSL ES 1.00 sources for the water program.
//!
//! The attribute and uniform names below are the only contract between the
//! program and the host code; [`crate::displacement`] mirrors the fragment math
//! on the CPU.

/// Vertex attribute names.
pub mod attrib {
    /// `vec2` clip-space position.
    pub const POSITION: &str = "a_pos";
    /// `vec2` texture coordinate, v grows downward.
    pub const TEXCOORD: &str = "a_uv";
}

/// Uniform names.
pub mod uniform {
    /// `sampler2D` bound to texture unit 0.
    pub const TEXTURE: &str = "u_tex";
    /// `float` seconds since the animation started.
    pub const TIME: &str = "u_time";
    /// `vec2` drawable size in pixels.
    pub const RESOLUTION: &str = "u_res";
}

pub const VERTEX_SRC: &str = r"attribute vec2 a_pos;
attribute vec2 a_uv;
varying vec2 v_uv;
void main() {
  v_uv = a_uv;
  gl_Position = vec4(a_pos, 0.0, 1.0);
}
";

pub const FRAGMENT_SRC: &str = r"precision highp float;
varying vec2 v_uv;
uniform sampler2D u_tex;
uniform float u_time;
uniform vec2 u_res;

// Fraction of the image height, from the top, where sea meets sky.
const float HORIZON = 0.47;
const float TRANSITION = 0.03;

float hash(vec2 p) {
  return fract(sin(dot(p, vec2(127.1, 311.7))) * 43758.5453);
}

float noise(vec2 p) {
  vec2 i = floor(p);
  vec2 f = fract(p);
  f = f * f * (3.0 - 2.0 * f);
  return mix(
    mix(hash(i), hash(i + vec2(1.0, 0.0)), f.x),
    mix(hash(i + vec2(0.0, 1.0)), hash(i + vec2(1.0, 1.0)), f.x),
    f.y);
}

void main() {
  vec2 uv = v_uv;
  float t = u_time;
  float aspect = u_res.x / u_res.y;

  float waterDepth = smoothstep(HORIZON - TRANSITION, HORIZON + TRANSITION, uv.y);

  if (waterDepth > 0.001) {
    float d = waterDepth * waterDepth;
    float px = uv.x * aspect;

    // swells
    float dx1 = sin(px * 4.0 + t * 0.4) * 0.0035
              + sin(px * 2.5 - t * 0.3 + uv.y * 3.0) * 0.002;
    float dy1 = sin(px * 3.0 + t * 0.35 + 1.0) * 0.002
              + sin(px * 1.8 - t * 0.25 + uv.y * 2.0) * 0.0015;

    // cross waves
    float dx2 = sin(px * 8.0 + t * 0.6 + uv.y * 5.0) * 0.002
              + sin(px * 6.0 - t * 0.5 + 2.0) * 0.0012;
    float dy2 = sin(px * 7.0 + t * 0.5 + uv.y * 4.0) * 0.0012;

    // ripples
    vec2 np = vec2(px * 15.0, uv.y * 12.0);
    float n1 = noise(np + vec2(t * 0.3, t * 0.1));
    float n2 = noise(np * 1.7 + vec2(-t * 0.25, t * 0.15) + 50.0);
    float dx3 = (n1 - 0.5) * 0.0018 + (n2 - 0.5) * 0.0008;
    float dy3 = (noise(np.yx + vec2(t * 0.2, -t * 0.12)) - 0.5) * 0.001;

    float totalDx = (dx1 + dx2 + dx3) * d;
    float totalDy = (dy1 + dy2 + dy3) * d * 0.6;

    uv.x += totalDx;
    uv.y += totalDy;
    uv = clamp(uv, 0.0, 1.0);
  }

  vec4 col = texture2D(u_tex, uv);

  if (waterDepth > 0.01) {
    float px = uv.x * aspect;
    float shimmer = sin(px * 12.0 + t * 0.7) * sin(uv.y * 8.0 - t * 0.4);
    shimmer = shimmer * 0.02 * waterDepth;
    col.rgb += shimmer;
  }

  gl_FragColor = col;
}
";
