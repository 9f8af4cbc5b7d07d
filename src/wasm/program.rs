use web_sys::{WebGlProgram, WebGlRenderingContext as GL, WebGlShader, WebGlUniformLocation};

use crate::error::{ShaderStage, WaterError};
use crate::shaders::{self, attrib, uniform};

/// The linked water program with its resolved attribute and uniform handles.
pub struct ShaderProgram {
    _program: WebGlProgram,
    pub a_pos: u32,
    pub a_uv: u32,
    pub u_tex: Option<WebGlUniformLocation>,
    pub u_time: Option<WebGlUniformLocation>,
    pub u_res: Option<WebGlUniformLocation>,
}

impl ShaderProgram {
    /// Compiles both stages, links them and makes the program current.
    pub fn build(gl: &GL) -> Result<Self, WaterError> {
        let vertex = compile(gl, ShaderStage::Vertex, shaders::VERTEX_SRC)?;
        let fragment = match compile(gl, ShaderStage::Fragment, shaders::FRAGMENT_SRC) {
            Ok(shader) => shader,
            Err(err) => {
                gl.delete_shader(Some(&vertex));
                return Err(err);
            }
        };

        let linked = link(gl, &vertex, &fragment);
        gl.delete_shader(Some(&vertex));
        gl.delete_shader(Some(&fragment));
        let program = linked?;

        let a_pos = attrib_location(gl, &program, attrib::POSITION)?;
        let a_uv = attrib_location(gl, &program, attrib::TEXCOORD)?;

        gl.use_program(Some(&program));

        Ok(Self {
            a_pos,
            a_uv,
            u_tex: gl.get_uniform_location(&program, uniform::TEXTURE),
            u_time: gl.get_uniform_location(&program, uniform::TIME),
            u_res: gl.get_uniform_location(&program, uniform::RESOLUTION),
            _program: program,
        })
    }
}

fn stage_kind(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => GL::VERTEX_SHADER,
        ShaderStage::Fragment => GL::FRAGMENT_SHADER,
    }
}

fn compile(gl: &GL, stage: ShaderStage, source: &str) -> Result<WebGlShader, WaterError> {
    let shader = gl
        .create_shader(stage_kind(stage))
        .ok_or_else(|| WaterError::Compile {
            stage,
            log: "unable to create shader object".to_owned(),
        })?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let log = gl
            .get_shader_info_log(&shader)
            .unwrap_or_else(|| "unknown error".to_owned());
        gl.delete_shader(Some(&shader));
        Err(WaterError::Compile { stage, log })
    }
}

fn link(gl: &GL, vertex: &WebGlShader, fragment: &WebGlShader) -> Result<WebGlProgram, WaterError> {
    let program = gl
        .create_program()
        .ok_or_else(|| WaterError::Link("unable to create program object".to_owned()))?;
    gl.attach_shader(&program, vertex);
    gl.attach_shader(&program, fragment);
    gl.link_program(&program);

    if gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(program)
    } else {
        let log = gl
            .get_program_info_log(&program)
            .unwrap_or_else(|| "unknown error".to_owned());
        gl.delete_program(Some(&program));
        Err(WaterError::Link(log))
    }
}

fn attrib_location(gl: &GL, program: &WebGlProgram, name: &str) -> Result<u32, WaterError> {
    u32::try_from(gl.get_attrib_location(program, name))
        .map_err(|_| WaterError::Link(format!("attribute {name} is not active")))
}
