/// WGSL source for the Phong-lit "clay" program that draws the scene
/// geometry. The mesh carries its shading vector in the color attribute;
/// there is no separate normal stream.
pub const CLAY_SHADER: &str = r#"
struct ClayUniforms {
    model: mat4x4<f32>,
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
    object_color: vec3<f32>,
    light_color: vec3<f32>,
    light_pos: vec3<f32>,
    view_position: vec3<f32>,
};

@group(0) @binding(0)
var<uniform> u: ClayUniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) color: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) fragment_pos: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    let world_pos = u.model * vec4<f32>(vertex.position, 1.0);

    var out: VertexOutput;
    out.clip_position = u.projection * u.view * world_pos;
    // Fragment position in world space only, excluding view and projection.
    out.fragment_pos = world_pos.xyz;
    // Shading vector into world space, without the translation part.
    out.normal = (u.model * vec4<f32>(vertex.color.xyz, 0.0)).xyz;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    // Ambient term
    let ambient_strength = 0.1;
    let ambient = ambient_strength * u.light_color;

    // Diffuse term
    let norm = normalize(in.normal);
    let light_direction = normalize(u.light_pos - in.fragment_pos);
    let impact = max(dot(norm, light_direction), 0.0);
    let diffuse = impact * u.light_color;

    // Specular term
    let specular_intensity = 1.0;
    let highlight_size = 16.0;
    let view_dir = normalize(u.view_position - in.fragment_pos);
    let reflect_dir = reflect(-light_direction, norm);
    let specular_component = pow(max(dot(view_dir, reflect_dir), 0.0), highlight_size);
    let specular = specular_intensity * specular_component * u.light_color;

    let phong = (ambient + diffuse + specular) * u.object_color;
    return vec4<f32>(phong, 1.0);
}
"#;

/// WGSL source for the unlit "lamp" program that marks the light source.
pub const LAMP_SHADER: &str = r#"
struct LampUniforms {
    model: mat4x4<f32>,
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> u: LampUniforms;

@vertex
fn vs_main(@location(0) position: vec3<f32>) -> @builtin(position) vec4<f32> {
    return u.projection * u.view * u.model * vec4<f32>(position, 1.0);
}

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0, 1.0, 1.0, 1.0);
}
"#;
