use framekit_render::ShaderKind;

/// Bindings shared by every program: per-frame camera and light in group 0,
/// per-record model and color in group 1.
const COMMON: &str = r#"
struct Frame {
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
    view_pos: vec4<f32>,
    // xyz is a position when w == 1, a direction when w == 0
    light_vector: vec4<f32>,
    light_ambient: vec4<f32>,
    light_diffuse: vec4<f32>,
    light_specular: vec4<f32>,
    // constant, linear, quadratic, shininess
    attenuation: vec4<f32>,
};

struct Object {
    model: mat4x4<f32>,
    color: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> frame: Frame;

@group(1) @binding(0)
var<uniform> object: Object;
"#;

const MATERIAL: &str = r#"
@group(2) @binding(0)
var diffuse_map: texture_2d<f32>;
@group(2) @binding(1)
var specular_map: texture_2d<f32>;
@group(2) @binding(2)
var material_sampler: sampler;
"#;

/// Solid record color.
pub const FLAT_SHADER: &str = r#"
@vertex
fn vs_main(@location(0) position: vec3<f32>) -> @builtin(position) vec4<f32> {
    return frame.projection * frame.view * object.model * vec4<f32>(position, 1.0);
}

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return object.color;
}
"#;

/// Diffuse texture times record color.
pub const TEXTURED_SHADER: &str = r#"
struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_main(@location(0) position: vec3<f32>, @location(1) uv: vec2<f32>) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = frame.projection * frame.view * object.model * vec4<f32>(position, 1.0);
    out.uv = uv;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return textureSample(diffuse_map, material_sampler, in.uv) * object.color;
}
"#;

/// Ambient, diffuse and specular terms from a single directional or point
/// light.
pub const PHONG_SHADER: &str = r#"
struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

@vertex
fn vs_main(
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
) -> VertexOutput {
    let world = object.model * vec4<f32>(position, 1.0);
    var out: VertexOutput;
    out.clip_position = frame.projection * frame.view * world;
    out.world_pos = world.xyz;
    // models only carry uniform scale
    out.normal = (object.model * vec4<f32>(normal, 0.0)).xyz;
    out.uv = uv;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let base = textureSample(diffuse_map, material_sampler, in.uv).rgb * object.color.rgb;
    let highlight = textureSample(specular_map, material_sampler, in.uv).rgb;
    let n = normalize(in.normal);

    var light_dir = normalize(-frame.light_vector.xyz);
    var falloff = 1.0;
    if frame.light_vector.w != 0.0 {
        let to_light = frame.light_vector.xyz - in.world_pos;
        let d = length(to_light);
        light_dir = normalize(to_light);
        falloff = 1.0 / (frame.attenuation.x + frame.attenuation.y * d + frame.attenuation.z * d * d);
    }

    let ambient = frame.light_ambient.rgb * base;
    let diffuse = frame.light_diffuse.rgb * max(dot(n, light_dir), 0.0) * base;
    let view_dir = normalize(frame.view_pos.xyz - in.world_pos);
    let reflect_dir = reflect(-light_dir, n);
    let spec = pow(max(dot(view_dir, reflect_dir), 0.0), frame.attenuation.w);
    let specular = frame.light_specular.rgb * spec * highlight;

    return vec4<f32>((ambient + diffuse + specular) * falloff, object.color.a);
}
"#;

/// Full WGSL source for `kind`, including the shared bindings.
pub fn source(kind: ShaderKind) -> String {
    match kind {
        ShaderKind::Flat => format!("{COMMON}{FLAT_SHADER}"),
        ShaderKind::Textured => format!("{COMMON}{MATERIAL}{TEXTURED_SHADER}"),
        ShaderKind::Phong => format!("{COMMON}{MATERIAL}{PHONG_SHADER}"),
    }
}
