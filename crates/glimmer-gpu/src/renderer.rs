/// Compositing present pass — samples both engine textures and presents
/// flare-over-burst to the wgpu Surface.
///
/// The vertex shader generates a clip-space quad from vertex indices
/// (no vertex buffer needed). The fragment shader composites the flare's
/// premultiplied-style (color, alpha) over the opaque burst image.
pub const COMPOSITE_WGSL: &str = r#"
struct VertexOut {
    @builtin(position) pos: vec4<f32>,
    @location(0)       uv:  vec2<f32>,
};

@vertex
fn vs_main(@builtin(vertex_index) vi: u32) -> VertexOut {
    // Two triangles covering clip space
    var positions = array<vec2<f32>, 6>(
        vec2(-1.0, -1.0), vec2( 1.0, -1.0), vec2(-1.0,  1.0),
        vec2(-1.0,  1.0), vec2( 1.0, -1.0), vec2( 1.0,  1.0),
    );
    let p = positions[vi];
    var out: VertexOut;
    out.pos = vec4(p, 0.0, 1.0);
    out.uv  = p * 0.5 + 0.5;
    return out;
}

@group(0) @binding(0) var t_burst: texture_2d<f32>;
@group(0) @binding(1) var t_flare: texture_2d<f32>;
@group(0) @binding(2) var s_engine: sampler;

@fragment
fn fs_main(in: VertexOut) -> @location(0) vec4<f32> {
    let burst = textureSample(t_burst, s_engine, in.uv);
    let flare = textureSample(t_flare, s_engine, in.uv);
    // Premultiplied over: the flare alpha is derived from its brightness.
    let rgb = clamp(flare.rgb + burst.rgb * (1.0 - flare.a), vec3(0.0), vec3(1.0));
    return vec4(rgb, 1.0);
}
"#;
