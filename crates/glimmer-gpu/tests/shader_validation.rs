//! Offline WGSL validation — catches shader breakage without a GPU.

use naga::valid::{Capabilities, ValidationFlags, Validator};

fn validate(label: &str, source: &str) -> naga::Module {
    let module = naga::front::wgsl::parse_str(source)
        .unwrap_or_else(|e| panic!("{label}: WGSL parse failed:\n{e}"));
    Validator::new(ValidationFlags::all(), Capabilities::all())
        .validate(&module)
        .unwrap_or_else(|e| panic!("{label}: validation failed: {e:?}"));
    module
}

#[test]
fn burst_shader_parses_and_validates() {
    validate("burst.wgsl", include_str!("../shaders/burst.wgsl"));
}

#[test]
fn flare_shader_parses_and_validates() {
    validate("flare.wgsl", include_str!("../shaders/flare.wgsl"));
}

#[test]
fn composite_shader_parses_and_validates() {
    validate("composite", glimmer_gpu::renderer::COMPOSITE_WGSL);
}

#[test]
fn compute_shaders_expose_a_main_entry_point() {
    for (label, src) in [
        ("burst.wgsl", include_str!("../shaders/burst.wgsl")),
        ("flare.wgsl", include_str!("../shaders/flare.wgsl")),
    ] {
        let module = validate(label, src);
        assert!(
            module.entry_points.iter().any(|ep| ep.name == "main"),
            "{label}: no `main` entry point"
        );
    }
}

/// Needs a working GPU adapter; run with `cargo test -- --ignored` locally.
#[test]
#[ignore]
fn headless_device_builds_both_passes() {
    let ctx = pollster::block_on(glimmer_gpu::context::GpuContext::new_headless());
    let _burst = glimmer_gpu::burst_pipeline::BurstPass::new(&ctx.device, 64, 64);
    let _flare = glimmer_gpu::flare_pipeline::FlarePass::new(&ctx.device, 64, 64);
    ctx.device.poll(wgpu::Maintain::Wait);
}
