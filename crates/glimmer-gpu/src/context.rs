use glam::Mat3;
use wgpu::{Device, Instance, Queue};

use glimmer_core::burst::BurstFrame;
use glimmer_core::{FlareParams, MAX_BURST_COLORS, MAX_FLARE_COLORS};

pub struct GpuContext {
    pub instance: Instance,
    pub device: Device,
    pub queue: Queue,
}

impl GpuContext {
    /// Create a headless GPU context (no surface). Used for compute-only
    /// work and testing. A surface-aware variant is created by `glimmer-app`.
    pub async fn new_headless() -> Self {
        let instance = Instance::default();

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .expect("No suitable GPU adapter found");

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("glimmer-gpu device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await
            .expect("Failed to create GPU device");

        Self {
            instance,
            device,
            queue,
        }
    }
}

// ---------------------------------------------------------------------------
// Frame uniform builders
// ---------------------------------------------------------------------------

/// Per-frame data for the burst compute pass, as a single uniform buffer.
/// Must match `BurstUniforms` in `shaders/burst.wgsl` field for field.
/// `repr(C)` + `bytemuck` ensures safe casting to `&[u8]`.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BurstUniforms {
    pub resolution: [f32; 2],
    pub offset: [f32; 2],
    /// Mode-resolved rotation, columns padded to vec4 for mat3x3 layout.
    pub rotation: [[f32; 4]; 3],
    /// Animation time, already scaled by the speed multiplier.
    pub time: f32,
    pub intensity: f32,
    pub noise_amount: f32,
    pub distortion: f32,
    pub ray_count: u32,
    pub color_count: u32,
    pub _pad: [u32; 2],
    pub colors: [[f32; 4]; MAX_BURST_COLORS],
}

impl BurstUniforms {
    /// Pack a frame. The rotation matrix is resolved here, once per frame;
    /// the shader never branches on the animation mode.
    pub fn from_frame(frame: &BurstFrame) -> Self {
        let p = frame.params();
        let mut colors = [[0.0; 4]; MAX_BURST_COLORS];
        for (slot, color) in colors.iter_mut().zip(p.colors.iter()) {
            *slot = color.to_array();
        }
        Self {
            resolution: p.resolution.to_array(),
            offset: p.offset.to_array(),
            rotation: mat3_columns(frame.rotation()),
            time: frame.scaled_time(),
            intensity: p.intensity,
            noise_amount: p.noise_amount,
            distortion: p.distortion,
            ray_count: p.ray_count,
            color_count: p.color_count,
            _pad: [0; 2],
            colors,
        }
    }
}

/// Per-frame data for the flare compute pass. Must match `FlareUniforms`
/// in `shaders/flare.wgsl`. Carries the full contract, including the
/// streak/aberration fields the oval compositor leaves unread.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FlareUniforms {
    pub resolution: [f32; 2],
    pub light_pos: [f32; 2],
    pub time: f32,
    pub intensity: f32,
    pub streak_length: f32,
    pub streak_width: f32,
    pub falloff_power: f32,
    pub chromatic_aberration: f32,
    pub brightness_threshold: f32,
    pub dispersion: f32,
    pub noise_amount: f32,
    pub rotation: f32,
    pub glow_radius: f32,
    pub edge_fade: f32,
    pub tint: [f32; 4],
    pub ray_count: u32,
    pub color_count: u32,
    pub _pad: [u32; 2],
    /// RGB in xyz; w carried but unread.
    pub colors: [[f32; 4]; MAX_FLARE_COLORS],
}

impl FlareUniforms {
    pub fn from_params(params: &FlareParams) -> Self {
        let p = params.clone().sanitized();
        let mut colors = [[0.0; 4]; MAX_FLARE_COLORS];
        for (slot, color) in colors.iter_mut().zip(p.colors.iter()) {
            *slot = color.extend(1.0).to_array();
        }
        Self {
            resolution: p.resolution.to_array(),
            light_pos: p.light_pos.to_array(),
            time: p.time,
            intensity: p.intensity,
            streak_length: p.streak_length,
            streak_width: p.streak_width,
            falloff_power: p.falloff_power,
            chromatic_aberration: p.chromatic_aberration,
            brightness_threshold: p.brightness_threshold,
            dispersion: p.dispersion,
            noise_amount: p.noise_amount,
            rotation: p.rotation,
            glow_radius: p.glow_radius,
            edge_fade: p.edge_fade,
            tint: p.tint.to_array(),
            ray_count: p.ray_count,
            color_count: p.color_count,
            _pad: [0; 2],
            colors,
        }
    }
}

fn mat3_columns(m: Mat3) -> [[f32; 4]; 3] {
    [
        m.x_axis.extend(0.0).to_array(),
        m.y_axis.extend(0.0).to_array(),
        m.z_axis.extend(0.0).to_array(),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use glimmer_core::{AnimationMode, BurstParams};

    // WGSL uniform layouts are 16-byte aligned; a size mismatch here means
    // the shader would read garbage.

    #[test]
    fn burst_uniforms_match_the_wgsl_struct_size() {
        assert_eq!(std::mem::size_of::<BurstUniforms>(), 224);
        assert_eq!(std::mem::size_of::<BurstUniforms>() % 16, 0);
    }

    #[test]
    fn flare_uniforms_match_the_wgsl_struct_size() {
        assert_eq!(std::mem::size_of::<FlareUniforms>(), 192);
        assert_eq!(std::mem::size_of::<FlareUniforms>() % 16, 0);
    }

    #[test]
    fn burst_rotation_is_identity_columns_at_time_zero() {
        let frame = BurstFrame::new(BurstParams {
            mode: AnimationMode::SpatialRotate3d,
            time: 0.0,
            ..BurstParams::default()
        });
        let u = BurstUniforms::from_frame(&frame);
        assert_eq!(u.rotation[0], [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(u.rotation[1], [0.0, 1.0, 0.0, 0.0]);
        assert_eq!(u.rotation[2], [0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn burst_time_is_speed_scaled_in_the_uniforms() {
        let frame = BurstFrame::new(BurstParams {
            time: 2.0,
            speed: 0.5,
            ..BurstParams::default()
        });
        let u = BurstUniforms::from_frame(&frame);
        assert_eq!(u.time, 1.0);
    }

    #[test]
    fn flare_count_fields_are_clamped_when_packed() {
        let u = FlareUniforms::from_params(&FlareParams {
            color_count: 40,
            ..FlareParams::default()
        });
        assert_eq!(u.color_count, MAX_FLARE_COLORS as u32);
    }
}
