use wgpu::{BindGroupLayout, Buffer, ComputePipeline, Device, Queue, Texture, TextureView};

use crate::context::BurstUniforms;

/// The prismatic-burst compute pass: one pipeline, a uniform buffer, and the
/// rgba32float texture the 44-step ray march writes every frame.
pub struct BurstPass {
    pipeline: ComputePipeline,
    bind_group_layout: BindGroupLayout,
    uniform_buf: Buffer,

    pub output_tex: Texture,
    pub output_view: TextureView,
    pub width: u32,
    pub height: u32,
}

impl BurstPass {
    pub fn new(device: &Device, width: u32, height: u32) -> Self {
        // binding 0 : BurstUniforms uniform buffer
        // binding 1 : rgba32float storage texture (write-only)
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("burst_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::StorageTexture {
                        access: wgpu::StorageTextureAccess::WriteOnly,
                        format: wgpu::TextureFormat::Rgba32Float,
                        view_dimension: wgpu::TextureViewDimension::D2,
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("burst_pl"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let uniform_buf = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("burst_uniforms"),
            size: std::mem::size_of::<BurstUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let output_tex = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("burst_output"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba32Float,
            usage: wgpu::TextureUsages::STORAGE_BINDING | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let output_view = output_tex.create_view(&Default::default());

        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("burst"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/burst.wgsl").into()),
        });
        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("burst"),
            layout: Some(&pipeline_layout),
            module: &module,
            entry_point: "main",
            compilation_options: Default::default(),
            cache: None,
        });

        log::debug!("burst pass ready ({width}×{height})");

        Self {
            pipeline,
            bind_group_layout,
            uniform_buf,
            output_tex,
            output_view,
            width,
            height,
        }
    }

    /// Upload this frame's uniforms and record the march into `encoder`.
    pub fn dispatch(
        &self,
        device: &Device,
        encoder: &mut wgpu::CommandEncoder,
        queue: &Queue,
        uniforms: &BurstUniforms,
    ) {
        queue.write_buffer(&self.uniform_buf, 0, bytemuck::bytes_of(uniforms));

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("burst_bg"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: self.uniform_buf.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&self.output_view),
                },
            ],
        });

        let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
            label: Some("burst_pass"),
            timestamp_writes: None,
        });
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &bind_group, &[]);

        let wg = 8u32;
        pass.dispatch_workgroups(self.width.div_ceil(wg), self.height.div_ceil(wg), 1);
    }
}
