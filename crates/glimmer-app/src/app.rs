use std::sync::Arc;
use std::time::Instant;

use glam::Vec2;
use glimmer_core::burst::BurstFrame;
use glimmer_core::presets::Preset;
use glimmer_core::tracking::{AnchorFilter, AnimationClock};
use glimmer_core::{BurstParams, FlareParams};
use glimmer_gpu::{
    burst_pipeline::BurstPass,
    context::{BurstUniforms, FlareUniforms},
    flare_pipeline::FlarePass,
    renderer::COMPOSITE_WGSL,
};
use winit::window::Window;

use crate::input::{next_mode, nudge_intensity, InputAction, InputState, Key};

/// How strongly the anchor filter lags behind the cursor.
const ANCHOR_DAMPNESS: f32 = 0.3;

// ---------------------------------------------------------------------------
// Simple FPS counter — logs to console once per second
// ---------------------------------------------------------------------------

struct FpsCounter {
    frames: u32,
    last_report: Instant,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            frames: 0,
            last_report: Instant::now(),
        }
    }

    /// Increment the frame count.  Returns the FPS value if a full second has
    /// elapsed since the last report (so the caller can log it).
    fn tick(&mut self) -> Option<f32> {
        self.frames += 1;
        let elapsed = self.last_report.elapsed().as_secs_f32();
        if elapsed >= 1.0 {
            let fps = self.frames as f32 / elapsed;
            self.frames = 0;
            self.last_report = Instant::now();
            Some(fps)
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface_config: wgpu::SurfaceConfiguration,

    // GPU passes (size-dependent resources rebuilt on resize)
    burst_pass: BurstPass,
    flare_pass: FlarePass,

    // Compositing fullscreen render pipeline
    composite_pipeline: wgpu::RenderPipeline,
    composite_bgl: wgpu::BindGroupLayout,
    composite_sampler: wgpu::Sampler,

    // Active configuration
    burst_base: BurstParams,
    flare_base: FlareParams,
    current_preset_idx: usize,

    // Cross-frame state the shading algorithms themselves never own
    clock: AnimationClock,
    anchor: AnchorFilter,

    // Input
    input: InputState,
    /// Last known cursor position in physical pixels.
    cursor_pos: (f64, f64),

    // Frame timing
    last_frame: Instant,
    fps: FpsCounter,
}

impl App {
    /// Initialise wgpu for a given window.  The window is wrapped in `Arc` so
    /// that the surface can safely hold a `'static` reference to it.
    pub fn new(window: Arc<Window>) -> Self {
        let size = window.inner_size();
        let width = size.width.max(1);
        let height = size.height.max(1);

        // ---- Instance -------------------------------------------------------
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // ---- Surface --------------------------------------------------------
        let surface = instance
            .create_surface(Arc::clone(&window))
            .expect("failed to create wgpu surface");

        // ---- Adapter --------------------------------------------------------
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("no suitable GPU adapter found");

        log::info!("GPU adapter: {}", adapter.get_info().name);

        // ---- Device & Queue -------------------------------------------------
        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("glimmer-app device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .expect("failed to create GPU device");

        // ---- Surface configuration ------------------------------------------
        let surface_caps = surface.get_capabilities(&adapter);

        let format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &surface_config);
        log::info!(
            "Surface configured: {}×{} {:?} Fifo",
            surface_config.width,
            surface_config.height,
            format
        );

        // ---- GPU passes -----------------------------------------------------
        let burst_pass = BurstPass::new(&device, width, height);
        let flare_pass = FlarePass::new(&device, width, height);

        // ---- Compositing render pipeline ------------------------------------
        let (composite_bgl, composite_sampler, composite_pipeline) =
            Self::build_composite_pipeline(&device, format);

        // ---- Configuration (start with SpectralBurst) -----------------------
        let (burst_base, flare_base) = Preset::SpectralBurst.build();

        Self {
            surface,
            device,
            queue,
            surface_config,
            burst_pass,
            flare_pass,
            composite_pipeline,
            composite_bgl,
            composite_sampler,
            burst_base,
            flare_base,
            current_preset_idx: 0,
            clock: AnimationClock::new(),
            anchor: AnchorFilter::new(Vec2::splat(0.5), ANCHOR_DAMPNESS),
            input: InputState::new(),
            cursor_pos: (width as f64 * 0.5, height as f64 * 0.5),
            last_frame: Instant::now(),
            fps: FpsCounter::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Build the compositing render pipeline (resolution-agnostic).
    // -------------------------------------------------------------------------

    fn build_composite_pipeline(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
    ) -> (wgpu::BindGroupLayout, wgpu::Sampler, wgpu::RenderPipeline) {
        // rgba32float is not filterable without an extra device feature; the
        // engine textures are surface-sized, so nearest sampling is exact.
        let texture_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: false },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        };

        let composite_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("composite_bgl"),
            entries: &[
                texture_entry(0),
                texture_entry(1),
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::NonFiltering),
                    count: None,
                },
            ],
        });

        let composite_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("composite_sampler"),
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            ..Default::default()
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("composite_pl"),
            bind_group_layouts: &[&composite_bgl],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("composite"),
            source: wgpu::ShaderSource::Wgsl(COMPOSITE_WGSL.into()),
        });

        let composite_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("composite_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        (composite_bgl, composite_sampler, composite_pipeline)
    }

    // -------------------------------------------------------------------------
    // Resize
    // -------------------------------------------------------------------------

    /// Reconfigure the surface and rebuild size-dependent GPU resources.
    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width == 0 || new_height == 0 {
            return;
        }
        self.surface_config.width = new_width;
        self.surface_config.height = new_height;
        self.surface.configure(&self.device, &self.surface_config);

        // Both engine output textures are tied to the resolution.
        self.burst_pass = BurstPass::new(&self.device, new_width, new_height);
        self.flare_pass = FlarePass::new(&self.device, new_width, new_height);

        log::debug!("Surface resized to {}×{}", new_width, new_height);
    }

    // -------------------------------------------------------------------------
    // Input — called by main.rs window_event handler
    // -------------------------------------------------------------------------

    /// Translate a key press and return the resulting action, if any.
    pub fn on_key_pressed(&self, key: Key) -> Option<InputAction> {
        self.input.on_key(key)
    }

    /// Track the cursor position in physical pixels.
    pub fn on_cursor_moved(&mut self, x: f64, y: f64) {
        self.cursor_pos = (x, y);
    }

    /// Apply an action to the app state.
    ///
    /// Returns `true` if the app should exit (i.e. action was `Quit`).
    pub fn handle_action(&mut self, action: InputAction) -> bool {
        match action {
            InputAction::LoadPreset(preset) => {
                log::info!("Loading preset: {}", preset.name());
                if let Some(idx) = Preset::ALL.iter().position(|&p| p == preset) {
                    self.current_preset_idx = idx;
                }
                (self.burst_base, self.flare_base) = preset.build();
            }

            InputAction::CycleNextPreset => {
                self.current_preset_idx = (self.current_preset_idx + 1) % Preset::ALL.len();
                let preset = Preset::ALL[self.current_preset_idx];
                log::info!("Cycling to preset: {}", preset.name());
                (self.burst_base, self.flare_base) = preset.build();
            }

            InputAction::TogglePause => {
                self.clock.toggle_paused();
                log::info!(
                    "Animation {}",
                    if self.clock.is_paused() { "paused" } else { "running" }
                );
            }

            InputAction::CycleAnimationMode => {
                self.burst_base.mode = next_mode(self.burst_base.mode);
                log::info!("Animation mode → {:?}", self.burst_base.mode);
            }

            InputAction::IntensityUp => {
                self.burst_base.intensity = nudge_intensity(self.burst_base.intensity, 0.25);
                self.flare_base.intensity = nudge_intensity(self.flare_base.intensity, 0.25);
                log::debug!("intensity → {:.2}", self.burst_base.intensity);
            }

            InputAction::IntensityDown => {
                self.burst_base.intensity = nudge_intensity(self.burst_base.intensity, -0.25);
                self.flare_base.intensity = nudge_intensity(self.flare_base.intensity, -0.25);
                log::debug!("intensity → {:.2}", self.burst_base.intensity);
            }

            InputAction::Reset => {
                let preset = Preset::ALL[self.current_preset_idx];
                log::info!("Reset to preset defaults: {}", preset.name());
                (self.burst_base, self.flare_base) = preset.build();
            }

            InputAction::Quit => return true,
        }
        false
    }

    // -------------------------------------------------------------------------
    // Render
    // -------------------------------------------------------------------------

    /// Run one full frame: advance the clock and anchor filter, snapshot the
    /// per-frame records, dispatch both engines, composite, present.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        // --- Timing ----------------------------------------------------------
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        let width = self.surface_config.width;
        let height = self.surface_config.height;
        let resolution = Vec2::new(width as f32, height as f32);

        // Mutable cross-frame state advances exactly once, before the
        // immutable per-frame records are built.
        let time = self.clock.tick(dt);
        let cursor = Vec2::new(
            (self.cursor_pos.0 as f32 / width as f32).clamp(0.0, 1.0),
            (self.cursor_pos.1 as f32 / height as f32).clamp(0.0, 1.0),
        );
        let smoothed = self.anchor.advance(cursor, dt);

        if let Some(fps) = self.fps.tick() {
            log::debug!(
                "FPS: {:.1}  preset: {}  mode: {:?}  t: {:.1}s",
                fps,
                Preset::ALL[self.current_preset_idx].name(),
                self.burst_base.mode,
                time,
            );
        }

        // --- Per-frame parameter records -------------------------------------
        let burst_params = BurstParams {
            resolution,
            time,
            anchor: smoothed,
            ..self.burst_base.clone()
        };
        let flare_params = FlareParams {
            resolution,
            // Pixel space, Y flipped relative to the cursor's origin.
            light_pos: Vec2::new(
                smoothed.x * width as f32,
                height as f32 - smoothed.y * height as f32,
            ),
            time,
            ..self.flare_base.clone()
        };

        let burst_uniforms = BurstUniforms::from_frame(&BurstFrame::new(burst_params));
        let flare_uniforms = FlareUniforms::from_params(&flare_params);

        // --- Acquire surface texture -----------------------------------------
        let output = self.surface.get_current_texture()?;
        let surface_view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });

        // --- 1. Engine compute passes ----------------------------------------
        self.burst_pass
            .dispatch(&self.device, &mut encoder, &self.queue, &burst_uniforms);
        self.flare_pass
            .dispatch(&self.device, &mut encoder, &self.queue, &flare_uniforms);

        // --- 2. Composite to the surface -------------------------------------
        let composite_bg = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("composite_bg"),
            layout: &self.composite_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&self.burst_pass.output_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&self.flare_pass.output_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&self.composite_sampler),
                },
            ],
        });

        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("composite-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.composite_pipeline);
            rpass.set_bind_group(0, &composite_bg, &[]);
            rpass.draw(0..6, 0..1); // two triangles, no vertex buffer
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}
