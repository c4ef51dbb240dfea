use std::time::Instant;
use wgpu::util::DeviceExt;
use winit::dpi::PhysicalPosition;
use winit::keyboard::{Key, NamedKey};
use winit::{event::*, event_loop::EventLoop, window::WindowBuilder};

use formation_core::{
    compose_instances, instance_capacity, model_matrix, normalize_pointer, rgb_from_hex,
    PointerAction, PointerButton, PointerController, Scene, SceneConfig, SpriteInstance,
    BACKGROUND_BLACK, THEME_COLORS,
};
use glam::Vec2;

mod controls;

use controls::{command_for_key, Command, PARTICLE_SIZE_STEP};

static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
}

struct GpuState<'w> {
    window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    particle_pipeline: wgpu::RenderPipeline,
    ornament_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    quad_vb: wgpu::Buffer,
    instance_vb: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    width: u32,
    height: u32,
}

impl<'w> GpuState<'w> {
    async fn new(window: &'w winit::window::Window, max_instances: usize) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps.formats[0];
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene"),
            source: wgpu::ShaderSource::Wgsl(SCENE_WGSL.into()),
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("uniforms"),
            size: std::mem::size_of::<Uniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        // Quad vertices for two triangles
        let quad_vertices: [f32; 12] = [
            -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
        ];
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&quad_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let instance_vb = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instance_vb"),
            size: (std::mem::size_of::<SpriteInstance>() * max_instances.max(1)) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bg"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        // Particles glow where they overlap; decorations are opaque-ish sprites.
        let additive = wgpu::BlendState {
            color: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::SrcAlpha,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
            alpha: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::One,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
        };
        let particle_pipeline =
            create_sprite_pipeline(&device, &pipeline_layout, &shader, format, additive, "particles");
        let ornament_pipeline = create_sprite_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            format,
            wgpu::BlendState::ALPHA_BLENDING,
            "ornaments",
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            particle_pipeline,
            ornament_pipeline,
            uniform_buffer,
            quad_vb,
            instance_vb,
            bind_group,
            width: size.width.max(1),
            height: size.height.max(1),
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.width = new_size.width;
        self.height = new_size.height;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        log::info!("[gpu] resized to {}x{}", self.width, self.height);
    }

    fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    fn render(
        &mut self,
        scene: &Scene,
        instances: &mut Vec<SpriteInstance>,
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let camera = scene.camera(self.width as f32 / self.height as f32);
        self.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms {
                view: camera.view_matrix().to_cols_array_2d(),
                proj: camera.projection_matrix().to_cols_array_2d(),
                model: model_matrix(scene.assembly_rotation()).to_cols_array_2d(),
            }),
        );

        let layout = compose_instances(scene, instances);
        if !instances.is_empty() {
            self.queue
                .write_buffer(&self.instance_vb, 0, bytemuck::cast_slice(instances));
        }

        let [r, g, b] = rgb_from_hex(BACKGROUND_BLACK);
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("rpass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
            rpass.set_vertex_buffer(1, self.instance_vb.slice(..));
            if !layout.particles.is_empty() {
                rpass.set_pipeline(&self.particle_pipeline);
                rpass.draw(0..6, layout.particles.clone());
            }
            if !layout.ornaments.is_empty() {
                rpass.set_pipeline(&self.ornament_pipeline);
                rpass.draw(0..6, layout.ornaments.clone());
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn create_sprite_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    blend: wgpu::BlendState,
    label: &str,
) -> wgpu::RenderPipeline {
    let vertex_buffers = [
        // slot 0: quad corners
        wgpu::VertexBufferLayout {
            array_stride: (std::mem::size_of::<f32>() * 2) as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x2,
                offset: 0,
                shader_location: 0,
            }],
        },
        // slot 1: sprite instances
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SpriteInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 1,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32,
                    offset: 12,
                    shader_location: 2,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 16,
                    shader_location: 3,
                },
            ],
        },
    ];
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &vertex_buffers,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}

/// Host-side state: the scene plus the pointer fallback and key bindings.
struct App {
    scene: Scene,
    pointer: PointerController,
    shift: bool,
    color_index: usize,
    started: Instant,
    instances: Vec<SpriteInstance>,
}

impl App {
    fn new(scene: Scene) -> Self {
        let instances = Vec::with_capacity(instance_capacity(&scene));
        Self {
            scene,
            pointer: PointerController::new(),
            shift: false,
            color_index: 0,
            started: Instant::now(),
            instances,
        }
    }

    fn tick(&mut self) {
        self.scene.tick(self.started.elapsed().as_secs_f32());
    }

    fn sync_pointer_signal(&mut self) {
        self.scene.push_signal(self.pointer.signal());
    }

    fn on_cursor(&mut self, position: PhysicalPosition<f64>, surface: Vec2) {
        let px = Vec2::new(position.x as f32, position.y as f32);
        self.pointer.on_move(normalize_pointer(px, surface));
        self.sync_pointer_signal();
    }

    fn on_mouse(&mut self, state: ElementState, button: MouseButton) {
        let button = match button {
            MouseButton::Left => PointerButton::Primary,
            MouseButton::Right => PointerButton::Secondary,
            MouseButton::Middle => PointerButton::Middle,
            _ => return,
        };
        match state {
            ElementState::Pressed => {
                if self.pointer.on_press(button, self.shift) == PointerAction::ToggleZen {
                    self.scene.toggle_zen();
                }
            }
            ElementState::Released => self.pointer.on_release(),
        }
        self.sync_pointer_signal();
    }

    fn on_wheel(&mut self, delta: MouseScrollDelta) {
        // Positive means scrolling down, in pixels.
        let delta_y = match delta {
            MouseScrollDelta::LineDelta(_, y) => -y * 100.0,
            MouseScrollDelta::PixelDelta(p) => -p.y as f32,
        };
        self.pointer.on_wheel(delta_y);
        self.sync_pointer_signal();
    }

    /// Returns false when the app should exit.
    fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::SelectShape(kind) => self.scene.set_shape(kind),
            Command::ToggleZen => self.scene.toggle_zen(),
            Command::CycleColor => {
                self.color_index = (self.color_index + 1) % THEME_COLORS.len();
                let hex = format!("#{:06X}", THEME_COLORS[self.color_index]);
                if let Err(e) = self.scene.set_color(&hex) {
                    log::warn!("[app] {e}");
                }
            }
            Command::GrowParticles | Command::ShrinkParticles => {
                let step = if command == Command::GrowParticles {
                    PARTICLE_SIZE_STEP
                } else {
                    1.0 / PARTICLE_SIZE_STEP
                };
                let size = self.scene.appearance().particle_size() * step;
                if let Err(e) = self.scene.set_particle_size(size) {
                    log::warn!("[app] {e}");
                }
            }
            Command::Quit => return false,
        }
        true
    }
}

fn key_name(key: &Key) -> Option<&str> {
    match key {
        Key::Character(s) => Some(s.as_str()),
        Key::Named(NamedKey::Space) => Some(" "),
        Key::Named(NamedKey::Escape) => Some("Escape"),
        _ => None,
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
    log::info!("formation-native starting");

    let scene = Scene::new(SceneConfig::default())?;
    let mut app = App::new(scene);

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Formation (native)")
        .build(&event_loop)?;

    let mut state = pollster::block_on(GpuState::new(&window, instance_capacity(&app.scene)))
        .map_err(|e| {
            log::error!("gpu init failed: {e:?}");
            e
        })?;

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::Resized(size) => state.resize(size),
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::ModifiersChanged(modifiers) => app.shift = modifiers.state().shift_key(),
            WindowEvent::CursorMoved { position, .. } => app.on_cursor(position, state.size()),
            WindowEvent::MouseInput {
                state: button_state,
                button,
                ..
            } => app.on_mouse(button_state, button),
            WindowEvent::MouseWheel { delta, .. } => app.on_wheel(delta),
            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed && !event.repeat =>
            {
                let command = key_name(&event.logical_key).and_then(command_for_key);
                if let Some(command) = command {
                    if !app.apply(command) {
                        elwt.exit();
                    }
                }
            }
            _ => {}
        },
        Event::AboutToWait => {
            app.tick();
            match state.render(&app.scene, &mut app.instances) {
                Ok(_) => state.window.request_redraw(),
                Err(wgpu::SurfaceError::Lost) => state.resize(state.window.inner_size()),
                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                Err(_) => {}
            }
        }
        _ => {}
    })?;
    Ok(())
}
