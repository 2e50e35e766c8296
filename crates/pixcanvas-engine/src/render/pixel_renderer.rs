use std::collections::HashMap;
use std::ops::Range;

use anyhow::{bail, ensure, Result};
use wgpu::util::DeviceExt;

use crate::atlas::{AtlasEntry, GpuAtlasEntry, IndexedImage};
use crate::coords::Pixel;
use crate::gpu::{AtlasKind, Blit, TargetId};
use crate::palette::{Color, PALETTE_SIZE};
use crate::scene::{Capacity, DrawCmd, DrawIndirect, Param, Primitive};

use super::common::{
    index_texture_entry, non_empty, storage_entry, uniform_entry, wgpu_color, BlitUniform,
    ScreenUniform, ATLAS_FORMAT, CLEAR_DEPTH, COLOR_FORMAT, DEPTH_FORMAT,
};
use super::ctx::{RenderCtx, RenderTarget};
use super::target::GpuTarget;

/// Canvas renderer.
///
/// Owns every canvas target plus the tables shared by all of them (palette,
/// glyph atlas, picture atlas). Pipelines and tables are created on first use.
///
/// A canvas paint is one render pass: parameters and indirect records are
/// staged through the frame encoder, so several paints of the same target in
/// one frame keep their order.
#[derive(Default)]
pub struct PixelRenderer {
    draw: Option<DrawPipelines>,

    blit_format: Option<wgpu::TextureFormat>,
    blit_pipeline: Option<wgpu::RenderPipeline>,
    blit_layout: Option<wgpu::BindGroupLayout>,
    sampler: Option<wgpu::Sampler>,

    shared: Option<SharedTables>,
    shared_generation: u64,

    targets: HashMap<u32, GpuTarget>,
    next_target: u32,

    /// `first_instance` in indirect records is honored by the device.
    indirect_first_instance: bool,
    warned_direct: bool,
}

struct DrawPipelines {
    layout: wgpu::BindGroupLayout,
    strip: wgpu::RenderPipeline,
    lines: wgpu::RenderPipeline,
    triangles: wgpu::RenderPipeline,
}

impl DrawPipelines {
    fn get(&self, primitive: Primitive) -> &wgpu::RenderPipeline {
        match primitive {
            Primitive::TriangleStrip => &self.strip,
            Primitive::LineList => &self.lines,
            Primitive::TriangleList => &self.triangles,
        }
    }
}

struct AtlasTables {
    view: wgpu::TextureView,
    map: wgpu::Buffer,
}

struct SharedTables {
    palette: wgpu::Buffer,
    glyphs: AtlasTables,
    pictures: AtlasTables,
}

impl PixelRenderer {
    /// Creates a renderer for a device exposing `features`.
    pub fn new(features: wgpu::Features) -> Self {
        Self {
            indirect_first_instance: features.contains(wgpu::Features::INDIRECT_FIRST_INSTANCE),
            ..Self::default()
        }
    }

    /// Number of live canvas targets.
    #[inline]
    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    // ── targets ───────────────────────────────────────────────────────────

    pub(crate) fn create_target(&mut self, ctx: &RenderCtx<'_>, size: Pixel, capacity: Capacity) -> Result<TargetId> {
        check_target_size(ctx.device, size)?;

        let max_storage = ctx.device.limits().max_storage_buffer_binding_size as u64;
        let params_bytes = capacity.params as u64 * size_of::<Param>() as u64;
        ensure!(
            params_bytes <= max_storage,
            "parameter buffer of {params_bytes} bytes exceeds the {max_storage} byte storage limit",
        );

        let id = self.next_target;
        self.next_target = self.next_target.wrapping_add(1);
        self.targets
            .insert(id, GpuTarget::new(ctx.device, ctx.queue, size, capacity));
        log::debug!("canvas target {id}: {}x{}", size.x, size.y);
        Ok(TargetId(id))
    }

    pub(crate) fn resize_target(&mut self, ctx: &RenderCtx<'_>, id: TargetId, size: Pixel) -> Result<()> {
        check_target_size(ctx.device, size)?;
        let Some(target) = self.targets.get_mut(&id.0) else {
            bail!("unknown canvas target {}", id.0);
        };
        target.resize(ctx.device, ctx.queue, size);
        log::debug!("canvas target {}: resized to {}x{}", id.0, size.x, size.y);
        Ok(())
    }

    pub(crate) fn destroy_target(&mut self, id: TargetId) {
        if let Some(target) = self.targets.remove(&id.0) {
            target.destroy();
        }
    }

    // ── shared tables ─────────────────────────────────────────────────────

    pub(crate) fn upload_palette(&mut self, ctx: &RenderCtx<'_>, colors: &[Color]) -> Result<()> {
        let shared = self.ensure_shared(ctx.device);

        let mut table = [[0.0f32; 4]; PALETTE_SIZE];
        for (slot, c) in table.iter_mut().zip(colors.iter()) {
            *slot = c.to_array();
        }
        ctx.queue
            .write_buffer(&shared.palette, 0, bytemuck::cast_slice(&table));
        Ok(())
    }

    /// Replaces one atlas. Draw bind groups pick the new tables up lazily.
    pub(crate) fn upload_atlas(
        &mut self,
        ctx: &RenderCtx<'_>,
        kind: AtlasKind,
        pages: &[IndexedImage],
        entries: &[AtlasEntry],
    ) -> Result<()> {
        let limits = ctx.device.limits();
        ensure!(
            pages.len() as u32 <= limits.max_texture_array_layers,
            "{} atlas pages exceed the {} layer limit",
            pages.len(),
            limits.max_texture_array_layers,
        );
        if let Some(page) = pages.first() {
            ensure!(
                page.width() <= limits.max_texture_dimension_2d
                    && page.height() <= limits.max_texture_dimension_2d,
                "atlas page of {}x{} exceeds the {} texel limit",
                page.width(),
                page.height(),
                limits.max_texture_dimension_2d,
            );
        }

        let tables = create_atlas(ctx, kind, pages, entries);
        self.ensure_shared(ctx.device);
        if let Some(shared) = self.shared.as_mut() {
            match kind {
                AtlasKind::Glyphs => shared.glyphs = tables,
                AtlasKind::Pictures => shared.pictures = tables,
            }
        }
        self.shared_generation += 1;
        log::debug!("{kind:?} atlas: {} pages, {} entries", pages.len(), entries.len());
        Ok(())
    }

    fn ensure_shared(&mut self, device: &wgpu::Device) -> &SharedTables {
        self.shared.get_or_insert_with(|| {
            let palette = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("pixcanvas palette"),
                size: (PALETTE_SIZE * size_of::<[f32; 4]>()) as u64,
                usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            SharedTables {
                palette,
                glyphs: empty_atlas(device, "pixcanvas glyph atlas"),
                pictures: empty_atlas(device, "pixcanvas picture atlas"),
            }
        })
    }

    // ── painting ──────────────────────────────────────────────────────────

    pub(crate) fn clear_target(&mut self, target: &mut RenderTarget<'_>, id: TargetId, color: Color) -> Result<()> {
        let Some(t) = self.targets.get(&id.0) else {
            bail!("unknown canvas target {}", id.0);
        };

        let _rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("pixcanvas clear pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &t.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu_color(color)),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &t.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(CLEAR_DEPTH),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });
        Ok(())
    }

    /// Stages `commands` and `params` into the target and issues them in order,
    /// one multi-draw per run of commands sharing a topology.
    pub(crate) fn draw_indirect(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        id: TargetId,
        commands: &[DrawCmd],
        params: &[Param],
    ) -> Result<()> {
        self.ensure_draw_pipelines(ctx.device);
        self.ensure_shared(ctx.device);

        let Some(t) = self.targets.get_mut(&id.0) else {
            bail!("unknown canvas target {}", id.0);
        };
        ensure!(
            commands.len() <= t.capacity.commands as usize && params.len() <= t.capacity.params as usize,
            "{} commands and {} params exceed the target capacity of {} and {}",
            commands.len(),
            params.len(),
            t.capacity.commands,
            t.capacity.params,
        );
        if commands.is_empty() {
            return Ok(());
        }

        let records: Vec<DrawIndirect> = commands.iter().map(DrawCmd::indirect).collect();
        stage(ctx.device, target.encoder, "pixcanvas params staging", bytemuck::cast_slice(params), &t.params);
        stage(ctx.device, target.encoder, "pixcanvas commands staging", bytemuck::cast_slice(&records), &t.commands);

        let (Some(draw), Some(shared)) = (self.draw.as_ref(), self.shared.as_ref()) else {
            return Ok(());
        };
        if t.draw_bind_group.is_none() || t.draw_generation != self.shared_generation {
            t.draw_bind_group = Some(draw_bind_group(ctx.device, &draw.layout, t, shared));
            t.draw_generation = self.shared_generation;
        }
        let Some(bind_group) = t.draw_bind_group.as_ref() else {
            return Ok(());
        };

        if !self.indirect_first_instance && !self.warned_direct {
            log::warn!("indirect first-instance is unsupported; issuing direct draws");
            self.warned_direct = true;
        }

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("pixcanvas draw pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &t.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &t.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_bind_group(0, bind_group, &[]);
        for (primitive, run) in primitive_runs(commands) {
            rpass.set_pipeline(draw.get(primitive));
            if self.indirect_first_instance {
                let offset = (run.start * size_of::<DrawIndirect>()) as u64;
                rpass.multi_draw_indirect(&t.commands, offset, run.len() as u32);
            } else {
                for cmd in &commands[run] {
                    rpass.draw(0..cmd.vertex_count, cmd.base..cmd.base + cmd.instance_count);
                }
            }
        }
        Ok(())
    }

    /// Copies a target onto the window surface.
    ///
    /// A placement that does not fit the surface is skipped; it happens for a
    /// frame while a window resize is pending.
    pub(crate) fn blit_to_window(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        id: TargetId,
        blit: Blit,
    ) -> Result<()> {
        self.ensure_blit_pipeline(ctx);

        let Some(t) = self.targets.get_mut(&id.0) else {
            bail!("unknown canvas target {}", id.0);
        };
        let Some(viewport) = blit_viewport(blit, ctx.surface_size) else {
            log::debug!(
                "canvas target {} ({}x{} at x{}) does not fit the {}x{} surface; skipped",
                id.0,
                blit.size.x,
                blit.size.y,
                blit.pixel,
                ctx.surface_size.x,
                ctx.surface_size.y,
            );
            return Ok(());
        };

        let (Some(pipeline), Some(layout), Some(sampler)) =
            (self.blit_pipeline.as_ref(), self.blit_layout.as_ref(), self.sampler.as_ref())
        else {
            return Ok(());
        };

        let u = BlitUniform {
            linearize: ctx.surface_format.is_srgb() as u32,
            _pad: [0; 3],
        };
        ctx.queue.write_buffer(&t.blit_ubo, 0, bytemuck::bytes_of(&u));

        if t.blit_bind_group.is_none() {
            t.blit_bind_group = Some(ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("pixcanvas blit bind group"),
                layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&t.color_view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(sampler),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: t.blit_ubo.as_entire_binding(),
                    },
                ],
            }));
        }
        let Some(bind_group) = t.blit_bind_group.as_ref() else {
            return Ok(());
        };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("pixcanvas blit pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        let [x, y, w, h] = viewport;
        rpass.set_viewport(x, y, w, h, 0.0, 1.0);
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.draw(0..4, 0..1);
        Ok(())
    }

    // ── pipelines ─────────────────────────────────────────────────────────

    fn ensure_draw_pipelines(&mut self, device: &wgpu::Device) {
        if self.draw.is_some() {
            return;
        }

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("pixcanvas pixel shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/pixel.wgsl").into()),
        });

        let both = wgpu::ShaderStages::VERTEX_FRAGMENT;
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("pixcanvas pixel bgl"),
            entries: &[
                uniform_entry::<ScreenUniform>(0, wgpu::ShaderStages::VERTEX),
                storage_entry(1, both),
                storage_entry(2, wgpu::ShaderStages::FRAGMENT),
                storage_entry(3, both),
                storage_entry(4, both),
                index_texture_entry(5),
                index_texture_entry(6),
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pixcanvas pixel pipeline layout"),
            bind_group_layouts: &[&layout],
            immediate_size: 0,
        });

        let build = |label: &str, topology: wgpu::PrimitiveTopology| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: COLOR_FORMAT,
                        blend: None,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState {
                    topology,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::GreaterEqual,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            })
        };

        self.draw = Some(DrawPipelines {
            strip: build("pixcanvas strip pipeline", wgpu::PrimitiveTopology::TriangleStrip),
            lines: build("pixcanvas line pipeline", wgpu::PrimitiveTopology::LineList),
            triangles: build("pixcanvas triangle pipeline", wgpu::PrimitiveTopology::TriangleList),
            layout,
        });
    }

    fn ensure_blit_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.blit_format == Some(ctx.surface_format) && self.blit_pipeline.is_some() {
            return;
        }
        let device = ctx.device;

        let layout = self.blit_layout.get_or_insert_with(|| {
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("pixcanvas blit bgl"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                    uniform_entry::<BlitUniform>(2, wgpu::ShaderStages::FRAGMENT),
                ],
            })
        });

        self.sampler.get_or_insert_with(|| {
            device.create_sampler(&wgpu::SamplerDescriptor {
                label: Some("pixcanvas nearest sampler"),
                address_mode_u: wgpu::AddressMode::ClampToEdge,
                address_mode_v: wgpu::AddressMode::ClampToEdge,
                address_mode_w: wgpu::AddressMode::ClampToEdge,
                mag_filter: wgpu::FilterMode::Nearest,
                min_filter: wgpu::FilterMode::Nearest,
                ..Default::default()
            })
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("pixcanvas blit shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/blit.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pixcanvas blit pipeline layout"),
            bind_group_layouts: &[&*layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("pixcanvas blit pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.blit_format = Some(ctx.surface_format);
        self.blit_pipeline = Some(pipeline);
    }
}

// ── helpers ───────────────────────────────────────────────────────────────

fn check_target_size(device: &wgpu::Device, size: Pixel) -> Result<()> {
    ensure!(
        size.x > 0 && size.y > 0,
        "framebuffer incomplete: empty {}x{} canvas",
        size.x,
        size.y,
    );
    let max = device.limits().max_texture_dimension_2d;
    if size.x as u32 > max || size.y as u32 > max {
        bail!(
            "framebuffer incomplete: {}x{} exceeds the {max} texel limit",
            size.x,
            size.y,
        );
    }
    Ok(())
}

/// Copies `bytes` into `dst` through a staging buffer recorded on `encoder`.
fn stage(device: &wgpu::Device, encoder: &mut wgpu::CommandEncoder, label: &str, bytes: &[u8], dst: &wgpu::Buffer) {
    if bytes.is_empty() {
        return;
    }
    let staging = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytes,
        usage: wgpu::BufferUsages::COPY_SRC,
    });
    encoder.copy_buffer_to_buffer(&staging, 0, dst, 0, bytes.len() as u64);
}

/// Splits `commands` into maximal runs sharing a topology, in order.
fn primitive_runs(commands: &[DrawCmd]) -> Vec<(Primitive, Range<usize>)> {
    let mut runs: Vec<(Primitive, Range<usize>)> = Vec::new();
    for (i, cmd) in commands.iter().enumerate() {
        let primitive = cmd.kind.primitive();
        match runs.last_mut() {
            Some((p, run)) if *p == primitive => run.end = i + 1,
            _ => runs.push((primitive, i..i + 1)),
        }
    }
    runs
}

/// Window viewport `[x, y, w, h]` for a blit, if it lies inside the surface.
fn blit_viewport(blit: Blit, surface: Pixel) -> Option<[f32; 4]> {
    let pixel = blit.pixel.max(1) as i32;
    let (x, y) = (blit.origin.x as i32, blit.origin.y as i32);
    let (w, h) = (blit.size.x as i32 * pixel, blit.size.y as i32 * pixel);

    let inside = x >= 0
        && y >= 0
        && w > 0
        && h > 0
        && x + w <= surface.x as i32
        && y + h <= surface.y as i32;
    inside.then(|| [x as f32, y as f32, w as f32, h as f32])
}

fn empty_atlas(device: &wgpu::Device, label: &str) -> AtlasTables {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width: 1,
            height: 1,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: ATLAS_FORMAT,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor {
        dimension: Some(wgpu::TextureViewDimension::D2Array),
        ..Default::default()
    });
    let map = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("pixcanvas empty atlas map"),
        contents: bytemuck::bytes_of(&GpuAtlasEntry::default()),
        usage: wgpu::BufferUsages::STORAGE,
    });
    AtlasTables { view, map }
}

fn create_atlas(ctx: &RenderCtx<'_>, kind: AtlasKind, pages: &[IndexedImage], entries: &[AtlasEntry]) -> AtlasTables {
    let label = match kind {
        AtlasKind::Glyphs => "pixcanvas glyph atlas",
        AtlasKind::Pictures => "pixcanvas picture atlas",
    };
    let (w, h) = pages
        .first()
        .map_or((1, 1), |p| (p.width().max(1), p.height().max(1)));

    let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width: w,
            height: h,
            depth_or_array_layers: (pages.len() as u32).max(1),
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: ATLAS_FORMAT,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    for (layer, page) in pages.iter().enumerate() {
        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d {
                    x: 0,
                    y: 0,
                    z: layer as u32,
                },
                aspect: wgpu::TextureAspect::All,
            },
            page.pixels(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(page.width()),
                rows_per_image: Some(page.height()),
            },
            wgpu::Extent3d {
                width: page.width(),
                height: page.height(),
                depth_or_array_layers: 1,
            },
        );
    }

    let view = texture.create_view(&wgpu::TextureViewDescriptor {
        dimension: Some(wgpu::TextureViewDimension::D2Array),
        ..Default::default()
    });

    let gpu_entries: Vec<GpuAtlasEntry> = entries.iter().map(|e| e.to_gpu()).collect();
    let map = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("pixcanvas atlas map"),
        contents: bytemuck::cast_slice(&non_empty(&gpu_entries)),
        usage: wgpu::BufferUsages::STORAGE,
    });

    AtlasTables { view, map }
}

fn draw_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    target: &GpuTarget,
    shared: &SharedTables,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("pixcanvas pixel bind group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: target.screen_ubo.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: target.params.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: shared.palette.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 3,
                resource: shared.glyphs.map.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 4,
                resource: shared.pictures.map.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 5,
                resource: wgpu::BindingResource::TextureView(&shared.glyphs.view),
            },
            wgpu::BindGroupEntry {
                binding: 6,
                resource: wgpu::BindingResource::TextureView(&shared.pictures.view),
            },
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::ShapeKind;

    #[test]
    fn runs_split_on_topology_change_only() {
        let cmds = [
            DrawCmd::new(ShapeKind::Box, 0),
            DrawCmd::new(ShapeKind::Glyph, 1),
            DrawCmd::new(ShapeKind::Line, 2),
            DrawCmd::new(ShapeKind::Line, 3),
            DrawCmd::new(ShapeKind::Triangle, 4),
            DrawCmd::new(ShapeKind::Picture, 6),
        ];
        let runs = primitive_runs(&cmds);
        assert_eq!(
            runs,
            vec![
                (Primitive::TriangleStrip, 0..2),
                (Primitive::LineList, 2..4),
                (Primitive::TriangleList, 4..5),
                (Primitive::TriangleStrip, 5..6),
            ]
        );
        assert!(primitive_runs(&[]).is_empty());
    }

    #[test]
    fn blit_viewport_scales_by_pixel_size() {
        let blit = Blit { origin: Pixel::new(1, 1), pixel: 4, size: Pixel::new(320, 180) };
        assert_eq!(
            blit_viewport(blit, Pixel::new(1283, 722)),
            Some([1.0, 1.0, 1280.0, 720.0])
        );
    }

    #[test]
    fn blit_viewport_rejects_overflowing_placement() {
        let blit = Blit { origin: Pixel::new(0, 0), pixel: 2, size: Pixel::new(640, 360) };
        assert_eq!(blit_viewport(blit, Pixel::new(1000, 700)), None);
        assert_eq!(blit_viewport(Blit { origin: Pixel::new(-1, 0), ..blit }, Pixel::new(2000, 2000)), None);
    }
}
