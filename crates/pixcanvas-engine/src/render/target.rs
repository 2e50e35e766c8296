use crate::coords::Pixel;
use crate::scene::{Capacity, DrawIndirect, Param};

use super::common::{BlitUniform, ScreenUniform, COLOR_FORMAT, DEPTH_FORMAT};

/// GPU side of one canvas: attachments, command and parameter buffers, and
/// the uniforms that go with them.
///
/// Bind groups are built lazily; the draw group is rebuilt whenever the
/// shared tables it references are replaced.
pub(crate) struct GpuTarget {
    pub size: Pixel,
    pub capacity: Capacity,

    pub color: wgpu::Texture,
    pub color_view: wgpu::TextureView,
    pub depth_view: wgpu::TextureView,

    pub params: wgpu::Buffer,
    pub commands: wgpu::Buffer,
    pub screen_ubo: wgpu::Buffer,
    pub blit_ubo: wgpu::Buffer,

    pub draw_bind_group: Option<wgpu::BindGroup>,
    pub draw_generation: u64,
    pub blit_bind_group: Option<wgpu::BindGroup>,
}

impl GpuTarget {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue, size: Pixel, capacity: Capacity) -> Self {
        let (color, color_view, depth_view) = create_attachments(device, size);

        let params = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("pixcanvas params"),
            size: (capacity.params.max(1) as usize * size_of::<Param>()) as u64,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let commands = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("pixcanvas commands"),
            size: (capacity.commands.max(1) as usize * size_of::<DrawIndirect>()) as u64,
            usage: wgpu::BufferUsages::INDIRECT | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let screen_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("pixcanvas screen ubo"),
            size: size_of::<ScreenUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let blit_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("pixcanvas blit ubo"),
            size: size_of::<BlitUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let target = Self {
            size,
            capacity,
            color,
            color_view,
            depth_view,
            params,
            commands,
            screen_ubo,
            blit_ubo,
            draw_bind_group: None,
            draw_generation: 0,
            blit_bind_group: None,
        };
        target.write_screen(queue);
        target
    }

    /// Rebuilds both attachments at `size`. Contents are lost.
    pub fn resize(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, size: Pixel) {
        let (color, color_view, depth_view) = create_attachments(device, size);
        self.color.destroy();
        self.color = color;
        self.color_view = color_view;
        self.depth_view = depth_view;
        self.size = size;
        // The blit group samples the old color view.
        self.blit_bind_group = None;
        self.write_screen(queue);
    }

    pub fn destroy(&self) {
        self.color.destroy();
        self.params.destroy();
        self.commands.destroy();
    }

    fn write_screen(&self, queue: &wgpu::Queue) {
        let u = ScreenUniform {
            size: [self.size.x.max(1) as f32, self.size.y.max(1) as f32],
            _pad: [0.0; 2],
        };
        queue.write_buffer(&self.screen_ubo, 0, bytemuck::bytes_of(&u));
    }
}

fn create_attachments(device: &wgpu::Device, size: Pixel) -> (wgpu::Texture, wgpu::TextureView, wgpu::TextureView) {
    let extent = wgpu::Extent3d {
        width: size.x.max(1) as u32,
        height: size.y.max(1) as u32,
        depth_or_array_layers: 1,
    };

    let color = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("pixcanvas canvas color"),
        size: extent,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: COLOR_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        view_formats: &[],
    });
    let color_view = color.create_view(&wgpu::TextureViewDescriptor::default());

    let depth = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("pixcanvas canvas depth"),
        size: extent,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let depth_view = depth.create_view(&wgpu::TextureViewDescriptor::default());

    (color, color_view, depth_view)
}
