use crate::coords::Pixel;

/// One acquired swapchain image plus the encoder recording into it.
///
/// Holding a frame blocks acquisition of the next one; hand it to
/// [`Gpu::submit`](super::Gpu::submit) as soon as recording is done.
pub struct GpuFrame {
    pub(super) surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

impl GpuFrame {
    /// Size of the acquired image in physical pixels.
    pub fn size(&self) -> Pixel {
        let tex = &self.surface_texture.texture;
        Pixel::from_u32(tex.width(), tex.height())
    }

    /// Records a pass that fills the whole image with `color`.
    ///
    /// The value is written as-is; callers targeting an sRGB surface pass
    /// linear components.
    pub fn clear(&mut self, color: wgpu::Color) {
        let _rpass = self.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("pixcanvas window clear"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &self.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(color),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });
    }
}
