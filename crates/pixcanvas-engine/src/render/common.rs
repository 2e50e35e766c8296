//! GPU types and helpers shared by the canvas and blit pipelines.

use std::num::NonZeroU64;

use bytemuck::{Pod, Zeroable};

/// Offscreen color format. Values are stored as given (sRGB-encoded).
pub(crate) const COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;
pub(crate) const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
pub(crate) const ATLAS_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::R8Uint;

/// Depth written by a clear. The lowest shape depth maps to 0.0, so every
/// shape passes `GreaterEqual` against a freshly cleared target.
pub(crate) const CLEAR_DEPTH: f32 = 0.0;

// ── uniforms ──────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(crate) struct ScreenUniform {
    pub size: [f32; 2],
    pub _pad: [f32; 2], // 16-byte alignment
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(crate) struct BlitUniform {
    pub linearize: u32,
    pub _pad: [u32; 3],
}

/// Returns the `wgpu` minimum binding size for `T`, or `None` for zero-sized
/// types (which the binding then leaves unchecked).
#[inline]
pub(crate) fn min_size<T>() -> Option<NonZeroU64> {
    NonZeroU64::new(std::mem::size_of::<T>() as u64)
}

// ── layout entries ────────────────────────────────────────────────────────

pub(crate) fn uniform_entry<T>(binding: u32, visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: min_size::<T>(),
        },
        count: None,
    }
}

pub(crate) fn storage_entry(binding: u32, visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Storage { read_only: true },
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

pub(crate) fn index_texture_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            sample_type: wgpu::TextureSampleType::Uint,
            view_dimension: wgpu::TextureViewDimension::D2Array,
            multisampled: false,
        },
        count: None,
    }
}

// ── misc ──────────────────────────────────────────────────────────────────

#[inline]
pub(crate) fn wgpu_color(c: crate::palette::Color) -> wgpu::Color {
    wgpu::Color {
        r: c.r as f64,
        g: c.g as f64,
        b: c.b as f64,
        a: c.a as f64,
    }
}

/// Storage bindings must not be empty; pads `data` with one default element.
pub(crate) fn non_empty<T: Pod + Default>(data: &[T]) -> std::borrow::Cow<'_, [T]> {
    if data.is_empty() {
        std::borrow::Cow::Owned(vec![T::default()])
    } else {
        std::borrow::Cow::Borrowed(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniforms_are_16_byte_aligned() {
        assert_eq!(size_of::<ScreenUniform>(), 16);
        assert_eq!(size_of::<BlitUniform>(), 16);
    }

    #[test]
    fn empty_tables_get_one_placeholder() {
        let empty: [u32; 0] = [];
        assert_eq!(non_empty(&empty).as_ref(), &[0]);
        assert_eq!(non_empty(&[3u32, 4]).len(), 2);
    }
}
