use std::collections::HashMap;

use anyhow::{bail, Context};

use crate::atlas::{AtlasEntry, IndexedImage};
use crate::coords::Pixel;
use crate::palette::Color;
use crate::scene::{Capacity, DrawCmd, DrawIndirect, Param, ShapeKind};

use super::{AtlasKind, Blit, GpuFacade, TargetId};

/// One call received by a [`RecordingGpu`].
#[derive(Debug, Clone, PartialEq)]
pub enum GpuCall {
    CreateTarget { id: TargetId, size: Pixel, capacity: Capacity },
    ResizeTarget { id: TargetId, size: Pixel },
    DestroyTarget { id: TargetId },
    UploadPalette { colors: Vec<Color> },
    UploadAtlas { kind: AtlasKind, pages: usize, entries: Vec<AtlasEntry> },
    ClearTarget { id: TargetId, color: Color },
    DrawIndirect { id: TargetId, kinds: Vec<ShapeKind>, records: Vec<DrawIndirect>, params: Vec<Param> },
    Blit { id: TargetId, blit: Blit },
}

#[derive(Debug, Clone)]
struct Target {
    size: Pixel,
    capacity: Capacity,
    fill: Option<Color>,
}

/// In-memory [`GpuFacade`] that records every call.
///
/// Targets keep their size and last clear color so that tests can check what
/// a canvas would show. A maximum target size can be set to make target
/// creation fail the way a driver refusing a framebuffer would.
#[derive(Debug, Default)]
pub struct RecordingGpu {
    calls: Vec<GpuCall>,
    targets: HashMap<TargetId, Target>,
    next_id: u32,
    max_target_size: Option<Pixel>,
}

impl RecordingGpu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuses targets larger than `max` in either dimension.
    pub fn with_max_target_size(max: Pixel) -> Self {
        Self { max_target_size: Some(max), ..Self::default() }
    }

    #[inline]
    pub fn calls(&self) -> &[GpuCall] {
        &self.calls
    }

    /// Returns the recorded calls and forgets them.
    pub fn take_calls(&mut self) -> Vec<GpuCall> {
        std::mem::take(&mut self.calls)
    }

    /// Number of recorded calls matching `pred`.
    pub fn count(&self, pred: impl Fn(&GpuCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    /// Size of a live target.
    pub fn target_size(&self, id: TargetId) -> Option<Pixel> {
        self.targets.get(&id).map(|t| t.size)
    }

    /// Color of the last clear applied to a live target.
    pub fn target_fill(&self, id: TargetId) -> Option<Color> {
        self.targets.get(&id).and_then(|t| t.fill)
    }

    #[inline]
    pub fn live_targets(&self) -> usize {
        self.targets.len()
    }

    fn check_size(&self, size: Pixel) -> anyhow::Result<()> {
        if size.is_empty() {
            bail!("target size {}x{} is empty", size.x, size.y);
        }
        if let Some(max) = self.max_target_size {
            if size.x > max.x || size.y > max.y {
                bail!("framebuffer incomplete: {}x{} exceeds {}x{}", size.x, size.y, max.x, max.y);
            }
        }
        Ok(())
    }

    fn target_mut(&mut self, id: TargetId) -> anyhow::Result<&mut Target> {
        self.targets.get_mut(&id).with_context(|| format!("unknown target {id:?}"))
    }
}

impl GpuFacade for RecordingGpu {
    fn create_target(&mut self, size: Pixel, capacity: Capacity) -> anyhow::Result<TargetId> {
        self.check_size(size)?;
        let id = TargetId(self.next_id);
        self.next_id += 1;
        self.targets.insert(id, Target { size, capacity, fill: None });
        self.calls.push(GpuCall::CreateTarget { id, size, capacity });
        Ok(id)
    }

    fn resize_target(&mut self, id: TargetId, size: Pixel) -> anyhow::Result<()> {
        self.check_size(size)?;
        let target = self.target_mut(id)?;
        target.size = size;
        target.fill = None;
        self.calls.push(GpuCall::ResizeTarget { id, size });
        Ok(())
    }

    fn destroy_target(&mut self, id: TargetId) {
        if self.targets.remove(&id).is_some() {
            self.calls.push(GpuCall::DestroyTarget { id });
        }
    }

    fn upload_palette(&mut self, colors: &[Color]) -> anyhow::Result<()> {
        self.calls.push(GpuCall::UploadPalette { colors: colors.to_vec() });
        Ok(())
    }

    fn upload_atlas(&mut self, kind: AtlasKind, pages: &[IndexedImage], entries: &[AtlasEntry]) -> anyhow::Result<()> {
        self.calls.push(GpuCall::UploadAtlas { kind, pages: pages.len(), entries: entries.to_vec() });
        Ok(())
    }

    fn clear_target(&mut self, id: TargetId, color: Color) -> anyhow::Result<()> {
        self.target_mut(id)?.fill = Some(color);
        self.calls.push(GpuCall::ClearTarget { id, color });
        Ok(())
    }

    fn draw_indirect(&mut self, id: TargetId, commands: &[DrawCmd], params: &[Param]) -> anyhow::Result<()> {
        let cap = self.target_mut(id)?.capacity;
        if commands.len() > cap.commands as usize || params.len() > cap.params as usize {
            bail!(
                "batch of {} commands / {} params exceeds target capacity {cap:?}",
                commands.len(),
                params.len()
            );
        }
        self.calls.push(GpuCall::DrawIndirect {
            id,
            kinds: commands.iter().map(|c| c.kind).collect(),
            records: commands.iter().map(DrawCmd::indirect).collect(),
            params: params.to_vec(),
        });
        Ok(())
    }

    fn blit_to_window(&mut self, id: TargetId, blit: Blit) -> anyhow::Result<()> {
        self.target_mut(id)?;
        self.calls.push(GpuCall::Blit { id, blit });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refuses_oversized_targets() {
        let mut gpu = RecordingGpu::with_max_target_size(Pixel::new(100, 100));
        assert!(gpu.create_target(Pixel::new(100, 100), Capacity::default()).is_ok());
        let err = gpu.create_target(Pixel::new(101, 10), Capacity::default()).unwrap_err();
        assert!(err.to_string().contains("framebuffer incomplete"));
        assert_eq!(gpu.live_targets(), 1);
    }

    #[test]
    fn unknown_targets_are_errors() {
        let mut gpu = RecordingGpu::new();
        let id = gpu.create_target(Pixel::new(4, 4), Capacity::default()).unwrap();
        gpu.destroy_target(id);
        assert!(gpu.clear_target(id, Color::opaque(1, 2, 3)).is_err());
        assert!(gpu.draw_indirect(id, &[], &[]).is_err());
    }
}
