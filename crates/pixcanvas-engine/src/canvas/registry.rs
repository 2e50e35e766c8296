use super::{Canvas, SetupError};

/// Most canvases alive at once.
pub const MAX_CANVASES: usize = 0xFFFF;

/// Generational canvas handle.
///
/// Destroying a canvas bumps its slot's generation, so old handles resolve
/// to `None` even after the slot is reused. A slot whose generation runs out
/// is retired for good rather than wrapped.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct CanvasId {
    index: u16,
    generation: u16,
}

impl CanvasId {
    #[inline]
    pub fn index(self) -> u16 {
        self.index
    }

    #[inline]
    pub fn generation(self) -> u16 {
        self.generation
    }
}

#[derive(Debug)]
struct Slot {
    generation: u16,
    canvas: Option<Canvas>,
}

/// Slot storage for canvases.
#[derive(Debug)]
pub struct CanvasRegistry {
    slots: Vec<Slot>,
    free: Vec<u16>,
    live: usize,
    limit: usize,
}

impl CanvasRegistry {
    pub fn new() -> Self {
        Self::with_limit(MAX_CANVASES)
    }

    pub(crate) fn with_limit(limit: usize) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
            limit: limit.min(MAX_CANVASES),
        }
    }

    pub fn insert(&mut self, canvas: Canvas) -> Result<CanvasId, SetupError> {
        if self.live >= self.limit {
            return Err(SetupError::TooManyCanvases(self.limit));
        }

        let index = match self.free.pop() {
            Some(i) => i,
            None if self.slots.len() > u16::MAX as usize => {
                return Err(SetupError::TooManyCanvases(self.limit));
            }
            None => {
                self.slots.push(Slot { generation: 0, canvas: None });
                (self.slots.len() - 1) as u16
            }
        };

        let slot = &mut self.slots[index as usize];
        slot.canvas = Some(canvas);
        self.live += 1;
        Ok(CanvasId { index, generation: slot.generation })
    }

    pub fn get(&self, id: CanvasId) -> Option<&Canvas> {
        self.slots
            .get(id.index as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.canvas.as_ref())
    }

    pub fn get_mut(&mut self, id: CanvasId) -> Option<&mut Canvas> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.canvas.as_mut())
    }

    /// Takes a canvas out and retires its handle.
    pub fn remove(&mut self, id: CanvasId) -> Option<Canvas> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let canvas = slot.canvas.take()?;
        match slot.generation.checked_add(1) {
            Some(next) => {
                slot.generation = next;
                self.free.push(id.index);
            }
            None => log::debug!("canvas slot {} retired", id.index),
        }
        self.live -= 1;
        Some(canvas)
    }

    pub fn find(&self, name: &str) -> Option<CanvasId> {
        self.iter().find(|(_, c)| c.name() == Some(name)).map(|(id, _)| id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CanvasId, &Canvas)> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, s)| {
            let id = CanvasId { index: i as u16, generation: s.generation };
            s.canvas.as_ref().map(|c| (id, c))
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (CanvasId, &mut Canvas)> + '_ {
        self.slots.iter_mut().enumerate().filter_map(|(i, s)| {
            let id = CanvasId { index: i as u16, generation: s.generation };
            s.canvas.as_mut().map(|c| (id, c))
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }
}

impl Default for CanvasRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::CanvasConfig;

    fn canvas() -> Canvas {
        Canvas::new(CanvasConfig::default())
    }

    #[test]
    fn stale_ids_resolve_to_none_after_reuse() {
        let mut reg = CanvasRegistry::new();
        let a = reg.insert(canvas()).unwrap();
        assert!(reg.remove(a).is_some());
        assert!(reg.get(a).is_none());

        let b = reg.insert(canvas()).unwrap();
        assert_eq!(b.index(), a.index());
        assert_ne!(b, a);
        assert!(reg.get(a).is_none());
        assert!(reg.get(b).is_some());
        assert!(reg.remove(a).is_none());
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn exhausted_slot_is_retired_not_wrapped() {
        let mut reg = CanvasRegistry::new();
        let first = reg.insert(canvas()).unwrap();
        reg.remove(first);
        reg.slots[0].generation = u16::MAX;

        let last = reg.insert(canvas()).unwrap();
        assert_eq!((last.index(), last.generation()), (0, u16::MAX));
        assert!(reg.remove(last).is_some());

        let next = reg.insert(canvas()).unwrap();
        assert_eq!(next.index(), 1);
        assert!(reg.get(first).is_none());
        assert!(reg.get(last).is_none());
        assert!(reg.remove(last).is_none());
    }

    #[test]
    fn limit_is_a_setup_error() {
        let mut reg = CanvasRegistry::with_limit(2);
        reg.insert(canvas()).unwrap();
        let id = reg.insert(canvas()).unwrap();
        assert_eq!(reg.insert(canvas()), Err(SetupError::TooManyCanvases(2)));

        reg.remove(id);
        assert!(reg.insert(canvas()).is_ok());
    }
}
