use crate::dirty::DirtyRegion;

/// Drops every third frame in which only the stats changed.
///
/// Frames with object movement or a full redraw are never dropped.
#[derive(Debug, Clone)]
pub struct FrameSkipper {
    enabled: bool,
    stats_only_frames: u32,
}

impl FrameSkipper {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            stats_only_frames: 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Decide whether the frame described by `dirty` should be dropped.
    pub fn should_skip(&mut self, dirty: &DirtyRegion) -> bool {
        if !self.enabled || dirty.is_full() || dirty.objects_changed() {
            return false;
        }
        if dirty.stats_changed() {
            self.stats_only_frames = self.stats_only_frames.wrapping_add(1);
            return self.stats_only_frames % 3 == 0;
        }
        false
    }
}

impl Default for FrameSkipper {
    fn default() -> Self {
        Self::new(true)
    }
}
