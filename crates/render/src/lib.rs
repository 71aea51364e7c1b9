//! Incremental render planning.
//!
//! The planner compares world snapshots between frames and emits a bounded
//! list of [`DrawOp`]s for a rendering collaborator. It never touches a
//! platform surface itself; collaborators implement [`RenderTarget`].
//!
//! Goals:
//! - Redraw only what moved, plus the tiles under it
//! - Skip frames where nothing changed
//! - Keep the planning hot path allocation-free

pub mod atlas;
pub mod dirty;
pub mod planner;
pub mod skip;

use arrayvec::ArrayVec;

pub use fruitland_core as core;
pub use fruitland_types as types;

pub use dirty::{Band, DirtyRegion};
pub use planner::{FramePlan, PlanDecision, RenderPlanner};
pub use skip::FrameSkipper;

use fruitland_types::DrawOp;

/// Upper bound on draw operations in one frame
pub const DRAW_LIST_CAPACITY: usize = 384;

/// Fixed-capacity draw list; one per frame.
pub type DrawList = ArrayVec<DrawOp, DRAW_LIST_CAPACITY>;

/// A rendering collaborator that executes draw lists.
pub trait RenderTarget {
    /// Execute `ops` in order. The list ends with [`DrawOp::Present`].
    fn submit(&mut self, ops: &[DrawOp]) -> anyhow::Result<()>;
}

impl<T: RenderTarget + ?Sized> RenderTarget for &mut T {
    fn submit(&mut self, ops: &[DrawOp]) -> anyhow::Result<()> {
        (**self).submit(ops)
    }
}

/// Counts submitted frames and keeps the last one; for tests and headless runs.
#[derive(Debug, Default, Clone)]
pub struct RecordingTarget {
    pub frames: usize,
    pub last: DrawList,
}

impl RenderTarget for RecordingTarget {
    fn submit(&mut self, ops: &[DrawOp]) -> anyhow::Result<()> {
        self.frames += 1;
        self.last.clear();
        self.last
            .try_extend_from_slice(ops)
            .map_err(|_| anyhow::anyhow!("frame of {} ops exceeds draw list capacity", ops.len()))?;
        Ok(())
    }
}
