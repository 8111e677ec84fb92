mod animator;
mod driver;

pub use animator::Animator;
pub use driver::EngineHandle;

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use crate::geo::LatLng;

/// Lifecycle of the animator: `Idle` before any route, `Running` while the
/// cursor moves, `Done` at the last point. A new route always lands back in
/// `Running`, never `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Done,
}

/// Animation state shared between the engine task and the view.
#[derive(Debug, Clone)]
pub struct AnimationSnapshot {
    pub phase: Phase,
    /// Index of the curve point the marker sits on.
    pub cursor: usize,
    pub position: LatLng,
    /// Initial bearing toward the point being entered, degrees clockwise
    /// from north in `(-180, 180]`. Delivered raw — the view applies no
    /// visual rotation correction.
    pub heading: f64,
}

impl Default for AnimationSnapshot {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            cursor: 0,
            position: LatLng::new(0.0, 0.0),
            heading: 0.0,
        }
    }
}

/// Create the animation pipeline: one engine task stepping the animator at
/// `tick_period`, publishing a snapshot per change.
pub fn start_engine(
    tick_period: Duration,
) -> (EngineHandle, watch::Receiver<Arc<AnimationSnapshot>>) {
    let (tx, rx) = watch::channel(Arc::new(AnimationSnapshot::default()));
    (driver::spawn(tick_period, tx), rx)
}
