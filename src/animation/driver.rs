use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::debug;

use super::{AnimationSnapshot, Animator};
use crate::geo::LatLng;

enum Command {
    SetRoute(Arc<Vec<LatLng>>),
}

/// Handle to the engine task.
///
/// Dropping it aborts the task, which is the teardown guarantee: no snapshot
/// is published afterwards.
pub struct EngineHandle {
    commands: mpsc::Sender<Command>,
    task: JoinHandle<()>,
}

impl EngineHandle {
    /// Hand a new curve to the engine. The current run is abandoned and the
    /// animator restarts from the first point — also when the curve has the
    /// same endpoints as the old one; identity is the hand-off itself.
    pub async fn set_route(&self, curve: Arc<Vec<LatLng>>) {
        let _ = self.commands.send(Command::SetRoute(curve)).await;
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

pub(super) fn spawn(
    tick_period: Duration,
    snapshots: watch::Sender<Arc<AnimationSnapshot>>,
) -> EngineHandle {
    let (tx, rx) = mpsc::channel(8);
    let task = tokio::spawn(run(tick_period, rx, snapshots));
    EngineHandle { commands: tx, task }
}

/// The engine loop: one task owns the animator and the only repeating timer.
///
/// Route replacement and tick delivery go through a single `select!`, so a
/// pending tick for an abandoned curve is dropped before the new run begins
/// and two tick streams can never overlap. The tick branch is disarmed
/// outside `Running`, which is what "stop scheduling" means here.
async fn run(
    tick_period: Duration,
    mut commands: mpsc::Receiver<Command>,
    snapshots: watch::Sender<Arc<AnimationSnapshot>>,
) {
    let mut animator = Animator::new();
    let mut ticker = interval(tick_period);
    // late ticks must not burst the marker forward
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            command = commands.recv() => match command {
                Some(Command::SetRoute(curve)) => {
                    debug!(points = curve.len(), "restarting animation");
                    animator.restart(curve);
                    ticker.reset();
                    let _ = snapshots.send(Arc::new(animator.snapshot()));
                }
                None => break,
            },
            _ = ticker.tick(), if animator.is_running() => {
                animator.step();
                let _ = snapshots.send(Arc::new(animator.snapshot()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{start_engine, Phase};
    use crate::route::generate_arc;

    const MELBOURNE: LatLng = LatLng { lat: -37.8136, lon: 144.9631 };
    const SYDNEY: LatLng = LatLng { lat: -33.8688, lon: 151.2093 };

    #[tokio::test(start_paused = true)]
    async fn route_runs_to_done_and_the_ticks_stop() {
        let (engine, mut rx) = start_engine(Duration::from_millis(100));
        let curve = Arc::new(generate_arc(MELBOURNE, SYDNEY, 5));
        engine.set_route(curve.clone()).await;

        // departure snapshot arrives before any tick
        rx.changed().await.unwrap();
        {
            let first = rx.borrow_and_update().clone();
            assert_eq!(first.phase, Phase::Running);
            assert_eq!(first.cursor, 0);
            assert_eq!(first.position, curve[0]);
        }

        loop {
            rx.changed().await.unwrap();
            let snapshot = rx.borrow_and_update().clone();
            if snapshot.phase == Phase::Done {
                assert_eq!(snapshot.cursor, curve.len() - 1);
                assert_eq!(snapshot.position, *curve.last().unwrap());
                break;
            }
        }

        // no further snapshot may be published after Done
        tokio::time::timeout(Duration::from_secs(10), rx.changed())
            .await
            .expect_err("engine kept ticking after Done");
    }

    #[tokio::test(start_paused = true)]
    async fn replacement_mid_flight_restarts_at_the_first_point() {
        let (engine, mut rx) = start_engine(Duration::from_millis(100));
        engine
            .set_route(Arc::new(generate_arc(MELBOURNE, SYDNEY, 50)))
            .await;

        // let a few ticks land
        loop {
            rx.changed().await.unwrap();
            if rx.borrow_and_update().cursor >= 3 {
                break;
            }
        }

        let fresh = Arc::new(generate_arc(SYDNEY, MELBOURNE, 50));
        engine.set_route(fresh.clone()).await;

        // a stale tick may still be in the watch slot; the restart snapshot
        // is the one with the cursor back at zero
        let snapshot = loop {
            rx.changed().await.unwrap();
            let snapshot = rx.borrow_and_update().clone();
            if snapshot.cursor == 0 {
                break snapshot;
            }
        };
        assert_eq!(snapshot.phase, Phase::Running);
        assert_eq!(snapshot.position, fresh[0]);

        // the old curve's ticks are gone; the next movement is on the new one
        rx.changed().await.unwrap();
        let next = rx.borrow_and_update().clone();
        assert_eq!(next.cursor, 1);
        assert_eq!(next.position, fresh[1]);
    }

    #[tokio::test(start_paused = true)]
    async fn reselecting_the_same_curve_instance_still_restarts() {
        let (engine, mut rx) = start_engine(Duration::from_millis(100));
        let curve = Arc::new(generate_arc(MELBOURNE, SYDNEY, 10));

        engine.set_route(curve.clone()).await;
        loop {
            rx.changed().await.unwrap();
            if rx.borrow_and_update().cursor >= 2 {
                break;
            }
        }

        engine.set_route(curve).await;
        loop {
            rx.changed().await.unwrap();
            if rx.borrow_and_update().cursor == 0 {
                break;
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_tears_the_engine_down() {
        let (engine, mut rx) = start_engine(Duration::from_millis(100));
        engine
            .set_route(Arc::new(generate_arc(MELBOURNE, SYDNEY, 50)))
            .await;
        rx.changed().await.unwrap();

        drop(engine);

        // the task is aborted: the sender side closes instead of ticking on
        loop {
            if rx.changed().await.is_err() {
                break;
            }
        }
    }
}
