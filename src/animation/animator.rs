use std::sync::Arc;

use crate::geo::{initial_bearing, LatLng};

use super::{AnimationSnapshot, Phase};

/// Discrete-time cursor over a fixed curve.
///
/// `Idle` until the first curve arrives, then `Running` until the cursor
/// reaches the last index, then `Done`. A replacement curve unconditionally
/// re-enters `Running` at index zero — there is no way back to `Idle`.
/// The animator itself is pure state; the driver owns the timer.
#[derive(Debug, Clone)]
pub struct Animator {
    curve: Arc<Vec<LatLng>>,
    cursor: usize,
    position: LatLng,
    heading: f64,
    phase: Phase,
}

impl Animator {
    pub fn new() -> Self {
        Self {
            curve: Arc::new(Vec::new()),
            cursor: 0,
            position: LatLng::new(0.0, 0.0),
            heading: 0.0,
            phase: Phase::Idle,
        }
    }

    /// Adopt a new curve and re-enter `Running` at its first point.
    ///
    /// Emission state is primed immediately: position is the first point and
    /// heading faces the second one (zero for a single-point curve), so a
    /// snapshot taken before any tick already shows the departure.
    pub fn restart(&mut self, curve: Arc<Vec<LatLng>>) {
        debug_assert!(!curve.is_empty(), "routes always carry a curve");

        self.position = curve[0];
        self.heading = if curve.len() >= 2 {
            initial_bearing(curve[0], curve[1])
        } else {
            0.0
        };
        self.cursor = 0;
        self.curve = curve;
        self.phase = Phase::Running;
    }

    /// One tick. At the last index the phase flips to `Done` and the cursor,
    /// position, and heading stay put; otherwise the cursor advances, the
    /// heading turns toward the new point, and the position moves onto it.
    pub fn step(&mut self) {
        if self.phase != Phase::Running {
            return;
        }
        if self.cursor == self.curve.len() - 1 {
            self.phase = Phase::Done;
            return;
        }

        let next = self.cursor + 1;
        self.heading = initial_bearing(self.curve[self.cursor], self.curve[next]);
        self.position = self.curve[next];
        self.cursor = next;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn snapshot(&self) -> AnimationSnapshot {
        AnimationSnapshot {
            phase: self.phase,
            cursor: self.cursor,
            position: self.position,
            heading: self.heading,
        }
    }
}

impl Default for Animator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::generate_arc;

    const MELBOURNE: LatLng = LatLng { lat: -37.8136, lon: 144.9631 };
    const SYDNEY: LatLng = LatLng { lat: -33.8688, lon: 151.2093 };

    fn curve(segments: u32) -> Arc<Vec<LatLng>> {
        Arc::new(generate_arc(MELBOURNE, SYDNEY, segments))
    }

    #[test]
    fn starts_idle_and_ignores_ticks() {
        let mut animator = Animator::new();
        assert_eq!(animator.phase(), Phase::Idle);
        animator.step();
        assert_eq!(animator.phase(), Phase::Idle);
    }

    #[test]
    fn restart_primes_the_departure_snapshot() {
        let mut animator = Animator::new();
        let curve = curve(10);
        animator.restart(curve.clone());

        let snapshot = animator.snapshot();
        assert_eq!(snapshot.phase, Phase::Running);
        assert_eq!(snapshot.cursor, 0);
        assert_eq!(snapshot.position, curve[0]);
        assert_eq!(snapshot.heading, initial_bearing(curve[0], curve[1]));
    }

    #[test]
    fn walks_every_point_then_terminates() {
        let mut animator = Animator::new();
        let curve = curve(10);
        animator.restart(curve.clone());

        // len - 1 ticks traverse the curve, one position per tick
        for expected in 1..curve.len() {
            animator.step();
            let snapshot = animator.snapshot();
            assert_eq!(snapshot.cursor, expected);
            assert_eq!(snapshot.position, curve[expected]);
            assert_eq!(snapshot.phase, Phase::Running);
        }

        // the next tick flips to Done without moving anything
        animator.step();
        let done = animator.snapshot();
        assert_eq!(done.phase, Phase::Done);
        assert_eq!(done.cursor, curve.len() - 1);
        assert_eq!(done.position, *curve.last().unwrap());

        // and further ticks change nothing at all
        let heading = done.heading;
        animator.step();
        let after = animator.snapshot();
        assert_eq!(after.cursor, done.cursor);
        assert_eq!(after.position, done.position);
        assert_eq!(after.heading, heading);
    }

    #[test]
    fn heading_faces_the_point_being_entered() {
        let mut animator = Animator::new();
        let curve = curve(5);
        animator.restart(curve.clone());

        animator.step();
        assert_eq!(animator.snapshot().heading, initial_bearing(curve[0], curve[1]));
        animator.step();
        assert_eq!(animator.snapshot().heading, initial_bearing(curve[1], curve[2]));
    }

    #[test]
    fn replacement_mid_flight_resets_to_index_zero() {
        let mut animator = Animator::new();
        animator.restart(curve(10));
        animator.step();
        animator.step();
        assert_eq!(animator.snapshot().cursor, 2);

        let fresh = Arc::new(generate_arc(SYDNEY, MELBOURNE, 6));
        animator.restart(fresh.clone());

        let snapshot = animator.snapshot();
        assert_eq!(snapshot.phase, Phase::Running);
        assert_eq!(snapshot.cursor, 0);
        assert_eq!(snapshot.position, fresh[0]);
    }

    #[test]
    fn replacement_after_done_runs_again() {
        let mut animator = Animator::new();
        let short = Arc::new(generate_arc(MELBOURNE, SYDNEY, 1));
        animator.restart(short.clone());
        animator.step();
        animator.step();
        assert_eq!(animator.phase(), Phase::Done);

        animator.restart(short);
        assert_eq!(animator.phase(), Phase::Running);
        assert_eq!(animator.snapshot().cursor, 0);
    }

    #[test]
    fn single_point_curve_emits_zero_heading_then_finishes() {
        let mut animator = Animator::new();
        animator.restart(Arc::new(vec![SYDNEY]));

        let snapshot = animator.snapshot();
        assert_eq!(snapshot.phase, Phase::Running);
        assert_eq!(snapshot.heading, 0.0);
        assert_eq!(snapshot.position, SYDNEY);

        animator.step();
        assert_eq!(animator.phase(), Phase::Done);
    }

    #[test]
    fn degenerate_route_still_animates_around_the_bulge() {
        // from == to keeps the lift, so the cursor still has ground to cover
        let mut animator = Animator::new();
        let loop_curve = Arc::new(generate_arc(SYDNEY, SYDNEY, 4));
        animator.restart(loop_curve.clone());

        for _ in 0..4 {
            animator.step();
        }
        assert_eq!(animator.phase(), Phase::Running);
        assert_eq!(animator.snapshot().position, SYDNEY);
        animator.step();
        assert_eq!(animator.phase(), Phase::Done);
    }
}
