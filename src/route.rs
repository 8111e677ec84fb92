use std::f64::consts::PI;
use std::sync::Arc;

use crate::catalog::{Catalog, Location};
use crate::geo::LatLng;

/// Peak of the latitude lift at the arc midpoint, in degrees.
const LIFT_PEAK_DEG: f64 = 2.0;
/// Fixed scale applied to the lift.
const LIFT_SCALE: f64 = 1.0;

/// A planned journey: two catalog locations plus the arc between them.
///
/// Routes are ephemeral — one is built per selection and replaced wholesale
/// on the next. The curve is shared out to the animator by instance, so a
/// re-selection of the same destination still counts as a new route.
#[derive(Debug, Clone)]
pub struct Route {
    pub from: Location,
    pub to: Location,
    pub curve: Arc<Vec<LatLng>>,
}

impl Route {
    /// Look both codes up and build the arc. `None` when either code is
    /// missing from the catalog; the caller treats that as "no route to
    /// draw", not as an error.
    pub fn plan(catalog: &Catalog, origin: &str, destination: &str, segments: u32) -> Option<Route> {
        let from = catalog.get(origin)?.clone();
        let to = catalog.get(destination)?.clone();
        let curve = generate_arc(from.coordinates, to.coordinates, segments);
        Some(Route {
            from,
            to,
            curve: Arc::new(curve),
        })
    }

    pub fn fare(&self) -> f64 {
        self.to.price
    }
}

/// Build the display arc between two points as `segments + 1` coordinates:
/// a straight interpolation in degree space with a `sin(π·t)` latitude lift
/// that peaks mid-route and vanishes at both endpoints.
///
/// This is a visual approximation, not a great-circle path — the deviation
/// is intentional and the segment count changes only the resolution, never
/// the shape. Two quirks are load-bearing for compatibility:
///
/// * coincident endpoints still get the lift, so a zero-length route bulges
///   away from its single point rather than collapsing;
/// * a segment count of zero is treated as one.
pub fn generate_arc(from: LatLng, to: LatLng, segments: u32) -> Vec<LatLng> {
    let segments = segments.max(1) as usize;
    let mut curve = Vec::with_capacity(segments + 1);

    for i in 0..segments {
        let t = i as f64 / segments as f64;
        let lift = (PI * t).sin() * LIFT_PEAK_DEG * LIFT_SCALE;
        curve.push(LatLng::new(
            from.lat + (to.lat - from.lat) * t + lift,
            from.lon + (to.lon - from.lon) * t,
        ));
    }
    // sin(π) is not exactly zero in floating point; pin the far endpoint
    curve.push(to);

    curve
}
