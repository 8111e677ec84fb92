use crate::geo::LatLng;

/// Fixed margin around fitted bounds, in canvas cells (horizontal, vertical).
pub const FIT_PADDING: (u16, u16) = (4, 2);

/// An axis-aligned region in degree space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLngBounds {
    pub southwest: LatLng,
    pub northeast: LatLng,
}

impl LatLngBounds {
    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.southwest.lat + self.northeast.lat) / 2.0,
            (self.southwest.lon + self.northeast.lon) / 2.0,
        )
    }

    pub fn lat_span(&self) -> f64 {
        self.northeast.lat - self.southwest.lat
    }

    pub fn lon_span(&self) -> f64 {
        self.northeast.lon - self.southwest.lon
    }

    pub fn contains(&self, point: LatLng) -> bool {
        point.lat >= self.southwest.lat
            && point.lat <= self.northeast.lat
            && point.lon >= self.southwest.lon
            && point.lon <= self.northeast.lon
    }
}

/// One-shot instruction for the presentation layer: show everything inside
/// `bounds` with `padding` around it, zoomed no tighter than `max_zoom`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitDirective {
    pub bounds: LatLngBounds,
    pub padding: (u16, u16),
    pub max_zoom: u8,
}

/// Fit the viewport to a curve. Computed once per route replacement — the
/// viewport never re-fits while the marker is moving.
///
/// The zoom cap is a step function of the planar distance between the
/// curve's endpoints; the bounds cover every point, lift included.
pub fn fit_route(curve: &[LatLng]) -> Option<FitDirective> {
    let first = *curve.first()?;
    let last = *curve.last()?;

    let mut southwest = first;
    let mut northeast = first;
    for point in curve {
        southwest.lat = southwest.lat.min(point.lat);
        southwest.lon = southwest.lon.min(point.lon);
        northeast.lat = northeast.lat.max(point.lat);
        northeast.lon = northeast.lon.max(point.lon);
    }

    let distance = first.planar_distance(last);
    let max_zoom = if distance < 10.0 {
        4
    } else if distance < 20.0 {
        5
    } else if distance < 50.0 {
        6
    } else {
        7
    };

    Some(FitDirective {
        bounds: LatLngBounds { southwest, northeast },
        padding: FIT_PADDING,
        max_zoom,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::generate_arc;

    fn span(distance: f64) -> Vec<LatLng> {
        vec![LatLng::new(0.0, 0.0), LatLng::new(0.0, distance)]
    }

    #[test]
    fn zoom_buckets_follow_endpoint_distance() {
        assert_eq!(fit_route(&span(9.9)).unwrap().max_zoom, 4);
        assert_eq!(fit_route(&span(19.9)).unwrap().max_zoom, 5);
        assert_eq!(fit_route(&span(49.9)).unwrap().max_zoom, 6);
        assert_eq!(fit_route(&span(50.1)).unwrap().max_zoom, 7);
    }

    #[test]
    fn boundary_distances_resolve_to_the_tighter_bucket() {
        assert_eq!(fit_route(&span(10.0)).unwrap().max_zoom, 5);
        assert_eq!(fit_route(&span(20.0)).unwrap().max_zoom, 6);
        assert_eq!(fit_route(&span(50.0)).unwrap().max_zoom, 7);
    }

    #[test]
    fn bounds_cover_every_point_including_the_lift() {
        let from = LatLng::new(-37.8136, 144.9631);
        let to = LatLng::new(-33.8688, 151.2093);
        let curve = generate_arc(from, to, 50);
        let fit = fit_route(&curve).unwrap();

        for point in &curve {
            assert!(fit.bounds.contains(*point), "{point} outside bounds");
        }
        // the arc bows above the straight line between the endpoints
        assert!(fit.bounds.northeast.lat > from.lat.max(to.lat));
    }

    #[test]
    fn degenerate_and_empty_curves() {
        let point = LatLng::new(1.0, 2.0);
        let fit = fit_route(&[point]).unwrap();
        assert_eq!(fit.bounds.southwest, point);
        assert_eq!(fit.bounds.northeast, point);
        assert_eq!(fit.max_zoom, 4);

        assert!(fit_route(&[]).is_none());
    }

    #[test]
    fn padding_is_the_fixed_margin() {
        let fit = fit_route(&span(5.0)).unwrap();
        assert_eq!(fit.padding, FIT_PADDING);
    }
}
