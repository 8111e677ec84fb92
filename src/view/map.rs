use ratatui::prelude::*;
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine, Map, MapResolution, Points};
use ratatui::widgets::{Block, Borders};

use super::ViewState;
use crate::animation::Phase;
use crate::catalog::Catalog;
use crate::config::MapDetail;
use crate::geo::LatLng;

/// Eight-way arrow for a marker heading, degrees clockwise from north.
///
/// The heading is used as delivered by the engine — no rotation correction
/// is applied before picking the glyph.
fn heading_glyph(heading: f64) -> &'static str {
    const GLYPHS: [&str; 8] = ["↑", "↗", "→", "↘", "↓", "↙", "←", "↖"];
    let bucket = ((heading.rem_euclid(360.0) + 22.5) / 45.0) as usize % 8;
    GLYPHS[bucket]
}

/// Translate the fit directive into canvas bounds: bounds center preserved,
/// spans floored at the span the zoom cap implies (360° / 2^zoom), padding
/// cells converted to degrees at the current scale.
fn canvas_bounds(view: &ViewState, catalog: &Catalog, area: Rect) -> ([f64; 2], [f64; 2]) {
    let (center, lon_span, lat_span, padding) = match &view.fit {
        Some(fit) => {
            let min_span = 360.0 / f64::powi(2.0, fit.max_zoom as i32);
            (
                fit.bounds.center(),
                fit.bounds.lon_span().max(min_span),
                fit.bounds.lat_span().max(min_span / 2.0),
                fit.padding,
            )
        }
        None => {
            // No route yet: frame the whole catalog
            let mut southwest = catalog.origin().coordinates;
            let mut northeast = southwest;
            for location in catalog.iter() {
                let LatLng { lat, lon } = location.coordinates;
                southwest.lat = southwest.lat.min(lat);
                southwest.lon = southwest.lon.min(lon);
                northeast.lat = northeast.lat.max(lat);
                northeast.lon = northeast.lon.max(lon);
            }
            let center = LatLng::new(
                (southwest.lat + northeast.lat) / 2.0,
                (southwest.lon + northeast.lon) / 2.0,
            );
            (
                center,
                (northeast.lon - southwest.lon).max(10.0),
                (northeast.lat - southwest.lat).max(5.0),
                crate::viewport::FIT_PADDING,
            )
        }
    };

    let width = area.width.max(1) as f64;
    let height = area.height.max(1) as f64;
    let pad_x = padding.0 as f64 * lon_span / width;
    let pad_y = padding.1 as f64 * lat_span / height;

    (
        [
            center.lon - lon_span / 2.0 - pad_x,
            center.lon + lon_span / 2.0 + pad_x,
        ],
        [
            center.lat - lat_span / 2.0 - pad_y,
            center.lat + lat_span / 2.0 + pad_y,
        ],
    )
}

pub fn render_map(frame: &mut Frame, area: Rect, view: &ViewState, catalog: &Catalog) {
    let (x_bounds, y_bounds) = canvas_bounds(view, catalog, area);

    let resolution = match view.map_detail {
        MapDetail::Low => MapResolution::Low,
        MapDetail::High => MapResolution::High,
    };

    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL).title(" skyfare "))
        .marker(Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(|ctx| {
            ctx.draw(&Map {
                resolution,
                color: Color::DarkGray,
            });
            ctx.layer();

            // Catalog dots
            let dots: Vec<(f64, f64)> = catalog
                .iter()
                .map(|l| (l.coordinates.lon, l.coordinates.lat))
                .collect();
            ctx.draw(&Points {
                coords: &dots,
                color: Color::Gray,
            });

            // Route trail, dimmed ahead of the marker
            if let Some(route) = &view.route {
                let gradient = view
                    .color_scheme
                    .route_gradient(route.curve.len().saturating_sub(1), view.snapshot.cursor);
                for (i, pair) in route.curve.windows(2).enumerate() {
                    let (r, g, b) = gradient[i];
                    ctx.draw(&CanvasLine {
                        x1: pair[0].lon,
                        y1: pair[0].lat,
                        x2: pair[1].lon,
                        y2: pair[1].lat,
                        color: Color::Rgb(r, g, b),
                    });
                }
            }

            ctx.layer();

            // Endpoint labels and the marker on top
            if let Some(route) = &view.route {
                let label = Style::default().fg(Color::White).bold();
                ctx.print(
                    route.from.coordinates.lon,
                    route.from.coordinates.lat,
                    Span::styled(route.from.code.clone(), label),
                );
                ctx.print(
                    route.to.coordinates.lon,
                    route.to.coordinates.lat,
                    Span::styled(route.to.code.clone(), label),
                );

                if view.snapshot.phase != Phase::Idle {
                    let progress = view.snapshot.cursor as f32
                        / (route.curve.len() - 1).max(1) as f32;
                    let (r, g, b) = view.color_scheme.marker_color(progress, view.time);
                    ctx.print(
                        view.snapshot.position.lon,
                        view.snapshot.position.lat,
                        Span::styled(
                            heading_glyph(view.snapshot.heading),
                            Style::default().fg(Color::Rgb(r, g, b)).bold(),
                        ),
                    );
                }
            }
        });

    frame.render_widget(canvas, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_buckets_cover_the_compass() {
        assert_eq!(heading_glyph(0.0), "↑");
        assert_eq!(heading_glyph(54.1), "↗");
        assert_eq!(heading_glyph(90.0), "→");
        assert_eq!(heading_glyph(135.0), "↘");
        assert_eq!(heading_glyph(180.0), "↓");
        assert_eq!(heading_glyph(-135.0), "↙");
        assert_eq!(heading_glyph(-90.0), "←");
        assert_eq!(heading_glyph(-45.0), "↖");
        // wrap-around near north
        assert_eq!(heading_glyph(179.9), "↓");
        assert_eq!(heading_glyph(-179.9), "↓");
        assert_eq!(heading_glyph(-10.0), "↑");
    }
}
