mod map;
mod panel;

use std::sync::Arc;

use ratatui::prelude::*;
use ratatui::widgets::ListState;

use crate::animation::AnimationSnapshot;
use crate::catalog::Catalog;
use crate::color::ColorScheme;
use crate::config::{Config, MapDetail};
use crate::route::Route;
use crate::viewport::FitDirective;

/// Current origin/destination pair. The origin is pinned to the catalog's
/// fare-zero entry in practice, but it is ordinary state so a variable
/// origin stays expressible.
#[derive(Debug, Clone)]
pub struct Selection {
    pub origin: String,
    pub destination: Option<String>,
}

/// Everything the frame loop needs to draw: the selection list, the active
/// route with its fit directive, and the latest animation snapshot.
pub struct ViewState {
    pub selection: Selection,
    pub list_state: ListState,
    pub route: Option<Route>,
    pub fit: Option<FitDirective>,
    pub snapshot: Arc<AnimationSnapshot>,
    pub color_scheme: ColorScheme,
    pub map_detail: MapDetail,
    pub show_prices: bool,
    pub time: f32,
}

impl ViewState {
    pub fn new(config: &Config, catalog: &Catalog) -> Self {
        let mut list_state = ListState::default();
        if catalog.destinations().next().is_some() {
            list_state.select(Some(0));
        }

        Self {
            selection: Selection {
                origin: catalog.origin().code.clone(),
                destination: None,
            },
            list_state,
            route: None,
            fit: None,
            snapshot: Arc::new(AnimationSnapshot::default()),
            color_scheme: config.display.color_scheme,
            map_detail: config.display.map_detail,
            show_prices: config.display.show_prices,
            time: 0.0,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.time += dt;
    }

    /// The destination code currently highlighted in the list.
    pub fn highlighted_code<'a>(&self, catalog: &'a Catalog) -> Option<&'a str> {
        let index = self.list_state.selected()?;
        catalog.destinations().nth(index).map(|l| l.code.as_str())
    }

    pub fn highlight_next(&mut self, catalog: &Catalog) {
        let count = catalog.destinations().count();
        if count == 0 {
            return;
        }
        let next = match self.list_state.selected() {
            Some(i) => (i + 1) % count,
            None => 0,
        };
        self.list_state.select(Some(next));
    }

    pub fn highlight_prev(&mut self, catalog: &Catalog) {
        let count = catalog.destinations().count();
        if count == 0 {
            return;
        }
        let prev = match self.list_state.selected() {
            Some(0) | None => count - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(prev));
    }

    /// Move the highlight onto `code`. False when the code is not a
    /// destination in the catalog.
    pub fn highlight_code(&mut self, catalog: &Catalog, code: &str) -> bool {
        match catalog.destinations().position(|l| l.code == code) {
            Some(index) => {
                self.list_state.select(Some(index));
                true
            }
            None => false,
        }
    }

    /// Adopt the outcome of a selection: the route (or `None` for an
    /// unknown code — nothing to draw) and its freshly computed fit.
    pub fn apply_route(&mut self, destination: &str, route: Option<Route>) {
        self.selection.destination = Some(destination.to_string());
        self.fit = route
            .as_ref()
            .and_then(|r| crate::viewport::fit_route(&r.curve));
        self.route = route;
    }

    pub fn next_color_scheme(&mut self) {
        self.color_scheme = self.color_scheme.next();
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, catalog: &Catalog) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(30), Constraint::Min(20)])
            .split(rows[0]);

        panel::render_list(frame, columns[0], self, catalog);
        map::render_map(frame, columns[1], self, catalog);
        panel::render_status(frame, rows[1], self);
    }
}
