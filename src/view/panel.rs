use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem};

use super::ViewState;
use crate::animation::Phase;
use crate::catalog::Catalog;

pub fn render_list(frame: &mut Frame, area: Rect, view: &mut ViewState, catalog: &Catalog) {
    let origin = catalog.origin();
    let title = format!(" from {} {} ", origin.code, origin.name);

    let items: Vec<ListItem> = catalog
        .destinations()
        .enumerate()
        .map(|(i, location)| {
            let pos = i as f32 / catalog.destinations().count().max(1) as f32;
            let (r, g, b) = view.color_scheme.get_color(pos, 0.7);

            let mut spans = vec![
                Span::styled(format!("{:>2} ", i + 1), Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!("{:<4}", location.code),
                    Style::default().fg(Color::Rgb(r, g, b)).bold(),
                ),
                Span::raw(format!(" {:<13}", location.name)),
            ];
            if view.show_prices {
                spans.push(Span::styled(
                    format!("${:>4.0}", location.price),
                    Style::default().fg(Color::Gray),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().reversed())
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut view.list_state);
}

pub fn render_status(frame: &mut Frame, area: Rect, view: &ViewState) {
    let mut status = String::from(" [↑/↓] destination | [enter] fly | [c]olor | [q]uit ");

    if let Some(route) = &view.route {
        let leg = match view.snapshot.phase {
            Phase::Running => format!(
                "{}/{}",
                view.snapshot.cursor,
                route.curve.len().saturating_sub(1)
            ),
            Phase::Done => "arrived".to_string(),
            Phase::Idle => String::new(),
        };
        status.push_str(&format!(
            "| {} → {} ${:.0} {} ",
            route.from.code,
            route.to.code,
            route.fare(),
            leg,
        ));
    } else if view.selection.destination.is_some() {
        status.push_str("| no route ");
    }

    for (i, ch) in status.chars().enumerate() {
        if i < area.width as usize {
            let cell = frame.buffer_mut().cell_mut((area.x + i as u16, area.y));
            if let Some(cell) = cell {
                cell.set_char(ch);
                cell.set_fg(Color::DarkGray);
            }
        }
    }
}
