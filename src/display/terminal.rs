use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::{self, stdout};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::animation::{self, EngineHandle, Phase};
use crate::catalog::Catalog;
use crate::config::Config;
use crate::ipc::{self, IpcCommand};
use crate::route::Route;
use crate::view::ViewState;

pub async fn run(config: Config, catalog: Catalog, initial: Option<String>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, config, catalog, initial).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: Config,
    catalog: Catalog,
    initial: Option<String>,
) -> Result<()> {
    // Start the animation engine
    let (engine, snapshot_rx) =
        animation::start_engine(Duration::from_millis(config.animation.tick_ms));

    // Start the IPC server for direct-input selection
    let (ipc_tx, mut ipc_rx) = mpsc::channel(16);
    tokio::spawn(async move {
        if let Err(e) = ipc::start_server(ipc_tx).await {
            warn!("IPC server error: {}", e);
        }
    });

    let segments = config.animation.segments;
    let mut view = ViewState::new(&config, &catalog);

    if let Some(code) = initial {
        let code = code.to_uppercase();
        view.highlight_code(&catalog, &code);
        fly_to(&engine, &catalog, &mut view, &code, segments).await;
    }

    let mut last_frame = Instant::now();
    let frame_budget = Duration::from_secs_f64(1.0 / 60.0);

    loop {
        // Calculate delta time
        let now = Instant::now();
        let dt = now.duration_since(last_frame).as_secs_f32();
        last_frame = now;

        view.update(dt);

        // Latest animation snapshot
        view.snapshot = snapshot_rx.borrow().clone();

        // Remote selection events
        while let Ok(command) = ipc_rx.try_recv() {
            handle_ipc(command, &engine, &catalog, &mut view, segments).await;
        }

        // Render
        terminal.draw(|frame| {
            let area = frame.area();
            view.render(frame, area, &catalog);
        })?;

        // Handle input
        if event::poll(frame_budget)? {
            if let Event::Key(key) = event::read()? {
                match key {
                    KeyEvent {
                        code: KeyCode::Char('q'),
                        ..
                    }
                    | KeyEvent {
                        code: KeyCode::Char('c'),
                        modifiers: KeyModifiers::CONTROL,
                        ..
                    } => {
                        break;
                    }
                    KeyEvent {
                        code: KeyCode::Up | KeyCode::Char('k'),
                        ..
                    } => {
                        view.highlight_prev(&catalog);
                    }
                    KeyEvent {
                        code: KeyCode::Down | KeyCode::Char('j'),
                        ..
                    } => {
                        view.highlight_next(&catalog);
                    }
                    KeyEvent {
                        code: KeyCode::Enter,
                        ..
                    } => {
                        if let Some(code) = view.highlighted_code(&catalog).map(str::to_string) {
                            fly_to(&engine, &catalog, &mut view, &code, segments).await;
                        }
                    }
                    KeyEvent {
                        code: KeyCode::Char(digit @ '1'..='9'),
                        modifiers: KeyModifiers::NONE,
                        ..
                    } => {
                        let index = digit as usize - '1' as usize;
                        if let Some(code) = catalog
                            .destinations()
                            .nth(index)
                            .map(|l| l.code.clone())
                        {
                            view.highlight_code(&catalog, &code);
                            fly_to(&engine, &catalog, &mut view, &code, segments).await;
                        }
                    }
                    KeyEvent {
                        code: KeyCode::Char('c'),
                        modifiers: KeyModifiers::NONE,
                        ..
                    } => {
                        view.next_color_scheme();
                    }
                    _ => {}
                }
            }
        }
    }

    Ok(())
}

/// Plan a route to `code` and hand its curve to the engine. An unknown code
/// clears the drawn route instead of failing.
async fn fly_to(
    engine: &EngineHandle,
    catalog: &Catalog,
    view: &mut ViewState,
    code: &str,
    segments: u32,
) -> bool {
    let origin = view.selection.origin.clone();
    let route = Route::plan(catalog, &origin, code, segments);

    match &route {
        Some(route) => {
            debug!(
                "flying {} → {} ({} points)",
                route.from.code,
                route.to.code,
                route.curve.len()
            );
            engine.set_route(route.curve.clone()).await;
        }
        None => warn!("unknown destination code: {}", code),
    }

    let found = route.is_some();
    view.apply_route(code, route);
    found
}

/// Process an IPC command by mutating frame loop state
async fn handle_ipc(
    command: IpcCommand,
    engine: &EngineHandle,
    catalog: &Catalog,
    view: &mut ViewState,
    segments: u32,
) {
    match command {
        IpcCommand::Select { code, reply } => {
            if fly_to(engine, catalog, view, &code, segments).await {
                view.highlight_code(catalog, &code);
                let _ = reply.send(format!("ok: {} → {}", view.selection.origin, code));
            } else {
                let _ = reply.send(format!("err: unknown code {}", code));
            }
        }
        IpcCommand::ListLocations { reply } => {
            let codes: Vec<&str> = catalog.iter().map(|l| l.code.as_str()).collect();
            let _ = reply.send(format!("ok: {}", codes.join(",")));
        }
        IpcCommand::Status { reply } => {
            let phase = match view.snapshot.phase {
                Phase::Idle => "idle",
                Phase::Running => "running",
                Phase::Done => "done",
            };
            let steps = view
                .route
                .as_ref()
                .map(|r| r.curve.len().saturating_sub(1))
                .unwrap_or(0);
            let status = format!(
                "ok: destination={} phase={} step={}/{} scheme={}",
                view.selection.destination.as_deref().unwrap_or("-"),
                phase,
                view.snapshot.cursor,
                steps,
                view.color_scheme.name(),
            );
            let _ = reply.send(status);
        }
        IpcCommand::Ping { reply } => {
            let _ = reply.send("ok: pong".to_string());
        }
    }
}
