mod help;

use crate::cli::Cli;
use crate::model::DataEvent;
use crate::orchestrator::{self, UiCommand};
use crate::view::{ExportPhase, ListPhase, ViewState};
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Tabs},
    Terminal,
};
use std::{io, time::Duration, time::Instant};
use tokio::sync::mpsc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

struct UiState {
    tab: usize,
    view: ViewState,
    info: String,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            tab: 0,
            view: ViewState::default(),
            info: String::new(),
        }
    }
}

pub async fn run(args: Cli) -> Result<()> {
    // Unbounded channels avoid backpressure between the fetch tasks and the UI.
    let (event_tx, event_rx) = mpsc::unbounded_channel::<DataEvent>();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<UiCommand>();

    // TUI runs in a dedicated thread to keep all blocking I/O out of the Tokio runtime.
    let ui_handle = std::thread::spawn(move || run_threaded(event_rx, cmd_tx));

    let res = orchestrator::run_controller(&args, event_tx, cmd_rx).await;

    let join_res = tokio::task::spawn_blocking(move || ui_handle.join()).await;
    if let Ok(joined) = join_res {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(e),
            Err(_) => return Err(anyhow::anyhow!("TUI thread panicked")),
        }
    }

    res
}

/// Run the TUI loop on a dedicated thread.
fn run_threaded(
    mut event_rx: UnboundedReceiver<DataEvent>,
    cmd_tx: UnboundedSender<UiCommand>,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).ok();

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    // UiState is owned by the UI thread only; no cross-thread mutation.
    let mut state = UiState::default();

    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    let res = loop {
        // Drain events without blocking to keep the UI responsive.
        while let Ok(ev) = event_rx.try_recv() {
            handle_event(&mut state, ev);
        }

        if last_tick.elapsed() >= tick_rate {
            terminal.draw(|f| draw(f.area(), f, &state)).ok();
            last_tick = Instant::now();
        }

        // Poll input with a short timeout to avoid blocking the render loop.
        if event::poll(Duration::from_millis(10)).unwrap_or(false) {
            if let Ok(Event::Key(k)) = event::read() {
                if k.kind != KeyEventKind::Press {
                    continue;
                }
                match (k.modifiers, k.code) {
                    (_, KeyCode::Char('q')) | (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
                        let _ = cmd_tx.send(UiCommand::Quit);
                        break Ok(());
                    }
                    (_, KeyCode::Char('r')) => {
                        state.info = "Reloading…".into();
                        let _ = cmd_tx.send(UiCommand::Reload);
                    }
                    (_, KeyCode::Char('e')) => {
                        let _ = cmd_tx.send(UiCommand::Export);
                    }
                    (_, KeyCode::Left) | (_, KeyCode::Char('h')) => {
                        state.view.prev_page();
                    }
                    (_, KeyCode::Right) | (_, KeyCode::Char('l')) => {
                        state.view.next_page();
                    }
                    (_, KeyCode::Home) | (_, KeyCode::Char('g')) => {
                        state.view.first_page();
                    }
                    (_, KeyCode::End) | (_, KeyCode::Char('G')) => {
                        state.view.last_page();
                    }
                    (_, KeyCode::Tab) => {
                        state.tab = (state.tab + 1) % 2;
                    }
                    (_, KeyCode::Char('?')) => {
                        state.tab = 1;
                    }
                    _ => {}
                }
            }
        }
    };

    disable_raw_mode().ok();
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen).ok();
    res
}

/// Feed one fetch event into the view and update the status line. A stale
/// completion is discarded by the view and leaves the status line alone.
fn handle_event(state: &mut UiState, ev: DataEvent) {
    let message = match &ev {
        DataEvent::LoadStarted { .. } => Some("Loading hurricane data…".to_string()),
        DataEvent::LoadFinished { result: Ok(records), .. } => {
            Some(format!("Loaded {} records", records.len()))
        }
        DataEvent::LoadFinished { result: Err(_), .. } => Some("Load failed".to_string()),
        DataEvent::ExportStarted => Some("Exporting…".to_string()),
        DataEvent::ExportFinished { result: Ok(()) } => None,
        DataEvent::ExportFinished { result: Err(_) } => Some("Export failed".to_string()),
    };

    if state.view.apply_event(ev) {
        if let Some(msg) = message {
            state.info = msg;
        }
    }
}

fn draw(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)].as_ref())
        .split(area);

    let tabs = Tabs::new(vec![Line::from("Records"), Line::from("Help")])
        .select(state.tab)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("hurricane-landfall-cli"),
        )
        .highlight_style(Style::default().fg(Color::Yellow));
    f.render_widget(tabs, chunks[0]);

    match state.tab {
        0 => draw_records(chunks[1], f, state),
        _ => help::draw_help(chunks[1], f),
    }
}

fn draw_records(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(5)].as_ref())
        .split(area);

    // Render-state derivation: loading suppresses list and error content,
    // an error suppresses the list, an empty Ready set gets its own notice.
    match &state.view.list {
        ListPhase::Loading => {
            let p = Paragraph::new("Loading hurricane data…")
                .block(records_block(state));
            f.render_widget(p, rows[0]);
        }
        ListPhase::Failed(msg) => {
            let p = Paragraph::new(Span::styled(
                msg.clone(),
                Style::default().fg(Color::Red),
            ))
            .block(records_block(state));
            f.render_widget(p, rows[0]);
        }
        ListPhase::Ready if state.view.records.is_empty() => {
            let p = Paragraph::new("No hurricanes found").block(records_block(state));
            f.render_widget(p, rows[0]);
        }
        ListPhase::Ready => {
            let header = Row::new(vec!["Name", "Date", "Wind"])
                .style(Style::default().add_modifier(Modifier::BOLD));
            let body = state.view.visible_records().iter().map(|r| {
                Row::new(vec![
                    Cell::from(r.name.clone()),
                    Cell::from(r.date_display()),
                    Cell::from(r.wind.to_string()),
                ])
            });
            let table = Table::new(
                body,
                [
                    Constraint::Percentage(34),
                    Constraint::Percentage(33),
                    Constraint::Percentage(33),
                ],
            )
            .header(header)
            .block(records_block(state));
            f.render_widget(table, rows[0]);
        }
    }

    draw_status(rows[1], f, state);
}

fn records_block(state: &UiState) -> Block<'static> {
    let title = match state.view.fetched_at.as_deref() {
        Some(ts) => format!("Florida landfalls since 1900 (fetched {ts})"),
        None => "Florida landfalls since 1900".to_string(),
    };
    Block::default().borders(Borders::ALL).title(title)
}

fn draw_status(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let mut lines: Vec<Line> = Vec::new();

    if state.view.list == ListPhase::Ready && !state.view.records.is_empty() {
        lines.push(Line::from(format!(
            "Page {}/{} · {} records · ←/→ page · e export · r reload",
            state.view.page,
            state.view.page_count(),
            state.view.records.len()
        )));
    }

    if state.view.export_completed {
        lines.push(Line::from(Span::styled(
            "CSV exported successfully!",
            Style::default().fg(Color::Green),
        )));
    }
    match &state.view.export {
        ExportPhase::Running => lines.push(Line::from(Span::styled(
            "Exporting…",
            Style::default().fg(Color::Yellow),
        ))),
        ExportPhase::Failed(msg) => lines.push(Line::from(Span::styled(
            msg.clone(),
            Style::default().fg(Color::Red),
        ))),
        ExportPhase::Idle => {}
    }

    if !state.info.is_empty() {
        lines.push(Line::from(Span::styled(
            state.info.clone(),
            Style::default().fg(Color::Gray),
        )));
    }

    let p = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(p, area);
}
