use std::fs;
use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use chrono::Local;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use mfl_scoreboard::config::ScoreboardConfig;
use mfl_scoreboard::feed::spawn_scoring_provider;
use mfl_scoreboard::html_render::render_page;
use mfl_scoreboard::sort::SortDirection;
use mfl_scoreboard::state::{
    AppState, Delta, LoadStatus, ProviderCommand, apply_delta, status_label,
};
use mfl_scoreboard::table::{Column, RenderOptions};

const TITLE: &str = "MFL SCOREBOARD";

struct App {
    state: AppState,
    config: ScoreboardConfig,
    should_quit: bool,
    cmd_tx: Option<mpsc::Sender<ProviderCommand>>,
}

impl App {
    fn new(config: ScoreboardConfig, cmd_tx: Option<mpsc::Sender<ProviderCommand>>) -> Self {
        let mut state = AppState::with_options(RenderOptions {
            hide_names: config.hide_names,
        });
        state.source_label = config.source.label().to_string();
        Self {
            state,
            config,
            should_quit: false,
            cmd_tx,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Char('h') | KeyCode::Left => self.state.header_prev(),
            KeyCode::Char('l') | KeyCode::Right => self.state.header_next(),
            KeyCode::Char('s') | KeyCode::Enter => {
                if let Some(dir) = self.state.click_header_cursor() {
                    self.log_sort(dir);
                }
            }
            KeyCode::Char(c @ '1'..='9') => {
                let idx = c as usize - '1' as usize;
                if let Some(col) = Column::from_index(idx) {
                    self.sort_by(col);
                }
            }
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Char('r') | KeyCode::Char('R') => self.request_refresh(),
            KeyCode::Char('e') | KeyCode::Char('E') => self.export_html(),
            _ => {}
        }
    }

    fn sort_by(&mut self, col: Column) {
        let dir = self.state.click_column(col);
        self.log_sort(dir);
    }

    fn log_sort(&mut self, dir: SortDirection) {
        if let Some(col) = Column::from_index(self.state.header_cursor) {
            self.state
                .push_log(format!("[INFO] Sorted by {} {}", col.label(), dir.arrow()));
        }
    }

    fn request_refresh(&mut self) {
        let Some(tx) = &self.cmd_tx else {
            self.state.push_log("[INFO] Refresh unavailable");
            return;
        };
        if tx.send(ProviderCommand::Refresh).is_err() {
            self.state.push_log("[WARN] Refresh request failed");
        } else {
            self.state.push_log("[INFO] Refresh requested");
        }
    }

    fn export_html(&mut self) {
        let generated = Local::now().format("%Y-%m-%d %H:%M").to_string();
        let page = render_page(TITLE, &self.state.rows, &self.state.sort, &generated);
        let path = &self.config.export_path;
        match fs::write(path, page) {
            Ok(()) => self
                .state
                .push_log(format!("[INFO] Exported {}", path.display())),
            Err(err) => self
                .state
                .push_log(format!("[WARN] Export to {} failed: {err}", path.display())),
        }
    }
}

fn main() -> io::Result<()> {
    let config = ScoreboardConfig::load();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    spawn_scoring_provider(config.clone(), tx, cmd_rx);

    let mut app = App::new(config, Some(cmd_tx));
    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(5),
            Constraint::Length(2),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    render_scoreboard(frame, chunks[1], &app.state);

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(
        "←/→ Column | Enter/s Sort | 1-9 Sort column | j/k Move | r Refresh | e Export | ? Help | q Quit",
    )
    .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let sort = match state.sort.active() {
        Some((col, dir)) => format!("{} {}", col.label(), dir.arrow()),
        None => "PAYLOAD ORDER".to_string(),
    };
    format!(
        "{TITLE} | {} | {} | Sort: {sort}",
        state.source_label,
        status_label(&state.status)
    )
}

fn scoreboard_columns() -> [Constraint; 9] {
    [
        Constraint::Min(16),
        Constraint::Length(9),
        Constraint::Length(8),
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Length(11),
        Constraint::Length(10),
        Constraint::Length(14),
        Constraint::Length(10),
    ]
}

fn render_scoreboard(frame: &mut Frame, area: Rect, state: &AppState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let widths = scoreboard_columns();
    render_scoreboard_header(frame, sections[0], &widths, state);

    let list_area = sections[1];
    if state.rows.is_empty() {
        let (text, color) = match &state.status {
            LoadStatus::Loading => ("Loading scoring...".to_string(), Color::DarkGray),
            LoadStatus::Failed(msg) => (format!("Scoring unavailable: {msg}"), Color::Red),
            LoadStatus::Loaded { .. } => ("No teams in payload".to_string(), Color::DarkGray),
        };
        let empty = Paragraph::new(text).style(Style::default().fg(color));
        frame.render_widget(empty, list_area);
        return;
    }

    if list_area.height == 0 {
        return;
    }

    let visible = list_area.height as usize;
    let (start, end) = visible_range(state.selected, state.rows.len(), visible);

    for (i, idx) in (start..end).enumerate() {
        let row_area = Rect {
            x: list_area.x,
            y: list_area.y + i as u16,
            width: list_area.width,
            height: 1,
        };

        let selected = idx == state.selected;
        let row_style = if selected {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };
        if selected {
            frame.render_widget(Block::default().style(row_style), row_area);
        }

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(widths)
            .split(row_area);

        let row = &state.rows[idx];
        for col in Column::ALL {
            render_cell_text(frame, cols[col.index()], row.cell(col), row_style);
        }
    }
}

fn render_scoreboard_header(frame: &mut Frame, area: Rect, widths: &[Constraint], state: &AppState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths)
        .split(area);

    for col in Column::ALL {
        let mut style = Style::default().add_modifier(Modifier::BOLD);
        let label = match state.sort.toggle(col).direction() {
            Some(dir) => {
                style = style.fg(Color::Yellow);
                format!("{} {}", col.label(), dir.arrow())
            }
            None => col.label().to_string(),
        };
        if col.index() == state.header_cursor {
            style = style.add_modifier(Modifier::REVERSED);
        }
        render_cell_text(frame, cols[col.index()], &label, style);
    }
}

fn render_cell_text(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    let text_area = Rect {
        x: area.x,
        y: area.y + (area.height / 2),
        width: area.width,
        height: 1,
    };
    let paragraph = Paragraph::new(text).style(style);
    frame.render_widget(paragraph, text_area);
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No messages yet".to_string();
    }
    let skip = state.logs.len().saturating_sub(3);
    state
        .logs
        .iter()
        .skip(skip)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let mut lines = vec![
        "MFL Scoreboard - Help".to_string(),
        String::new(),
        "  ←/→ or h/l   Move column cursor".to_string(),
        "  Enter / s    Sort by cursor column".to_string(),
        "  j/k or ↑/↓   Move row selection".to_string(),
        "  r            Refetch scoring".to_string(),
        "  e            Export HTML page".to_string(),
        "  ?            Toggle help".to_string(),
        "  q            Quit".to_string(),
        String::new(),
        "Columns (repeat to flip direction):".to_string(),
    ];
    for col in Column::ALL {
        lines.push(format!("  {}            {}", col.index() + 1, col.label()));
    }

    let help = Paragraph::new(lines.join("\n"))
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
