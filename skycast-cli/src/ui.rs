//! Terminal rendering for the forecast board.
//!
//! One screen: a city header, a paging card region (one forecast day
//! per viewport-width page), a summary strip of chips, and a key-hint
//! footer. The render loop drains pipeline events between frames.

use std::io;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use skycast_core::{BoardEvent, DailyForecast};

use crate::board::{self, Board};
use crate::format;

/// Night-sky palette.
mod colors {
    use ratatui::style::Color;

    pub const TEXT: Color = Color::Rgb(0x77, 0x8d, 0xa9);
    pub const ACCENT: Color = Color::Rgb(0x41, 0x5a, 0x77);
    pub const CHIP_BG: Color = Color::Rgb(0x1b, 0x26, 0x3b);
    pub const DIM: Color = Color::Rgb(0xe0, 0xe1, 0xdd);
}

const CHIP_WIDTH: u16 = 12;

pub fn run(board: &mut Board, events: Receiver<BoardEvent>) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter the alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to build the terminal")?;

    let result = event_loop(&mut terminal, board, &events);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    board: &mut Board,
    events: &Receiver<BoardEvent>,
) -> Result<()> {
    loop {
        while let Ok(event) = events.try_recv() {
            board.apply(event);
        }

        terminal.draw(|frame| render(frame, board))?;

        if event::poll(Duration::from_millis(100)).context("Failed to poll terminal events")? {
            if let Event::Key(key) = event::read().context("Failed to read terminal event")? {
                if key.kind == KeyEventKind::Press && !board::handle_key_event(board, key) {
                    return Ok(());
                }
            }
        }
    }
}

fn render(frame: &mut Frame<'_>, board: &mut Board) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(9),
            Constraint::Length(6),
            Constraint::Length(1),
        ])
        .split(frame.area());

    // The card region is the paging viewport; chip activation scrolls
    // in multiples of this width.
    board.viewport_width = chunks[1].width;

    render_header(frame, board, chunks[0]);

    if !board.permission {
        render_notice(frame, "Location permission denied", chunks[1]);
    } else if let Some(message) = &board.error {
        render_notice(frame, message, chunks[1]);
    } else if let Some(days) = &board.days {
        render_card(frame, board, days, chunks[1]);
        render_strip(frame, board, days, chunks[2]);
    } else {
        render_notice(frame, "Loading forecast...", chunks[1]);
    }

    render_footer(frame, chunks[3]);
}

fn render_header(frame: &mut Frame<'_>, board: &Board, area: Rect) {
    let line = Line::from(vec![
        Span::styled("⌖ ", Style::default().fg(colors::TEXT)),
        Span::styled(
            board.city.clone(),
            Style::default().fg(colors::TEXT).add_modifier(Modifier::BOLD),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn render_notice(frame: &mut Frame<'_>, message: &str, area: Rect) {
    let notice = Paragraph::new(Line::from(Span::styled(
        message.to_string(),
        Style::default().fg(colors::DIM),
    )))
    .alignment(Alignment::Center);

    frame.render_widget(notice, area);
}

fn render_card(frame: &mut Frame<'_>, board: &Board, days: &[DailyForecast], area: Rect) {
    let page = board.page().min(days.len().saturating_sub(1));
    let day = &days[page];

    let text_style = Style::default().fg(colors::TEXT);
    let accent_style = Style::default().fg(colors::ACCENT);

    let lines = vec![
        Line::default(),
        Line::from(Span::styled(format::month_day(day.timestamp), text_style)),
        Line::from(Span::styled(
            format::weekday(day.timestamp),
            text_style.add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(format::icon(&day.category), accent_style)),
        Line::default(),
        Line::from(Span::styled(
            format::temperature(day.temp_day_c),
            accent_style.add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(day.description.clone(), text_style)),
    ];

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_strip(frame: &mut Frame<'_>, board: &Board, days: &[DailyForecast], area: Rect) {
    let mut x = area.x;

    for (i, day) in days.iter().enumerate() {
        if x + CHIP_WIDTH > area.x + area.width {
            break;
        }

        let chip_area = Rect::new(x, area.y, CHIP_WIDTH - 1, area.height.min(5));
        render_chip(frame, day, i == board.selected, chip_area);
        x += CHIP_WIDTH;
    }
}

fn render_chip(frame: &mut Frame<'_>, day: &DailyForecast, selected: bool, area: Rect) {
    let base = if selected {
        Style::default().bg(colors::ACCENT).fg(colors::DIM)
    } else {
        Style::default().bg(colors::CHIP_BG).fg(colors::TEXT)
    };

    let lines = vec![
        Line::from(Span::styled(format::month_day(day.timestamp), base)),
        Line::from(Span::styled(
            format::weekday(day.timestamp),
            base.add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(format::icon(&day.category), base)),
        Line::from(Span::styled(
            format::temperature(day.temp_day_c),
            base.add_modifier(Modifier::BOLD),
        )),
    ];

    let chip = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(base);

    frame.render_widget(chip, area);
}

fn render_footer(frame: &mut Frame<'_>, area: Rect) {
    let hints = Paragraph::new(Line::from(Span::styled(
        "←/→ page · Tab select · Enter jump · q quit",
        Style::default().fg(colors::ACCENT),
    )))
    .alignment(Alignment::Center);

    frame.render_widget(hints, area);
}
