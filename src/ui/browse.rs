use super::grid;
use crate::app::{App, Display, InputMode};
use crate::catalog::Catalog;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub fn render<C: Catalog>(app: &App<C>, frame: &mut Frame) {
    let area = frame.area();
    let banner_height = if app.api_key_missing() { 4 } else { 0 };

    // Layout: header(3) + banner(0/4) + search(3) + body(min) + status(1) + credits(1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(banner_height),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(app, frame, chunks[0]);
    if app.api_key_missing() {
        render_banner(frame, chunks[1]);
    }
    render_search_bar(app, frame, chunks[2]);
    render_body(app, frame, chunks[3]);
    render_status(app, frame, chunks[4]);

    let credits = Paragraph::new("Data provided by The Movie Database (TMDb)")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(credits, chunks[5]);
}

fn render_header<C: Catalog>(app: &App<C>, frame: &mut Frame, area: Rect) {
    let mode = if app.is_searching_mode() {
        format!("Search results [{}]", app.search_results().len())
    } else {
        format!("Popular Movies [{}]", app.popular_movies().len())
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " 🎬 Movie Browser",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled(mode, Style::default().fg(Color::White)),
        Span::styled(
            if app.loading() || app.searching() { "  ⟳" } else { "" },
            Style::default().fg(Color::Yellow),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::Red)),
    );
    frame.render_widget(header, area);
}

fn render_banner(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "⚠ Missing API Key!",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from("Pass --api-key or set TMDB_API_KEY in the environment."),
    ];
    let banner = Paragraph::new(lines)
        .style(Style::default().fg(Color::White).bg(Color::Red))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(banner, area);
}

fn render_search_bar<C: Catalog>(app: &App<C>, frame: &mut Frame, area: Rect) {
    let style = match app.input_mode {
        InputMode::Editing => Style::default().fg(Color::Yellow),
        InputMode::Normal => Style::default().fg(Color::DarkGray),
    };
    let label = if app.input_mode == InputMode::Editing {
        " 🔍 Search (Enter/Esc to finish): "
    } else {
        " 🔍 Search (/): "
    };
    let search_bar = Paragraph::new(format!("{}{}", label, app.query))
        .style(style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(style)
                .title(" Search Movies "),
        );
    frame.render_widget(search_bar, area);

    if app.input_mode == InputMode::Editing {
        use unicode_width::UnicodeWidthStr;
        let cursor_x = area.x + 1 + (label.width() + app.query.width()) as u16;
        frame.set_cursor_position((cursor_x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

fn render_body<C: Catalog>(app: &App<C>, frame: &mut Frame, area: Rect) {
    match app.display() {
        Display::Grid(_) => grid::render(app, frame, area),
        Display::Spinner(label) => {
            let text = vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("⟳ {}", label),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                )),
            ];
            frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
        }
        Display::Empty(message) => {
            let hint = if app.is_searching_mode() {
                "Try a different title."
            } else {
                "Check your API key and try again."
            };
            render_message(frame, area, message, hint, Color::White);
        }
        Display::Error(reason) => {
            render_message(frame, area, reason.to_string(), "Check your API key and try again.", Color::Red);
        }
    }
}

fn render_message(frame: &mut Frame, area: Rect, message: String, hint: &str, color: Color) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("🎥 {}", message),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(hint.to_string(), Style::default().fg(Color::DarkGray))),
    ];
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_status<C: Catalog>(app: &App<C>, frame: &mut Frame, area: Rect) {
    let key = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let status_line = Line::from(vec![
        Span::styled(" ←↑↓→", key),
        Span::raw(" Move  "),
        Span::styled("/", key),
        Span::raw(" Search  "),
        Span::styled("o", key),
        Span::raw(" Poster  "),
        Span::styled("?", key),
        Span::raw(" Help  "),
        Span::styled("q", key),
        Span::raw(" Quit  "),
        Span::styled(&app.status_msg, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(status_line), area);
}
