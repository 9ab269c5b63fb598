use super::{CARD_HEIGHT, CARD_WIDTH, truncate_str};
use crate::app::App;
use crate::card::MovieCard;
use crate::catalog::Catalog;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Lay out the displayed movies as rows of fixed-size cards, scrolled so the
/// selected card stays visible.
pub fn render<C: Catalog>(app: &App<C>, frame: &mut Frame, area: Rect) {
    let cards = app.cards();
    if cards.is_empty() {
        return;
    }

    let columns = (area.width / CARD_WIDTH).max(1) as usize;
    let visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;
    let selected_row = app.selected / columns;
    let first_row = selected_row.saturating_sub(visible_rows - 1);

    for (index, card) in cards.iter().enumerate().skip(first_row * columns) {
        let row = index / columns - first_row;
        if row >= visible_rows {
            break;
        }
        let col = index % columns;
        let rect = Rect {
            x: area.x + col as u16 * CARD_WIDTH,
            y: area.y + row as u16 * CARD_HEIGHT,
            width: CARD_WIDTH.min(area.width),
            height: CARD_HEIGHT.min(area.height),
        };
        render_card(frame, rect, card, index == app.selected);
    }
}

fn render_card(frame: &mut Frame, area: Rect, card: &MovieCard, selected: bool) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let border_style = if selected {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let title_style = if selected {
        Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    };

    let lines = vec![
        Line::from(Span::styled(truncate_str(&card.title, inner_width), title_style)),
        Line::from(vec![
            Span::styled("📅 ", Style::default().fg(Color::DarkGray)),
            Span::styled(card.year.as_str(), Style::default().fg(Color::Gray)),
            Span::raw("   "),
            Span::styled("⭐ ", Style::default().fg(Color::Yellow)),
            Span::styled(
                card.rating.as_str(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            truncate_str(&card.poster, inner_width),
            Style::default().fg(Color::Blue),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(" Movie ", Style::default().fg(Color::Red)));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
