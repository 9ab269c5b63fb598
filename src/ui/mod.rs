mod browse;
mod grid;
mod help;

use crate::app::App;
use crate::catalog::Catalog;
use ratatui::Frame;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Width of one movie card, borders included.
pub const CARD_WIDTH: u16 = 34;
/// Height of one movie card, borders included.
pub const CARD_HEIGHT: u16 = 6;

/// Top-level render dispatch.
pub fn render<C: Catalog>(app: &App<C>, frame: &mut Frame) {
    browse::render(app, frame);

    // Render help overlay on top if active
    if app.show_help {
        help::render(frame);
    }
}

/// Truncate a string to `max_width` terminal columns, adding "…" if truncated.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        used += w;
        result.push(c);
    }
    result.push('…');
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::LoadState;
    use crate::catalog::{CatalogClient, Movie};
    use crate::config::CatalogConfig;
    use ratatui::{Terminal, backend::TestBackend};
    use std::sync::Arc;
    use std::time::Duration;

    fn app(api_key: &str) -> App<CatalogClient> {
        let config = CatalogConfig {
            api_key: api_key.to_string(),
            ..CatalogConfig::default()
        };
        let client = CatalogClient::new(config.clone()).expect("client builds");
        App::new(Arc::new(client), config, Duration::from_millis(500))
    }

    fn draw(app: &App<CatalogClient>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("terminal");
        terminal.draw(|frame| render(app, frame)).expect("draw");
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("Alien", 10), "Alien");
        assert_eq!(truncate_str("The Lord of the Rings", 8), "The Lor…");
        assert_eq!(truncate_str("千と千尋の神隠し", 7), "千と千…");
    }

    #[test]
    fn test_renders_cards_for_popular_movies() {
        let mut app = app("k");
        app.popular = LoadState::Loaded(vec![Movie {
            id: 1,
            title: "Arrival".to_string(),
            release_date: Some("2016-11-10".to_string()),
            vote_average: 7.6,
            poster_path: Some("/x.jpg".to_string()),
        }]);
        let screen = draw(&app);
        assert!(screen.contains("Arrival"));
        assert!(screen.contains("2016"));
        assert!(screen.contains("7.6"));
        assert!(screen.contains("Popular Movies"));
        assert!(!screen.contains("Missing API Key"));
    }

    #[test]
    fn test_renders_banner_when_key_missing() {
        let mut app = app("");
        app.popular = LoadState::Loaded(Vec::new());
        let screen = draw(&app);
        assert!(screen.contains("Missing API Key"));
        assert!(screen.contains("No movies to display"));
    }

    #[test]
    fn test_renders_error_state() {
        let mut app = app("k");
        app.popular = LoadState::Failed("Network error: boom".to_string());
        let screen = draw(&app);
        assert!(screen.contains("Network error: boom"));
        assert!(screen.contains("Check your API key and try again."));
    }

    #[test]
    fn test_renders_spinner_while_loading() {
        let mut app = app("k");
        app.popular = LoadState::Loading;
        assert!(draw(&app).contains("Loading movies..."));
    }
}
