use crate::card::MovieCard;
use crate::catalog::{Catalog, CatalogError, Movie};
use crate::config::CatalogConfig;
use crate::search::Debouncer;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{error, info};

/// Progress of one remote list.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded(Vec<Movie>),
    Failed(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn movies(&self) -> &[Movie] {
        match self {
            LoadState::Loaded(movies) => movies,
            _ => &[],
        }
    }

    fn from_result(result: Result<Vec<Movie>, CatalogError>) -> Self {
        match result {
            Ok(movies) => LoadState::Loaded(movies),
            Err(e) => LoadState::Failed(e.user_message()),
        }
    }
}

/// What the body of the screen should show.
#[derive(Debug, Clone, PartialEq)]
pub enum Display<'a> {
    Spinner(&'static str),
    Grid(&'a [Movie]),
    Empty(String),
    Error(&'a str),
}

/// Results delivered from background fetches to the UI loop.
#[derive(Debug)]
pub enum AppEvent {
    PopularLoaded(Result<Vec<Movie>, CatalogError>),
    SearchFinished {
        generation: u64,
        query: String,
        result: Result<Vec<Movie>, CatalogError>,
    },
}

/// Input mode for the search bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Main application state.
pub struct App<C: Catalog> {
    catalog: Arc<C>,
    config: CatalogConfig,
    debouncer: Debouncer,
    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,
    started: bool,
    search_generation: u64,

    pub popular: LoadState,
    pub query: String,
    pub search: LoadState,

    pub input_mode: InputMode,
    pub selected: usize,
    pub grid_columns: usize,
    pub show_help: bool,
    pub should_quit: bool,
    pub status_msg: String,
}

impl<C: Catalog> App<C> {
    pub fn new(catalog: Arc<C>, config: CatalogConfig, quiet: Duration) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            catalog,
            config,
            debouncer: Debouncer::new(quiet),
            events_tx,
            events_rx,
            started: false,
            search_generation: 0,

            popular: LoadState::Idle,
            query: String::new(),
            search: LoadState::Idle,

            input_mode: InputMode::Normal,
            selected: 0,
            grid_columns: 1,
            show_help: false,
            should_quit: false,
            status_msg: String::new(),
        }
    }

    /// Kick off the one-time popular list load.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.popular = LoadState::Loading;
        self.status_msg = "Loading movies...".to_string();

        let catalog = Arc::clone(&self.catalog);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = catalog.fetch_popular().await;
            let _ = tx.send(AppEvent::PopularLoaded(result));
        });
    }

    /// Record a new query and (re)schedule the debounced search for it.
    pub fn set_query(&mut self, query: String) {
        self.query = query;
        self.search_generation += 1;
        self.selected = 0;

        if self.query.trim().is_empty() {
            self.debouncer.cancel();
            self.search = LoadState::Idle;
            self.status_msg = format!("{} popular movies", self.popular.movies().len());
            return;
        }

        self.search = LoadState::Loading;
        self.status_msg = "Searching...".to_string();

        let catalog = Arc::clone(&self.catalog);
        let tx = self.events_tx.clone();
        let generation = self.search_generation;
        let query = self.query.clone();
        self.debouncer.schedule(async move {
            let result = catalog.fetch_by_query(&query).await;
            let _ = tx.send(AppEvent::SearchFinished {
                generation,
                query,
                result,
            });
        });
    }

    pub fn push_query_char(&mut self, c: char) {
        let mut query = self.query.clone();
        query.push(c);
        self.set_query(query);
    }

    pub fn pop_query_char(&mut self) {
        let mut query = self.query.clone();
        if query.pop().is_some() {
            self.set_query(query);
        }
    }

    pub fn clear_query(&mut self) {
        if !self.query.is_empty() {
            self.set_query(String::new());
        }
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::PopularLoaded(result) => {
                if let Err(ref e) = result {
                    error!(error = %e, "failed to load movies");
                }
                self.popular = LoadState::from_result(result);
                if !self.is_searching_mode() {
                    self.selected = 0;
                    self.status_msg = match &self.popular {
                        LoadState::Loaded(movies) => format!("{} popular movies loaded", movies.len()),
                        _ => "Failed to load movies".to_string(),
                    };
                }
                info!(count = self.popular.movies().len(), "popular movies ready");
            }
            AppEvent::SearchFinished {
                generation,
                query,
                result,
            } => {
                if generation != self.search_generation || query != self.query {
                    info!(%query, generation, "discarding stale search response");
                    return;
                }
                if let Err(ref e) = result {
                    error!(error = %e, %query, "search failed");
                }
                self.search = LoadState::from_result(result);
                self.selected = 0;
                self.status_msg = match &self.search {
                    LoadState::Loaded(movies) => {
                        format!("{} results for \"{}\"", movies.len(), self.query.trim())
                    }
                    _ => "Search failed".to_string(),
                };
            }
        }
    }

    /// Apply every event that has already arrived, without waiting.
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event);
        }
    }

    /// Wait for the next background result and apply it.
    #[cfg(test)]
    pub async fn wait_event(&mut self) {
        if let Some(event) = self.events_rx.recv().await {
            self.handle_event(event);
        }
    }

    pub fn loading(&self) -> bool {
        self.popular.is_loading()
    }

    pub fn searching(&self) -> bool {
        self.search.is_loading()
    }

    pub fn popular_movies(&self) -> &[Movie] {
        self.popular.movies()
    }

    pub fn search_results(&self) -> &[Movie] {
        self.search.movies()
    }

    #[cfg(test)]
    pub fn search_generation(&self) -> u64 {
        self.search_generation
    }

    pub fn api_key_missing(&self) -> bool {
        self.config.api_key_missing()
    }

    pub fn is_searching_mode(&self) -> bool {
        !self.query.trim().is_empty()
    }

    /// Pick what to show from the current state.
    pub fn display(&self) -> Display<'_> {
        if self.is_searching_mode() {
            match &self.search {
                LoadState::Loading => Display::Spinner("Searching..."),
                LoadState::Failed(reason) => Display::Error(reason),
                LoadState::Loaded(movies) if !movies.is_empty() => Display::Grid(movies),
                _ => Display::Empty(format!("No results found for \"{}\"", self.query.trim())),
            }
        } else {
            match &self.popular {
                LoadState::Loading => Display::Spinner("Loading movies..."),
                LoadState::Failed(reason) => Display::Error(reason),
                LoadState::Loaded(movies) if !movies.is_empty() => Display::Grid(movies),
                _ => Display::Empty("No movies to display".to_string()),
            }
        }
    }

    /// Movies currently on screen, if the grid is showing.
    pub fn displayed_movies(&self) -> &[Movie] {
        match self.display() {
            Display::Grid(movies) => movies,
            _ => &[],
        }
    }

    pub fn card(&self, movie: &Movie) -> MovieCard {
        MovieCard::new(movie, self.config.poster_url(movie))
    }

    pub fn cards(&self) -> Vec<MovieCard> {
        self.displayed_movies().iter().map(|m| self.card(m)).collect()
    }

    pub fn selected_card(&self) -> Option<MovieCard> {
        self.displayed_movies().get(self.selected).map(|m| self.card(m))
    }

    /// Update the column count based on terminal width.
    pub fn update_grid_columns(&mut self, terminal_width: u16) {
        self.grid_columns = (terminal_width / crate::ui::CARD_WIDTH).max(1) as usize;
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.displayed_movies().len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_down(&mut self) {
        let len = self.displayed_movies().len();
        if self.selected + self.grid_columns < len {
            self.selected += self.grid_columns;
        }
    }

    pub fn select_up(&mut self) {
        if self.selected >= self.grid_columns {
            self.selected -= self.grid_columns;
        }
    }
}
