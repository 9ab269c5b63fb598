use crate::catalog::Movie;
use chrono::{Datelike, NaiveDate};

/// Display-ready fields for one movie card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieCard {
    pub title: String,
    pub year: String,
    pub rating: String,
    pub poster: String,
}

impl MovieCard {
    /// Map a movie and its already-resolved poster URL to a card.
    pub fn new(movie: &Movie, poster: String) -> Self {
        Self {
            title: movie.title.clone(),
            year: release_year(movie.release_date.as_deref()).unwrap_or_else(|| "N/A".to_string()),
            rating: format!("{:.1}", movie.vote_average),
            poster,
        }
    }
}

/// Four-digit release year from a TMDb date string.
pub fn release_year(release_date: Option<&str>) -> Option<String> {
    let date = release_date?.trim();
    if let Ok(parsed) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return Some(format!("{:04}", parsed.year()));
    }
    // Partial dates ("1999", "1999-03") still carry a usable year.
    let year = date.get(..4)?;
    year.chars().all(|c| c.is_ascii_digit()).then(|| year.to_string())
}
