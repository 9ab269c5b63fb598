use crate::catalog::Movie;

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";
pub const DEFAULT_PLACEHOLDER_POSTER_URL: &str =
    "https://via.placeholder.com/500x750?text=No+Poster";

/// Default quiet period before a search is issued.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Connection settings for the remote catalog, injected into the client at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub api_key: String,
    pub base_url: String,
    pub image_base_url: String,
    pub placeholder_poster_url: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            placeholder_poster_url: DEFAULT_PLACEHOLDER_POSTER_URL.to_string(),
        }
    }
}

impl CatalogConfig {
    /// Build a config from an optional key. A missing or blank key is kept as
    /// an empty string so requests are still attempted.
    pub fn from_parts(api_key: Option<String>, base_url: &str, image_base_url: &str) -> Self {
        Self {
            api_key: api_key.map(|k| k.trim().to_string()).unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
            image_base_url: image_base_url.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    pub fn api_key_missing(&self) -> bool {
        self.api_key.is_empty()
    }

    /// Absolute poster URL for a movie, or the placeholder when it has no poster.
    pub fn poster_url(&self, movie: &Movie) -> String {
        match movie.poster_path.as_deref().map(str::trim) {
            Some(path) if !path.is_empty() => format!("{}{}", self.image_base_url, path),
            _ => self.placeholder_poster_url.clone(),
        }
    }
}
