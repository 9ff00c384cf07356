//! Movie domain model.
//!
//! A [`Movie`] is an immutable search hit. Its field names follow the TMDB
//! search payload so the same type decodes API responses, crosses the worker
//! boundary, and backs the detail pane.

use serde::{Deserialize, Serialize};

/// Base URL TMDB serves poster images from (w500 width variant).
const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// TMDB numeric movie identifier.
pub type MovieId = u64;

/// A movie returned by a search.
///
/// Equality (`==`) compares every field; selection matches on `id` alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    /// `YYYY-MM-DD`, or empty when TMDB has no date for the film.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub release_date: String,
    /// Path fragment such as `/qJ2tW6WMUDux911r6m7haRef0WH.jpg`.
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
}

impl Movie {
    /// Creates a movie with only an id and a title.
    ///
    /// ```
    /// use marquee::domain::Movie;
    ///
    /// let movie = Movie::new(155, "The Dark Knight");
    /// assert!(movie.poster_url().is_none());
    /// ```
    #[must_use]
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            release_date: String::new(),
            poster_path: None,
            overview: None,
        }
    }

    #[must_use]
    pub fn with_release_date(mut self, date: impl Into<String>) -> Self {
        self.release_date = date.into();
        self
    }

    #[must_use]
    pub fn with_poster_path(mut self, path: impl Into<String>) -> Self {
        self.poster_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_overview(mut self, overview: impl Into<String>) -> Self {
        self.overview = Some(overview.into());
        self
    }

    /// Full poster URL, if TMDB has a poster for this film.
    #[must_use]
    pub fn poster_url(&self) -> Option<String> {
        self.poster_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|p| format!("{POSTER_BASE_URL}{p}"))
    }

    fn parsed_release_date(&self) -> Option<chrono::NaiveDate> {
        chrono::NaiveDate::parse_from_str(&self.release_date, "%Y-%m-%d").ok()
    }

    /// Release year, e.g. `"2008"`.
    #[must_use]
    pub fn release_year(&self) -> Option<String> {
        use chrono::Datelike;
        self.parsed_release_date().map(|d| d.year().to_string())
    }

    /// Long-form release date for the detail pane, e.g. `"July 18, 2008"`.
    ///
    /// Falls back to the raw string when it is not a valid date, and to
    /// `"Release date unknown"` when it is empty.
    #[must_use]
    pub fn display_release_date(&self) -> String {
        match self.parsed_release_date() {
            Some(date) => date.format("%B %-d, %Y").to_string(),
            None if self.release_date.is_empty() => "Release date unknown".to_string(),
            None => self.release_date.clone(),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_date_formats() {
        let movie = Movie::new(155, "The Dark Knight").with_release_date("2008-07-16");
        assert_eq!(movie.release_year().as_deref(), Some("2008"));
        assert_eq!(movie.display_release_date(), "July 16, 2008");

        let undated = Movie::new(2, "Untitled");
        assert_eq!(undated.release_year(), None);
        assert_eq!(undated.display_release_date(), "Release date unknown");

        let odd = Movie::new(3, "Odd").with_release_date("1999");
        assert_eq!(odd.display_release_date(), "1999");
    }

    #[test]
    fn poster_url_requires_a_path() {
        let movie = Movie::new(1, "A").with_poster_path("/abc.jpg");
        assert_eq!(
            movie.poster_url().as_deref(),
            Some("https://image.tmdb.org/t/p/w500/abc.jpg")
        );
        assert!(Movie::new(1, "A").with_poster_path("").poster_url().is_none());
    }

    #[test]
    fn decodes_tmdb_shape_with_nulls() {
        let json = r#"{"id":268,"title":"Batman","release_date":null,"poster_path":null,"vote_average":7.2}"#;
        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.id, 268);
        assert_eq!(movie.release_date, "");
        assert!(movie.poster_path.is_none());
    }
}
