//! Built-in movie catalog served by the offline backend.

use crate::domain::{Movie, MovieId, SearchError};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

const FIXTURES: &[(MovieId, &str, &str, &str)] = &[
    (278, "The Shawshank Redemption", "1994-09-23", "Two imprisoned men bond over a number of years."),
    (238, "The Godfather", "1972-03-14", "The aging patriarch of a crime dynasty hands control to his reluctant son."),
    (155, "The Dark Knight", "2008-07-16", "Batman raises the stakes in his war on crime."),
    (389, "12 Angry Men", "1957-04-10", "A jury holdout forces his colleagues to reconsider the evidence."),
    (424, "Schindler's List", "1993-12-15", "A businessman saves the lives of more than a thousand refugees."),
    (268, "Batman", "1989-06-23", "Gotham's caped vigilante faces the Joker."),
    (364, "Batman Returns", "1992-06-19", "Batman confronts the Penguin and Catwoman."),
    (414, "Batman Forever", "1995-06-16", "Batman battles Two-Face and the Riddler."),
    (415, "Batman & Robin", "1997-06-20", "Batman and Robin take on Mr. Freeze and Poison Ivy."),
    (272, "Batman Begins", "2005-06-10", "Bruce Wayne returns to Gotham and becomes its protector."),
    (49026, "The Dark Knight Rises", "2012-07-16", "Eight years later, Batman comes out of exile."),
    (414906, "The Batman", "2022-03-01", "In his second year of fighting crime, Batman uncovers corruption."),
    (348, "Alien", "1979-05-25", "The crew of a commercial spacecraft encounters a deadly lifeform."),
    (949, "Heat", "1995-12-15", "A detective pursues a crew of professional thieves."),
    (680, "Pulp Fiction", "1994-09-10", "Several Los Angeles criminals cross paths."),
    (13, "Forrest Gump", "1994-06-23", "A man with a low IQ witnesses decades of American history."),
    (603, "The Matrix", "1999-03-31", ""),
];

/// Fixed in-memory catalog with fuzzy title search.
pub struct Catalog {
    movies: Vec<Movie>,
    matcher: SkimMatcherV2,
}

impl Default for Catalog {
    fn default() -> Self {
        let movies = FIXTURES
            .iter()
            .map(|&(id, title, date, overview)| {
                let movie = Movie::new(id, title).with_release_date(date);
                if overview.is_empty() {
                    movie
                } else {
                    movie.with_overview(overview)
                }
            })
            .collect();
        Self::with_movies(movies)
    }
}

impl Catalog {
    #[must_use]
    pub fn with_movies(movies: Vec<Movie>) -> Self {
        Self {
            movies,
            matcher: SkimMatcherV2::default().ignore_case(),
        }
    }

    /// Returns movies whose titles match every whitespace-separated token of
    /// `query`, best match first.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::EmptyQueryRejected`] for a blank query.
    pub fn search(&self, query: &str) -> Result<Vec<Movie>, SearchError> {
        let tokens: Vec<&str> = query.split_whitespace().collect();
        if tokens.is_empty() {
            return Err(SearchError::EmptyQueryRejected);
        }

        let mut scored: Vec<(i64, &Movie)> = self
            .movies
            .iter()
            .filter_map(|movie| {
                tokens
                    .iter()
                    .map(|token| self.matcher.fuzzy_match(&movie.title, token))
                    .sum::<Option<i64>>()
                    .map(|score| (score, movie))
            })
            .collect();

        scored.sort_by(|(a_score, a), (b_score, b)| {
            b_score.cmp(a_score).then_with(|| a.title.cmp(&b.title))
        });

        Ok(scored.into_iter().map(|(_, movie)| movie.clone()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(movies: &[Movie]) -> Vec<&str> {
        movies.iter().map(|m| m.title.as_str()).collect()
    }

    #[test]
    fn blank_query_is_rejected() {
        let catalog = Catalog::default();
        assert_eq!(catalog.search(""), Err(SearchError::EmptyQueryRejected));
        assert_eq!(catalog.search("   "), Err(SearchError::EmptyQueryRejected));
    }

    #[test]
    fn prefix_finds_every_batman_film() {
        let movies = Catalog::default().search("batman").unwrap();
        let found = titles(&movies);
        for title in ["Batman", "Batman Returns", "Batman Begins", "The Batman"] {
            assert!(found.contains(&title), "missing {title}");
        }
        assert!(!found.contains(&"Heat"));
    }

    #[test]
    fn all_tokens_must_match() {
        let movies = Catalog::default().search("dark rises").unwrap();
        assert_eq!(titles(&movies), vec!["The Dark Knight Rises"]);
    }

    #[test]
    fn matching_ignores_case() {
        let movies = Catalog::default().search("GODFATHER").unwrap();
        assert_eq!(titles(&movies), vec!["The Godfather"]);
    }

    #[test]
    fn unmatched_query_is_empty_success() {
        assert_eq!(Catalog::default().search("qqqzzz"), Ok(vec![]));
    }

    #[test]
    fn equal_scores_order_by_title() {
        let catalog = Catalog::with_movies(vec![Movie::new(2, "Alien 2"), Movie::new(1, "Alien 1")]);
        let movies = catalog.search("alien").unwrap();
        assert_eq!(titles(&movies), vec!["Alien 1", "Alien 2"]);
    }
}
