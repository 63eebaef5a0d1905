use crate::core::dump::DumpManager;
use crate::domain::model::Movie;
use crate::utils::error::{CollectionError, Result};
use crate::utils::validation::Validate;
use chrono::{DateTime, Local};
use std::collections::HashSet;
use std::fmt;

/// In-memory movie collection, kept sorted by [`Movie::natural_cmp`].
pub struct CollectionManager {
    movies: Vec<Movie>,
    next_id: i64,
    last_init_time: Option<DateTime<Local>>,
    last_save_time: Option<DateTime<Local>>,
    dump: DumpManager,
}

impl CollectionManager {
    pub fn new(dump: DumpManager) -> Self {
        Self {
            movies: Vec::new(),
            next_id: 1,
            last_init_time: None,
            last_save_time: None,
            dump,
        }
    }

    pub fn last_init_time(&self) -> Option<DateTime<Local>> {
        self.last_init_time
    }

    pub fn last_save_time(&self) -> Option<DateTime<Local>> {
        self.last_save_time
    }

    pub fn dump(&self) -> &DumpManager {
        &self.dump
    }

    /// Replaces the contents with the collection file.
    ///
    /// On any error the collection is left empty. A file with duplicate ids
    /// or invalid elements is rejected as a whole.
    pub fn load_collection(&mut self) -> Result<usize> {
        self.movies.clear();
        self.next_id = 1;
        self.last_init_time = Some(Local::now());

        let loaded = self.dump.read_collection()?;

        let mut seen = HashSet::with_capacity(loaded.len());
        for movie in &loaded {
            if !seen.insert(movie.id) {
                return Err(CollectionError::DuplicateId { id: movie.id });
            }
            movie.validate().map_err(|e| CollectionError::ValidationError {
                message: format!("movie id={}: {}", movie.id, e),
            })?;
        }

        self.next_id = loaded.iter().map(|m| m.id).max().unwrap_or(0).max(1);
        self.movies = loaded;
        self.sort();

        tracing::info!(
            "Loaded {} movies from '{}'",
            self.movies.len(),
            self.dump.file_path().display()
        );
        Ok(self.movies.len())
    }

    pub fn save_collection(&mut self) -> Result<()> {
        self.dump.write_collection(&self.movies)?;
        self.last_save_time = Some(Local::now());
        tracing::info!(
            "Saved {} movies to '{}'",
            self.movies.len(),
            self.dump.file_path().display()
        );
        Ok(())
    }

    /// Smallest unused id starting from the id counter. Wraps to 1 on overflow.
    pub fn free_id(&mut self) -> i64 {
        while self.get_by_id(self.next_id).is_some() {
            self.next_id = match self.next_id.checked_add(1) {
                Some(id) => id,
                None => 1,
            };
        }
        self.next_id
    }

    pub fn get_by_id(&self, id: i64) -> Option<&Movie> {
        self.movies.iter().find(|movie| movie.id == id)
    }

    pub fn contains(&self, movie: &Movie) -> bool {
        self.get_by_id(movie.id).is_some()
    }

    /// Returns `false` when an element with the same id is already present.
    pub fn add(&mut self, movie: Movie) -> bool {
        if self.contains(&movie) {
            return false;
        }
        tracing::debug!("Adding movie id={}", movie.id);
        self.movies.push(movie);
        self.sort();
        true
    }

    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.movies.len();
        self.movies.retain(|movie| movie.id != id);
        let removed = self.movies.len() != before;
        if removed {
            tracing::debug!("Removed movie id={}", id);
        }
        removed
    }

    /// Removes every element matching `predicate`, returning how many went.
    pub fn remove_where<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&Movie) -> bool,
    {
        let before = self.movies.len();
        self.movies.retain(|movie| !predicate(movie));
        before - self.movies.len()
    }

    pub fn clear(&mut self) {
        self.movies.clear();
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn min(&self) -> Option<&Movie> {
        self.movies.first()
    }

    pub fn max(&self) -> Option<&Movie> {
        self.movies.last()
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn sum_of_oscars(&self) -> i128 {
        self.movies.iter().map(|movie| movie.oscars_count as i128).sum()
    }

    fn sort(&mut self) {
        self.movies.sort_by(Movie::natural_cmp);
    }
}

impl fmt::Display for CollectionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.movies.is_empty() {
            return f.write_str("Collection is empty!");
        }
        let listing = self
            .movies
            .iter()
            .map(Movie::to_string)
            .collect::<Vec<_>>()
            .join("\n\n");
        f.write_str(&listing)
    }
}
