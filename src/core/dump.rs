use crate::domain::model::Movie;
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// Reads and writes the collection file as a JSON array of movies.
pub struct DumpManager {
    storage: Box<dyn Storage>,
    file_path: PathBuf,
    pretty: bool,
}

impl DumpManager {
    pub fn new(storage: impl Storage + 'static, file_path: impl Into<PathBuf>) -> Self {
        Self {
            storage: Box::new(storage),
            file_path: file_path.into(),
            pretty: true,
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Blank lines are dropped before parsing; a file with no content is an
    /// empty collection.
    pub fn read_collection(&self) -> Result<Vec<Movie>> {
        let bytes = self.storage.read_file(&self.file_path)?;
        let raw = String::from_utf8(bytes)?;
        let text = raw.strip_prefix('\u{FEFF}').unwrap_or(raw.as_str());

        let json: String = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        if json.is_empty() {
            tracing::warn!(
                "Collection file '{}' is empty, starting with an empty collection",
                self.file_path.display()
            );
            return Ok(Vec::new());
        }

        let movies: Option<Vec<Movie>> = serde_json::from_str(&json)?;
        let movies = movies.unwrap_or_default();
        tracing::debug!(
            "Read {} movies from '{}'",
            movies.len(),
            self.file_path.display()
        );
        Ok(movies)
    }

    pub fn write_collection(&self, movies: &[Movie]) -> Result<()> {
        let mut json = if self.pretty {
            serde_json::to_string_pretty(movies)?
        } else {
            serde_json::to_string(movies)?
        };
        json.push('\n');

        tracing::debug!(
            "Writing {} movies ({} bytes) to '{}'",
            movies.len(),
            json.len(),
            self.file_path.display()
        );
        self.storage.write_file(&self.file_path, json.as_bytes())
    }
}
