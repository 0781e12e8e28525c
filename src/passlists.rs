use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

use crate::errors::{AnalyzerError, Result};

/// Directory read when `--passlists` is not given.
pub const DEFAULT_PASSLIST_DIR: &str = "./passlists";

/// Known passwords, case-sensitive as loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordDictionary {
    passwords: HashSet<String>,
}

impl PasswordDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, password: &str) -> bool {
        self.passwords.contains(password)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.passwords.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.passwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passwords.is_empty()
    }

    /// Adds one password per non-empty line of `content`.
    pub fn extend_from_lines(&mut self, content: &str) -> usize {
        let before = self.passwords.len();
        self.passwords.extend(
            content
                .lines()
                .filter(|line| !line.is_empty())
                .map(str::to_string),
        );
        self.passwords.len() - before
    }
}

impl<S: Into<String>> FromIterator<S> for PasswordDictionary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            passwords: iter.into_iter().map(Into::into).collect(),
        }
    }
}

fn load_failure(path: &Path, source: std::io::Error) -> AnalyzerError {
    AnalyzerError::DictionaryLoadFailure {
        path: path.to_path_buf(),
        source,
    }
}

/// `*.txt` files directly inside `dir`, sorted by name.
fn passlist_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| load_failure(dir, e))? {
        let path = entry.map_err(|e| load_failure(dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "txt") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Reads every password list in `dir` into one dictionary.
///
/// Any unreadable directory or file fails the whole load.
pub fn load_password_lists(dir: &Path) -> Result<PasswordDictionary> {
    let start_time = Instant::now();
    info!(action = "start", component = "passlist_loading", dir = ?dir, "Reading password lists");

    let mut dictionary = PasswordDictionary::new();
    let files = passlist_files(dir)?;
    for file in &files {
        let content = fs::read_to_string(file).map_err(|e| load_failure(file, e))?;
        let added = dictionary.extend_from_lines(&content);
        debug!(action = "loaded", component = "passlist_file", file_path = ?file, new_passwords = added, "Loaded password list");
    }

    info!(
        action = "complete",
        component = "passlist_loading",
        file_count = files.len(),
        password_count = dictionary.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Password lists loaded"
    );
    Ok(dictionary)
}
