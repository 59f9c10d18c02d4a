// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use serde::Serialize;

/// Separator between entries of a [`SearchPathList`] (the Windows path-list
/// separator).
pub const PATH_LIST_SEPARATOR: char = ';';

/// Ordered, separator-joined list of candidate directories.
///
/// Earlier entries take priority when the list is later searched. Entries are
/// not de-duplicated; callers must tolerate repeats.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SearchPathList {
    paths: String,
}

impl SearchPathList {
    pub fn new() -> Self {
        SearchPathList {
            paths: String::new(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.paths
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn clear(&mut self) {
        self.paths.clear();
    }

    /// Replaces the whole list with a single entry.
    pub fn set(&mut self, path: &str) {
        self.paths.clear();
        self.paths.push_str(path);
    }

    /// Appends an entry, inserting the separator unless the list is empty.
    pub fn join(&mut self, path: &str) {
        if !self.paths.is_empty() {
            self.paths.push(PATH_LIST_SEPARATOR);
        }
        self.paths.push_str(path);
    }

    /// The entries in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths
            .split(PATH_LIST_SEPARATOR)
            .filter(|entry| !entry.is_empty())
    }
}

impl std::fmt::Display for SearchPathList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.paths)
    }
}
