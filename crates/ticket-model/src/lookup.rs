use std::path::{Path, PathBuf};

/// One line of a lookup resource: `key` or `key;category`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupEntry {
    pub key: String,
    pub category: Option<String>,
}

impl LookupEntry {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            category: None,
        }
    }

    pub fn with_category(key: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            category: Some(category.into()),
        }
    }
}

/// Ordered lookup entries. Position is match priority: earlier entries win.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupTable {
    pub source: Option<PathBuf>,
    pub entries: Vec<LookupEntry>,
}

impl LookupTable {
    pub fn new(entries: Vec<LookupEntry>) -> Self {
        Self {
            source: None,
            entries,
        }
    }

    pub fn with_source(mut self, path: &Path) -> Self {
        self.source = Some(path.to_path_buf());
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LookupEntry> {
        self.entries.iter()
    }

    /// Keys of every entry tagged with `category`, in table order.
    pub fn keys_for_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a str> {
        self.entries
            .iter()
            .filter(move |entry| entry.category.as_deref() == Some(category))
            .map(|entry| entry.key.as_str())
    }
}

impl<'a> IntoIterator for &'a LookupTable {
    type Item = &'a LookupEntry;
    type IntoIter = std::slice::Iter<'a, LookupEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
