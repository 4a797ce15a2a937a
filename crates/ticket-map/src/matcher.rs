//! Whole-word matching of lookup keys against free text.
//!
//! A key matches when it occurs in the text with a word boundary on both
//! sides. Keys are literal text: regex metacharacters are escaped. Matching is
//! case-sensitive and the first matching entry in table order wins.

use regex::Regex;

use ticket_model::{LookupTable, ReportError, Result};

/// Build the whole-word pattern for a literal key.
fn whole_word_pattern(key: &str) -> String {
    format!(r"\b{}\b", regex::escape(key))
}

/// A lookup table with one compiled pattern per entry.
#[derive(Debug, Clone)]
pub struct CategoryMatcher {
    entries: Vec<(String, Regex)>,
}

impl CategoryMatcher {
    pub fn new(table: &LookupTable) -> Result<Self> {
        let entries = table
            .iter()
            .map(|entry| {
                Regex::new(&whole_word_pattern(&entry.key))
                    .map(|regex| (entry.key.clone(), regex))
                    .map_err(|error| {
                        ReportError::Processing(format!(
                            "invalid lookup key '{}': {error}",
                            entry.key
                        ))
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries })
    }

    /// Key of the first entry found in `text`, or `""` when none matches.
    pub fn find(&self, text: &str) -> &str {
        self.entries
            .iter()
            .find(|(_, regex)| regex.is_match(text))
            .map_or("", |(key, _)| key.as_str())
    }
}

/// One-shot form of [`CategoryMatcher::find`] that compiles patterns on the fly.
pub fn match_category(table: &LookupTable, text: &str) -> String {
    table
        .iter()
        .find(|entry| {
            Regex::new(&whole_word_pattern(&entry.key)).is_ok_and(|regex| regex.is_match(text))
        })
        .map(|entry| entry.key.clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use ticket_model::LookupEntry;

    use super::*;

    fn table(keys: &[&str]) -> LookupTable {
        LookupTable::new(keys.iter().map(|key| LookupEntry::new(*key)).collect())
    }

    #[test]
    fn matches_whole_words_only() {
        let matcher = CategoryMatcher::new(&table(&["FI"])).unwrap();
        assert_eq!(matcher.find("FIELD"), "");
        assert_eq!(matcher.find("FI-CO ticket"), "FI");
        assert_eq!(matcher.find("Queue: FI support"), "FI");
    }

    #[test]
    fn earliest_entry_wins() {
        let matcher = CategoryMatcher::new(&table(&["MM", "FI-CO", "FI"])).unwrap();
        assert_eq!(matcher.find("Support::FI-CO::MM"), "MM");
        assert_eq!(matcher.find("Support::FI-CO"), "FI-CO");
    }

    #[test]
    fn keys_are_literal_and_case_sensitive() {
        let matcher = CategoryMatcher::new(&table(&["S.D", "basis"])).unwrap();
        assert_eq!(matcher.find("Queue SXD"), "");
        assert_eq!(matcher.find("Queue S.D"), "S.D");
        assert_eq!(matcher.find("BASIS"), "");
    }

    #[test]
    fn one_shot_agrees_with_compiled() {
        let lookup = table(&["SD", "FI-CO"]);
        let matcher = CategoryMatcher::new(&lookup).unwrap();
        for text in ["SD_CS", "Support SD", "FI-CO", "", "fi-co"] {
            assert_eq!(match_category(&lookup, text), matcher.find(text));
        }
    }
}
