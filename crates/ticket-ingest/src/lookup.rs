//! Loader for the `key` / `key;category` lookup resources.

use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, info};

use ticket_model::{LookupEntry, LookupTable, ReportError, Result};

const FIELD_DELIMITER: char = ';';

/// Load a lookup table from disk.
///
/// A missing file is `ResourceNotFound`; every other failure, including text
/// that is not valid UTF-8, is `ResourceReadError`.
pub fn load_lookup_table(path: &Path) -> Result<LookupTable> {
    let text = std::fs::read_to_string(path).map_err(|error| match error.kind() {
        ErrorKind::NotFound => ReportError::ResourceNotFound {
            path: path.to_path_buf(),
        },
        _ => ReportError::read(path, error),
    })?;
    let table = parse_lookup_table(&text).with_source(path);
    info!(
        path = %path.display(),
        entries = table.len(),
        "lookup table loaded"
    );
    Ok(table)
}

/// Parse lookup lines, keeping file order. Blank lines are ignored.
pub fn parse_lookup_table(text: &str) -> LookupTable {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut entries = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        if let Some(entry) = parse_line(line) {
            entries.push(entry);
        } else {
            debug!(line = idx + 1, "skipping lookup line without a key");
        }
    }
    LookupTable::new(entries)
}

fn parse_line(line: &str) -> Option<LookupEntry> {
    let mut fields = line.split(FIELD_DELIMITER);
    let key = fields.next()?.trim();
    if key.is_empty() {
        return None;
    }
    let category = fields
        .next()
        .map(str::trim)
        .filter(|category| !category.is_empty())
        .map(str::to_string);
    Some(LookupEntry {
        key: key.to_string(),
        category,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keys_and_categories_in_order() {
        let table = parse_lookup_table("FI-CO;FI-CO\r\nACME\n\nMM;MM_PP_QM;extra\n");
        assert_eq!(
            table.entries,
            vec![
                LookupEntry::with_category("FI-CO", "FI-CO"),
                LookupEntry::new("ACME"),
                LookupEntry::with_category("MM", "MM_PP_QM"),
            ]
        );
    }

    #[test]
    fn skips_blank_keys_and_empty_categories() {
        let table = parse_lookup_table("\u{feff};System\nBASIS;\n   \n");
        assert_eq!(table.entries, vec![LookupEntry::new("BASIS")]);
    }
}
