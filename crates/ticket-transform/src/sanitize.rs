//! Text cleanup for values written to the report.
//!
//! Workbook XML rejects most control characters, and embedded line breaks make
//! rows unreadable in the sheet. Every written value goes through here.

use ticket_model::{CellValue, OutputRow};

/// Characters that must never reach the workbook.
///
/// C0 controls except tab and the line breaks (handled separately), DEL and
/// the C1 range.
pub fn is_forbidden_control(ch: char) -> bool {
    matches!(
        ch,
        '\u{0}'..='\u{8}' | '\u{b}' | '\u{c}' | '\u{e}'..='\u{1f}' | '\u{7f}'..='\u{9f}'
    )
}

fn is_line_break(ch: char) -> bool {
    matches!(ch, '\r' | '\n')
}

/// Clean a text value.
///
/// Forbidden control characters are dropped, each run of CR/LF becomes a
/// single space, and the result is trimmed. Applying it twice changes nothing.
pub fn sanitize_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_break = false;
    for ch in raw.chars() {
        if is_line_break(ch) {
            pending_break = true;
        } else if is_forbidden_control(ch) {
            continue;
        } else {
            if pending_break {
                out.push(' ');
                pending_break = false;
            }
            out.push(ch);
        }
    }
    let trimmed = out.trim();
    if trimmed.len() == out.len() {
        out
    } else {
        trimmed.to_string()
    }
}

/// Whether `value` is a textual null marker left behind by spreadsheet tools.
pub fn is_null_marker(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("nan")
}

/// Clean a cell; empty text and null markers become [`CellValue::Empty`].
pub fn sanitize_cell(value: CellValue) -> CellValue {
    match value {
        CellValue::Text(text) => {
            let clean = sanitize_text(&text);
            if clean.is_empty() || is_null_marker(&clean) {
                CellValue::Empty
            } else {
                CellValue::Text(clean)
            }
        }
        other => other,
    }
}

fn sanitize_field(value: &str) -> String {
    let clean = sanitize_text(value);
    if is_null_marker(&clean) {
        String::new()
    } else {
        clean
    }
}

/// Clean every field of a row.
pub fn sanitize_row(row: OutputRow) -> OutputRow {
    OutputRow {
        customer: sanitize_field(&row.customer),
        queue: sanitize_field(&row.queue),
        ticket_number: sanitize_field(&row.ticket_number),
        subject: sanitize_field(&row.subject),
        age: sanitize_cell(row.age),
        created: row.created,
        priority: sanitize_field(&row.priority),
        customer_id: sanitize_cell(row.customer_id),
        customer_name: sanitize_cell(row.customer_name),
        from: sanitize_cell(row.from),
        ticket_type: sanitize_cell(row.ticket_type),
    }
}

const SHEET_NAME_FORBIDDEN: [char; 7] = ['[', ']', '*', '/', '\\', '?', ':'];
const SHEET_NAME_MAX_CHARS: usize = 31;

/// Make `name` usable as a worksheet name.
pub fn sanitize_sheet_name(name: &str) -> String {
    let cleaned: String = sanitize_text(name)
        .chars()
        .filter(|ch| !SHEET_NAME_FORBIDDEN.contains(ch))
        .take(SHEET_NAME_MAX_CHARS)
        .collect();
    cleaned.trim().to_string()
}
