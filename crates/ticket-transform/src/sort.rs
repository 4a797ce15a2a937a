//! Report row ordering.

use std::cmp::Ordering;

use chrono::NaiveDateTime;

use ticket_model::OutputRow;

/// Newest first; a missing timestamp sorts after every valid one.
fn compare_created(left: Option<&NaiveDateTime>, right: Option<&NaiveDateTime>) -> Ordering {
    match (left, right) {
        (Some(left), Some(right)) => right.cmp(left),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Report order of two rows: priority ascending, then created descending.
pub fn compare_rows(left: &OutputRow, right: &OutputRow) -> Ordering {
    left.priority
        .cmp(&right.priority)
        .then_with(|| compare_created(left.created.as_ref(), right.created.as_ref()))
}

/// Stable sort into report order. Rows with equal keys keep their input order.
pub fn sort_rows(mut rows: Vec<OutputRow>) -> Vec<OutputRow> {
    rows.sort_by(compare_rows);
    rows
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn row(ticket: &str, priority: &str, created: Option<&str>) -> OutputRow {
        OutputRow {
            ticket_number: ticket.to_string(),
            priority: priority.to_string(),
            created: created.map(|value| {
                NaiveDate::parse_from_str(value, "%Y-%m-%d")
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap()
            }),
            ..OutputRow::default()
        }
    }

    fn order(rows: &[OutputRow]) -> Vec<&str> {
        rows.iter().map(|row| row.ticket_number.as_str()).collect()
    }

    #[test]
    fn priority_beats_recency() {
        let sorted = sort_rows(vec![
            row("a", "2 High", Some("2024-01-01")),
            row("b", "1", Some("2024-06-01")),
        ]);
        assert_eq!(order(&sorted), vec!["b", "a"]);
    }

    #[test]
    fn newest_first_and_missing_last_within_priority() {
        let sorted = sort_rows(vec![
            row("old", "3 normal", Some("2023-01-01")),
            row("none", "3 normal", None),
            row("new", "3 normal", Some("2024-01-01")),
            row("urgent-none", "2 High", None),
        ]);
        assert_eq!(order(&sorted), vec!["urgent-none", "new", "old", "none"]);
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let sorted = sort_rows(vec![
            row("first", "3 normal", Some("2024-01-01")),
            row("x", "2 High", None),
            row("second", "3 normal", Some("2024-01-01")),
            row("third", "3 normal", Some("2024-01-01")),
        ]);
        assert_eq!(order(&sorted), vec!["x", "first", "second", "third"]);
    }
}
