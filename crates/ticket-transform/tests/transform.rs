//! Classification, cleanup and ordering of export rows.

use chrono::{NaiveDate, NaiveDateTime};
use proptest::prelude::*;

use ticket_map::CategoryMatcher;
use ticket_model::{CellValue, LookupEntry, LookupTable, TicketRow};
use ticket_transform::{
    Classifier, PriorityRule, is_forbidden_control, prepare_rows, sanitize_text,
};

fn at(date: &str, hour: u32) -> NaiveDateTime {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

fn classifier() -> Classifier {
    let customers = LookupTable::new(vec![LookupEntry::new("ACME"), LookupEntry::new("Globex")]);
    let queues = LookupTable::new(vec![
        LookupEntry::with_category("FI-CO", "FI-CO"),
        LookupEntry::with_category("MM", "MM_PP_QM"),
    ]);
    Classifier::new(
        CategoryMatcher::new(&customers).unwrap(),
        CategoryMatcher::new(&queues).unwrap(),
        PriorityRule::new(&["prior", "urg", "alt", "high"], "2 High").unwrap(),
    )
}

fn ticket(
    number: &str,
    queue: &str,
    subject: &str,
    priority: &str,
    created: Option<NaiveDateTime>,
) -> TicketRow {
    TicketRow {
        ticket_number: number.to_string(),
        subject: subject.to_string(),
        priority: priority.to_string(),
        queue: queue.to_string(),
        created,
        ..TicketRow::default()
    }
}

#[test]
fn queue_and_customer_labels_come_from_queue_text() {
    let row = classifier().classify(&ticket("1", "ACME::FI-CO", "Invoice", "3 normal", None));
    assert_eq!(row.customer, "ACME");
    assert_eq!(row.queue, "FI-CO");
    assert_eq!(row.priority, "3 normal");
}

#[test]
fn queue_falls_back_to_customer_label() {
    let row = classifier().classify(&ticket("2", "Globex::Other", "Login", "3 normal", None));
    assert_eq!(row.customer, "Globex");
    assert_eq!(row.queue, "Globex");
}

#[test]
fn unmatched_ticket_has_empty_labels() {
    let row = classifier().classify(&ticket("3", "Initech::Support", "Login", "3 normal", None));
    assert_eq!(row.customer, "");
    assert_eq!(row.queue, "");
}

#[test]
fn urgent_subject_overrides_priority() {
    let row = classifier().classify(&ticket("4", "ACME::MM", "  URGENT stock issue ", "4 low", None));
    assert_eq!(row.priority, "2 High");
    assert_eq!(row.subject, "URGENT stock issue");
}

#[test]
fn prepared_rows_are_clean_and_ordered() {
    let tickets = vec![
        ticket("100", "ACME::FI-CO", "Invoice\r\nwrong", "3 normal", Some(at("2024-01-02", 9))),
        ticket("101", "ACME::MM", "Stock", "3 normal", Some(at("2024-03-01", 9))),
        ticket("102", "Globex::Other", "Please prioritise", "3 normal", None),
        ticket("103", "Initech", "nan", "3 normal", None),
    ];
    let rows = prepare_rows(&classifier(), &tickets);
    let rendered: Vec<String> = rows
        .iter()
        .map(|row| {
            format!(
                "{} | {} | {} | {} | [{}]",
                row.ticket_number,
                row.priority,
                row.customer,
                row.queue,
                row.subject
            )
        })
        .collect();
    insta::assert_snapshot!(rendered.join("\n"), @r"
    102 | 2 High | Globex | Globex | [Please prioritise]
    101 | 3 normal | ACME | MM | [Stock]
    100 | 3 normal | ACME | FI-CO | [Invoice wrong]
    103 | 3 normal |  |  | []
    ");
}

#[test]
fn null_marker_cells_are_written_empty() {
    let mut source = ticket("7", "ACME", "Subject", "3 normal", None);
    source.customer_name = CellValue::text("nan");
    source.from = CellValue::text("ops@example.com\n");
    let rows = prepare_rows(&classifier(), &[source]);
    assert_eq!(rows[0].customer_name, CellValue::Empty);
    assert_eq!(rows[0].from, CellValue::text("ops@example.com"));
}

proptest! {
    #[test]
    fn sanitized_text_has_no_controls_or_breaks(raw in any::<String>()) {
        let clean = sanitize_text(&raw);
        prop_assert!(!clean.chars().any(|ch| is_forbidden_control(ch) || ch == '\r' || ch == '\n'));
        prop_assert_eq!(clean.trim(), clean.as_str());
    }

    #[test]
    fn sanitizing_twice_changes_nothing(raw in any::<String>()) {
        let once = sanitize_text(&raw);
        prop_assert_eq!(sanitize_text(&once), once.clone());
    }

    #[test]
    fn sort_keeps_every_row(priorities in proptest::collection::vec(0u8..4, 0..20)) {
        let tickets: Vec<TicketRow> = priorities
            .iter()
            .enumerate()
            .map(|(index, priority)| ticket(&index.to_string(), "", "x", &priority.to_string(), None))
            .collect();
        let rows = prepare_rows(&classifier(), &tickets);
        prop_assert_eq!(rows.len(), tickets.len());
        for pair in rows.windows(2) {
            prop_assert!(pair[0].priority <= pair[1].priority);
            if pair[0].priority == pair[1].priority {
                let left: usize = pair[0].ticket_number.parse().unwrap();
                let right: usize = pair[1].ticket_number.parse().unwrap();
                prop_assert!(left < right);
            }
        }
    }
}
