//! Ticket transformation stages.
//!
//! - **classify**: Customer/Queue labels and the subject priority override
//! - **sanitize**: control-character and line-break cleanup for written values
//! - **sort**: stable priority/recency ordering

pub mod classify;
pub mod sanitize;
pub mod sort;

pub use classify::{Classifier, PriorityRule};
pub use sanitize::{
    is_forbidden_control, is_null_marker, sanitize_cell, sanitize_row, sanitize_sheet_name,
    sanitize_text,
};
pub use sort::{compare_rows, sort_rows};

use ticket_model::{OutputRow, TicketRow};

/// Classify, clean and order export rows for the report.
pub fn prepare_rows(classifier: &Classifier, tickets: &[TicketRow]) -> Vec<OutputRow> {
    let rows = tickets
        .iter()
        .map(|ticket| sanitize_row(classifier.classify(ticket)))
        .collect();
    sort_rows(rows)
}
