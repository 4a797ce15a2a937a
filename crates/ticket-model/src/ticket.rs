//! Ticket records as read from the export and as written to the report.

use chrono::NaiveDateTime;

/// Header text of every report column, in sheet order.
pub const OUTPUT_COLUMNS: [&str; 11] = [
    "Customer",
    "Queue",
    "Ticket Number",
    "Subject",
    "Age",
    "Created",
    "Priority",
    "CustomerID",
    "Customer Name",
    "From",
    "Type",
];

pub const QUEUE_COLUMN: &str = "Queue";
pub const PRIORITY_COLUMN: &str = "Priority";

/// A typed cell value. `Empty` is the only null representation.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    DateTime(NaiveDateTime),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.is_empty(),
            _ => false,
        }
    }

    /// Display form used for matching and logging.
    pub fn to_display(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(text) => text.clone(),
            Self::Number(value) => format_number(*value),
            Self::DateTime(value) => value.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Render a number without exponent, dropping `.0` on integral values.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// One record of the raw export.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TicketRow {
    pub ticket_number: String,
    pub subject: String,
    pub age: CellValue,
    /// `None` when the source value was missing or could not be parsed.
    pub created: Option<NaiveDateTime>,
    pub priority: String,
    pub customer_id: CellValue,
    pub customer_name: CellValue,
    pub from: CellValue,
    pub ticket_type: CellValue,
    /// Raw queue text, the input of classification.
    pub queue: String,
}

/// A classified ticket, ready to be written to the report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputRow {
    pub customer: String,
    pub queue: String,
    pub ticket_number: String,
    pub subject: String,
    pub age: CellValue,
    pub created: Option<NaiveDateTime>,
    pub priority: String,
    pub customer_id: CellValue,
    pub customer_name: CellValue,
    pub from: CellValue,
    pub ticket_type: CellValue,
}

impl OutputRow {
    /// Cell values in [`OUTPUT_COLUMNS`] order.
    pub fn cells(&self) -> [CellValue; 11] {
        [
            CellValue::Text(self.customer.clone()),
            CellValue::Text(self.queue.clone()),
            CellValue::Text(self.ticket_number.clone()),
            CellValue::Text(self.subject.clone()),
            self.age.clone(),
            self.created.map_or(CellValue::Empty, CellValue::DateTime),
            CellValue::Text(self.priority.clone()),
            self.customer_id.clone(),
            self.customer_name.clone(),
            self.from.clone(),
            self.ticket_type.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_number_avoids_scientific_notation() {
        assert_eq!(format_number(2024010112345678.0), "2024010112345678");
        assert_eq!(format_number(42.0), "42");
        assert_eq!(format_number(1.5), "1.5");
    }

    #[test]
    fn cells_follow_header_order() {
        let row = OutputRow {
            customer: "ACME".to_string(),
            queue: "FI-CO".to_string(),
            priority: "3 normal".to_string(),
            ..OutputRow::default()
        };
        let cells = row.cells();
        assert_eq!(cells.len(), OUTPUT_COLUMNS.len());
        let queue_idx = OUTPUT_COLUMNS.iter().position(|c| *c == QUEUE_COLUMN).unwrap();
        let priority_idx = OUTPUT_COLUMNS
            .iter()
            .position(|c| *c == PRIORITY_COLUMN)
            .unwrap();
        assert_eq!(cells[0], CellValue::text("ACME"));
        assert_eq!(cells[queue_idx], CellValue::text("FI-CO"));
        assert_eq!(cells[priority_idx], CellValue::text("3 normal"));
        assert_eq!(cells[5], CellValue::Empty);
    }
}
