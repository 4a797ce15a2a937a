//! Reading the raw ticket export.
//!
//! The export is usually a workbook written by the ticket system; a CSV dump
//! with the same headers is accepted as well. Both are first read into a
//! [`RawTable`] of typed cells, then mapped to [`TicketRow`]s by header name.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use csv::ReaderBuilder;
use tracing::{debug, info, warn};

use ticket_model::{CellValue, ReportError, Result, TicketRow, format_number};

use crate::datetime::parse_timestamp;
use crate::header::{find_column, normalize_header};

pub const TICKET_NUMBER: &str = "Ticket Number";
pub const SUBJECT: &str = "Subject";
pub const AGE: &str = "Age";
pub const CREATED: &str = "Created";
pub const PRIORITY: &str = "Priority";
pub const CUSTOMER_ID: &str = "CustomerID";
pub const CUSTOMER_NAME: &str = "Customer Name";
pub const FROM: &str = "From";
pub const TYPE: &str = "Type";
pub const QUEUE: &str = "Queue";

/// Headers the export must provide.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    TICKET_NUMBER,
    SUBJECT,
    AGE,
    CREATED,
    PRIORITY,
    CUSTOMER_ID,
    CUSTOMER_NAME,
    FROM,
    TYPE,
    QUEUE,
];

/// A sheet of typed cells with its header row split off.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    /// Name of the sheet (or file) the table came from.
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

/// Read the export at `path` into ticket rows.
///
/// `sheet` selects the worksheet of workbook exports and is ignored for CSV.
pub fn read_export(path: &Path, sheet: &str) -> Result<Vec<TicketRow>> {
    let table = if is_csv(path) {
        read_csv_table(path)?
    } else {
        read_workbook_table(path, sheet)?
    };
    let tickets = tickets_from_table(&table)?;
    info!(
        path = %path.display(),
        sheet = %table.name,
        rows = tickets.len(),
        "export loaded"
    );
    Ok(tickets)
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

/// Read a worksheet, falling back to the first sheet when `sheet` is absent.
pub fn read_workbook_table(path: &Path, sheet: &str) -> Result<RawTable> {
    let mut workbook = open_workbook_auto(path).map_err(|error| ReportError::read(path, error))?;
    let names = workbook.sheet_names();
    let name = if names.iter().any(|name| name == sheet) {
        sheet.to_string()
    } else {
        let first = names
            .first()
            .cloned()
            .ok_or_else(|| ReportError::read(path, "workbook has no sheets"))?;
        warn!(
            path = %path.display(),
            expected = %sheet,
            using = %first,
            "export sheet not found, using first sheet"
        );
        first
    };
    let range = workbook
        .worksheet_range(&name)
        .map_err(|error| ReportError::read(path, error))?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|row| {
            row.iter()
                .map(|cell| normalize_header(&data_to_cell(cell).to_display()))
                .collect()
        })
        .unwrap_or_default();
    let rows: Vec<Vec<CellValue>> = rows
        .map(|row| row.iter().map(data_to_cell).collect())
        .collect();
    Ok(RawTable {
        name,
        headers,
        rows,
    })
}

/// Read a CSV export. Every cell is text; timestamps are parsed later.
pub fn read_csv_table(path: &Path) -> Result<RawTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|error| ReportError::read(path, error))?;
    let headers: Vec<String> = reader
        .headers()
        .map_err(|error| ReportError::read(path, error))?
        .iter()
        .map(normalize_header)
        .collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|error| ReportError::read(path, error))?;
        rows.push(
            record
                .iter()
                .map(|value| {
                    if value.is_empty() {
                        CellValue::Empty
                    } else {
                        CellValue::text(value)
                    }
                })
                .collect(),
        );
    }
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("export")
        .to_string();
    Ok(RawTable {
        name,
        headers,
        rows,
    })
}

/// Convert a workbook cell into a [`CellValue`].
pub fn data_to_cell(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(text) => CellValue::Text(text.clone()),
        Data::Float(value) => CellValue::Number(*value),
        Data::Int(value) => CellValue::Number(*value as f64),
        Data::Bool(value) => CellValue::Text(value.to_string()),
        Data::DateTime(value) => value
            .as_datetime()
            .map_or(CellValue::Number(value.as_f64()), CellValue::DateTime),
        Data::DateTimeIso(text) => {
            parse_timestamp(text).map_or_else(|| CellValue::Text(text.clone()), CellValue::DateTime)
        }
        Data::DurationIso(text) => CellValue::Text(text.clone()),
        Data::Error(error) => {
            debug!(error = ?error, "cell error in export, treated as empty");
            CellValue::Empty
        }
    }
}

struct ColumnIndex {
    ticket_number: usize,
    subject: usize,
    age: usize,
    created: usize,
    priority: usize,
    customer_id: usize,
    customer_name: usize,
    from: usize,
    ticket_type: usize,
    queue: usize,
}

impl ColumnIndex {
    fn resolve(table: &RawTable) -> Result<Self> {
        let column = |name: &str| {
            find_column(&table.headers, name)
                .ok_or_else(|| ReportError::missing_column(&table.name, name))
        };
        Ok(Self {
            ticket_number: column(TICKET_NUMBER)?,
            subject: column(SUBJECT)?,
            age: column(AGE)?,
            created: column(CREATED)?,
            priority: column(PRIORITY)?,
            customer_id: column(CUSTOMER_ID)?,
            customer_name: column(CUSTOMER_NAME)?,
            from: column(FROM)?,
            ticket_type: column(TYPE)?,
            queue: column(QUEUE)?,
        })
    }
}

/// Map table rows to tickets by header name. Fully empty rows are skipped.
pub fn tickets_from_table(table: &RawTable) -> Result<Vec<TicketRow>> {
    let columns = ColumnIndex::resolve(table)?;
    let mut tickets = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        if row.iter().all(CellValue::is_empty) {
            continue;
        }
        let cell = |idx: usize| row.get(idx).cloned().unwrap_or_default();
        tickets.push(TicketRow {
            ticket_number: ticket_number(&cell(columns.ticket_number)),
            subject: cell(columns.subject).to_display(),
            age: cell(columns.age),
            created: created(&cell(columns.created)),
            priority: cell(columns.priority).to_display(),
            customer_id: cell(columns.customer_id),
            customer_name: cell(columns.customer_name),
            from: cell(columns.from),
            ticket_type: cell(columns.ticket_type),
            queue: cell(columns.queue).to_display(),
        });
    }
    Ok(tickets)
}

fn ticket_number(value: &CellValue) -> String {
    match value {
        CellValue::Number(number) => format_number(*number),
        other => other.to_display(),
    }
}

fn created(value: &CellValue) -> Option<chrono::NaiveDateTime> {
    match value {
        CellValue::DateTime(value) => Some(*value),
        CellValue::Text(text) => parse_timestamp(text),
        CellValue::Empty | CellValue::Number(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: Vec<Vec<CellValue>>) -> RawTable {
        RawTable {
            name: "Sheet1".to_string(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows,
        }
    }

    #[test]
    fn missing_required_header_names_the_column() {
        let headers: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|h| *h != QUEUE)
            .collect();
        let error = tickets_from_table(&table(&headers, vec![])).unwrap_err();
        match error {
            ReportError::MissingColumn { sheet, column } => {
                assert_eq!(sheet, "Sheet1");
                assert_eq!(column, QUEUE);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn columns_are_resolved_by_name_in_any_order() {
        let mut headers = REQUIRED_COLUMNS.to_vec();
        headers.reverse();
        let mut row: Vec<CellValue> = vec![CellValue::Empty; headers.len()];
        let set = |row: &mut Vec<CellValue>, name: &str, value: CellValue| {
            let idx = headers.iter().position(|h| *h == name).unwrap();
            row[idx] = value;
        };
        set(&mut row, TICKET_NUMBER, CellValue::Number(2024060110000012.0));
        set(&mut row, SUBJECT, CellValue::text("Printer down"));
        set(&mut row, CREATED, CellValue::text("2024-06-01 08:30"));
        set(&mut row, QUEUE, CellValue::text("Support::FI-CO"));
        let tickets = tickets_from_table(&table(&headers, vec![row, vec![]])).unwrap();
        assert_eq!(tickets.len(), 1);
        assert_eq!(tickets[0].ticket_number, "2024060110000012");
        assert_eq!(tickets[0].subject, "Printer down");
        assert!(tickets[0].created.is_some());
        assert_eq!(tickets[0].queue, "Support::FI-CO");
        assert_eq!(tickets[0].priority, "");
    }
}
