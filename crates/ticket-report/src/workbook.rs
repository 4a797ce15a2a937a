//! Workbook store and consolidated sheet writer.
//!
//! Every report sheet is filled the same way: new rows go directly below the
//! last row that holds a value, and never above the first data row. Cells that
//! only carry formatting do not count as content, so a template styled far down
//! its sheets still receives rows right under its header. See [`next_free_row`].

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use chrono::{Datelike, NaiveDateTime, Timelike};
use tracing::{debug, info};
use umya_spreadsheet::{Spreadsheet, Worksheet};

use ticket_ingest::normalize_header;
use ticket_model::{CellValue, OUTPUT_COLUMNS, OutputRow, ReportConfig, ReportError, Result};

/// Days from 0001-01-01 (day 1) to 1899-12-30, the spreadsheet epoch.
const EXCEL_EPOCH_DAYS_FROM_CE: i64 = 693_594;
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Sheet names and styling shared by the writer, router and highlighter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkbookLayout {
    pub all_sheet: String,
    /// Rows at the top of each sheet holding headers; the last one names the columns.
    pub header_rows: u32,
    pub high_priority_marker: String,
    pub highlight_color: String,
    pub datetime_format: String,
}

impl WorkbookLayout {
    pub fn from_config(config: &ReportConfig) -> Self {
        Self {
            all_sheet: config.all_sheet.clone(),
            header_rows: config.header_rows,
            high_priority_marker: config.high_priority_marker.clone(),
            highlight_color: config.highlight_color.clone(),
            datetime_format: config.datetime_format.clone(),
        }
    }

    /// Row holding the column names (1-based).
    pub fn header_row(&self) -> u32 {
        self.header_rows.max(1)
    }

    pub fn first_data_row(&self) -> u32 {
        self.header_row() + 1
    }
}

impl Default for WorkbookLayout {
    fn default() -> Self {
        Self::from_config(&ReportConfig::default())
    }
}

/// Copy the template to `output`, replacing a previous report of the same day.
pub fn copy_template(template: &Path, output: &Path) -> Result<()> {
    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|error| {
            ReportError::Processing(format!("create {}: {error}", parent.display()))
        })?;
    }
    fs::copy(template, output).map_err(|error| match error.kind() {
        ErrorKind::NotFound => ReportError::ResourceNotFound {
            path: template.to_path_buf(),
        },
        ErrorKind::PermissionDenied => ReportError::ResourceLocked {
            path: output.to_path_buf(),
        },
        _ => ReportError::Processing(format!(
            "copy {} to {}: {error}",
            template.display(),
            output.display()
        )),
    })?;
    debug!(
        template = %template.display(),
        output = %output.display(),
        "template copied"
    );
    Ok(())
}

pub fn open_workbook(path: &Path) -> Result<Spreadsheet> {
    umya_spreadsheet::reader::xlsx::read(path).map_err(|error| ReportError::read(path, error))
}

pub fn save_workbook(book: &Spreadsheet, path: &Path) -> Result<()> {
    umya_spreadsheet::writer::xlsx::write(book, path).map_err(|error| {
        ReportError::Processing(format!("save {}: {error}", path.display()))
    })?;
    info!(path = %path.display(), "workbook saved");
    Ok(())
}

/// 1-based column whose header text in `header_row` equals `name`.
pub fn find_header_column(sheet: &Worksheet, header_row: u32, name: &str) -> Option<u32> {
    let wanted = normalize_header(name);
    (1..=sheet.get_highest_column()).find(|col| {
        sheet
            .get_cell((*col, header_row))
            .is_some_and(|cell| normalize_header(&cell.get_value()) == wanted)
    })
}

/// Spreadsheet serial number of a timestamp (days since 1899-12-30).
pub fn excel_serial(value: &NaiveDateTime) -> f64 {
    let days = i64::from(value.date().num_days_from_ce()) - EXCEL_EPOCH_DAYS_FROM_CE;
    let seconds = f64::from(value.time().num_seconds_from_midnight());
    days as f64 + seconds / SECONDS_PER_DAY
}

/// Row where the next appended row goes.
pub fn next_free_row(sheet: &Worksheet, layout: &WorkbookLayout) -> u32 {
    let width = sheet.get_highest_column();
    (layout.first_data_row()..=sheet.get_highest_row())
        .rev()
        .find(|row| {
            (1..=width).any(|col| {
                sheet
                    .get_cell((col, *row))
                    .is_some_and(|cell| !cell.get_value().is_empty())
            })
        })
        .unwrap_or(layout.header_row())
        + 1
}

fn header_is_blank(sheet: &Worksheet, header_row: u32) -> bool {
    (1..=sheet.get_highest_column()).all(|col| {
        sheet
            .get_cell((col, header_row))
            .is_none_or(|cell| cell.get_value().trim().is_empty())
    })
}

fn write_cell(sheet: &mut Worksheet, col: u32, row: u32, value: &CellValue, layout: &WorkbookLayout) {
    match value {
        CellValue::Empty => {}
        CellValue::Text(text) if text.is_empty() => {}
        CellValue::Text(text) => {
            sheet.get_cell_mut((col, row)).set_value_string(text.as_str());
        }
        CellValue::Number(number) => {
            sheet.get_cell_mut((col, row)).set_value_number(*number);
        }
        CellValue::DateTime(timestamp) => {
            let cell = sheet.get_cell_mut((col, row));
            cell.set_value_number(excel_serial(timestamp));
            cell.get_style_mut()
                .get_number_format_mut()
                .set_format_code(layout.datetime_format.as_str());
        }
    }
}

/// Append the prepared rows to the consolidated sheet.
///
/// The sheet is created when the template lacks it, and the column names are
/// written when its header row is blank. Returns the number of rows written.
pub fn write_all_sheet(
    book: &mut Spreadsheet,
    layout: &WorkbookLayout,
    rows: &[OutputRow],
) -> Result<usize> {
    if book.get_sheet_by_name(&layout.all_sheet).is_none() {
        book.new_sheet(&layout.all_sheet).map_err(|error| {
            ReportError::Processing(format!("create sheet '{}': {error}", layout.all_sheet))
        })?;
        debug!(sheet = %layout.all_sheet, "consolidated sheet created");
    }
    let sheet = book
        .get_sheet_by_name_mut(&layout.all_sheet)
        .ok_or_else(|| {
            ReportError::Processing(format!("sheet '{}' not available", layout.all_sheet))
        })?;

    let header_row = layout.header_row();
    if header_is_blank(sheet, header_row) {
        for (col, header) in (1u32..).zip(OUTPUT_COLUMNS) {
            sheet.get_cell_mut((col, header_row)).set_value_string(header);
        }
    }

    let start = next_free_row(sheet, layout);
    for (row_number, row) in (start..).zip(rows) {
        for (col, value) in (1u32..).zip(row.cells().iter()) {
            write_cell(sheet, col, row_number, value, layout);
        }
    }
    info!(sheet = %layout.all_sheet, rows = rows.len(), "consolidated sheet written");
    Ok(rows.len())
}
