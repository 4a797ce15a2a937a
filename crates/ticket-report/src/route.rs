//! Group sheet routing.
//!
//! Rows are selected from the consolidated sheet by the text of its Queue
//! column and copied with their styles, so the group sheets look exactly like
//! the rows they came from.

use tracing::{debug, info, warn};
use umya_spreadsheet::{Cell, Spreadsheet, Style, Worksheet};

use ticket_model::{GroupSummary, OutputGroup, OutputGroups, QUEUE_COLUMN, ReportError, Result};
use ticket_transform::sanitize_sheet_name;

use crate::workbook::{WorkbookLayout, find_header_column, next_free_row};

#[derive(Debug, Clone)]
enum CopiedValue {
    Blank,
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone)]
struct CopiedCell {
    col: u32,
    value: CopiedValue,
    style: Style,
}

fn copy_value(cell: &Cell) -> CopiedValue {
    let text = cell.get_value();
    if text.is_empty() {
        return CopiedValue::Blank;
    }
    match cell.get_value_number() {
        Some(number) if cell.get_data_type() == "n" => CopiedValue::Number(number),
        _ => CopiedValue::Text(text.into_owned()),
    }
}

fn copy_row(sheet: &Worksheet, row: u32, width: u32) -> Vec<CopiedCell> {
    (1..=width)
        .filter_map(|col| {
            sheet.get_cell((col, row)).map(|cell| CopiedCell {
                col,
                value: copy_value(cell),
                style: cell.get_style().clone(),
            })
        })
        .collect()
}

fn paste_row(sheet: &mut Worksheet, row: u32, cells: &[CopiedCell]) {
    for copied in cells {
        let cell = sheet.get_cell_mut((copied.col, row));
        match &copied.value {
            CopiedValue::Blank => {}
            CopiedValue::Number(number) => {
                cell.set_value_number(*number);
            }
            CopiedValue::Text(text) => {
                cell.set_value_string(text.as_str());
            }
        }
        cell.set_style(copied.style.clone());
    }
}

/// Rows selected for one group, header rows first.
struct Selection {
    headers: Vec<Vec<CopiedCell>>,
    rows: Vec<Vec<CopiedCell>>,
}

fn select_rows(
    book: &Spreadsheet,
    layout: &WorkbookLayout,
    group: &OutputGroup,
) -> Result<Selection> {
    let source = book.get_sheet_by_name(&layout.all_sheet).ok_or_else(|| {
        ReportError::Processing(format!("sheet '{}' not found", layout.all_sheet))
    })?;
    let header_row = layout.header_row();
    let queue_col = find_header_column(source, header_row, QUEUE_COLUMN)
        .ok_or_else(|| ReportError::missing_column(&layout.all_sheet, QUEUE_COLUMN))?;
    let width = source.get_highest_column();

    let headers = (1..=header_row)
        .map(|row| copy_row(source, row, width))
        .collect();
    let rows = (layout.first_data_row()..=source.get_highest_row())
        .filter(|row| {
            source
                .get_cell((queue_col, *row))
                .is_some_and(|cell| group.accepts(cell.get_value().trim()))
        })
        .map(|row| copy_row(source, row, width))
        .collect();
    Ok(Selection { headers, rows })
}

/// Copy the rows whose Queue value belongs to `group` into the group's sheet.
///
/// Rows keep their consolidated order and are appended below the sheet's
/// existing rows. A missing sheet is created with a copy of the header.
pub fn route_group(
    book: &mut Spreadsheet,
    layout: &WorkbookLayout,
    group: &OutputGroup,
) -> Result<usize> {
    let selection = select_rows(book, layout, group)?;
    let sheet_name = sanitize_sheet_name(&group.name);
    if sheet_name.is_empty() {
        return Err(ReportError::Processing(format!(
            "group '{}' has no usable sheet name",
            group.name
        )));
    }

    let created = book.get_sheet_by_name(&sheet_name).is_none();
    if created {
        book.new_sheet(&sheet_name).map_err(|error| {
            ReportError::Processing(format!("create sheet '{sheet_name}': {error}"))
        })?;
    }
    let target = book.get_sheet_by_name_mut(&sheet_name).ok_or_else(|| {
        ReportError::Processing(format!("sheet '{sheet_name}' not available"))
    })?;
    if created {
        for (row, cells) in (1u32..).zip(&selection.headers) {
            paste_row(target, row, cells);
        }
        debug!(sheet = %sheet_name, "group sheet created");
    }

    let start = next_free_row(target, layout);
    for (row, cells) in (start..).zip(&selection.rows) {
        paste_row(target, row, cells);
    }
    debug!(group = %group.name, rows = selection.rows.len(), "group routed");
    Ok(selection.rows.len())
}

/// Route every group. A group whose source lacks a required column is skipped
/// and reported; any other failure aborts.
pub fn route_all(
    book: &mut Spreadsheet,
    layout: &WorkbookLayout,
    groups: &OutputGroups,
) -> Result<Vec<GroupSummary>> {
    let mut summaries = Vec::with_capacity(groups.len());
    for group in groups.iter() {
        match route_group(book, layout, group) {
            Ok(rows) => summaries.push(GroupSummary::routed(&group.name, rows)),
            Err(error) if !error.is_fatal() => {
                warn!(group = %group.name, %error, "group skipped");
                summaries.push(GroupSummary::skipped(&group.name, error.to_string()));
            }
            Err(error) => return Err(error),
        }
    }
    let routed: usize = summaries.iter().map(|summary| summary.rows).sum();
    info!(groups = summaries.len(), rows = routed, "routing complete");
    Ok(summaries)
}
