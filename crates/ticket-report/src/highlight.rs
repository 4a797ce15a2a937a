//! Urgent row highlighting.

use tracing::{debug, info};
use umya_spreadsheet::{Spreadsheet, Worksheet};

use ticket_model::{PRIORITY_COLUMN, ReportError, Result};

use crate::workbook::{WorkbookLayout, find_header_column};

/// Color the font of every row whose Priority equals the urgent marker.
///
/// Only styles change; cell values are left as they are. Returns the number
/// of highlighted rows.
pub fn highlight_sheet(sheet: &mut Worksheet, layout: &WorkbookLayout) -> Result<usize> {
    let priority_col = find_header_column(sheet, layout.header_row(), PRIORITY_COLUMN)
        .ok_or_else(|| ReportError::missing_column(sheet.get_name(), PRIORITY_COLUMN))?;
    let width = sheet.get_highest_column();
    let marker_rows: Vec<u32> = (layout.first_data_row()..=sheet.get_highest_row())
        .filter(|row| {
            sheet
                .get_cell((priority_col, *row))
                .is_some_and(|cell| cell.get_value().trim() == layout.high_priority_marker)
        })
        .collect();

    for row in &marker_rows {
        for col in 1..=width {
            sheet
                .get_cell_mut((col, *row))
                .get_style_mut()
                .get_font_mut()
                .get_color_mut()
                .set_argb(layout.highlight_color.as_str());
        }
    }
    Ok(marker_rows.len())
}

/// Highlight every sheet that has a Priority column.
pub fn highlight_workbook(book: &mut Spreadsheet, layout: &WorkbookLayout) -> Result<usize> {
    let names: Vec<String> = book
        .get_sheet_collection()
        .iter()
        .map(|sheet| sheet.get_name().to_string())
        .collect();
    let mut total = 0;
    for name in names {
        let Some(sheet) = book.get_sheet_by_name_mut(&name) else {
            continue;
        };
        match highlight_sheet(sheet, layout) {
            Ok(rows) => {
                debug!(sheet = %name, rows, "sheet highlighted");
                total += rows;
            }
            Err(error) if !error.is_fatal() => {
                debug!(sheet = %name, %error, "sheet not highlighted");
            }
            Err(error) => return Err(error),
        }
    }
    info!(rows = total, "urgent rows highlighted");
    Ok(total)
}
