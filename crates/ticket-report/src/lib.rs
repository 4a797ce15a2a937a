//! Report workbook generation.
//!
//! The report is one workbook created from a template and mutated in place:
//!
//! - **workbook**: template copy, open/save and the consolidated sheet writer
//! - **route**: copies consolidated rows into their group sheets
//! - **highlight**: colors urgent rows on every sheet with a Priority column

mod highlight;
mod route;
mod workbook;

pub use highlight::{highlight_sheet, highlight_workbook};
pub use route::{route_all, route_group};
pub use workbook::{
    WorkbookLayout, copy_template, excel_serial, find_header_column, next_free_row,
    open_workbook, save_workbook, write_all_sheet,
};
