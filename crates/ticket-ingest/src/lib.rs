pub mod datetime;
pub mod export;
pub mod files;
pub mod header;
pub mod lookup;

pub use datetime::parse_timestamp;
pub use export::{
    REQUIRED_COLUMNS, RawTable, data_to_cell, read_csv_table, read_export, read_workbook_table,
    tickets_from_table,
};
pub use files::{ensure_available, ensure_writable, owner_file_path};
pub use header::{find_column, normalize_header};
pub use lookup::{load_lookup_table, parse_lookup_table};
