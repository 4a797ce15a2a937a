pub mod config;
pub mod error;
pub mod group;
pub mod lookup;
pub mod outcome;
pub mod ticket;

pub use config::ReportConfig;
pub use error::{ReportError, Result};
pub use group::{OutputGroup, OutputGroups};
pub use lookup::{LookupEntry, LookupTable};
pub use outcome::{GroupSummary, RunOutcome, RunStatus};
pub use ticket::{
    CellValue, OUTPUT_COLUMNS, OutputRow, PRIORITY_COLUMN, QUEUE_COLUMN, TicketRow,
    format_number,
};
