//! Run configuration.
//!
//! Every fixed name the report depends on (template, lookup resources, sheet
//! names, the group list) lives here so a run can be re-targeted without code
//! changes. Values can be overridden from a TOML file; missing keys keep their
//! defaults.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ReportError, Result};

/// Configuration for a single report run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Workbook copied to create each report.
    pub template_path: PathBuf,
    /// Customer alias table (`key` per line).
    pub customer_table_path: PathBuf,
    /// Queue table (`key;group` per line), used for classification and routing.
    pub queue_table_path: PathBuf,
    /// Directory receiving the dated report.
    pub output_dir: PathBuf,
    /// File name prefix; the date and `.xlsx` are appended.
    pub output_prefix: String,
    /// Sheet of the export holding the tickets.
    pub source_sheet: String,
    /// Consolidated sheet of the report.
    pub all_sheet: String,
    /// Group sheets, in routing order.
    pub output_groups: Vec<String>,
    /// Rows at the top of each report sheet that hold headers.
    pub header_rows: u32,
    /// Priority value that marks a ticket as urgent.
    pub high_priority_marker: String,
    /// Case-insensitive subject fragments that force the urgent marker.
    pub urgency_keywords: Vec<String>,
    /// ARGB font color of highlighted rows.
    pub highlight_color: String,
    /// Excel number format for timestamp cells.
    pub datetime_format: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            template_path: PathBuf::from("Template.xlsx"),
            customer_table_path: PathBuf::from("Customers.txt"),
            queue_table_path: PathBuf::from("Queues.txt"),
            output_dir: PathBuf::from("."),
            output_prefix: "Tickets Pending".to_string(),
            source_sheet: "Sheet1".to_string(),
            all_sheet: "All".to_string(),
            output_groups: ["SD_CS", "MM_PP_QM", "FI-CO", "System"]
                .into_iter()
                .map(String::from)
                .collect(),
            header_rows: 1,
            high_priority_marker: "2 High".to_string(),
            urgency_keywords: ["prior", "urg", "alt", "high"]
                .into_iter()
                .map(String::from)
                .collect(),
            highlight_color: "FFFF0000".to_string(),
            datetime_format: "yyyy-mm-dd hh:mm".to_string(),
        }
    }
}

impl ReportConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ReportError::ResourceNotFound {
                path: path.to_path_buf(),
            });
        }
        let text = std::fs::read_to_string(path).map_err(|error| ReportError::read(path, error))?;
        Self::from_toml_str(&text).map_err(|error| ReportError::read(path, error))
    }

    pub fn from_toml_str(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Report file name for `date`, e.g. `Tickets Pending 31-01-2026.xlsx`.
    pub fn output_file_name(&self, date: NaiveDate) -> String {
        format!("{} {}.xlsx", self.output_prefix, date.format("%d-%m-%Y"))
    }

    pub fn output_path(&self, date: NaiveDate) -> PathBuf {
        self.output_dir.join(self.output_file_name(date))
    }
}
