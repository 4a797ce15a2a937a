//! End-to-end report runs against temporary resource folders.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tempfile::TempDir;
use umya_spreadsheet::Worksheet;

use ticket_cli::pipeline::{ReportRequest, load_lookups, run_report};
use ticket_model::{ReportConfig, ReportError, RunStatus};

const EXPORT_HEADER: &str =
    "Ticket Number,Subject,Age,Created,Priority,CustomerID,Customer Name,From,Type,Queue";

struct Fixture {
    dir: TempDir,
    config: ReportConfig,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("Customers.txt"), "ACME\nGlobex\n").unwrap();
        fs::write(
            root.join("Queues.txt"),
            "FI-CO;FI-CO\r\nMM;MM_PP_QM\r\nSYS;System\r\n",
        )
        .unwrap();
        umya_spreadsheet::writer::xlsx::write(
            &umya_spreadsheet::new_file(),
            root.join("Template.xlsx"),
        )
        .unwrap();
        let config = ReportConfig {
            template_path: root.join("Template.xlsx"),
            customer_table_path: root.join("Customers.txt"),
            queue_table_path: root.join("Queues.txt"),
            ..ReportConfig::default()
        }
        .with_output_dir(root.join("reports"));
        Self { dir, config }
    }

    fn export(&self, rows: &[&str]) -> PathBuf {
        let path = self.dir.path().join("export.csv");
        let mut text = format!("{EXPORT_HEADER}\n");
        for row in rows {
            text.push_str(row);
            text.push('\n');
        }
        fs::write(&path, text).unwrap();
        path
    }

    fn request(&self, export: &Path) -> ReportRequest {
        ReportRequest::new(export, self.config.clone(), date())
    }
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
}

fn value(sheet: &Worksheet, col: u32, row: u32) -> String {
    sheet
        .get_cell((col, row))
        .map(|cell| cell.get_value().to_string())
        .unwrap_or_default()
}

fn three_ticket_export(fixture: &Fixture) -> PathBuf {
    fixture.export(&[
        "1001,Printer down,3,2024-01-02 08:00:00,3 normal,C1,Acme Corp,a@acme.test,Incident,ACME::FI-CO",
        "1002,URGENT payroll,4,2024-01-01 09:00:00,3 normal,C2,Globex Inc,b@globex.test,Incident,Globex::MM",
        "1003,Question,1,2024-01-03 10:00:00,3 normal,C3,Initech,c@initech.test,Request,Initech::Support",
    ])
}

#[test]
fn three_ticket_run_writes_sorted_routed_report() {
    let fixture = Fixture::new();
    let export = three_ticket_export(&fixture);

    let outcome = run_report(&fixture.request(&export)).unwrap();
    assert_eq!(outcome.status, RunStatus::Complete);
    assert_eq!(outcome.input_rows, 3);
    assert_eq!(outcome.rows_written, 3);
    assert_eq!(outcome.highlighted_rows, 2);
    assert!(outcome.warnings.is_empty());
    assert_eq!(
        outcome.output_path,
        fixture
            .dir
            .path()
            .join("reports")
            .join("Tickets Pending 05-01-2024.xlsx")
    );

    let book = umya_spreadsheet::reader::xlsx::read(&outcome.output_path).unwrap();
    let all = book.get_sheet_by_name("All").unwrap();
    let order: Vec<String> = (2..=4).map(|row| value(all, 3, row)).collect();
    assert_eq!(order, vec!["1002", "1003", "1001"]);
    assert_eq!(value(all, 7, 2), "2 High");
    assert_eq!(value(all, 1, 3), "");
    assert_eq!(value(all, 2, 3), "");
    assert_eq!(value(all, 1, 4), "ACME");
    assert_eq!(value(all, 2, 4), "FI-CO");

    let fi_co = book.get_sheet_by_name("FI-CO").unwrap();
    assert_eq!(value(fi_co, 3, 2), "1001");
    assert_eq!(value(fi_co, 3, 3), "");
    let mm = book.get_sheet_by_name("MM_PP_QM").unwrap();
    assert_eq!(value(mm, 3, 2), "1002");

    let routed: Vec<(&str, usize)> = outcome
        .groups
        .iter()
        .map(|group| (group.name.as_str(), group.rows))
        .collect();
    assert_eq!(
        routed,
        vec![("SD_CS", 0), ("MM_PP_QM", 1), ("FI-CO", 1), ("System", 0)]
    );
}

#[test]
fn missing_queue_table_is_fatal_and_writes_nothing() {
    let fixture = Fixture::new();
    let export = three_ticket_export(&fixture);
    fs::remove_file(&fixture.config.queue_table_path).unwrap();

    let request = fixture.request(&export);
    let error = run_report(&request).unwrap_err();
    assert!(matches!(error, ReportError::ResourceNotFound { .. }));
    assert!(!request.output_path().exists());
}

#[test]
fn template_held_open_is_reported_as_locked() {
    let fixture = Fixture::new();
    let export = three_ticket_export(&fixture);
    fs::write(fixture.dir.path().join("~$Template.xlsx"), b"owner").unwrap();

    let error = run_report(&fixture.request(&export)).unwrap_err();
    assert!(matches!(error, ReportError::ResourceLocked { .. }));
    insta::assert_snapshot!(
        error.to_string().replace(&fixture.dir.path().display().to_string(), "<dir>"),
        @"file '<dir>/Template.xlsx' is still open or inaccessible, please close it"
    );
}

#[test]
fn export_without_queue_column_is_fatal() {
    let fixture = Fixture::new();
    let path = fixture.dir.path().join("export.csv");
    fs::write(&path, "Ticket Number,Subject\n1,Printer\n").unwrap();

    let error = run_report(&fixture.request(&path)).unwrap_err();
    assert!(matches!(error, ReportError::MissingColumn { .. }));
}

#[test]
fn lookups_share_one_queue_table() {
    let fixture = Fixture::new();
    let lookups = load_lookups(&fixture.config).unwrap();
    let fi_co = lookups.groups.get("FI-CO").unwrap();
    assert!(fi_co.accepts("FI-CO"));
    assert!(lookups.groups.get("SD_CS").unwrap().membership.is_empty());
}
