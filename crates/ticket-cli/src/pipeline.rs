//! Report run with explicit stages.
//!
//! 1. **Check**: every input exists and is not held open; the output is writable
//! 2. **Load**: customer and queue tables, matchers and routing groups
//! 3. **Ingest**: read the export
//! 4. **Prepare**: classify, sanitize and sort the rows
//! 5. **Write**: copy the template and fill the consolidated sheet
//! 6. **Route**: fill the group sheets
//! 7. **Highlight**: color urgent rows on every sheet
//! 8. **Save**: persist the workbook once
//!
//! Nothing is written before stage 5, so a failure while checking or loading
//! leaves no output behind.

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::NaiveDate;
use tracing::{debug, info, info_span, trace, warn};

use ticket_ingest::{ensure_available, ensure_writable, load_lookup_table, read_export};
use ticket_map::{CategoryMatcher, build_output_groups};
use ticket_model::{
    GroupSummary, LookupTable, OutputGroups, OutputRow, ReportConfig, Result, RunOutcome,
    RunStatus,
};
use ticket_report::{
    WorkbookLayout, copy_template, highlight_workbook, open_workbook, route_all, save_workbook,
    write_all_sheet,
};
use ticket_transform::{Classifier, PriorityRule, prepare_rows};

use crate::logging::redact_value;

/// Inputs of one report run.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub export: PathBuf,
    pub config: ReportConfig,
    /// Date used in the output file name.
    pub date: NaiveDate,
}

impl ReportRequest {
    pub fn new(export: impl Into<PathBuf>, config: ReportConfig, date: NaiveDate) -> Self {
        Self {
            export: export.into(),
            config,
            date,
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.config.output_path(self.date)
    }
}

// ============================================================================
// Stage 1: Check
// ============================================================================

/// Verify inputs and output before anything is read or written.
pub fn check_resources(request: &ReportRequest) -> Result<()> {
    let config = &request.config;
    for input in [
        request.export.as_path(),
        config.template_path.as_path(),
        config.customer_table_path.as_path(),
        config.queue_table_path.as_path(),
    ] {
        ensure_available(input)?;
    }
    ensure_writable(&request.output_path())
}

// ============================================================================
// Stage 2: Load
// ============================================================================

/// Lookup data derived once per run.
#[derive(Debug, Clone)]
pub struct Lookups {
    pub classifier: Classifier,
    pub groups: OutputGroups,
}

/// Load both tables and build the classifier and routing groups from them.
///
/// The queue table is read once and feeds both the queue matcher and the
/// group memberships.
pub fn load_lookups(config: &ReportConfig) -> Result<Lookups> {
    let customers: LookupTable = load_lookup_table(&config.customer_table_path)?;
    let queues: LookupTable = load_lookup_table(&config.queue_table_path)?;
    let groups = build_output_groups(&queues, &config.output_groups);
    let classifier = Classifier::new(
        CategoryMatcher::new(&customers)?,
        CategoryMatcher::new(&queues)?,
        PriorityRule::new(&config.urgency_keywords, config.high_priority_marker.as_str())?,
    );
    Ok(Lookups { classifier, groups })
}

// ============================================================================
// Stage 4: Prepare
// ============================================================================

fn log_urgent_rows(rows: &[OutputRow], marker: &str) {
    for row in rows.iter().filter(|row| row.priority == marker) {
        trace!(
            ticket = %redact_value(&row.ticket_number),
            subject = %redact_value(&row.subject),
            queue = %row.queue,
            "urgent ticket"
        );
    }
}

// ============================================================================
// Stages 5-8: Workbook
// ============================================================================

struct WorkbookResult {
    rows_written: usize,
    groups: Vec<GroupSummary>,
    highlighted_rows: usize,
}

fn build_workbook(
    template: &Path,
    output: &Path,
    layout: &WorkbookLayout,
    rows: &[OutputRow],
    groups: &OutputGroups,
) -> Result<WorkbookResult> {
    let write_span = info_span!("write", output = %output.display());
    let write_start = Instant::now();
    let (mut book, rows_written) = write_span.in_scope(|| -> Result<_> {
        copy_template(template, output)?;
        let mut book = open_workbook(output)?;
        let rows_written = write_all_sheet(&mut book, layout, rows)?;
        Ok((book, rows_written))
    })?;
    info!(
        rows = rows_written,
        duration_ms = write_start.elapsed().as_millis(),
        "write complete"
    );

    let route_start = Instant::now();
    let group_summaries =
        info_span!("route").in_scope(|| route_all(&mut book, layout, groups))?;
    info!(
        groups = group_summaries.len(),
        duration_ms = route_start.elapsed().as_millis(),
        "route complete"
    );

    let highlighted_rows =
        info_span!("highlight").in_scope(|| highlight_workbook(&mut book, layout))?;

    let save_start = Instant::now();
    save_workbook(&book, output)?;
    info!(
        duration_ms = save_start.elapsed().as_millis(),
        "save complete"
    );

    Ok(WorkbookResult {
        rows_written,
        groups: group_summaries,
        highlighted_rows,
    })
}

/// Remove a half-written report so a failed run leaves nothing behind.
fn discard_output(output: &Path) {
    if output.exists()
        && let Err(error) = std::fs::remove_file(output)
    {
        warn!(output = %output.display(), %error, "could not remove incomplete report");
    }
}

/// Run every stage and describe the result.
pub fn run_report(request: &ReportRequest) -> Result<RunOutcome> {
    let config = &request.config;
    let output = request.output_path();
    let run_span = info_span!("report", export = %request.export.display());
    let _run_guard = run_span.enter();

    info_span!("check").in_scope(|| check_resources(request))?;

    let load_start = Instant::now();
    let lookups = info_span!("load").in_scope(|| load_lookups(config))?;
    info!(
        groups = lookups.groups.len(),
        duration_ms = load_start.elapsed().as_millis(),
        "load complete"
    );

    let ingest_start = Instant::now();
    let tickets =
        info_span!("ingest").in_scope(|| read_export(&request.export, &config.source_sheet))?;
    info!(
        rows = tickets.len(),
        duration_ms = ingest_start.elapsed().as_millis(),
        "ingest complete"
    );

    let rows = info_span!("prepare").in_scope(|| prepare_rows(&lookups.classifier, &tickets));
    let marker = lookups.classifier.priority_rule().marker();
    let urgent = rows.iter().filter(|row| row.priority == marker).count();
    log_urgent_rows(&rows, marker);
    debug!(rows = rows.len(), urgent, "rows prepared");

    let layout = WorkbookLayout::from_config(config);
    let workbook = match build_workbook(
        &config.template_path,
        &output,
        &layout,
        &rows,
        &lookups.groups,
    ) {
        Ok(workbook) => workbook,
        Err(error) => {
            discard_output(&output);
            return Err(error);
        }
    };

    let warnings = workbook
        .groups
        .iter()
        .filter_map(|group| {
            group
                .skipped
                .as_ref()
                .map(|reason| format!("group '{}' skipped: {reason}", group.name))
        })
        .collect();
    let outcome = RunOutcome {
        status: RunStatus::Complete,
        output_path: output,
        input_rows: tickets.len(),
        rows_written: workbook.rows_written,
        groups: workbook.groups,
        highlighted_rows: workbook.highlighted_rows,
        warnings,
    }
    .finish();
    if outcome.is_complete() {
        info!(path = %outcome.output_path.display(), "report complete");
    } else {
        warn!(
            path = %outcome.output_path.display(),
            warnings = outcome.warnings.len(),
            "report written with skipped groups"
        );
    }
    Ok(outcome)
}
