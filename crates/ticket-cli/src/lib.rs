//! CLI library components for the pending tickets report.

pub mod logging;
pub mod pipeline;
