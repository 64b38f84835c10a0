mod log_file;
mod summary;

pub use log_file::{LogEvent, OutcomeLog, RunGuard, SEPARATOR};
pub use summary::{RecordOutcome, RecordReport, RunSummary};
