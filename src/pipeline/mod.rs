//! Shifting pipeline: plan, per-file execution and orchestration

pub mod executor;
pub mod orchestrator;
pub mod plan;
pub mod report;

pub use executor::{output_file_name, ShiftExecutor};
pub use orchestrator::{run, run_with};
pub use plan::ShiftPlan;
pub use report::RunReport;
