pub mod analysis_result;
pub mod artifact;
pub mod batch_report;
pub mod cli;
pub mod config;
