pub mod aggregate;
pub mod config;
pub mod load;
pub mod pipeline;
pub mod process;
pub mod report;

pub use config::PipelineConfig;
pub use pipeline::{execute, run, PipelineSummary};
