pub mod analyzer;
pub mod args;
pub mod cleaner;
pub mod config;
pub mod domain;
pub mod errors;
pub mod passlists;
pub mod patterns;
pub mod report;
pub mod stats;
pub mod utils;

pub use analyzer::{analyze_leak_files, Analyzer};
pub use args::Args;
pub use cleaner::{CleanSummary, Cleaner};
pub use config::{AnalyzerConfig, CaseMatching, RecordPolicy, ReportLimits};
pub use errors::{AnalyzerError, Result};
pub use passlists::PasswordDictionary;
pub use patterns::{init_default_providers, Candidate, Extractor};
pub use report::Report;
pub use stats::{DisposableMailRecord, FrequencyTable, LeakStats, PlusMailRecord};
