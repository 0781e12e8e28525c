use clap::Parser;
use std::path::PathBuf;

use crate::config::{AnalyzerConfig, CaseMatching, RecordPolicy, ReportLimits};
use crate::passlists::DEFAULT_PASSLIST_DIR;

#[derive(Parser, Debug)]
#[command(
    name = "radiocarbon",
    about = "Credential leak analyzer: estimates the age, region and origin of a leak",
    version,
    long_about = None
)]
pub struct Args {
    /// Leak file to analyze (repeat to analyze several files as one leak)
    #[arg(short = 'f', long = "file", value_name = "LEAK_FILE", required_unless_present = "init")]
    pub files: Vec<PathBuf>,

    /// Directory of newline-delimited password lists (*.txt)
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_PASSLIST_DIR)]
    pub passlists: PathBuf,

    /// Path to a custom disposable mail provider list
    #[arg(long, value_name = "FILE")]
    pub providers: Option<PathBuf>,

    /// Match removal terms in any letter case instead of lower/upper case only
    #[arg(long)]
    pub full_case_fold: bool,

    /// Keep only the mail records of the last analyzed file
    #[arg(long)]
    pub overwrite_records: bool,

    /// Number of years to display
    #[arg(long)]
    pub top_years: Option<usize>,

    /// Number of TLDs to display
    #[arg(long)]
    pub top_tlds: Option<usize>,

    /// Number of words to display
    #[arg(long)]
    pub top_words: Option<usize>,

    /// Mask the local part of email addresses in the output
    #[arg(long)]
    pub redact: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Initialize disposable_providers.txt with the default providers
    #[arg(long)]
    pub init: bool,
}

impl Args {
    pub fn analyzer_config(&self, providers: Vec<String>) -> AnalyzerConfig {
        let defaults = ReportLimits::default();
        let limits = ReportLimits {
            years: self.top_years.unwrap_or(defaults.years),
            tlds: self.top_tlds.unwrap_or(defaults.tlds),
            words: self.top_words.unwrap_or(defaults.words),
        };

        AnalyzerConfig::default()
            .with_providers(providers)
            .with_case_matching(if self.full_case_fold {
                CaseMatching::FullFold
            } else {
                CaseMatching::TwoVariant
            })
            .with_record_policy(if self.overwrite_records {
                RecordPolicy::Overwrite
            } else {
                RecordPolicy::Accumulate
            })
            .with_limits(limits)
    }
}
