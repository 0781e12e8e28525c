use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

use crate::cleaner::{CleanSummary, Cleaner};
use crate::config::AnalyzerConfig;
use crate::errors::{AnalyzerError, Result};
use crate::passlists::{self, PasswordDictionary};
use crate::patterns::{self, Extractor};
use crate::report::Report;
use crate::stats::{AccumulateSummary, LeakStats};
use crate::Args;

/// One analysis: configuration plus the statistics collected so far.
///
/// State lives on the instance, so two analyzers never see each other's counts.
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: AnalyzerConfig,
    extractor: Extractor,
    stats: LeakStats,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        let extractor = Extractor::new(config.disposable_providers.iter().cloned());
        Self {
            config,
            extractor,
            stats: LeakStats::new(),
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn stats(&self) -> &LeakStats {
        &self.stats
    }

    /// Extracts candidates from `text` and adds them to the running totals.
    pub fn process_text(&mut self, text: &str) -> AccumulateSummary {
        let candidates = self.extractor.extract(text);
        self.stats.accumulate(candidates, self.config.record_policy)
    }

    pub fn process_file(&mut self, path: &Path) -> Result<AccumulateSummary> {
        let start_time = Instant::now();
        info!(action = "start", component = "corpus", file_path = ?path, "Analyzing leak file");

        let corpus = read_corpus(path)?;
        let summary = self.process_text(&corpus);

        info!(
            action = "complete",
            component = "corpus",
            file_path = ?path,
            words = summary.words,
            years = summary.years,
            tlds = summary.tlds,
            mail_domains = summary.mail_domains,
            disposable_mails = summary.disposable_mails,
            plus_mails = summary.plus_mails,
            duration_ms = start_time.elapsed().as_millis(),
            "Leak file analyzed"
        );
        Ok(summary)
    }

    pub fn clean(&mut self, passwords: &PasswordDictionary) -> CleanSummary {
        Cleaner::new(&self.config, passwords).clean(&mut self.stats)
    }

    pub fn report(&self) -> Report {
        Report::build(&self.stats, &self.config.limits)
    }

    pub fn reset(&mut self) {
        self.stats.reset();
    }
}

/// Reads a leak file. Invalid UTF-8 is replaced rather than rejected, since
/// dumps routinely mix encodings.
pub fn read_corpus(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(AnalyzerError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = fs::read(path).map_err(|source| AnalyzerError::InputUnreadable {
        path: path.to_path_buf(),
        source,
    })?;

    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            warn!(action = "decode", component = "corpus", file_path = ?path, "Leak file is not valid UTF-8, replacing invalid sequences");
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}

pub fn analyze_leak_files(args: &Args) -> Result<Report> {
    let total_start_time = Instant::now();
    info!(
        action = "start",
        component = "analysis",
        file_count = args.files.len(),
        "Starting leak analysis"
    );

    let passwords = passlists::load_password_lists(&args.passlists)?;
    let providers = patterns::load_disposable_providers(args.providers.as_deref())?;

    let mut analyzer = Analyzer::new(args.analyzer_config(providers));
    for file in &args.files {
        analyzer.process_file(file)?;
    }
    analyzer.clean(&passwords);

    let report = analyzer.report();
    info!(
        action = "complete",
        component = "analysis",
        duration_ms = total_start_time.elapsed().as_millis(),
        "Analysis completed successfully"
    );

    Ok(if args.redact { report.redacted() } else { report })
}

pub fn print_analysis_results<W: Write>(
    report: &Report,
    args: &Args,
    out: &mut W,
) -> io::Result<()> {
    if args.json {
        report.write_json(out)
    } else {
        report.write_tables(out)
    }
}
