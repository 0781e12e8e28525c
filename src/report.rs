//! Ranked views over cleaned statistics and their text/JSON rendering.

use serde::Serialize;
use std::io::{self, Write};

use crate::config::ReportLimits;
use crate::domain::{redact_address, redact_local_part};
use crate::stats::{DisposableMailRecord, FrequencyTable, LeakStats, PlusMailRecord};
use crate::utils::format_number;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    pub key: String,
    pub count: u64,
}

impl From<(String, u64)> for RankedEntry {
    fn from((key, count): (String, u64)) -> Self {
        Self { key, count }
    }
}

/// Everything the renderers need, detached from the live statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub years: Vec<RankedEntry>,
    pub tlds: Vec<RankedEntry>,
    pub words: Vec<RankedEntry>,
    pub disposable_mails: Vec<DisposableMailRecord>,
    pub plus_mails: Vec<PlusMailRecord>,
}

fn ranked(table: &FrequencyTable, n: usize) -> Vec<RankedEntry> {
    table.most_common(n).into_iter().map(RankedEntry::from).collect()
}

impl Report {
    pub fn build(stats: &LeakStats, limits: &ReportLimits) -> Self {
        Self {
            years: ranked(&stats.years, limits.years),
            tlds: ranked(&stats.tlds, limits.tlds),
            words: ranked(&stats.words, limits.words),
            disposable_mails: stats.disposable_mails.clone(),
            plus_mails: stats.plus_mails.clone(),
        }
    }

    /// Copy with every email local part masked.
    pub fn redacted(&self) -> Self {
        let mut report = self.clone();
        for record in &mut report.disposable_mails {
            record.address = redact_address(&record.address);
            record.local_part = redact_local_part(&record.local_part);
        }
        for record in &mut report.plus_mails {
            record.address = redact_address(&record.address);
            record.local_part = redact_local_part(&record.local_part);
        }
        report
    }

    pub fn write_json<W: Write>(&self, out: &mut W) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)
    }

    pub fn write_tables<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write_section(
            out,
            "Date Determination",
            "Numbers used in passwords often indicate the year in which the password was chosen",
        )?;
        write_table(out, &["Year", "Count"], &counted_rows(&self.years))?;

        write_section(
            out,
            "Region Determination",
            "TLDs of included email addresses often point to a certain region",
        )?;
        write_table(out, &["TLD", "Count"], &counted_rows(&self.tlds))?;

        write_section(
            out,
            "Origin Determination",
            "Strings used in passwords often point to a certain origin",
        )?;
        write_table(out, &["Word", "Count"], &counted_rows(&self.words))?;

        write_section(
            out,
            "One-Time Emails",
            "Disposable mail addresses suggest test or throwaway accounts",
        )?;
        let rows: Vec<Vec<String>> = self
            .disposable_mails
            .iter()
            .map(|r| vec![r.address.clone(), r.local_part.clone(), r.provider.clone()])
            .collect();
        write_table(out, &["Email", "User", "Provider"], &rows)?;

        write_section(
            out,
            "Plus-Character Emails",
            "Plus suffixes often name the service an address was registered for",
        )?;
        let rows: Vec<Vec<String>> = self
            .plus_mails
            .iter()
            .map(|r| vec![r.address.clone(), r.local_part.clone(), r.suffix.clone()])
            .collect();
        write_table(out, &["Email", "User", "Suffix"], &rows)
    }
}

fn counted_rows(entries: &[RankedEntry]) -> Vec<Vec<String>> {
    entries
        .iter()
        .map(|e| vec![e.key.clone(), format_number(e.count)])
        .collect()
}

fn write_section<W: Write>(out: &mut W, title: &str, hint: &str) -> io::Result<()> {
    writeln!(out, "\n{}:\n- {}\n", title, hint)
}

/// Plain aligned table; the last column is right-aligned when it is "Count".
fn write_table<W: Write>(out: &mut W, headers: &[&str], rows: &[Vec<String>]) -> io::Result<()> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    let right_last = headers.last() == Some(&"Count");
    let last = headers.len().saturating_sub(1);

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (cell, &w))| {
                if right_last && i == last {
                    format!("{:>w$}", cell, w = w)
                } else {
                    format!("{:<w$}", cell, w = w)
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    writeln!(out, "{}", line(&header_cells))?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    writeln!(out, "{}", rule.join("  "))?;
    if rows.is_empty() {
        writeln!(out, "(none)")?;
    }
    for row in rows {
        writeln!(out, "{}", line(row))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_stats() -> LeakStats {
        let mut stats = LeakStats::new();
        let mut words = FrequencyTable::new();
        words.add("a", 5);
        words.add("b", 3);
        words.add("c", 3);
        stats.words = words;
        stats.years.add("2005", 1200);
        stats.plus_mails.push(PlusMailRecord {
            address: "jane+news@example.com".to_string(),
            local_part: "jane".to_string(),
            suffix: "news".to_string(),
            domain: "example.com".to_string(),
        });
        stats
    }

    #[test]
    fn top_n_is_stable() {
        let stats = sample_stats();
        let limits = ReportLimits {
            years: 10,
            tlds: 10,
            words: 2,
        };
        let first = Report::build(&stats, &limits);
        let keys: Vec<_> = first.words.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(Report::build(&stats, &limits), first);
    }

    #[test]
    fn tables_render_every_section() {
        let report = Report::build(&sample_stats(), &ReportLimits::default());
        let mut out = Vec::new();
        report.write_tables(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        for title in [
            "Date Determination",
            "Region Determination",
            "Origin Determination",
            "One-Time Emails",
            "Plus-Character Emails",
        ] {
            assert!(text.contains(title), "missing section {title}");
        }
        assert!(text.contains("2005  1,200"));
        assert!(text.contains("jane+news@example.com  jane  news"));
        assert!(text.contains("(none)"));
    }

    #[test]
    fn json_contains_records() {
        let report = Report::build(&sample_stats(), &ReportLimits::default());
        let mut out = Vec::new();
        report.write_json(&mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["words"][0]["key"], "a");
        assert_eq!(value["plus_mails"][0]["suffix"], "news");
    }

    #[test]
    fn redaction_masks_local_parts() {
        let report = Report::build(&sample_stats(), &ReportLimits::default()).redacted();
        assert_eq!(report.plus_mails[0].address, "j********@example.com");
        assert_eq!(report.plus_mails[0].local_part, "j***");
        assert_eq!(report.plus_mails[0].suffix, "news");
    }
}
