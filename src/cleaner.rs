//! Noise removal over collected statistics.
//!
//! The passes run in a fixed order. Year normalization has to come after the
//! blacklist lookup on the raw two-digit keys, and every removal happens before
//! anything is ranked. Removal always deletes the whole counter entry.

use std::collections::HashSet;
use std::time::Instant;
use tracing::info;

use crate::config::{AnalyzerConfig, CaseMatching};
use crate::passlists::PasswordDictionary;
use crate::stats::{FrequencyTable, LeakStats};

/// Entries touched by each pass of one cleaning run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanSummary {
    pub blacklisted_words: usize,
    pub tld_words: usize,
    pub mail_domain_words: usize,
    pub blacklisted_years: usize,
    pub normalized_years: usize,
    pub password_words: usize,
    pub password_mails: usize,
}

impl CleanSummary {
    pub fn is_noop(&self) -> bool {
        *self == CleanSummary::default()
    }
}

pub struct Cleaner<'a> {
    word_blacklist: Vec<String>,
    year_blacklist: HashSet<&'a str>,
    case_matching: CaseMatching,
    passwords: &'a PasswordDictionary,
}

impl<'a> Cleaner<'a> {
    pub fn new(config: &'a AnalyzerConfig, passwords: &'a PasswordDictionary) -> Self {
        Self {
            word_blacklist: config
                .word_blacklist
                .iter()
                .map(|w| w.to_lowercase())
                .collect(),
            year_blacklist: config.year_blacklist.iter().map(String::as_str).collect(),
            case_matching: config.case_matching,
            passwords,
        }
    }

    pub fn clean(&self, stats: &mut LeakStats) -> CleanSummary {
        let start_time = Instant::now();
        info!(action = "start", component = "cleaner", "Cleaning the collected statistics");

        let mut summary = CleanSummary {
            blacklisted_words: self.remove_blacklisted_words(&mut stats.words),
            tld_words: self.remove_tld_words(stats),
            mail_domain_words: self.remove_mail_domain_words(stats),
            ..CleanSummary::default()
        };
        (summary.blacklisted_years, summary.normalized_years) =
            self.normalize_years(&mut stats.years);
        (summary.password_words, summary.password_mails) = self.remove_passwords(stats);

        info!(
            action = "complete",
            component = "cleaner",
            blacklisted_words = summary.blacklisted_words,
            tld_words = summary.tld_words,
            mail_domain_words = summary.mail_domain_words,
            blacklisted_years = summary.blacklisted_years,
            normalized_years = summary.normalized_years,
            password_words = summary.password_words,
            password_mails = summary.password_mails,
            duration_ms = start_time.elapsed().as_millis(),
            "Statistics cleaned"
        );
        summary
    }

    /// Pass 1: drop words containing a blacklisted term, ignoring case.
    pub fn remove_blacklisted_words(&self, words: &mut FrequencyTable) -> usize {
        let before = words.len();
        words.retain(|word, _| {
            let lower = word.to_lowercase();
            !self.word_blacklist.iter().any(|b| lower.contains(b.as_str()))
        });
        before - words.len()
    }

    /// Pass 2: drop words that are just a TLD seen in the corpus ("com", "DE").
    pub fn remove_tld_words(&self, stats: &mut LeakStats) -> usize {
        let terms: Vec<String> = stats
            .tlds
            .keys()
            .map(|tld| tld.trim_start_matches('.').to_string())
            .collect();
        remove_matching(&mut stats.words, &terms, self.case_matching)
    }

    /// Pass 3: drop words that are just a mail-domain label ("web", "GMX").
    pub fn remove_mail_domain_words(&self, stats: &mut LeakStats) -> usize {
        let terms: Vec<String> = stats.mail_domains.keys().map(str::to_string).collect();
        remove_matching(&mut stats.words, &terms, self.case_matching)
    }

    /// Pass 4: drop blacklisted two-digit years and fold the rest into
    /// their "20xx" form. Returns (dropped, normalized).
    pub fn normalize_years(&self, years: &mut FrequencyTable) -> (usize, usize) {
        let short: Vec<(String, u64)> = years
            .iter_by_insertion()
            .into_iter()
            .filter(|(year, _)| year.len() == 2)
            .map(|(year, count)| (year.to_string(), count))
            .collect();

        let mut dropped = 0;
        let mut normalized = 0;
        for (year, count) in short {
            years.remove(&year);
            if self.year_blacklist.contains(year.as_str()) {
                dropped += 1;
            } else {
                years.add(format!("20{year}"), count);
                normalized += 1;
            }
        }
        (dropped, normalized)
    }

    /// Pass 5: drop known passwords from the words and disposable-mail records
    /// whose local part is a known password. Returns (words, records).
    pub fn remove_passwords(&self, stats: &mut LeakStats) -> (usize, usize) {
        let words = remove_matching(&mut stats.words, self.passwords.iter(), self.case_matching);

        let before = stats.disposable_mails.len();
        let case = self.case_matching;
        let known = case.term_set(self.passwords.iter());
        stats
            .disposable_mails
            .retain(|r| !known.contains(case.lookup_key(&r.local_part).as_ref()));
        (words, before - stats.disposable_mails.len())
    }
}

/// Removes every word that is a spelling of one of `terms` under `case_matching`.
fn remove_matching<I, S>(
    words: &mut FrequencyTable,
    terms: I,
    case_matching: CaseMatching,
) -> usize
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let known = case_matching.term_set(terms);
    let before = words.len();
    words.retain(|word, _| !known.contains(case_matching.lookup_key(word).as_ref()));
    before - words.len()
}
