//! Analysis configuration: blacklists, provider list, matching and ranking knobs.

use serde::Serialize;
use std::borrow::Cow;
use std::collections::HashSet;

/// Substrings that mark a word as noise (mail brands, weak password stems).
pub const WORD_BLACKLIST: &[&str] = &[
    "gmail", "hotmail", "msn", "mail", "gmx", "yahoo", "arcor", "freenet", "123456", "password",
    "online",
];

/// Two-digit numbers too common in passwords to say anything about a year.
pub const YEAR_BLACKLIST: &[&str] = &["01", "33", "44", "55", "66", "77", "88", "99"];

/// How removal terms are compared against word-table keys and record local parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseMatching {
    /// Only the all-lowercase and all-uppercase spellings of a term match.
    /// "Gmail" survives a removal of "gmail".
    #[default]
    TwoVariant,
    /// Any spelling matches, compared after lowercasing both sides.
    FullFold,
}

impl CaseMatching {
    /// Lookup set for `terms`: both case variants of each term, or each term
    /// lowercased under full folding.
    pub fn term_set<I, S>(self, terms: I) -> HashSet<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match self {
            CaseMatching::TwoVariant => terms
                .into_iter()
                .flat_map(|t| [t.as_ref().to_lowercase(), t.as_ref().to_uppercase()])
                .collect(),
            CaseMatching::FullFold => terms
                .into_iter()
                .map(|t| t.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Form of `candidate` to look up in a [`term_set`](Self::term_set).
    pub fn lookup_key(self, candidate: &str) -> Cow<'_, str> {
        match self {
            CaseMatching::TwoVariant => Cow::Borrowed(candidate),
            CaseMatching::FullFold => Cow::Owned(candidate.to_lowercase()),
        }
    }
}

/// What happens to the record lists when another corpus is scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordPolicy {
    /// Records from every scan are kept.
    #[default]
    Accumulate,
    /// Each scan replaces the records of the previous one.
    Overwrite,
}

/// Number of ranked entries kept per table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportLimits {
    pub years: usize,
    pub tlds: usize,
    pub words: usize,
}

impl Default for ReportLimits {
    fn default() -> Self {
        Self {
            years: 10,
            tlds: 10,
            words: 30,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub word_blacklist: Vec<String>,
    pub year_blacklist: Vec<String>,
    pub disposable_providers: Vec<String>,
    pub case_matching: CaseMatching,
    pub record_policy: RecordPolicy,
    pub limits: ReportLimits,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            word_blacklist: WORD_BLACKLIST.iter().map(|w| w.to_string()).collect(),
            year_blacklist: YEAR_BLACKLIST.iter().map(|y| y.to_string()).collect(),
            disposable_providers: crate::patterns::default_providers(),
            case_matching: CaseMatching::default(),
            record_policy: RecordPolicy::default(),
            limits: ReportLimits::default(),
        }
    }
}

impl AnalyzerConfig {
    pub fn with_providers(mut self, providers: Vec<String>) -> Self {
        self.disposable_providers = providers;
        self
    }

    pub fn with_case_matching(mut self, case_matching: CaseMatching) -> Self {
        self.case_matching = case_matching;
        self
    }

    pub fn with_record_policy(mut self, record_policy: RecordPolicy) -> Self {
        self.record_policy = record_policy;
        self
    }

    pub fn with_limits(mut self, limits: ReportLimits) -> Self {
        self.limits = limits;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_match(m: CaseMatching, candidate: &str, term: &str) -> bool {
        m.term_set([term]).contains(m.lookup_key(candidate).as_ref())
    }

    #[test]
    fn two_variant_ignores_mixed_case() {
        let m = CaseMatching::TwoVariant;
        assert!(is_match(m, "password1", "Password1"));
        assert!(is_match(m, "PASSWORD1", "password1"));
        assert!(!is_match(m, "Password1", "password1"));
    }

    #[test]
    fn full_fold_matches_any_spelling() {
        let m = CaseMatching::FullFold;
        assert!(is_match(m, "Password1", "password1"));
        assert!(is_match(m, "pAsSwOrD1", "PASSWORD1"));
        assert!(!is_match(m, "password2", "password1"));
    }

    #[test]
    fn term_sets_per_mode() {
        let two = CaseMatching::TwoVariant.term_set(["Gmail"]);
        assert_eq!(two.len(), 2);
        assert!(two.contains("gmail") && two.contains("GMAIL"));
        let folded = CaseMatching::FullFold.term_set(["Gmail", "GMAIL"]);
        assert_eq!(folded.len(), 1);
        assert!(folded.contains("gmail"));
    }

    #[test]
    fn defaults_match_reference_values() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.limits, ReportLimits { years: 10, tlds: 10, words: 30 });
        assert_eq!(config.case_matching, CaseMatching::TwoVariant);
        assert_eq!(config.record_policy, RecordPolicy::Accumulate);
        assert!(config.word_blacklist.iter().any(|w| w == "gmail"));
        assert!(config.year_blacklist.iter().any(|y| y == "99"));
        assert!(config.disposable_providers.iter().any(|p| p == "mailinator"));
    }
}
