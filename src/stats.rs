use serde::Serialize;
use std::collections::HashMap;

use crate::config::RecordPolicy;
use crate::patterns::Candidate;

/// Occurrence counter that remembers when each key was first seen.
///
/// Ranking ties are broken by that first-insertion order, so two runs over the
/// same input always rank equal counts the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: HashMap<String, Entry>,
    next_seq: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    count: u64,
    seq: u64,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<S: AsRef<str>>(&mut self, key: S, count: u64) {
        let key = key.as_ref();
        if let Some(entry) = self.entries.get_mut(key) {
            entry.count = entry.count.saturating_add(count);
            return;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert(key.to_string(), Entry { count, seq });
    }

    pub fn bump<S: AsRef<str>>(&mut self, key: S) {
        self.add(key, 1);
    }

    /// Drops the whole entry and returns its count.
    pub fn remove(&mut self, key: &str) -> Option<u64> {
        self.entries.remove(key).map(|e| e.count)
    }

    pub fn retain<F: FnMut(&str, u64) -> bool>(&mut self, mut keep: F) {
        self.entries.retain(|k, e| keep(k, e.count));
    }

    pub fn get(&self, key: &str) -> u64 {
        self.entries.get(key).map_or(0, |e| e.count)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.next_seq = 0;
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Keys with counts, oldest first.
    pub fn iter_by_insertion(&self) -> Vec<(&str, u64)> {
        let mut v: Vec<_> = self.entries.iter().collect();
        v.sort_by_key(|(_, e)| e.seq);
        v.into_iter().map(|(k, e)| (k.as_str(), e.count)).collect()
    }

    /// The `n` most frequent entries, count descending then first-seen first.
    pub fn most_common(&self, n: usize) -> Vec<(String, u64)> {
        let mut v: Vec<_> = self.entries.iter().collect();
        v.sort_by(|a, b| b.1.count.cmp(&a.1.count).then_with(|| a.1.seq.cmp(&b.1.seq)));
        v.into_iter()
            .take(n)
            .map(|(k, e)| (k.clone(), e.count))
            .collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut table = FrequencyTable::new();
        for key in iter {
            table.bump(key);
        }
        table
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisposableMailRecord {
    pub address: String,
    pub local_part: String,
    pub provider: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlusMailRecord {
    pub address: String,
    pub local_part: String,
    pub suffix: String,
    pub domain: String,
}

/// Cumulative state of one analysis.
#[derive(Debug, Clone, Default)]
pub struct LeakStats {
    pub words: FrequencyTable,
    pub years: FrequencyTable,
    pub tlds: FrequencyTable,
    pub mail_domains: FrequencyTable,
    pub disposable_mails: Vec<DisposableMailRecord>,
    pub plus_mails: Vec<PlusMailRecord>,
}

/// What one call to [`LeakStats::accumulate`] contributed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccumulateSummary {
    pub words: u64,
    pub years: u64,
    pub tlds: u64,
    pub mail_domains: u64,
    pub disposable_mails: usize,
    pub plus_mails: usize,
}

impl LeakStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes each candidate to its table or record list.
    ///
    /// Tables are always merged additively. Record lists follow `policy`:
    /// with [`RecordPolicy::Overwrite`] they are replaced by this pass's
    /// records, even when the pass found none.
    pub fn accumulate<'a, I>(&mut self, candidates: I, policy: RecordPolicy) -> AccumulateSummary
    where
        I: IntoIterator<Item = Candidate<'a>>,
    {
        let mut summary = AccumulateSummary::default();
        let mut disposable = Vec::new();
        let mut plus = Vec::new();

        for candidate in candidates {
            match candidate {
                Candidate::Word(w) => {
                    self.words.bump(w);
                    summary.words += 1;
                }
                Candidate::Year(y) => {
                    self.years.bump(y);
                    summary.years += 1;
                }
                Candidate::TldFragment(t) => {
                    self.tlds.bump(t);
                    summary.tlds += 1;
                }
                Candidate::MailDomain(d) => {
                    self.mail_domains.bump(d);
                    summary.mail_domains += 1;
                }
                Candidate::DisposableMail {
                    address,
                    local_part,
                    provider,
                } => disposable.push(DisposableMailRecord {
                    address: address.to_string(),
                    local_part: local_part.to_string(),
                    provider: provider.to_string(),
                }),
                Candidate::PlusMail {
                    address,
                    local_part,
                    suffix,
                    domain,
                } => plus.push(PlusMailRecord {
                    address: address.to_string(),
                    local_part: local_part.to_string(),
                    suffix: suffix.to_string(),
                    domain: domain.to_string(),
                }),
            }
        }

        summary.disposable_mails = disposable.len();
        summary.plus_mails = plus.len();

        match policy {
            RecordPolicy::Accumulate => {
                self.disposable_mails.append(&mut disposable);
                self.plus_mails.append(&mut plus);
            }
            RecordPolicy::Overwrite => {
                self.disposable_mails = disposable;
                self.plus_mails = plus;
            }
        }

        summary
    }

    pub fn reset(&mut self) {
        self.words.clear();
        self.years.clear();
        self.tlds.clear();
        self.mail_domains.clear();
        self.disposable_mails.clear();
        self.plus_mails.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
            && self.years.is_empty()
            && self.tlds.is_empty()
            && self.mail_domains.is_empty()
            && self.disposable_mails.is_empty()
            && self.plus_mails.is_empty()
    }
}
