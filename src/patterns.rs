use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::domain::MailAddress;
use crate::errors::{AnalyzerError, Result};

// Include default providers at compile time
const DEFAULT_PROVIDERS: &str = include_str!("../default_disposable_providers.txt");

/// Provider list picked up from the working directory when `--providers` is not given.
pub const PROVIDERS_FILE: &str = "disposable_providers.txt";

static RE_WORDS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\w+]{3,}").unwrap());

// The boundary characters are part of the match, so two numbers sharing a
// single separator ("x 05 06 y") only yield the first one.
static RE_YEARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9]([0-9]{2}|20[0-9]{2})[^0-9]").unwrap());

static RE_TLDS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.[a-z]{2,4}").unwrap());

// The TLD takes every lowercase letter that follows, so ".online" is kept
// whole and "example.com1" still parses as "example.com".
static RE_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+\-]+@(?:[A-Za-z0-9\-]+\.)*[A-Za-z0-9\-]+\.[a-z]{2,}").unwrap()
});

/// One signal pulled out of corpus text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidate<'a> {
    Word(&'a str),
    /// Two digits, or four digits starting with "20", without the boundaries.
    Year(&'a str),
    /// Dot plus two to four lowercase letters, e.g. ".com".
    TldFragment(&'a str),
    /// Domain label directly before the TLD of an address.
    MailDomain(&'a str),
    DisposableMail {
        address: &'a str,
        local_part: &'a str,
        provider: &'a str,
    },
    PlusMail {
        address: &'a str,
        local_part: &'a str,
        suffix: &'a str,
        domain: &'a str,
    },
}

pub fn words(text: &str) -> impl Iterator<Item = &str> {
    RE_WORDS.find_iter(text).map(|m| m.as_str())
}

pub fn years(text: &str) -> impl Iterator<Item = &str> {
    RE_YEARS
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
}

pub fn tld_fragments(text: &str) -> impl Iterator<Item = &str> {
    RE_TLDS.find_iter(text).map(|m| m.as_str())
}

pub fn mail_addresses(text: &str) -> impl Iterator<Item = MailAddress<'_>> {
    RE_EMAIL
        .find_iter(text)
        .filter_map(|m| MailAddress::parse(m.as_str()))
}

/// Turns corpus text into a stream of typed candidates.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    providers: HashSet<String>,
}

impl Extractor {
    pub fn new<I, S>(providers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            providers: providers.into_iter().map(Into::into).collect(),
        }
    }

    /// Runs every rule over `text`.
    ///
    /// Rules are independent: "jane+news@web.de" produces a word, a TLD
    /// fragment, a mail domain and a plus-mail record.
    pub fn extract<'a>(&self, text: &'a str) -> Vec<Candidate<'a>> {
        let start_time = Instant::now();
        let mut candidates: Vec<Candidate<'a>> = words(text).map(Candidate::Word).collect();
        candidates.extend(years(text).map(Candidate::Year));
        candidates.extend(tld_fragments(text).map(Candidate::TldFragment));

        for mail in mail_addresses(text) {
            candidates.push(Candidate::MailDomain(mail.label));

            if mail.is_disposable(&self.providers) {
                candidates.push(Candidate::DisposableMail {
                    address: mail.address,
                    local_part: mail.local,
                    provider: mail.label,
                });
            }

            if let Some((local_part, suffix)) = mail.plus_parts() {
                candidates.push(Candidate::PlusMail {
                    address: mail.address,
                    local_part,
                    suffix,
                    domain: mail.domain,
                });
            }
        }

        debug!(
            action = "extract",
            component = "extractor",
            input_bytes = text.len(),
            candidate_count = candidates.len(),
            duration_ms = start_time.elapsed().as_millis(),
            "Extracted candidates"
        );
        candidates
    }
}

fn parse_provider_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// The embedded disposable-mail provider list.
pub fn default_providers() -> Vec<String> {
    parse_provider_lines(DEFAULT_PROVIDERS)
}

pub fn load_disposable_providers(provider_file_path: Option<&Path>) -> Result<Vec<String>> {
    let start_time = Instant::now();
    info!(
        action = "start",
        component = "provider_loading",
        "Starting disposable provider loading"
    );

    let mut providers = Vec::new();

    if let Some(path) = provider_file_path {
        info!(action = "load", component = "provider_file", file_path = ?path, "Loading providers from specified file");
        if !path.exists() {
            return Err(AnalyzerError::configuration(format!(
                "Provider file not found: {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            AnalyzerError::configuration(format!(
                "Failed to read provider file {}: {}",
                path.display(),
                e
            ))
        })?;
        providers = parse_provider_lines(&content);
        info!(action = "loaded", component = "provider_file", provider_count = providers.len(), file_path = ?path, "Loaded providers from file");
    } else {
        // Try default file
        let default_file = Path::new(PROVIDERS_FILE);
        if default_file.exists() {
            info!(action = "load", component = "default_provider_file", file_path = ?default_file, "Loading providers from default file");
            match fs::read_to_string(default_file) {
                Ok(content) => providers = parse_provider_lines(&content),
                Err(e) => {
                    warn!(action = "read", component = "default_provider_file", error = %e, "Unreadable provider file, ignoring")
                }
            }
            info!(action = "loaded", component = "default_provider_file", provider_count = providers.len(), file_path = ?default_file, "Loaded providers from default file");
        }

        // If no providers loaded, use embedded defaults
        if providers.is_empty() {
            info!(
                action = "load",
                component = "embedded_providers",
                "Using embedded default providers"
            );
            providers = default_providers();
        }
    }

    info!(
        action = "complete",
        component = "provider_loading",
        provider_count = providers.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Disposable providers ready"
    );
    Ok(providers)
}

/// Writes the embedded provider list to `path`, refusing to overwrite.
pub fn init_default_providers(path: &Path) -> Result<()> {
    if path.exists() {
        return Err(AnalyzerError::configuration(format!(
            "{} already exists. Remove it first if you want to reinitialize.",
            path.display()
        )));
    }

    fs::write(path, DEFAULT_PROVIDERS).map_err(|e| {
        AnalyzerError::configuration(format!("Failed to write {}: {}", path.display(), e))
    })?;
    info!(action = "init", component = "provider_file", file_path = ?path, "Wrote default providers");
    Ok(())
}
