use std::collections::HashSet;

/// An email-shaped substring split into its parts.
///
/// `label` is the domain label directly before the TLD, so both
/// `user@mailinator.com` and `user@mx.mailinator.com` have label `mailinator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MailAddress<'a> {
    pub address: &'a str,
    pub local: &'a str,
    pub domain: &'a str,
    pub label: &'a str,
    pub tld: &'a str,
}

impl<'a> MailAddress<'a> {
    pub fn parse(address: &'a str) -> Option<Self> {
        let (local, domain) = address.rsplit_once('@')?;
        if local.is_empty() {
            return None;
        }

        let (rest, tld) = domain.rsplit_once('.')?;
        if tld.len() < 2 || !tld.chars().all(|c| c.is_ascii_lowercase()) {
            return None;
        }

        let label = rest.rsplit('.').next().unwrap_or(rest);
        if label.is_empty() {
            return None;
        }

        Some(Self {
            address,
            local,
            domain,
            label,
            tld,
        })
    }

    /// Local part split at the first `+`, if it has one.
    pub fn plus_parts(&self) -> Option<(&'a str, &'a str)> {
        self.local.split_once('+')
    }

    pub fn is_disposable(&self, providers: &HashSet<String>) -> bool {
        providers.contains(self.label)
    }
}

/// Masks all but the first character of an email local part.
pub fn redact_local_part(local: &str) -> String {
    let mut chars = local.chars();
    match chars.next() {
        Some(first) if chars.clone().next().is_some() => {
            format!("{}{}", first, "*".repeat(chars.count()))
        }
        _ => "*".repeat(local.chars().count()),
    }
}

/// Masks the local part of a full address, keeping the domain readable.
pub fn redact_address(address: &str) -> String {
    match address.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", redact_local_part(local), domain),
        None => redact_local_part(address),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_address() {
        let mail = MailAddress::parse("user@mailinator.com").unwrap();
        assert_eq!(mail.local, "user");
        assert_eq!(mail.domain, "mailinator.com");
        assert_eq!(mail.label, "mailinator");
        assert_eq!(mail.tld, "com");
    }

    #[test]
    fn label_is_last_before_tld() {
        let mail = MailAddress::parse("a.b@mx.web.de").unwrap();
        assert_eq!(mail.label, "web");
        assert_eq!(mail.tld, "de");
    }

    #[test]
    fn rejects_non_mail_shapes() {
        assert!(MailAddress::parse("no-at-sign.com").is_none());
        assert!(MailAddress::parse("@example.com").is_none());
        assert!(MailAddress::parse("user@localhost").is_none());
        assert!(MailAddress::parse("user@example.COM").is_none());
    }

    #[test]
    fn plus_parts_split_at_first_plus() {
        let mail = MailAddress::parse("jane+news+2019@example.com").unwrap();
        assert_eq!(mail.plus_parts(), Some(("jane", "news+2019")));
        let plain = MailAddress::parse("jane@example.com").unwrap();
        assert_eq!(plain.plus_parts(), None);
    }

    #[test]
    fn disposable_lookup_is_exact() {
        let providers: HashSet<String> = ["mailinator".to_string()].into_iter().collect();
        assert!(MailAddress::parse("x@mailinator.com")
            .unwrap()
            .is_disposable(&providers));
        assert!(!MailAddress::parse("x@Mailinator.com")
            .unwrap()
            .is_disposable(&providers));
    }

    #[test]
    fn redaction_keeps_first_character() {
        assert_eq!(redact_local_part("jane"), "j***");
        assert_eq!(redact_local_part("j"), "*");
        assert_eq!(redact_address("jane@example.com"), "j***@example.com");
    }
}
