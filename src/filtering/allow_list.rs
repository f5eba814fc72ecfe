use std::collections::BTreeSet;
use std::fmt;

/// Parses a comma separated list, dropping blanks and surrounding whitespace.
pub fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Allow-list of team slugs. Empty means every team is allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlugFilter {
    slugs: BTreeSet<String>,
}

impl SlugFilter {
    pub fn new<I, S>(slugs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            slugs: slugs
                .into_iter()
                .map(Into::into)
                .filter(|slug: &String| !slug.trim().is_empty())
                .collect(),
        }
    }

    pub fn parse(value: &str) -> Self {
        Self::new(parse_list(value))
    }

    pub fn is_empty(&self) -> bool {
        self.slugs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slugs.len()
    }

    pub fn matches(&self, slug: &str) -> bool {
        self.is_empty() || self.slugs.contains(slug)
    }
}

impl fmt::Display for SlugFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slugs: Vec<&str> = self.slugs.iter().map(String::as_str).collect();
        write!(f, "{}", slugs.join(", "))
    }
}

/// Allow-list of recipient emails, compared case-insensitively. Empty means
/// every owner may be notified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailFilter {
    emails: BTreeSet<String>,
}

impl EmailFilter {
    pub fn new<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            emails: emails
                .into_iter()
                .map(|email| email.into().trim().to_lowercase())
                .filter(|email| !email.is_empty())
                .collect(),
        }
    }

    pub fn parse(value: &str) -> Self {
        Self::new(parse_list(value))
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }

    pub fn allows(&self, email: &str) -> bool {
        self.is_empty() || self.emails.contains(&email.trim().to_lowercase())
    }
}

impl fmt::Display for EmailFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let emails: Vec<&str> = self.emails.iter().map(String::as_str).collect();
        write!(f, "{}", emails.join(", "))
    }
}
