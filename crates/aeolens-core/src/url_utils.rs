use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use url::{Host, Url};

use crate::error::ValidationError;

static SCHEME_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^https?://").expect("invalid scheme regex"));

// LDH hostnames (plus underscore); the URL parser alone tolerates `!`, `$`, `*` and friends.
static DOMAIN_LABELS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]+(\.[A-Za-z0-9_-]+)*\.?$").expect("invalid domain regex")
});

const DEFAULT_SCHEME: &str = "https://";

/// An absolute http(s) URL that passed normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NormalizedUrl(String);

impl NormalizedUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validate and canonicalize user-entered URL text.
///
/// Input without an `http://` or `https://` prefix gets `https://`
/// prepended. The result is the parsed URL's serialization with any root
/// path slash the parser adds for bare hosts removed, so `example.com`
/// becomes `https://example.com`.
pub fn normalize(input: &str) -> Result<NormalizedUrl, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyInput);
    }

    let candidate = if SCHEME_PREFIX.is_match(trimmed) {
        trimmed.to_string()
    } else {
        format!("{DEFAULT_SCHEME}{trimmed}")
    };

    let parsed = Url::parse(&candidate).map_err(|err| malformed(trimmed, err.to_string()))?;

    match parsed.host() {
        Some(Host::Domain(domain)) if !DOMAIN_LABELS.is_match(domain) => {
            return Err(malformed(trimmed, format!("invalid host `{domain}`")));
        }
        Some(_) => {}
        None => return Err(malformed(trimmed, "missing host".to_string())),
    }

    let normalized = canonical_string(&parsed);
    tracing::debug!(input = trimmed, url = %normalized, "normalized url");
    Ok(NormalizedUrl(normalized))
}

fn canonical_string(parsed: &Url) -> String {
    let serialized = parsed.as_str();
    let bare_root = parsed.path() == "/" && parsed.query().is_none() && parsed.fragment().is_none();
    if bare_root {
        serialized.trim_end_matches('/').to_string()
    } else {
        serialized.to_string()
    }
}

fn malformed(input: &str, reason: String) -> ValidationError {
    ValidationError::MalformedUrl {
        input: input.to_string(),
        reason,
    }
}
