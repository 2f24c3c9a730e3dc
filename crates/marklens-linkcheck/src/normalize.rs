//! URL normalisation and scheme gating.

/// Schemes that are never network-checked.
const SKIP_SCHEMES: &[&str] = &["chrome", "edge", "about", "file", "javascript", "mailto", "data"];

/// A normalised URL: either probeable or deliberately skipped.
///
/// Also the deduplication key: all input rows normalising to the same value
/// share one verdict.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NormalizedUrl {
    /// A web URL to probe.
    Web(String),
    /// A non-web scheme left untouched and never checked.
    Skipped(String),
}

impl NormalizedUrl {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Web(s) | Self::Skipped(s) => s,
        }
    }
}

/// Trim, default the scheme to https, and gate non-web schemes.
pub fn normalize(raw: &str) -> NormalizedUrl {
    let trimmed = raw.trim();
    if let Some((scheme, _)) = trimmed.split_once(':')
        && SKIP_SCHEMES.contains(&scheme.to_ascii_lowercase().as_str())
    {
        return NormalizedUrl::Skipped(trimmed.to_string());
    }
    if trimmed.contains("://") {
        NormalizedUrl::Web(trimmed.to_string())
    } else {
        NormalizedUrl::Web(format!("https://{trimmed}"))
    }
}

/// The host component used for the domain failure cache.
pub fn host_of(url: &str) -> Option<String> {
    url::Url::parse(url).ok()?.host_str().map(str::to_string)
}
