//! URL to domain name extraction for frame records.

use url::Url;

/// Signature of the domain extraction used by the tab registry.
pub type DomainFn = fn(&str) -> Option<String>;

/// Lowercased host of `url` without a leading `www.`.
///
/// Returns `None` for URLs that do not parse or carry no host
/// (`about:blank`, `data:` documents and similar).
pub fn domain_name(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    let host = parsed.host_str()?;
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    let host = host.strip_prefix("www.").map(str::to_string).unwrap_or(host);
    if host.is_empty() {
        None
    } else {
        Some(host)
    }
}
