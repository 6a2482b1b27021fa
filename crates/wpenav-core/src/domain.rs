//! Domain root resolution.
//!
//! Two hostnames refer to the same logical site when their "domain
//! roots" are equal. The root collapses platform-specific domain shapes
//! (`name.wpengine.com`, `name.local`) and ordinary second-level
//! domains down to a single comparison label.

/// Normalize a hostname or URL to its domain root.
///
/// Pure and infallible. Case-sensitive as given -- callers lower-case
/// inputs first. Multi-level TLDs are deliberately not handled:
/// `foo.co.uk` resolves to `co`, a known limitation inherited from the
/// matching rules this implements.
pub fn domain_root(host_or_url: &str) -> String {
    // Strip a leading scheme and a leading `www.` label.
    let host = host_or_url
        .strip_prefix("https://")
        .or_else(|| host_or_url.strip_prefix("http://"))
        .unwrap_or(host_or_url);
    let host = host.strip_prefix("www.").unwrap_or(host);

    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() < 2 {
        return host.to_owned();
    }

    // `foo.local` -> `foo` (local development domains).
    if labels[labels.len() - 1] == "local" {
        return labels[0].to_owned();
    }

    // `name.wpengine.com` -> `name`. The platform's own naming
    // convention must not be mistaken for a customer's second-level
    // domain.
    if labels[labels.len() - 1] == "com" && labels[labels.len() - 2] == "wpengine" {
        return labels[0].to_owned();
    }

    // `sub.example.com` -> `example`.
    labels[labels.len() - 2].to_owned()
}
