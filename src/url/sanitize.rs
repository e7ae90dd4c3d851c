use url::Url;

/// Cell values that mean "no URL" (compared case-insensitively)
const PLACEHOLDERS: &[&str] = &["", "-", "n/a", "na", "nan", "none", "null"];

/// Turns a raw spreadsheet cell into a URL, if it holds one
///
/// # Sanitizing Steps
///
/// 1. Trim surrounding whitespace
/// 2. Drop placeholder tokens (`N/A`, `-`, `none`, empty, ...)
/// 3. Prepend `https://` when the value has no `http(s)://` scheme
/// 4. Parse; reject values without a host
///
/// # Examples
///
/// ```
/// use profile_enricher::url::sanitize_url;
///
/// let url = sanitize_url("  codeforces.com/profile/tourist  ").unwrap();
/// assert_eq!(url.as_str(), "https://codeforces.com/profile/tourist");
///
/// assert!(sanitize_url("N/A").is_none());
/// ```
pub fn sanitize_url(raw: &str) -> Option<Url> {
    let trimmed = raw.trim();

    let lowered = trimmed.to_ascii_lowercase();
    if PLACEHOLDERS.contains(&lowered.as_str()) {
        return None;
    }

    let candidate = if lowered.starts_with("http://") || lowered.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let url = Url::parse(&candidate).ok()?;
    match url.host_str() {
        Some(host) if !host.is_empty() => Some(url),
        _ => None,
    }
}
