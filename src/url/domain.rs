use url::Url;

/// Extracts the host of a URL, lowercased and without a `www.` prefix
///
/// # Examples
///
/// ```
/// use url::Url;
/// use profile_enricher::url::extract_domain;
///
/// let url = Url::parse("https://www.LinkedIn.com/in/someone").unwrap();
/// assert_eq!(extract_domain(&url), Some("linkedin.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    let host = host.strip_prefix("www.").map(str::to_string).unwrap_or(host);
    if host.is_empty() {
        None
    } else {
        Some(host)
    }
}

/// Returns true if the URL's host is one of `domains` or a subdomain of one
///
/// `notgithub.com` does not match `github.com`; `gist.github.com` does.
pub fn host_matches(url: &Url, domains: &[String]) -> bool {
    let Some(host) = extract_domain(url) else {
        return false;
    };

    domains.iter().any(|domain| {
        let domain = domain.to_lowercase();
        let domain = domain.strip_prefix("www.").unwrap_or(&domain);
        host == domain
            || host
                .strip_suffix(domain)
                .is_some_and(|prefix| prefix.ends_with('.'))
    })
}
