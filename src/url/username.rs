use crate::platform::Platform;
use url::Url;

/// Extracts the account name from a profile URL
///
/// | Platform | URL shape |
/// |----------|-----------|
/// | GitHub | `github.com/{user}` |
/// | LinkedIn | `linkedin.com/in/{user}` |
/// | LeetCode | `leetcode.com/{user}` or `leetcode.com/u/{user}` |
/// | Codeforces | `codeforces.com/profile/{user}` |
///
/// # Examples
///
/// ```
/// use url::Url;
/// use profile_enricher::platform::Platform;
/// use profile_enricher::url::extract_username;
///
/// let url = Url::parse("https://github.com/torvalds?tab=repositories").unwrap();
/// assert_eq!(extract_username(&url, Platform::GitHub), Some("torvalds".to_string()));
/// ```
pub fn extract_username(url: &Url, platform: Platform) -> Option<String> {
    let segments: Vec<&str> = url
        .path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();

    let username = match platform {
        Platform::GitHub => segments.first().copied(),
        Platform::LeetCode => segments.last().copied(),
        Platform::LinkedIn => segment_after(&segments, "in"),
        Platform::Codeforces => segment_after(&segments, "profile"),
    };

    username.map(str::to_string)
}

/// Returns the segment directly following `marker`
fn segment_after<'a>(segments: &[&'a str], marker: &str) -> Option<&'a str> {
    segments
        .iter()
        .position(|s| *s == marker)
        .and_then(|i| segments.get(i + 1))
        .copied()
}
