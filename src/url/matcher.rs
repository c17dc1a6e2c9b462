/// Checks if a host matches a throttled-host pattern
///
/// `"google.de"` matches only that host. `"*.google.de"` matches the bare
/// domain and any subdomain of it (`www.google.de`, `news.google.de`).
///
/// # Examples
///
/// ```
/// use price_scout::url::matches_wildcard;
///
/// assert!(matches_wildcard("*.google.co.in", "www.google.co.in"));
/// assert!(matches_wildcard("*.google.co.in", "google.co.in"));
/// assert!(!matches_wildcard("*.google.co.in", "notgoogle.co.in"));
/// assert!(!matches_wildcard("google.com", "www.google.com"));
/// ```
pub fn matches_wildcard(pattern: &str, candidate: &str) -> bool {
    match pattern.strip_prefix("*.") {
        Some(base) => candidate
            .strip_suffix(base)
            .is_some_and(|rest| rest.is_empty() || rest.ends_with('.')),
        None => candidate == pattern,
    }
}
