/// Strips referral and query suffixes from a product URL
///
/// # Cleanup Steps
///
/// 1. Cut everything from the first `/ref=` segment
/// 2. Cut everything from the first `?` in what remains
///
/// The result is always a prefix of the input, so applying the cleanup a
/// second time is a no-op.
///
/// # Examples
///
/// ```
/// use restock_watch::target::short_url;
///
/// assert_eq!(short_url("https://a.co/d/XYZ/ref=abc?tag=1"), "https://a.co/d/XYZ");
/// assert_eq!(short_url("https://a.co/d/XYZ"), "https://a.co/d/XYZ");
/// ```
pub fn short_url(url: &str) -> &str {
    let without_ref = match url.find("/ref=") {
        Some(idx) => &url[..idx],
        None => url,
    };

    match without_ref.find('?') {
        Some(idx) => &without_ref[..idx],
        None => without_ref,
    }
}
