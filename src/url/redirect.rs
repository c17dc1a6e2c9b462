//! Search-engine redirect unwrapping
//!
//! Result anchors on the engines' HTML pages rarely point at the destination
//! directly. Each engine wraps it in its own redirect endpoint with the real URL
//! in a query parameter.

use percent_encoding::percent_decode_str;
use url::form_urlencoded;

/// Unwraps a search-engine redirect into the URL it points at
///
/// Recognized shapes:
/// 1. `duckduckgo.com/l/?uddg=<dest>`
/// 2. `duckduckgo.com/y.js?...&u3=<enc>` where `<enc>` decodes to a click URL
///    whose own `u` parameter, decoded once more, is the destination
/// 3. `bing.com/ck/...?u=<dest>`
/// 4. `google.com/url?q=<dest>` (or `url=<dest>`)
///
/// Anything else is returned unchanged. A recognized shape with a missing or
/// empty parameter yields `None`.
///
/// # Examples
///
/// ```
/// use price_scout::url::decode_redirect;
///
/// assert_eq!(
///     decode_redirect("https://duckduckgo.com/l/?uddg=https%3A%2F%2Fwww.amazon.com%2Fdp%2FX&rut=ab"),
///     Some("https://www.amazon.com/dp/X".to_string())
/// );
/// assert_eq!(
///     decode_redirect("https://www.walmart.com/ip/1"),
///     Some("https://www.walmart.com/ip/1".to_string())
/// );
/// ```
pub fn decode_redirect(url: &str) -> Option<String> {
    if url.contains("duckduckgo.com/l/?uddg=") {
        query_param(url, "uddg")
    } else if url.contains("duckduckgo.com/y.js") {
        let u3 = query_param(url, "u3")?;
        let click_url = percent_decode_str(&u3).decode_utf8().ok()?;
        let target = query_param(&click_url, "u")?;
        let decoded = percent_decode_str(&target).decode_utf8().ok()?;
        Some(decoded.into_owned())
    } else if url.contains("bing.com/ck/") {
        query_param(url, "u")
    } else if url.contains("google.com/url?") {
        query_param(url, "q").or_else(|| query_param(url, "url"))
    } else {
        Some(url.to_string())
    }
}

/// Looks up a form-decoded query parameter in the text after the first `?`
///
/// Works on protocol-relative and otherwise partial hrefs, which is what the
/// engines actually emit.
fn query_param(url: &str, key: &str) -> Option<String> {
    let (_, query) = url.split_once('?')?;
    let query = query.split('#').next().unwrap_or_default();

    form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty())
}
