//! Turns raw `href` values into absolute URLs.
//!
//! Resolution is purely textual. `../` segments, query strings, fragments and
//! scheme-relative (`//host/path`) links are not interpreted; such inputs give
//! odd-looking URLs that simply fail to fetch later on.

use url::Url;

/// Resolve `raw_href` as found on a page against `base`.
///
/// Returns `None` only when the href is empty after trimming.
pub fn resolve(base: &str, raw_href: &str) -> Option<String> {
    let href = raw_href.trim().to_lowercase();
    if href.is_empty() {
        return None;
    }

    if href.starts_with("http") {
        return Some(href);
    }

    if let Some(rest) = href.strip_prefix("./") {
        return Some(join(base, rest));
    }

    if let Some(rest) = href.strip_prefix('/') {
        return Some(join(&site_root(base), rest));
    }

    Some(format!("{}{}", base, href))
}

fn join(base: &str, rest: &str) -> String {
    if base.ends_with('/') {
        format!("{}{}", base, rest)
    } else {
        format!("{}/{}", base, rest)
    }
}

/// `scheme://host[:port]` of `base`, or `base` itself when it has no
/// tuple origin (unparseable or non-hierarchical URLs).
fn site_root(base: &str) -> String {
    match Url::parse(base) {
        Ok(url) if url.origin().is_tuple() => url.origin().ascii_serialization(),
        _ => base.to_string(),
    }
}
