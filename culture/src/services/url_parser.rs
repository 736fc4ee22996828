//! URL culture parsing
//!
//! Recognizes and rewrites a culture prefix in a URL path. The prefix is the
//! first path segment, shaped `xx-yy` (two ASCII letters, a hyphen, two ASCII
//! letters) and followed by the end of the path, a `/` or a `?`:
//!
//! ```text
//! /en-us/some-path   -> en-us
//! /EN-US?page=2      -> en-us
//! /eng-us/some-path  -> no culture
//! /blog/en-us/post   -> no culture
//! ```
//!
//! Scheme and host are ignored, so absolute and relative URLs behave the same.
//! A path-only input is used exactly as written; only full URLs go through the
//! `url` crate.
//! Everything here is pure; nothing reads configuration or request state.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::models::Culture;

/// Culture prefix anchored at the start of the path.
/// Group 1 is the language, group 2 the region.
static CULTURE_PREFIX_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/([a-zA-Z]{2})-([a-zA-Z]{2})(?:[/?]|$)").unwrap());

/// Base that relative URLs are resolved against. Only its path matters.
static BASE_URL: Lazy<Url> = Lazy::new(|| Url::parse("http://localhost/").unwrap());

/// Extract the culture from a URL, e.g. `http://example.com/en-us/about` -> `en-us`
pub fn extract_culture(url: &str) -> Option<Culture> {
    let path = path_of(url);
    let caps = CULTURE_PREFIX_REGEX.captures(&path)?;
    Some(Culture::from_parts(&caps[1], &caps[2]))
}

/// Extract the region from a URL, e.g. `/en-us/about` -> `us`
pub fn extract_region(url: &str) -> Option<String> {
    let path = path_of(url);
    let caps = CULTURE_PREFIX_REGEX.captures(&path)?;
    Some(caps[2].to_ascii_lowercase())
}

/// Extract the language from a URL, e.g. `/en-us/about` -> `en`
pub fn extract_language(url: &str) -> Option<String> {
    extract_culture(url).map(|culture| culture.language().to_string())
}

/// Return the path of a URL without its culture prefix.
///
/// With `include_query` the query string is kept. The result never loses its
/// leading slash: `/en-us` becomes `/` and `/en-us?x=1` becomes `/?x=1`.
pub fn strip_culture(url: &str, include_query: bool) -> String {
    let path = if include_query { path_and_query_of(url) } else { path_of(url) };

    // End of the region, before the `/` or `?` terminator.
    let prefix_end =
        CULTURE_PREFIX_REGEX.captures(&path).and_then(|caps| caps.get(2)).map(|m| m.end());
    let Some(prefix_end) = prefix_end else {
        return path;
    };
    let rest = &path[prefix_end..];
    if rest.is_empty() || rest.starts_with('?') {
        format!("/{}", rest)
    } else {
        rest.to_string()
    }
}

/// Insert `/{culture}` as the first path segment, keeping the query string.
///
/// A bare root (`/` or `/?query`) reuses its slash, so `/` becomes `/en-us`
/// rather than `/en-us/`.
pub fn prefix_culture(url: &str, culture: &Culture) -> String {
    let path = path_and_query_of(url);
    let rest = if path == "/" || path.starts_with("/?") { &path[1..] } else { path.as_str() };
    format!("/{}{}", culture, rest)
}

/// Path component of a URL (`/en-us/about` for `https://host/en-us/about?x=1#top`)
pub fn path_of(url: &str) -> String {
    split_url(url).0
}

/// Path and query of a URL (`/en-us/about?x=1` for `https://host/en-us/about?x=1#top`)
pub fn path_and_query_of(url: &str) -> String {
    match split_url(url) {
        (path, Some(query)) => format!("{}?{}", path, query),
        (path, None) => path,
    }
}

fn split_url(url: &str) -> (String, Option<String>) {
    // Paths are taken as written: no dot-segment resolution or percent-encoding.
    if url.is_empty() || (url.starts_with('/') && !url.starts_with("//")) {
        return split_raw(url);
    }

    match BASE_URL.join(url) {
        Ok(parsed) => (parsed.path().to_string(), parsed.query().map(str::to_string)),
        Err(err) => {
            tracing::debug!("Falling back to raw split for url '{}': {}", url, err);
            let (path, query) = split_raw(strip_authority(url));
            let path = if path.is_empty() { "/".to_string() } else { path };
            (path, query)
        },
    }
}

/// Split without URL parsing: drop the fragment, then cut at the first `?`.
fn split_raw(url: &str) -> (String, Option<String>) {
    let url = url.split('#').next().unwrap_or_default();
    match url.split_once('?') {
        Some((path, query)) => (path.to_string(), Some(query.to_string())),
        None => (url.to_string(), None),
    }
}

/// Drop `scheme://host` (or `//host`), keeping everything from the path on
fn strip_authority(url: &str) -> &str {
    let rest = match url.split_once("://") {
        Some((_, rest)) => rest,
        None => url.strip_prefix("//").unwrap_or(url),
    };
    match rest.find(['/', '?', '#']) {
        Some(end) => &rest[end..],
        None => "",
    }
}
