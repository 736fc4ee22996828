// Common test utilities and helpers

use axum::body::Body;
use axum::http::Request;

use crate::models::Culture;
use crate::services::ResolutionConfig;

/// Parse a culture code that is known to be valid
pub fn culture(code: &str) -> Culture {
    Culture::parse(code).expect("valid culture code")
}

/// Site configured with `en-us` as the default culture, excluded from URLs
pub fn default_excluded_config() -> ResolutionConfig {
    ResolutionConfig::new(Some(culture("en-us")), true)
}

/// Site that always prefixes the culture, with `en-us` configured but unused
pub fn default_included_config() -> ResolutionConfig {
    ResolutionConfig::new(Some(culture("en-us")), false)
}

/// Build an empty GET request for `uri`
pub fn request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).expect("Failed to build test request")
}
