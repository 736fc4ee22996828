use axum::http::{Extensions, StatusCode};
use axum::response::IntoResponse;

use crate::services::{
    CultureStore, RequestCulture, localize_url, resolve, resolve_language, set_stored, stored,
};
use crate::tests::common::{culture, default_excluded_config, default_included_config, request};
use crate::utils::CultureError;

#[test]
fn test_request_with_prefix_stores_culture_in_extensions() {
    let config = default_excluded_config();
    let mut req = request("https://example.com/es-mx/products?page=2");
    let url = req.uri().to_string();

    let resolved = resolve(&url, &config, Some(&mut req)).unwrap();
    assert_eq!(resolved, Some(culture("es-mx")));

    // Later reads in the same request see the resolved culture.
    assert_eq!(stored(&config, Some(&req)).unwrap(), Some(culture("es-mx")));
    assert_eq!(
        req.extensions().get::<RequestCulture>(),
        Some(&RequestCulture(culture("es-mx")))
    );
}

#[test]
fn test_unprefixed_request_uses_default_culture() {
    let config = default_excluded_config();
    let mut req = request("/products");
    let url = req.uri().to_string();

    assert_eq!(resolve(&url, &config, Some(&mut req)).unwrap(), Some(culture("en-us")));
    assert_eq!(CultureStore::get(&req), Some(culture("en-us")));

    // Links generated for the default culture carry no prefix.
    assert_eq!(localize_url(&url, Some(&culture("en-us")), &config), "/products");
    assert_eq!(localize_url(&url, Some(&culture("fr-ca")), &config), "/fr-ca/products");
}

#[test]
fn test_unprefixed_request_without_policy_has_no_culture() {
    let config = default_included_config();
    let mut req = request("/products");
    let url = req.uri().to_string();

    assert_eq!(resolve(&url, &config, Some(&mut req)).unwrap(), None);
    assert_eq!(stored(&config, Some(&req)).unwrap(), None);
    assert_eq!(localize_url(&url, Some(&culture("en-us")), &config), "/en-us/products");
}

#[test]
fn test_stored_culture_survives_unprefixed_subrequest_url() {
    let config = default_excluded_config();
    let mut extensions = Extensions::new();

    // First resolution comes from the page URL.
    assert_eq!(
        resolve("/de-de/checkout", &config, Some(&mut extensions)).unwrap(),
        Some(culture("de-de"))
    );
    // A later lookup for an unprefixed asset URL in the same request keeps it.
    assert_eq!(
        resolve("/assets/app.js", &config, Some(&mut extensions)).unwrap(),
        Some(culture("de-de"))
    );
    assert_eq!(
        resolve_language("/assets/app.js", &config, Some(&mut extensions)).unwrap().as_deref(),
        Some("de")
    );
}

#[test]
fn test_requests_do_not_share_culture() {
    let config = default_included_config();
    let mut first = request("/ja-jp/");
    let mut second = request("/about");

    let first_url = first.uri().to_string();
    let second_url = second.uri().to_string();

    assert_eq!(resolve(&first_url, &config, Some(&mut first)).unwrap(), Some(culture("ja-jp")));
    assert_eq!(resolve(&second_url, &config, Some(&mut second)).unwrap(), None);
    assert_eq!(CultureStore::get(&second), None);
}

#[test]
fn test_set_stored_then_read_back() {
    let config = default_excluded_config();
    let mut req = request("/about");

    set_stored(Some(culture("pt-br")), &config, Some(&mut req)).unwrap();
    assert_eq!(stored(&config, Some(&req)).unwrap(), Some(culture("pt-br")));

    set_stored(None, &config, Some(&mut req)).unwrap();
    assert_eq!(stored(&config, Some(&req)).unwrap(), Some(culture("en-us")));
}

#[test]
fn test_strict_errors_map_to_responses() {
    let config = default_included_config().strict();

    let err = resolve::<Extensions>("/about", &config, None).unwrap_err();
    assert_eq!(err, CultureError::missing_dependency("culture store"));
    assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);

    let mut req = request("/about");
    let err = set_stored(None, &config, Some(&mut req)).unwrap_err();
    assert!(err.is_invalid_argument());
    assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
}
