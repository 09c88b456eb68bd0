mod common;

use bunner_cors_policy::constants::{header, method};
use bunner_cors_policy::{
    AllowMethods, Cors, CorsConfig, CorsOptions, HeaderCollection, OptionsResolver, PatternKind,
    RequestContext, ValidationError,
};
use common::asserts::{assert_continue, assert_header_absent, assert_header_eq};
use common::builders::{preflight_request, simple_request};

const CONFIG: &str = r#"{
    "defaults": {
        "allow_origin": ["https://app.example.com"],
        "allow_methods": ["GET"],
        "max_age": 60
    },
    "paths": {
        "^/api/admin": {
            "allow_origin": ["https://console.example.com"],
            "allow_methods": ["GET", "DELETE"],
            "hosts": ["^admin\\."]
        },
        "^/api/": {
            "allow_origin": "*",
            "allow_headers": ["X-Token"],
            "allow_methods": ["GET", "POST"],
            "max_age": 3600
        },
        "^/internal/": {
            "allow_origin": [],
            "allow_methods": []
        }
    }
}"#;

fn config() -> CorsConfig {
    serde_json::from_str(CONFIG).expect("valid configuration document")
}

fn cors() -> Cors {
    Cors::new(config().into_resolver().expect("valid configuration"))
}

#[test]
fn path_block_overrides_defaults_for_preflight() {
    let exchange = preflight_request()
        .path("/api/users")
        .origin("https://anyone.example.net")
        .request_method(method::POST)
        .request_headers("x-token")
        .exchange(&cors(), HeaderCollection::new());

    assert_eq!(exchange.status, 200);
    assert_header_eq(&exchange.headers, header::ACCESS_CONTROL_ALLOW_METHODS, "GET, POST");
    assert_header_eq(&exchange.headers, header::ACCESS_CONTROL_ALLOW_HEADERS, "x-token");
    assert_header_eq(&exchange.headers, header::ACCESS_CONTROL_MAX_AGE, "3600");
}

#[test]
fn unmapped_path_uses_defaults() {
    let exchange = preflight_request()
        .path("/home")
        .origin("https://app.example.com")
        .request_method(method::GET)
        .exchange(&cors(), HeaderCollection::new());

    assert_header_eq(&exchange.headers, header::ACCESS_CONTROL_ALLOW_METHODS, "GET");
    assert_header_eq(&exchange.headers, header::ACCESS_CONTROL_MAX_AGE, "60");
    assert_header_eq(
        &exchange.headers,
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        "https://app.example.com",
    );
}

#[test]
fn host_restricted_block_applies_only_to_matching_host() {
    let admin = preflight_request()
        .host("admin.example.com")
        .path("/api/admin/users")
        .origin("https://console.example.com")
        .request_method(method::DELETE)
        .exchange(&cors(), HeaderCollection::new());
    let public = preflight_request()
        .host("www.example.com")
        .path("/api/admin/users")
        .origin("https://console.example.com")
        .request_method(method::DELETE)
        .exchange(&cors(), HeaderCollection::new());

    assert_eq!(admin.status, 200);
    assert_header_eq(&admin.headers, header::ACCESS_CONTROL_ALLOW_METHODS, "GET, DELETE");
    // falls through to `^/api/`
    assert_eq!(public.status, 405);
    assert_header_eq(&public.headers, header::ACCESS_CONTROL_ALLOW_METHODS, "GET, POST");
}

#[test]
fn host_matching_ignores_port() {
    let exchange = preflight_request()
        .host("admin.example.com:8443")
        .path("/api/admin")
        .origin("https://console.example.com")
        .request_method(method::DELETE)
        .exchange(&cors(), HeaderCollection::new());

    assert_eq!(exchange.status, 200);
}

#[test]
fn empty_lists_in_path_block_keep_defaults() {
    let state = assert_continue(
        simple_request()
            .path("/internal/metrics")
            .origin("https://app.example.com")
            .on_request(&cors()),
    );

    assert!(state.allow_origin);
}

#[test]
fn path_block_cannot_switch_off_default_credentials() {
    let config: CorsConfig = serde_json::from_str(
        r#"{
            "defaults": { "allow_origin": "*", "allow_credentials": true },
            "paths": { "^/api": { "allow_credentials": false } }
        }"#,
    )
    .expect("valid configuration document");
    let cors = Cors::new(config.into_resolver().expect("valid configuration"));

    let exchange = simple_request()
        .path("/api/x")
        .origin("http://a.test")
        .exchange(&cors, HeaderCollection::new());

    assert_header_eq(&exchange.headers, header::ACCESS_CONTROL_ALLOW_ORIGIN, "http://a.test");
    assert_header_eq(&exchange.headers, header::ACCESS_CONTROL_ALLOW_CREDENTIALS, "true");
}

#[test]
fn wildcard_expose_in_path_conflicts_with_default_credentials() {
    let config: CorsConfig = serde_json::from_str(
        r#"{
            "defaults": { "allow_origin": "*", "allow_credentials": true },
            "paths": { "^/api": { "expose_headers": "*" } }
        }"#,
    )
    .expect("valid configuration document");

    assert!(matches!(
        config.into_resolver(),
        Err(ValidationError::ExposeHeadersWildcardWithCredentials)
    ));
}

#[test]
fn higher_priority_provider_overrides_configuration() {
    let resolver = config()
        .into_resolver()
        .expect("valid configuration")
        .with_provider(0, |request: &RequestContext<'_>| {
            if request.path.starts_with("/api/") {
                CorsOptions {
                    allow_methods: Some(AllowMethods::list(["PATCH"])),
                    ..CorsOptions::default()
                }
            } else {
                CorsOptions::default()
            }
        });
    let cors = Cors::new(resolver);

    let exchange = preflight_request()
        .path("/api/users")
        .origin("https://anyone.example.net")
        .request_method(method::PATCH)
        .exchange(&cors, HeaderCollection::new());

    assert_eq!(exchange.status, 200);
    assert_header_eq(&exchange.headers, header::ACCESS_CONTROL_ALLOW_METHODS, "PATCH");
    assert_header_eq(&exchange.headers, header::ACCESS_CONTROL_MAX_AGE, "3600");
}

#[test]
fn resolution_is_repeatable() {
    let resolver = config().into_resolver().expect("valid configuration");
    let request = RequestContext::new("GET", "https", "admin.example.com", "/api/admin");

    assert_eq!(resolver.options(&request), resolver.options(&request));
}

#[test]
fn configuration_errors_surface_at_construction() {
    let credentials_with_wildcard: CorsConfig = serde_json::from_str(
        r#"{ "paths": { "^/": { "allow_credentials": true, "expose_headers": ["*"] } } }"#,
    )
    .expect("valid configuration document");
    let bad_path: CorsConfig =
        serde_json::from_str(r#"{ "paths": { "^/(unclosed": {} } }"#).expect("valid document");
    let bad_origin: CorsConfig = serde_json::from_str(
        r#"{ "defaults": { "origin_regex": true, "allow_origin": ["^https://(x"] } }"#,
    )
    .expect("valid document");

    assert!(matches!(
        credentials_with_wildcard.into_resolver(),
        Err(ValidationError::ExposeHeadersWildcardWithCredentials)
    ));
    assert!(matches!(
        bad_path.into_resolver(),
        Err(ValidationError::InvalidPattern {
            kind: PatternKind::Path,
            ..
        })
    ));
    assert!(matches!(
        bad_origin.into_resolver(),
        Err(ValidationError::InvalidPattern {
            kind: PatternKind::Origin,
            ..
        })
    ));
}

#[test]
fn empty_configuration_keeps_engine_inert() {
    let cors = Cors::new(CorsConfig::default().into_resolver().expect("valid configuration"));

    let exchange = simple_request()
        .origin("https://app.example.com")
        .exchange(&cors, HeaderCollection::new());

    assert_header_absent(&exchange.headers, header::ACCESS_CONTROL_ALLOW_ORIGIN);
}
