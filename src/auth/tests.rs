//! Tests for the auth module

use super::*;
use base64::Engine;

#[test]
fn test_basic_header_value() {
    let credentials = Credentials::new("ws@Company.Acme", "s3cret");
    let value = credentials.header_value().unwrap();
    let text = value.to_str().unwrap();

    assert!(text.starts_with("Basic "));
    let encoded = text.strip_prefix("Basic ").unwrap();
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .unwrap();
    assert_eq!(String::from_utf8(decoded).unwrap(), "ws@Company.Acme:s3cret");
    assert!(value.is_sensitive());
}

#[test]
fn test_apply_sets_authorization_header() {
    let credentials = Credentials::new("user", "pass");

    let client = reqwest::Client::new();
    let req = client.head("https://example.com/reports/x.csv");
    let built = credentials.apply(req).unwrap().build().unwrap();

    assert_eq!(
        built.headers().get("Authorization").unwrap(),
        "Basic dXNlcjpwYXNz"
    );
}

#[test]
fn test_debug_hides_password() {
    let credentials = Credentials::new("user", "hunter2");
    let debug = format!("{credentials:?}");
    assert!(debug.contains("user"));
    assert!(!debug.contains("hunter2"));
}
