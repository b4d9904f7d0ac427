/// Routing behaviour that does not depend on upstream data.

mod common;

use seamon_service::endpoint::{Body, Router};

fn router() -> Router {
    Router::from_config(&common::offline_config()).expect("router builds")
}

#[test]
fn test_health() {
    let response = router().handle("GET", "/api/health");
    let body = response.json_body().unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].is_string());
}

#[test]
fn test_unknown_path_is_404_envelope() {
    let response = router().handle("GET", "/api/sharks?x=1");
    let body = response.json_body().unwrap();

    assert_eq!(response.status, 404);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Not found");
    assert_eq!(body["path"], "/api/sharks");
}

#[test]
fn test_nested_family_path_is_404() {
    let response = router().handle("GET", "/api/fish-species/Lamnidae/extra");
    assert_eq!(response.status, 404);
}

#[test]
fn test_non_get_is_404() {
    let response = router().handle("POST", "/api/health");
    assert_eq!(response.status, 404);
}

#[test]
fn test_trailing_slash_is_ignored() {
    let response = router().handle("GET", "/api/health/");
    assert_eq!(response.status, 200);
}

#[test]
fn test_family_path_is_decoded() {
    let response = router().handle("GET", "/api/fish-species/Cichlidae%20");
    assert_eq!(response.json_body().unwrap()["family"], "Cichlidae ");
}

#[test]
fn test_root_serves_rendered_page() {
    let response = router().handle("GET", "/");

    assert_eq!(response.status, 200);
    let Body::Html(html) = &response.body else {
        panic!("expected an HTML page");
    };
    assert!(html.contains("<html"));
    assert!(html.contains("Monterey Bay"));
}

#[test]
fn test_family_path_keeps_literal_plus() {
    let response = router().handle("GET", "/api/fish-species/Sea+bass");
    assert_eq!(response.json_body().unwrap()["family"], "Sea+bass");
}
