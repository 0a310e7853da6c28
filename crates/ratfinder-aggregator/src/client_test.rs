use super::*;

#[test]
fn catalog_url_adds_trailing_slash() {
    let url = UpstreamClient::catalog_url("https://rats.example.com/api").unwrap();
    assert_eq!(url, "https://rats.example.com/api/");
}

#[test]
fn catalog_url_collapses_trailing_slashes() {
    let url = UpstreamClient::catalog_url("https://rats.example.com/api//").unwrap();
    assert_eq!(url, "https://rats.example.com/api/");
}

#[test]
fn catalog_url_bare_domain() {
    let url = UpstreamClient::catalog_url("https://rats.example.com").unwrap();
    assert_eq!(url, "https://rats.example.com/");
}

#[test]
fn catalog_url_rejects_relative_base() {
    let err = UpstreamClient::catalog_url("not-a-url").unwrap_err();
    assert!(
        matches!(err, UpstreamError::InvalidBaseUrl { .. }),
        "expected InvalidBaseUrl, got: {err:?}"
    );
}

#[test]
fn catalog_url_rejects_non_http_scheme() {
    let err = UpstreamClient::catalog_url("ftp://rats.example.com").unwrap_err();
    assert!(
        matches!(err, UpstreamError::InvalidBaseUrl { ref reason, .. } if reason.contains("ftp")),
        "expected InvalidBaseUrl, got: {err:?}"
    );
}
