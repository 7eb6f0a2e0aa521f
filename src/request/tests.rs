// Request model tests.

use std::io::Write;
use std::time::Duration;

use super::*;

fn get(url: &str) -> Request {
    Request::builder(url).build().expect("request should build")
}

fn wire(request: &Request) -> String {
    String::from_utf8(request.to_bytes()).expect("test requests are ASCII")
}

#[test]
fn test_simple_get_serializes_exactly() {
    let request = Request::builder("http://ptsv2.com/t/x/post")
        .method("GET")
        .protocol("HTTP/1.1")
        .body(BodySource::Inferred(String::new()))
        .build()
        .unwrap();
    assert_eq!(
        wire(&request),
        "GET /t/x/post HTTP/1.1\r\nHost: ptsv2.com\r\nConnection: close\r\nContent-Length: 0\r\n\r\n"
    );
}

#[test]
fn test_empty_body_ends_with_zero_content_length() {
    for method in ["GET", "HEAD", "DELETE", "OPTIONS"] {
        let request = Request::builder("https://example.com/")
            .method(method)
            .build()
            .unwrap();
        assert!(request.to_bytes().ends_with(b"Content-Length: 0\r\n\r\n"));
    }
}

#[test]
fn test_query_is_part_of_request_target() {
    let request = get("http://example.com/search?q=rust&page=2");
    assert!(wire(&request).starts_with("GET /search?q=rust&page=2 HTTP/1.1\r\n"));
}

#[test]
fn test_root_path_when_url_has_none() {
    let request = get("http://example.com");
    assert!(wire(&request).starts_with("GET / HTTP/1.1\r\n"));
}

#[test]
fn test_body_and_content_length_agree() {
    let request = Request::builder("http://example.com/submit")
        .method("post")
        .body(BodySource::Literal(b"name=value&x=1".to_vec()))
        .build()
        .unwrap();
    let bytes = request.to_bytes();
    assert!(bytes.ends_with(b"Content-Length: 14\r\n\r\nname=value&x=1"));
    assert!(wire(&request).starts_with("POST /submit HTTP/1.1\r\n"));
}

#[test]
fn test_content_length_counts_bytes_not_characters() {
    let body = "\u{00E9}t\u{00E9}".as_bytes().to_vec();
    let request = Request::builder("http://example.com/")
        .method("PUT")
        .body(BodySource::Literal(body.clone()))
        .build()
        .unwrap();
    let head = format!("Content-Length: {}\r\n\r\n", body.len());
    let mut expected_tail = head.into_bytes();
    expected_tail.extend_from_slice(&body);
    assert!(request.to_bytes().ends_with(&expected_tail));
}

#[test]
fn test_header_derivation_order() {
    let request = Request::builder("http://example.com/")
        .header("Accept: */*")
        .reference("http://previous.example/")
        .cookie("session=abc")
        .user_agent("agent/1.0")
        .build()
        .unwrap();
    let names: Vec<_> = request.headers().iter().map(|(name, _)| name).collect();
    assert_eq!(
        names,
        vec!["Accept", "Reference", "Cookie", "User-Agent", "Host", "Connection"]
    );
}

#[test]
fn test_raw_header_lines_split_on_first_colon_and_trim() {
    let request = Request::builder("http://example.com/")
        .header("  X-Target :  http://other.example:8080/a  ")
        .header("no colon here")
        .build()
        .unwrap();
    assert_eq!(
        request.headers().get("x-target"),
        Some("http://other.example:8080/a")
    );
    assert_eq!(request.headers().len(), 3);
}

#[test]
fn test_derived_headers_override_raw_lines() {
    let request = Request::builder("http://example.com/")
        .header("host: spoofed.example")
        .header("Connection: keep-alive")
        .build()
        .unwrap();
    assert_eq!(request.headers().get("Host"), Some("example.com"));
    assert_eq!(request.headers().get("Connection"), Some("close"));
}

#[test]
fn test_caller_content_length_is_dropped() {
    let request = Request::builder("http://example.com/")
        .header("Content-Length: 999")
        .body(BodySource::Literal(b"abc".to_vec()))
        .build()
        .unwrap();
    let text = wire(&request);
    assert_eq!(text.matches("Content-Length").count(), 1);
    assert!(text.contains("Content-Length: 3\r\n"));
}

#[test]
fn test_empty_optional_values_are_not_sent() {
    let request = Request::builder("http://example.com/")
        .cookie("")
        .user_agent("")
        .build()
        .unwrap();
    assert!(!request.headers().contains("Cookie"));
    assert!(!request.headers().contains("User-Agent"));
}

#[test]
fn test_host_carries_non_default_port() {
    assert_eq!(
        get("http://localhost:8080/").headers().get("Host"),
        Some("localhost:8080")
    );
    assert_eq!(
        get("https://example.com:443/").headers().get("Host"),
        Some("example.com")
    );
}

#[test]
fn test_cookie_file_overrides_cookie() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "token=from-file").unwrap();
    let request = Request::builder("http://example.com/")
        .cookie("token=inline")
        .cookie_file(file.path())
        .build()
        .unwrap();
    assert_eq!(request.headers().get("Cookie"), Some("token=from-file"));
}

#[test]
fn test_multi_line_cookie_file_is_folded_into_one_header() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"a=1\r\nb=2\n\n  c=3\rEvil: injected\n").unwrap();
    let request = Request::builder("http://example.com/")
        .cookie_file(file.path())
        .build()
        .unwrap();

    assert_eq!(
        request.headers().get("Cookie"),
        Some("a=1; b=2; c=3; Evil: injected")
    );
    let text = wire(&request);
    assert!(text.contains("\r\nCookie: a=1; b=2; c=3; Evil: injected\r\n"));
    assert!(!text.contains("\r\nEvil:"));
    assert_eq!(text.matches("\r\n").count(), 6);
}

#[test]
fn test_missing_cookie_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cookies.txt");
    match Request::builder("http://example.com/").cookie_file(&path).build() {
        Err(HttpClientError::MissingCookieFile(missing)) => assert_eq!(missing, path),
        other => panic!("expected MissingCookieFile, got {other:?}"),
    }
}

#[test]
fn test_unreadable_cookie_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = Request::builder("http://example.com/")
        .cookie_file(dir.path())
        .build();
    assert!(matches!(
        result,
        Err(HttpClientError::UnreadableSource { .. })
    ));
}

#[test]
fn test_invalid_method() {
    let result = Request::builder("http://example.com/").method("FETCH").build();
    assert!(matches!(result, Err(HttpClientError::InvalidMethod(ref m)) if m == "FETCH"));
}

#[test]
fn test_invalid_url_and_scheme() {
    assert!(matches!(
        Request::builder("not a url").build(),
        Err(HttpClientError::InvalidUrl { .. })
    ));
    assert!(matches!(
        Request::builder("ftp://example.com/file").build(),
        Err(HttpClientError::UnsupportedScheme(ref s)) if s == "ftp"
    ));
}

#[test]
fn test_header_bytes_use_single_byte_encoding() {
    let request = Request::builder("http://example.com/")
        .header("X-Name: caf\u{00E9}")
        .build()
        .unwrap();
    let bytes = request.to_bytes();
    let needle = [b'c', b'a', b'f', 0xE9, b'\r', b'\n'];
    assert!(bytes.windows(needle.len()).any(|w| w == needle));
}

#[test]
fn test_characters_outside_latin1_become_question_marks() {
    let request = Request::builder("http://example.com/")
        .user_agent("snow\u{2603}man")
        .build()
        .unwrap();
    assert!(wire(&request).contains("\r\nUser-Agent: snow?man\r\n"));
}

#[test]
fn test_with_header_overrides_rederives() {
    let request = Request::builder("http://example.com/")
        .cookie("a=1")
        .build()
        .unwrap();
    let overrides = HeaderOverrides {
        user_agent: Some("agent/2.0".into()),
        ..request.header_overrides().clone()
    };
    let request = request.with_header_overrides(overrides).unwrap();
    let entries: Vec<_> = request.headers().iter().collect();
    assert_eq!(
        entries,
        vec![
            ("Cookie", "a=1"),
            ("User-Agent", "agent/2.0"),
            ("Host", "example.com"),
            ("Connection", "close"),
        ]
    );
}

#[test]
fn test_with_url_updates_host() {
    let request = get("http://one.example/a");
    let request = request
        .with_url(url::Url::parse("http://two.example/b").unwrap())
        .unwrap();
    assert_eq!(request.headers().get("Host"), Some("two.example"));
    assert!(wire(&request).starts_with("GET /b HTTP/1.1\r\n"));
}

#[test]
fn test_plain_mutators() {
    let request = get("http://example.com/")
        .with_method("patch")
        .unwrap()
        .with_timeout(Duration::from_secs(3))
        .with_redirect_budget(7);
    assert_eq!(request.method(), Method::Patch);
    assert_eq!(request.timeout(), Duration::from_secs(3));
    assert_eq!(request.redirect_budget(), 7);
    assert!(get("http://example.com/").with_method("nope").is_err());
}

#[test]
fn test_follow_relative_location() {
    let request = Request::builder("https://example.com/a/b?x=1")
        .method("POST")
        .cookie("c=1")
        .body(BodySource::Literal(b"payload".to_vec()))
        .redirect_budget(5)
        .build()
        .unwrap();
    let next = request.follow("/login?next=%2Fa").unwrap();
    assert_eq!(next.url().as_str(), "https://example.com/login?next=%2Fa");
    assert_eq!(next.method(), Method::Post);
    assert_eq!(next.body(), b"payload");
    assert_eq!(next.headers().get("Cookie"), Some("c=1"));
    assert_eq!(next.redirect_budget(), 4);
}

#[test]
fn test_follow_absolute_location() {
    let request = get("http://example.com/");
    let next = request.follow("https://www.example.com/home").unwrap();
    assert_eq!(next.headers().get("Host"), Some("www.example.com"));
    assert!(next.is_secure());
    assert_eq!(next.port(), 443);
}

#[test]
fn test_follow_rejects_other_schemes() {
    let request = get("http://example.com/");
    assert!(matches!(
        request.follow("mailto:someone@example.com"),
        Err(HttpClientError::UnsupportedScheme(_))
    ));
}

#[test]
fn test_display_is_wire_text() {
    let request = get("http://example.com/");
    assert_eq!(request.to_string(), wire(&request));
}
