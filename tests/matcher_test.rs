use http_middlewares::matcher::{MatchConfig, MethodSpec, PathPattern};

#[test]
fn test_exact_pattern_matching() {
    let test_cases = vec![
        // (패턴, 경로, 예상 결과)
        ("/slow-url", "/slow-url", true),
        ("/slow-url", "/slow-url/", false),
        ("/slow-url", "/slow-url/sub", false),
        ("/slow-url", "/SLOW-URL", false),
        ("/", "/", true),
        ("/", "/anything", false),
        ("", "", true),
    ];

    for (pattern, path, expected) in test_cases {
        let pattern = PathPattern::exact(pattern);
        assert_eq!(
            pattern.matches(path),
            expected,
            "패턴 '{}', 경로 '{}', 예상 결과 {}",
            pattern,
            path,
            expected
        );
    }
}

#[test]
fn test_regex_pattern_matches_from_start_unanchored_at_end() {
    let test_cases = vec![
        // (패턴, 경로, 예상 결과)
        // 시작 위치에서 매칭되면 경로 전체를 소비할 필요 없음
        (r"/api", "/api", true),
        (r"/api", "/api/users", true),
        (r"/api", "/v1/api", false),
        (r"^/api", "/api/users", true),
        (r"^/api", "/v1/api", false),
        // `$` 앵커가 있으면 전체 일치만 허용
        (r"^/api$", "/api", true),
        (r"^/api$", "/api/users", false),
        (r"/downloads/.*", "/downloads/archive.zip", true),
        (r"/downloads/.*", "/files/downloads/a", false),
        (r"\d+", "/123", false),
        (r"/\d+", "/123/detail", true),
    ];

    for (pattern, path, expected) in test_cases {
        let pattern = PathPattern::regex(pattern).expect("정규식 컴파일 실패");
        assert_eq!(
            pattern.matches(path),
            expected,
            "패턴 '{}', 경로 '{}', 예상 결과 {}",
            pattern,
            path,
            expected
        );
    }
}

#[test]
fn test_invalid_regex_is_rejected_at_construction() {
    // 매처는 전함수여야 하므로 잘못된 패턴은 생성 시점에 거부됨
    assert!(PathPattern::regex("^[invalid").is_err());
    assert!(PathPattern::from_str("^[invalid").is_err());
}

#[test]
fn test_collection_form_ignores_method() {
    let config = MatchConfig::urls(["/slow-url", "/very-slow-url"]);

    assert!(!config.matches("GET", "/"));
    assert!(config.matches("POST", "/slow-url"));
    assert!(config.matches("GET", "/slow-url"));
    assert!(config.matches("DELETE", "/very-slow-url"));
    assert!(!config.matches("GET", "/slow-url/sub"));
}

#[test]
fn test_mapping_form_requires_method_match() {
    let config = MatchConfig::methods([
        ("/slow-url", MethodSpec::from("POST")),
        ("/very-slow-url", MethodSpec::from(vec!["get", "post"])),
    ]);

    let test_cases = vec![
        // (메서드, 경로, 예상 결과)
        ("GET", "/slow-url", false),
        ("POST", "/slow-url", true),
        ("post", "/slow-url", true),
        ("PATCH", "/very-slow-url", false),
        ("get", "/very-slow-url", true),
        ("GET", "/very-slow-url", true),
        ("POST", "/very-slow-url", true),
        ("POST", "/unknown", false),
    ];

    for (method, path, expected) in test_cases {
        assert_eq!(
            config.matches(method, path),
            expected,
            "메서드 '{}', 경로 '{}', 예상 결과 {}",
            method,
            path,
            expected
        );
    }
}

#[test]
fn test_mapping_form_first_match_wins() {
    // 두 항목 모두 같은 경로에 매칭되지만 첫 항목의 메서드 목록만 유효함
    let config = MatchConfig::methods([
        (PathPattern::regex(r"^/api").unwrap(), MethodSpec::from("GET")),
        (
            PathPattern::regex(r"^/api/documents").unwrap(),
            MethodSpec::from(vec!["post", "delete"]),
        ),
    ]);

    assert!(config.matches("GET", "/api/documents"));
    assert!(!config.matches("POST", "/api/documents"));
    assert!(!config.matches("DELETE", "/api/documents"));
}

#[test]
fn test_mapping_form_empty_method_spec_matches_nothing() {
    let config = MatchConfig::methods([("/slow-url", MethodSpec::Many(Vec::new()))]);

    assert!(!config.matches("GET", "/slow-url"));
    assert!(!config.matches("POST", "/slow-url"));
}

#[test]
fn test_empty_config_matches_nothing() {
    let urls = MatchConfig::Urls(Vec::new());
    let methods = MatchConfig::Methods(Vec::new());

    assert!(urls.is_empty());
    assert!(methods.is_empty());
    assert!(!urls.matches("GET", "/"));
    assert!(!methods.matches("GET", "/"));
}

#[test]
fn test_matching_is_deterministic() {
    let config = MatchConfig::methods([
        (PathPattern::regex(r"^/downloads/").unwrap(), MethodSpec::from("GET")),
        (PathPattern::regex(r".*").unwrap(), MethodSpec::from(vec!["post", "put"])),
    ]);

    // 같은 입력에 대해 반복 호출해도 결과가 변하지 않음
    for _ in 0..100 {
        assert!(config.matches("GET", "/downloads/file"));
        assert!(!config.matches("POST", "/downloads/file"));
        assert!(config.matches("PUT", "/anything"));
        assert!(!config.matches("GET", "/anything"));
    }
}

#[test]
fn test_mixed_pattern_collection() {
    let config = MatchConfig::urls([
        PathPattern::exact("/health"),
        PathPattern::regex(r"^/static/").unwrap(),
    ]);

    assert!(config.matches("GET", "/health"));
    assert!(config.matches("GET", "/static/app.js"));
    assert!(!config.matches("GET", "/healthz"));
    assert!(!config.matches("GET", "/assets/static/app.js"));
}
