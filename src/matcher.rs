//! 요청 매칭 엔진
//!
//! 미들웨어 설정에 담긴 경로 패턴과 HTTP 메서드 규칙을 인바운드 요청의
//! `(method, path)` 쌍과 비교합니다. 에러, 실드, 타임아웃 미들웨어가
//! 공유하는 유일한 판정 로직입니다.

use std::fmt;

use regex_lite as regex;
use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 패턴 생성 시 발생하는 오류
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error("잘못된 경로 패턴 '{pattern}': {reason}")]
    InvalidRegex {
        pattern: String,
        reason: String,
    },
}

/// 요청 경로와 비교할 패턴
///
/// 문자열 패턴은 정확히 일치할 때만 매칭됩니다. 트레일링 슬래시 보정 같은
/// 정규화는 하지 않습니다. 정규식 패턴은 경로의 시작(위치 0)에서부터
/// 매칭을 시도하며, 패턴이 `$`로 끝을 고정하지 않는 한 경로 전체를
/// 소비할 필요는 없습니다.
#[derive(Debug, Clone)]
pub enum PathPattern {
    Exact(String),
    Regex(regex::Regex),
}

impl PathPattern {
    /// 정확히 일치해야 하는 문자열 패턴을 생성합니다.
    pub fn exact(path: impl Into<String>) -> Self {
        PathPattern::Exact(path.into())
    }

    /// 정규식 패턴을 컴파일합니다.
    pub fn regex(pattern: &str) -> Result<Self, PatternError> {
        let re = regex::Regex::new(pattern).map_err(|e| PatternError::InvalidRegex {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(PathPattern::Regex(re))
    }

    /// 문자열 표기에서 패턴을 생성합니다.
    ///
    /// `^`로 시작하면 정규식으로 컴파일하고, 그 외에는 정확 일치 패턴으로
    /// 취급합니다. 설정 역직렬화에서 사용하는 표기 규칙입니다.
    pub fn from_str(pattern: &str) -> Result<Self, PatternError> {
        if pattern.starts_with('^') {
            Self::regex(pattern)
        } else {
            Ok(Self::exact(pattern))
        }
    }

    /// 패턴의 원본 문자열을 반환합니다.
    pub fn as_str(&self) -> &str {
        match self {
            PathPattern::Exact(path) => path,
            PathPattern::Regex(re) => re.as_str(),
        }
    }

    /// 요청 경로가 이 패턴에 매칭되는지 판정합니다.
    ///
    /// 전함수입니다. 어떤 입력에도 패닉하지 않습니다.
    pub fn matches(&self, path: &str) -> bool {
        match self {
            PathPattern::Exact(exact) => exact == path,
            // 가장 왼쪽 매치가 위치 0에서 시작할 때만 성공
            PathPattern::Regex(re) => re.find(path).map(|m| m.start() == 0).unwrap_or(false),
        }
    }
}

impl PartialEq for PathPattern {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PathPattern::Exact(a), PathPattern::Exact(b)) => a == b,
            (PathPattern::Regex(a), PathPattern::Regex(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl Eq for PathPattern {}

impl From<&str> for PathPattern {
    fn from(path: &str) -> Self {
        PathPattern::Exact(path.to_string())
    }
}

impl From<String> for PathPattern {
    fn from(path: String) -> Self {
        PathPattern::Exact(path)
    }
}

impl From<regex::Regex> for PathPattern {
    fn from(re: regex::Regex) -> Self {
        PathPattern::Regex(re)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PathPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PathPattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let pattern = String::deserialize(deserializer)?;
        PathPattern::from_str(&pattern).map_err(serde::de::Error::custom)
    }
}

/// 매핑형 설정 항목에 허용된 HTTP 메서드
///
/// 메서드 비교는 항상 대소문자를 무시합니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodSpec {
    One(String),
    Many(Vec<String>),
}

impl MethodSpec {
    /// 요청 메서드가 허용 목록에 있는지 확인합니다.
    ///
    /// 빈 `Many` 목록은 어떤 메서드도 허용하지 않습니다.
    fn allows(&self, method: &str) -> bool {
        match self {
            MethodSpec::One(allowed) => allowed.eq_ignore_ascii_case(method),
            MethodSpec::Many(allowed) => allowed
                .iter()
                .any(|candidate| candidate.eq_ignore_ascii_case(method)),
        }
    }
}

impl From<&str> for MethodSpec {
    fn from(method: &str) -> Self {
        MethodSpec::One(method.to_string())
    }
}

impl From<Vec<&str>> for MethodSpec {
    fn from(methods: Vec<&str>) -> Self {
        MethodSpec::Many(methods.into_iter().map(String::from).collect())
    }
}

impl From<Vec<String>> for MethodSpec {
    fn from(methods: Vec<String>) -> Self {
        MethodSpec::Many(methods)
    }
}

impl Serialize for MethodSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MethodSpec::One(method) => serializer.serialize_str(method),
            MethodSpec::Many(methods) => {
                let mut seq = serializer.serialize_seq(Some(methods.len()))?;
                for method in methods {
                    seq.serialize_element(method)?;
                }
                seq.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for MethodSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MethodSpecVisitor;

        impl<'de> Visitor<'de> for MethodSpecVisitor {
            type Value = MethodSpec;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("HTTP 메서드 문자열 또는 문자열 목록")
            }

            fn visit_str<E: serde::de::Error>(self, value: &str) -> Result<MethodSpec, E> {
                Ok(MethodSpec::One(value.to_string()))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<MethodSpec, A::Error> {
                let mut methods = Vec::new();
                while let Some(method) = seq.next_element::<String>()? {
                    methods.push(method);
                }
                Ok(MethodSpec::Many(methods))
            }
        }

        deserializer.deserialize_any(MethodSpecVisitor)
    }
}

/// 요청 선택 설정
///
/// 두 가지 형태를 지원합니다.
///
/// - 컬렉션형: 경로 패턴 목록. 경로가 목록의 어느 패턴에든 매칭되면
///   메서드와 무관하게 선택됩니다.
/// - 매핑형: `(패턴, 메서드 목록)` 쌍의 순서 있는 시퀀스. 경로에 매칭되는
///   **첫 번째** 항목의 메서드 목록만 판정에 사용합니다. 뒤의 항목은
///   경로가 겹치더라도 참조하지 않으므로 삽입 순서가 의미를 가집니다.
///
/// 설정은 미들웨어 구성 시 한 번 만들어지고 이후 읽기 전용입니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchConfig {
    Urls(Vec<PathPattern>),
    Methods(Vec<(PathPattern, MethodSpec)>),
}

impl MatchConfig {
    /// 경로 패턴 목록으로 컬렉션형 설정을 생성합니다.
    pub fn urls<I, P>(patterns: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathPattern>,
    {
        MatchConfig::Urls(patterns.into_iter().map(Into::into).collect())
    }

    /// `(패턴, 메서드)` 쌍 목록으로 매핑형 설정을 생성합니다.
    pub fn methods<I, P, M>(entries: I) -> Self
    where
        I: IntoIterator<Item = (P, M)>,
        P: Into<PathPattern>,
        M: Into<MethodSpec>,
    {
        MatchConfig::Methods(
            entries
                .into_iter()
                .map(|(pattern, spec)| (pattern.into(), spec.into()))
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        match self {
            MatchConfig::Urls(patterns) => patterns.is_empty(),
            MatchConfig::Methods(entries) => entries.is_empty(),
        }
    }

    /// 요청의 메서드와 경로가 이 설정에 선택되는지 판정합니다.
    ///
    /// 설정 항목을 순서대로 훑다가 경로에 매칭되는 첫 항목에서 멈춥니다.
    /// 컬렉션형이면 경로 매칭만으로 충분하고, 매핑형이면 해당 항목의
    /// 메서드 목록에 요청 메서드가 (대소문자 무시) 포함되어야 합니다.
    pub fn matches(&self, method: &str, path: &str) -> bool {
        match self {
            MatchConfig::Urls(patterns) => patterns.iter().any(|pattern| pattern.matches(path)),
            MatchConfig::Methods(entries) => {
                let found = entries.iter().find(|(pattern, _)| pattern.matches(path));
                match found {
                    Some((_, spec)) => spec.allows(method),
                    None => false,
                }
            }
        }
    }
}

impl Serialize for MatchConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MatchConfig::Urls(patterns) => {
                let mut seq = serializer.serialize_seq(Some(patterns.len()))?;
                for pattern in patterns {
                    seq.serialize_element(pattern)?;
                }
                seq.end()
            }
            MatchConfig::Methods(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (pattern, spec) in entries {
                    map.serialize_entry(pattern, spec)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for MatchConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MatchConfigVisitor;

        impl<'de> Visitor<'de> for MatchConfigVisitor {
            type Value = MatchConfig;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("경로 패턴 목록 또는 패턴-메서드 매핑")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<MatchConfig, A::Error> {
                let mut patterns = Vec::new();
                while let Some(pattern) = seq.next_element::<PathPattern>()? {
                    patterns.push(pattern);
                }
                Ok(MatchConfig::Urls(patterns))
            }

            // 문서상의 키 순서를 그대로 보존해야 하므로 해시맵 대신
            // 쌍의 벡터로 수집합니다.
            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<MatchConfig, A::Error> {
                let mut entries = Vec::new();
                while let Some(entry) = map.next_entry::<PathPattern, MethodSpec>()? {
                    entries.push(entry);
                }
                Ok(MatchConfig::Methods(entries))
            }
        }

        deserializer.deserialize_any(MatchConfigVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_convention() {
        assert_eq!(
            PathPattern::from_str("/api").unwrap(),
            PathPattern::exact("/api")
        );
        assert!(matches!(
            PathPattern::from_str("^/api").unwrap(),
            PathPattern::Regex(_)
        ));
        assert!(PathPattern::from_str("^[invalid").is_err());
    }

    #[test]
    fn test_regex_matches_from_position_zero() {
        let pattern = PathPattern::regex(r"/api").unwrap();
        assert!(pattern.matches("/api/users"));
        assert!(!pattern.matches("/v1/api/users"));
    }

    #[test]
    fn test_deserialize_mapping_preserves_order() {
        let json = r#"{"^/": "GET", "/slow-url": ["POST"]}"#;
        let config: MatchConfig = serde_json::from_str(json).unwrap();
        match &config {
            MatchConfig::Methods(entries) => {
                assert_eq!(entries[0].0.as_str(), "^/");
                assert_eq!(entries[1].0.as_str(), "/slow-url");
            }
            other => panic!("매핑형이어야 하는데 {:?}", other),
        }
        // 첫 항목이 모든 경로에 매칭되므로 뒤의 POST 규칙은 무시됨
        assert!(config.matches("GET", "/slow-url"));
        assert!(!config.matches("POST", "/slow-url"));
    }

    #[test]
    fn test_deserialize_collection_form() {
        let json = r#"["/slow-url", "^/downloads/"]"#;
        let config: MatchConfig = serde_json::from_str(json).unwrap();
        assert!(config.matches("GET", "/slow-url"));
        assert!(config.matches("DELETE", "/downloads/archive.zip"));
        assert!(!config.matches("GET", "/"));
    }

    #[test]
    fn test_roundtrip_serialization() {
        let config = MatchConfig::methods([
            ("/slow-url", MethodSpec::from("POST")),
            ("/very-slow-url", MethodSpec::from(vec!["get", "post"])),
        ]);
        let json = serde_json::to_string(&config).unwrap();
        let restored: MatchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, restored);
    }
}
