use serde::{Deserialize, Serialize};

use crate::matcher::PathPattern;

/// 기본으로 허용하는 요청 헤더 목록
pub const DEFAULT_ALLOW_HEADERS: [&str; 9] = [
    "accept",
    "accept-encoding",
    "authorization",
    "content-type",
    "dnt",
    "origin",
    "user-agent",
    "x-csrftoken",
    "x-requested-with",
];

/// 기본으로 허용하는 HTTP 메서드 목록
pub const DEFAULT_ALLOW_METHODS: [&str; 6] = ["DELETE", "GET", "OPTIONS", "PATCH", "POST", "PUT"];

/// CORS 미들웨어 설정
///
/// 기본값은 어떤 Origin도 허용하지 않습니다. `allow_all`이나 `origins`를
/// 명시적으로 지정해야 CORS 헤더가 응답에 실립니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// 모든 Origin을 허용할지 여부 (보안에 주의)
    #[serde(default)]
    pub allow_all: bool,

    /// 허용할 Origin 목록 (정확 일치 문자열 또는 정규식 패턴)
    #[serde(default)]
    pub origins: Option<Vec<PathPattern>>,

    /// CORS 처리를 적용할 경로 목록. 지정하지 않으면 모든 경로에 적용
    #[serde(default)]
    pub urls: Option<Vec<PathPattern>>,

    /// 노출할 헤더 목록
    #[serde(default)]
    pub expose_headers: Vec<String>,

    /// 허용할 헤더 목록
    #[serde(default = "default_allow_headers")]
    pub allow_headers: Vec<String>,

    /// 허용할 HTTP 메서드 목록
    #[serde(default = "default_allow_methods")]
    pub allow_methods: Vec<String>,

    /// credentials 허용 여부
    #[serde(default)]
    pub allow_credentials: bool,

    /// preflight 응답 캐시 시간 (초)
    #[serde(default)]
    pub max_age: Option<u32>,
}

fn default_allow_headers() -> Vec<String> {
    DEFAULT_ALLOW_HEADERS.iter().map(|s| s.to_string()).collect()
}

fn default_allow_methods() -> Vec<String> {
    DEFAULT_ALLOW_METHODS.iter().map(|s| s.to_string()).collect()
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_all: false,
            origins: None,
            urls: None,
            expose_headers: Vec::new(),
            allow_headers: default_allow_headers(),
            allow_methods: default_allow_methods(),
            allow_credentials: false,
            max_age: None,
        }
    }
}

impl CorsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// 요청 경로가 CORS 처리 대상인지 확인합니다.
    pub(super) fn urls_match(&self, path: &str) -> bool {
        match &self.urls {
            // 기본값: 모든 경로에 적용
            None => true,
            Some(urls) => urls.iter().any(|pattern| pattern.matches(path)),
        }
    }

    /// Origin이 허용 목록에 매칭되는지 확인합니다.
    pub(super) fn origins_match(&self, origin: &str) -> bool {
        match &self.origins {
            None => false,
            Some(origins) => origins.iter().any(|pattern| pattern.matches(origin)),
        }
    }
}
