use serde::{Deserialize, Serialize};

use crate::matcher::MatchConfig;

/// 멱등 HTTP 메서드
pub const IDEMPOTENT_METHODS: [&str; 4] = ["GET", "HEAD", "OPTIONS", "TRACE"];

/// 비멱등 HTTP 메서드
pub const NON_IDEMPOTENT_METHODS: [&str; 4] = ["DELETE", "PATCH", "POST", "PUT"];

/// 실드 미들웨어 설정
///
/// `methods`와 `urls` 중 정확히 하나만 지정해야 하며, `ignore`는
/// `methods`와 함께일 때만 유효합니다. 위반은 미들웨어 생성 시점에
/// 설정 오류로 거부됩니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShieldConfig {
    /// 실드할 메서드 목록 (대소문자 무시)
    #[serde(default)]
    pub methods: Option<Vec<String>>,

    /// 실드할 요청을 고르는 매칭 설정
    #[serde(default)]
    pub urls: Option<MatchConfig>,

    /// `methods` 사용 시 실드에서 제외할 요청
    #[serde(default)]
    pub ignore: Option<MatchConfig>,
}

impl ShieldConfig {
    /// 메서드 기준 실드 설정을 생성합니다.
    pub fn by_methods<I, S>(methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            methods: Some(methods.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// URL 기준 실드 설정을 생성합니다.
    pub fn by_urls(urls: MatchConfig) -> Self {
        Self {
            urls: Some(urls),
            ..Self::default()
        }
    }

    /// 실드에서 제외할 매칭 설정을 추가합니다.
    pub fn with_ignore(mut self, ignore: MatchConfig) -> Self {
        self.ignore = Some(ignore);
        self
    }
}
