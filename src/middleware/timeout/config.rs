use serde::{Deserialize, Serialize};

use crate::matcher::MatchConfig;

/// 타임아웃 미들웨어 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// 요청당 허용 시간 (초, 소수 허용)
    ///
    /// 리버스 프록시의 read timeout보다 약간 짧게 잡아야 504를 프록시가
    /// 아닌 애플리케이션이 돌려줄 수 있습니다.
    pub seconds: f64,

    /// 타임아웃을 적용하지 않을 요청을 고르는 매칭 설정
    #[serde(default)]
    pub ignore: Option<MatchConfig>,
}

impl TimeoutConfig {
    pub fn new(seconds: f64) -> Self {
        Self {
            seconds,
            ignore: None,
        }
    }

    pub fn with_ignore(mut self, ignore: MatchConfig) -> Self {
        self.ignore = Some(ignore);
        self
    }
}
