use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// HTTPS 미들웨어 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpsConfig {
    /// 리버스 프록시가 HTTPS 종단임을 알리는 헤더와 기대 값
    ///
    /// 하나라도 일치하면 요청 URI의 스킴을 `https`로 바꿉니다.
    #[serde(default = "default_match_headers")]
    pub match_headers: HashMap<String, String>,
}

fn default_match_headers() -> HashMap<String, String> {
    HashMap::from([("X-Forwarded-Proto".to_string(), "https".to_string())])
}

impl Default for HttpsConfig {
    fn default() -> Self {
        Self {
            match_headers: default_match_headers(),
        }
    }
}

impl HttpsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_match_headers(match_headers: HashMap<String, String>) -> Self {
        Self { match_headers }
    }
}
