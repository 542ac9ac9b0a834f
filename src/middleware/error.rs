use hyper::StatusCode;

use crate::matcher::PatternError;

#[derive(Debug, thiserror::Error)]
pub enum MiddlewareError {
    #[error("설정 오류: {0}")]
    Config(String),

    #[error("처리 오류: {0}")]
    Processing(String),

    /// 핸들러가 의도적으로 반환한 HTTP 수준 에러
    ///
    /// 에러 미들웨어가 상태 코드와 페이로드를 그대로 응답에 반영합니다.
    #[error("{message}")]
    Http {
        status: u16,
        message: String,
        data: Option<serde_json::Value>,
    },

    #[error("요청 처리가 {seconds}초 안에 끝나지 않았습니다")]
    Timeout { seconds: f64 },
}

impl MiddlewareError {
    /// 지정한 상태 코드의 HTTP 에러를 생성합니다.
    pub fn http(status: StatusCode, message: impl Into<String>) -> Self {
        MiddlewareError::Http {
            status: status.as_u16(),
            message: message.into(),
            data: None,
        }
    }

    /// 이 에러를 사용자에게 보여줄 때 쓸 상태 코드
    pub fn status_code(&self) -> StatusCode {
        match self {
            MiddlewareError::Http { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            MiddlewareError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            MiddlewareError::Config(_) | MiddlewareError::Processing(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// 에러 응답 본문으로 쓸 JSON 페이로드
    pub fn data(&self) -> serde_json::Value {
        match self {
            MiddlewareError::Http {
                data: Some(data), ..
            } => data.clone(),
            other => serde_json::json!({ "detail": other.to_string() }),
        }
    }
}

impl From<PatternError> for MiddlewareError {
    fn from(err: PatternError) -> Self {
        MiddlewareError::Config(err.to_string())
    }
}
