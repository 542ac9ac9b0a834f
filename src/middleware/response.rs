use bytes::Bytes;
use http_body_util::Full;
use hyper::{header, StatusCode};

use super::{MiddlewareError, Response};

/// JSON 본문을 가진 응답을 생성합니다.
pub fn json_response(status: StatusCode, data: &serde_json::Value) -> Response {
    hyper::Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json; charset=utf-8")
        .body(Full::new(Bytes::from(data.to_string())))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::from("Internal Server Error"))))
}

/// 미들웨어 에러를 HTTP 응답으로 변환합니다.
///
/// 본문은 `{"detail": "..."}` 형태의 JSON이며 상태 코드는 에러 종류를
/// 따릅니다 (타임아웃은 504, HTTP 에러는 지정된 코드, 그 외 500).
pub fn error_response(err: &MiddlewareError) -> Response {
    json_response(err.status_code(), &err.data())
}

/// 비어 있는 본문의 응답을 생성합니다.
pub fn empty_response(status: StatusCode) -> Response {
    let mut response = Response::new(Full::new(Bytes::new()));
    *response.status_mut() = status;
    response
}
