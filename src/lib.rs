//! hyper 애플리케이션을 위한 HTTP 미들웨어 모음입니다.
//!
//! # 주요 기능
//!
//! - 에러 정규화 (경로별 에러 핸들러, JSON 에러 응답)
//! - HTTPS 스킴 재작성 (리버스 프록시 뒤 배포용)
//! - CORS 헤더 주입 (preflight 포함, 추가 라우트 없이 미들웨어에서 처리)
//! - 요청 취소 차단 (선택된 요청의 핸들러를 끝까지 실행)
//! - 요청별 타임아웃 (데드라인 초과 시 504로 정규화)
//!
//! 연결 처리, 라우팅, HTTP 파싱은 모두 호스트 프레임워크(hyper)에
//! 위임합니다. 각 미들웨어는 다운스트림 호출을 감싸는 짧은 래퍼입니다.
//!
//! # 요청 매칭
//!
//! 에러, 실드, 타임아웃 미들웨어는 같은 매칭 엔진을 공유합니다.
//!
//! ```
//! use http_middlewares::matcher::{MatchConfig, PathPattern};
//!
//! // 컬렉션형: 경로만 보고 선택 (메서드 무관)
//! let urls = MatchConfig::urls(["/slow-url", "/very-slow-url"]);
//! assert!(urls.matches("POST", "/slow-url"));
//! assert!(!urls.matches("GET", "/"));
//!
//! // 매핑형: 경로에 매칭되는 첫 항목의 메서드 목록으로 판정
//! let rules = MatchConfig::methods([
//!     ("/slow-url", vec!["post"]),
//!     ("/very-slow-url", vec!["get", "post"]),
//! ]);
//! assert!(rules.matches("POST", "/slow-url"));
//! assert!(!rules.matches("GET", "/slow-url"));
//!
//! // 정규식 패턴은 경로 시작 위치에서 매칭
//! let api = PathPattern::regex(r"^/api").unwrap();
//! assert!(api.matches("/api/users"));
//! assert!(!api.matches("/v1/api"));
//! ```
//!
//! # 체인 구성
//!
//! ```no_run
//! use http_middlewares::matcher::MatchConfig;
//! use http_middlewares::middleware::error_handler::{ErrorConfig, ErrorMiddleware};
//! use http_middlewares::middleware::timeout::{TimeoutConfig, TimeoutMiddleware};
//! use http_middlewares::middleware::{MiddlewareChain, MiddlewareError};
//!
//! fn build_chain() -> Result<MiddlewareChain, MiddlewareError> {
//!     let mut chain = MiddlewareChain::new();
//!     // 에러 미들웨어가 타임아웃 에러를 504 응답으로 바꿀 수 있도록
//!     // 바깥쪽(먼저)에 등록합니다.
//!     chain.add(ErrorMiddleware::new(ErrorConfig::new()));
//!     chain.add(TimeoutMiddleware::new(
//!         TimeoutConfig::new(29.5).with_ignore(MatchConfig::urls(["/slow-url"])),
//!     )?);
//!     Ok(chain)
//! }
//! ```

pub mod logging;
pub mod matcher;
pub mod middleware;

pub use matcher::{MatchConfig, MethodSpec, PathPattern, PatternError};
pub use middleware::shield::{IDEMPOTENT_METHODS, NON_IDEMPOTENT_METHODS};
pub use middleware::{MiddlewareChain, MiddlewareError};
