pub mod chain;
pub mod cors;
pub mod error;
pub mod error_handler;
pub mod https;
pub mod response;
pub mod shield;
pub mod timeout;
pub mod traits;

use bytes::Bytes;
use http_body_util::Full;

/// 미들웨어 체인을 흐르는 본문 타입
pub type Body = Full<Bytes>;
pub type Request = hyper::Request<Body>;
pub type Response = hyper::Response<Body>;

pub use chain::MiddlewareChain;
pub use error::MiddlewareError;
pub use traits::{handler_fn, Handler, Middleware, Next};
