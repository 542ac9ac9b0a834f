mod config;
mod middleware;

pub use config::TimeoutConfig;
pub use middleware::TimeoutMiddleware;
