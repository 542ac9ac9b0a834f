mod config;
mod middleware;

pub use config::{ShieldConfig, IDEMPOTENT_METHODS, NON_IDEMPOTENT_METHODS};
pub use middleware::ShieldMiddleware;
