//! Rate limiting logic and state management.

mod decision;
mod limiter;
mod window;

pub use decision::Decision;
pub use limiter::RateLimiter;
