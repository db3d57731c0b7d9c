//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Session layer (tower-sessions over a bounded moka store)
//! 5. Rate limiting on the AI endpoints (governor)

pub mod rate_limit;
pub mod request_id;
pub mod session;
pub mod shopper;

pub use rate_limit::ai_rate_limiter;
pub use request_id::request_id_middleware;
pub use session::create_session_layer;
pub use shopper::CurrentShopper;
