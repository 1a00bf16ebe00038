//! HTTP middleware shared by the prediction service and the dashboard

pub mod logging;
pub mod metrics;
pub mod security;

pub use logging::{logging_middleware, REQUEST_ID_HEADER};
pub use metrics::metrics_middleware;
pub use security::security_headers_middleware;
