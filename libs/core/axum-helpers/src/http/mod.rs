//! HTTP-level middleware: CORS configuration and security headers.

pub mod cors;
pub mod security;

pub use cors::{create_cors_layer, create_permissive_cors_layer};
pub use security::security_headers;
