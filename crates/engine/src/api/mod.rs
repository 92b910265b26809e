//! API layer - HTTP entry points.

pub mod http;

pub use http::{router, routes, ApiError};
