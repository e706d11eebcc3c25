//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from file
//! system access.

pub mod cache;
pub mod cors;
pub mod encoding;
pub mod mime;
pub mod response;

// Re-export commonly used types
pub use cors::CorsHeaders;
pub use mime::ContentTypes;
pub use response::{
    build_301_response, build_304_response, build_404_response, build_501_response,
    build_error_response, build_options_response,
};
