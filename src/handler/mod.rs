//! Request handler module
//!
//! Responsible for request dispatch and the file-system side of serving:
//! path resolution, file responses and directory listings.

pub mod listing;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
