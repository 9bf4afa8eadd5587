//! PawHaven HTTP client
//!
//! Typed access to the pet adoption and lost-and-found backend. All calls go
//! through one authenticated pipeline that attaches the stored bearer token
//! and transparently refreshes it, once per invalidation, on a 401.

pub mod client;
pub mod types;

pub use client::error::ClientError;
pub use client::{ApiRequest, FileUpload, MultipartForm, PawClient, PawClientBuilder};

/// Result type alias using ClientError
pub type Result<T> = std::result::Result<T, ClientError>;
