//! PawHaven core types and utilities

pub mod config;
pub mod credentials;
pub mod error;
pub mod pagination;
pub mod token;

pub use config::ClientConfig;
pub use credentials::{CredentialStore, FileCredentialStore, MemoryCredentialStore, TokenPair};
pub use error::{CoreError, CoreResult, ErrorContext};
pub use pagination::{PageItem, PageQuery, Paginated};
pub use token::{TokenClaims, decode_claims};

#[cfg(any(test, feature = "tests"))]
pub use credentials::MockCredentialStore;
