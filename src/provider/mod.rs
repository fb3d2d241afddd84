pub mod blocking;
pub mod client;
pub mod error;
pub mod types;

pub use blocking::{BlockingStatusClient, BlockingStatusQuery};
pub use client::{StatusClient, StatusQuery};
pub use error::ProviderError;
pub use types::StatusResponse;
