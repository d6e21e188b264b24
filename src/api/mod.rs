//! Projectarium API access
//!
//! The app only talks to [`ProjectApi`]; [`ApiClient`] is the reqwest-backed
//! implementation used at runtime.

mod client;
mod error;
mod traits;
mod types;

pub use client::{ApiClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::ApiError;
#[cfg(test)]
pub use traits::MockProjectApi;
pub use traits::ProjectApi;
pub use types::{ProjectFields, TodoFields};
