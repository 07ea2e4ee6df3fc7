//! Form service API module
//!
//! Client for the backend that owns forms and responses. The dashboard
//! talks to it exclusively through the `FormsApi` trait so tests can swap
//! in a mock backend.

pub mod client;
pub mod errors;

pub use client::{FormsApi, HttpFormsApi};
pub use errors::ApiError;

#[cfg(test)]
pub use client::MockFormsApi;
