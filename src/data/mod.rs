//! Remote data access: the prediction service client.

pub mod api;

pub use api::*;
