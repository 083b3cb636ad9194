//! HTTP inbound adapter exposing the REST API under `/api`.

pub mod auth;
pub mod courses;
pub mod error;
pub mod health;
mod prohibited;
pub mod reviews;
pub mod routes;
pub mod schemas;
pub mod session;
pub mod state;
#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
pub mod users;

use serde::Serialize;

pub use error::ApiResult;

/// Success body shared by read endpoints: `{"data": [...]}`.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: Vec<T>,
}

impl<T> DataResponse<T> {
    /// Wrap a list of items.
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Wrap one item as a one-element list.
    pub fn single(item: T) -> Self {
        Self { data: vec![item] }
    }
}
