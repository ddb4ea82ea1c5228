//! Backend Service access
//!
//! `Backend` is the seam between list sessions and the hosted PostgREST API.
//! `RestClient` talks HTTP; `MemoryBackend` keeps tables in memory for tests.

mod client;
mod memory;

pub use client::RestClient;
pub use memory::MemoryBackend;

use async_trait::async_trait;
use bfp_admin_common::{BackendError, Query};
use serde_json::Value;

pub type BackendResult<T> = std::result::Result<T, BackendError>;

#[async_trait]
pub trait Backend: Send + Sync {
    /// Rows of `table` matching the query.
    async fn select(&self, table: &str, query: &Query) -> BackendResult<Vec<Value>>;

    /// Insert one row and return it as stored.
    async fn insert(&self, table: &str, row: Value) -> BackendResult<Value>;

    /// Patch the row with `id`. Returns the updated rows (empty if none matched).
    async fn update(&self, table: &str, id: &str, patch: Value) -> BackendResult<Vec<Value>>;

    /// Delete the row with `id`. Returns the deleted rows.
    async fn delete(&self, table: &str, id: &str) -> BackendResult<Vec<Value>>;
}
