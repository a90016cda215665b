//! Key/value object storage.
//!
//! [`ObjectStore`] is the narrow contract both functions need.
//! [`S3Store`] talks to a real bucket; [`MemoryStore`] keeps everything in
//! process for tests and dry runs.

mod memory;
mod s3;

pub use memory::MemoryStore;
pub use s3::S3Store;

use anyhow::Result;

/// Abstraction over a flat object store addressed by string keys.
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// Returns every full key that starts with `prefix`, in ascending order.
    async fn list(&self, prefix: &str) -> Result<Vec<String>>;

    async fn get(&self, key: &str) -> Result<Vec<u8>>;

    /// Creates or replaces the object at `key`.
    async fn put(&self, key: &str, body: Vec<u8>) -> Result<()>;

    /// Removes `key`. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<()>;
}
