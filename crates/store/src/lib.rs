//! Object store access for the aspect-ratio analyzer
//!
//! The analyzer only needs one operation from storage: fetch the bytes of an
//! object, or fail. [`ObjectStore`] is that seam. Implementations:
//!
//! - [`S3Client`]: S3 or any S3-compatible endpoint over HTTPS, signed with
//!   AWS Signature V4 when credentials are configured
//! - [`LocalStore`]: `<root>/<bucket>/<key>` on the local filesystem
//! - [`MemoryStore`]: in-memory objects, for tests
//! - [`OfflineStore`]: always fails, so analysis runs on key inference alone
//!
//! # Example
//!
//! ```rust,no_run
//! use aspect_store::{ObjectStore, S3Client, StoreConfig};
//!
//! let config = StoreConfig::default().with_region("us-east-1");
//! let client = S3Client::new(config)?;
//! let bytes = client.fetch_object("my-bucket", "images/banner.png")?;
//! println!("{} bytes", bytes.len());
//! # Ok::<(), aspect_store::StoreError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod local;
pub mod signing;

pub use client::S3Client;
pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use local::{LocalStore, MemoryStore, OfflineStore};

/// Source of object bytes.
pub trait ObjectStore {
    /// Fetch the full contents of `key` in `bucket`.
    fn fetch_object(&self, bucket: &str, key: &str) -> StoreResult<Vec<u8>>;
}

impl<T: ObjectStore + ?Sized> ObjectStore for Box<T> {
    fn fetch_object(&self, bucket: &str, key: &str) -> StoreResult<Vec<u8>> {
        (**self).fetch_object(bucket, key)
    }
}

impl<T: ObjectStore + ?Sized> ObjectStore for &T {
    fn fetch_object(&self, bucket: &str, key: &str) -> StoreResult<Vec<u8>> {
        (**self).fetch_object(bucket, key)
    }
}
