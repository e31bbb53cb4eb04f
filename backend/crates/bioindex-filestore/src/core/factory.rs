//! ObjectStore factory for record storage.
//!
//! Local directories, in-memory stores and S3 buckets are all exposed as
//! `Arc<dyn ObjectStore>`, so the reader never branches on backend.
//!
//! Timeouts for S3 come from `[storage.remote_timeouts]`.

use crate::core::paths::{parse_storage_url, StorageLocation};
use crate::error::{FilestoreError, Result};
use bioindex_configs::{RemoteStorageTimeouts, S3Settings, StorageSettings};
use object_store::aws::AmazonS3Builder;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::path::Path as ObjectStorePath;
use object_store::prefix::PrefixStore;
use object_store::{ClientOptions, ObjectStore};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Build an `ObjectStore` from storage settings.
pub fn build_object_store(settings: &StorageSettings) -> Result<Arc<dyn ObjectStore>> {
    match parse_storage_url(&settings.url)? {
        StorageLocation::Local(path) => build_local(&path),
        StorageLocation::Memory => Ok(Arc::new(InMemory::new()) as Arc<dyn ObjectStore>),
        StorageLocation::S3 { bucket, prefix } => {
            build_s3(&bucket, &prefix, &settings.s3, &settings.remote_timeouts)
        },
    }
}

/// Build ClientOptions with timeouts from server configuration.
fn build_client_options(timeouts: &RemoteStorageTimeouts) -> ClientOptions {
    ClientOptions::new()
        .with_timeout(Duration::from_secs(timeouts.request_timeout_secs))
        .with_connect_timeout(Duration::from_secs(timeouts.connect_timeout_secs))
}

fn build_local(base: &str) -> Result<Arc<dyn ObjectStore>> {
    let path = PathBuf::from(base);

    // LocalFileSystem::new_with_prefix requires an absolute path that exists
    if !path.exists() {
        std::fs::create_dir_all(&path).map_err(|e| {
            FilestoreError::Config(format!(
                "Failed to create storage directory '{}': {}",
                path.display(),
                e
            ))
        })?;
    }

    let absolute_path = path.canonicalize().map_err(|e| {
        FilestoreError::Config(format!(
            "Failed to resolve absolute path for '{}': {}",
            path.display(),
            e
        ))
    })?;

    LocalFileSystem::new_with_prefix(absolute_path)
        .map(|fs| Arc::new(fs) as Arc<dyn ObjectStore>)
        .map_err(|e| FilestoreError::Config(format!("LocalFileSystem: {e}")))
}

fn build_s3(
    bucket: &str,
    prefix: &str,
    cfg: &S3Settings,
    timeouts: &RemoteStorageTimeouts,
) -> Result<Arc<dyn ObjectStore>> {
    let mut builder = AmazonS3Builder::from_env()
        .with_bucket_name(bucket)
        .with_region(cfg.region.as_str());

    // S3-compatible services (MinIO, LocalStack) need path-style requests
    if let Some(endpoint) = &cfg.endpoint {
        builder = builder
            .with_endpoint(endpoint)
            .with_virtual_hosted_style_request(false);
    }

    if cfg.allow_http {
        builder = builder.with_allow_http(true);
    }

    if let Some(ak) = &cfg.access_key_id {
        builder = builder.with_access_key_id(ak);
    }
    if let Some(sk) = &cfg.secret_access_key {
        builder = builder.with_secret_access_key(sk);
    }
    if let Some(token) = &cfg.session_token {
        builder = builder.with_token(token);
    }

    builder = builder.with_client_options(build_client_options(timeouts));

    let store = builder.build().map_err(|e| FilestoreError::Config(format!("S3: {}", e)))?;

    wrap_with_prefix(store, prefix)
}

/// Wrap a store with a PrefixStore if prefix is non-empty.
fn wrap_with_prefix<T: ObjectStore + 'static>(store: T, prefix: &str) -> Result<Arc<dyn ObjectStore>> {
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        Ok(Arc::new(store) as Arc<dyn ObjectStore>)
    } else {
        let prefix_path =
            ObjectStorePath::parse(prefix).map_err(|e| FilestoreError::Path(e.to_string()))?;
        Ok(Arc::new(PrefixStore::new(store, prefix_path)) as Arc<dyn ObjectStore>)
    }
}
