use crate::error::{FilestoreError, Result};

/// Location kinds accepted by `[storage] url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StorageLocation {
    /// Local directory
    Local(String),
    /// Process-local in-memory store (`memory://`)
    Memory,
    /// `s3://bucket/prefix`
    S3 { bucket: String, prefix: String },
}

/// Classify a storage URL.
pub(crate) fn parse_storage_url(url: &str) -> Result<StorageLocation> {
    let trimmed = url.trim();

    if trimmed == "memory://" {
        return Ok(StorageLocation::Memory);
    }

    if let Some(rest) = trimmed.strip_prefix("s3://") {
        let (bucket, prefix) = match rest.split_once('/') {
            Some((b, p)) => (b.to_string(), p.trim_matches('/').to_string()),
            None => (rest.to_string(), String::new()),
        };
        if bucket.is_empty() {
            return Err(FilestoreError::Config(format!("Missing bucket in storage URL: {}", url)));
        }
        return Ok(StorageLocation::S3 { bucket, prefix });
    }

    if let Some(path) = trimmed.strip_prefix("file://") {
        return Ok(StorageLocation::Local(path.to_string()));
    }

    if trimmed.contains("://") {
        return Err(FilestoreError::Config(format!(
            "Unsupported storage URL scheme (expected a path, file://, memory:// or s3://): {}",
            url
        )));
    }

    if trimmed.is_empty() {
        return Err(FilestoreError::Config("Storage URL cannot be empty".into()));
    }

    Ok(StorageLocation::Local(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_s3_with_prefix() {
        assert_eq!(
            parse_storage_url("s3://dig-bio-index/records/").unwrap(),
            StorageLocation::S3 {
                bucket: "dig-bio-index".to_string(),
                prefix: "records".to_string()
            }
        );
    }

    #[test]
    fn test_parse_s3_no_prefix() {
        assert_eq!(
            parse_storage_url("s3://dig-bio-index").unwrap(),
            StorageLocation::S3 {
                bucket: "dig-bio-index".to_string(),
                prefix: String::new()
            }
        );
    }

    #[test]
    fn test_parse_local_and_memory() {
        assert_eq!(parse_storage_url("memory://").unwrap(), StorageLocation::Memory);
        assert_eq!(
            parse_storage_url("/data/objects").unwrap(),
            StorageLocation::Local("/data/objects".to_string())
        );
        assert_eq!(
            parse_storage_url("file:///data/objects").unwrap(),
            StorageLocation::Local("/data/objects".to_string())
        );
    }

    #[test]
    fn test_parse_rejects_unknown_scheme_and_empty_bucket() {
        assert!(parse_storage_url("gs://bucket/key").is_err());
        assert!(parse_storage_url("s3:///prefix").is_err());
        assert!(parse_storage_url("  ").is_err());
    }
}
