//! IndexNow key handling.
//!
//! IndexNow proves site ownership with a key file served from the site
//! itself. The key is 8-128 characters of `a-z`, `A-Z`, `0-9` or `-`, and
//! the file `<key>.txt` contains exactly the key.

use std::path::{Path, PathBuf};

use tracing::info;
use uuid::Uuid;

use crate::site::SiteUrl;
use crate::{Error, Result};

/// Minimum key length accepted by IndexNow.
pub const MIN_KEY_LEN: usize = 8;
/// Maximum key length accepted by IndexNow.
pub const MAX_KEY_LEN: usize = 128;

/// Validate an IndexNow key.
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(Error::InvalidKey("key is required".to_string()));
    }
    if !(MIN_KEY_LEN..=MAX_KEY_LEN).contains(&key.len()) {
        return Err(Error::InvalidKey(format!(
            "key must be {MIN_KEY_LEN}-{MAX_KEY_LEN} characters, got {}",
            key.len()
        )));
    }
    if let Some(bad) = key.chars().find(|c| !(c.is_ascii_alphanumeric() || *c == '-')) {
        return Err(Error::InvalidKey(format!(
            "key contains invalid character '{bad}'"
        )));
    }
    Ok(())
}

/// Generate a fresh random key (32 lowercase hex characters).
pub fn generate_key() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Where IndexNow expects the key file when no explicit location is given.
pub fn default_key_location(site: &SiteUrl, key: &str) -> String {
    format!("{}/{key}.txt", site.as_str())
}

/// Write `<dir>/<key>.txt` containing exactly the key.
///
/// Creates `dir` if needed and returns the written path.
pub async fn write_key_file(dir: &Path, key: &str) -> Result<PathBuf> {
    validate_key(key)?;
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(format!("{key}.txt"));
    tokio::fs::write(&path, key).await?;
    info!("Wrote IndexNow key file {}", path.display());
    Ok(path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("abcd1234").is_ok());
        assert!(validate_key("a-b-c-d-e-f").is_ok());
        assert!(validate_key(&"k".repeat(MAX_KEY_LEN)).is_ok());

        for bad in ["", "short", "has space1", "under_score", "ünïcode12"] {
            match validate_key(bad) {
                Err(Error::InvalidKey(_)) => {},
                other => panic!("expected InvalidKey for {bad:?}, got {other:?}"),
            }
        }
        assert!(validate_key(&"k".repeat(MAX_KEY_LEN + 1)).is_err());
    }

    #[test]
    fn test_generated_keys_are_valid_and_unique() {
        let first = generate_key();
        let second = generate_key();
        assert_eq!(first.len(), 32);
        assert!(validate_key(&first).is_ok());
        assert_ne!(first, second);
    }

    #[test]
    fn test_default_key_location() {
        let site = SiteUrl::parse("https://ex.com/").unwrap();
        assert_eq!(
            default_key_location(&site, "abcd1234"),
            "https://ex.com/abcd1234.txt"
        );
    }

    #[tokio::test]
    async fn test_write_key_file() {
        let dir = TempDir::new().unwrap();
        let public = dir.path().join("public");

        let path = write_key_file(&public, "abcd1234").await.unwrap();

        assert_eq!(path, public.join("abcd1234.txt"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "abcd1234");
    }

    #[tokio::test]
    async fn test_write_key_file_rejects_invalid_key() {
        let dir = TempDir::new().unwrap();
        assert!(write_key_file(dir.path(), "../../etc").await.is_err());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
