//! Effective settings: CLI flags and environment over `pingroute.toml`.
//!
//! clap already folds environment variables into the flag values, so this
//! layer only has to fall back to the config file and then to built-in
//! defaults. Relative paths in the config file are resolved against the
//! file's own directory.

use std::path::{Path, PathBuf};

use anyhow::anyhow;
use pingroute_core::config::DEFAULT_BUILD_DIR;
use pingroute_core::{Config, UrlFilter};

use crate::error::CliError;
use crate::utils::cli_args::{FilterArgs, SiteArgs};

/// Configuration file contents plus where it was read from.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    config: Config,
    root: PathBuf,
}

impl Settings {
    /// Load `pingroute.toml` (or the explicit path).
    pub fn load(explicit: Option<&Path>) -> Result<Self, CliError> {
        let path = Config::locate(explicit);
        let config = Config::load(&path)?;
        let root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(Self { config, root })
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Base URL from flag/env or config.
    pub fn base_url(&self, site: &SiteArgs) -> Option<String> {
        site.base_url
            .clone()
            .or_else(|| self.config.site.base_url.clone())
    }

    /// Base URL, failing with a usage error when none is configured.
    pub fn require_base_url(&self, site: &SiteArgs) -> Result<String, CliError> {
        self.base_url(site).ok_or_else(|| {
            CliError::usage(anyhow!(
                "missing base URL: pass --base-url, set PINGROUTE_BASE_URL or add [site] base_url to pingroute.toml"
            ))
        })
    }

    /// Build directory from flag/env, config, or the `.next` default.
    pub fn build_dir(&self, site: &SiteArgs) -> PathBuf {
        site.build_dir
            .clone()
            .unwrap_or_else(|| match &self.config.site.build_dir {
                Some(dir) => self.resolve(dir),
                None => PathBuf::from(DEFAULT_BUILD_DIR),
            })
    }

    /// URL filter from flags, or from the config file when no flag is given.
    pub fn filter(&self, args: &FilterArgs) -> Result<Option<UrlFilter>, CliError> {
        if args.include.is_empty() && args.exclude.is_empty() {
            return Ok(self.config.filter.to_filter()?);
        }
        Ok(Some(UrlFilter::from_patterns(&args.include, &args.exclude)?))
    }

    /// IndexNow key from flag/env or config.
    pub fn indexnow_key(&self, flag: Option<&str>) -> Option<String> {
        flag.map(str::to_string)
            .or_else(|| self.config.indexnow.key.clone())
    }

    /// Explicit key file location from flag or config.
    pub fn key_location(&self, flag: Option<&str>) -> Option<String> {
        flag.map(str::to_string)
            .or_else(|| self.config.indexnow.key_location.clone())
    }

    /// Endpoint list from flags or config; `None` means the defaults.
    pub fn endpoints(&self, flags: &[String]) -> Option<Vec<String>> {
        if flags.is_empty() {
            self.config.indexnow.endpoints.clone()
        } else {
            Some(flags.to_vec())
        }
    }

    /// Service-account key file from flag/env or config.
    pub fn service_account(&self, flag: Option<&Path>) -> Option<PathBuf> {
        flag.map(Path::to_path_buf).or_else(|| {
            self.config
                .google
                .service_account
                .as_deref()
                .map(|path| self.resolve(path))
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("pingroute.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_flags_override_config() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            dir.path(),
            r#"
            [site]
            base_url = "https://config.example"
            [indexnow]
            key = "configkey1"
            endpoints = ["https://config.example/indexnow"]
            "#,
        );
        let settings = Settings::load(Some(&path)).unwrap();

        let site = SiteArgs {
            base_url: Some("https://flag.example".to_string()),
            build_dir: None,
        };
        assert_eq!(settings.base_url(&site).as_deref(), Some("https://flag.example"));
        assert_eq!(
            settings.base_url(&SiteArgs::default()).as_deref(),
            Some("https://config.example")
        );
        assert_eq!(settings.indexnow_key(Some("flagkey12")).as_deref(), Some("flagkey12"));
        assert_eq!(settings.indexnow_key(None).as_deref(), Some("configkey1"));
        assert_eq!(
            settings.endpoints(&["https://flag.example/indexnow".to_string()]),
            Some(vec!["https://flag.example/indexnow".to_string()])
        );
        assert_eq!(
            settings.endpoints(&[]),
            Some(vec!["https://config.example/indexnow".to_string()])
        );
    }

    #[test]
    fn test_relative_paths_resolve_against_config_dir() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            dir.path(),
            "[site]\nbuild_dir = \"web/.next\"\n[google]\nservice_account = \"sa.json\"\n",
        );
        let settings = Settings::load(Some(&path)).unwrap();

        assert_eq!(
            settings.build_dir(&SiteArgs::default()),
            dir.path().join("web/.next")
        );
        assert_eq!(settings.service_account(None), Some(dir.path().join("sa.json")));
        assert_eq!(
            settings.service_account(Some(Path::new("other.json"))),
            Some(PathBuf::from("other.json"))
        );
    }

    #[test]
    fn test_defaults_without_config() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load(Some(&dir.path().join("missing.toml"))).unwrap();

        assert_eq!(
            settings.build_dir(&SiteArgs::default()),
            PathBuf::from(".next")
        );
        assert!(settings.require_base_url(&SiteArgs::default()).is_err());
        assert!(settings.filter(&FilterArgs::default()).unwrap().is_none());
        assert_eq!(settings.endpoints(&[]), None);
    }

    #[test]
    fn test_filter_flags_replace_config_patterns() {
        let dir = TempDir::new().unwrap();
        let path = write_config(dir.path(), "[filter]\ninclude = [\"/blog/\"]\n");
        let settings = Settings::load(Some(&path)).unwrap();

        let from_config = settings.filter(&FilterArgs::default()).unwrap().unwrap();
        assert!(from_config.allows("https://ex.com/blog/a"));
        assert!(!from_config.allows("https://ex.com/docs"));

        let args = FilterArgs {
            include: vec!["/docs".to_string()],
            exclude: Vec::new(),
        };
        let from_flags = settings.filter(&args).unwrap().unwrap();
        assert!(from_flags.allows("https://ex.com/docs"));
        assert!(!from_flags.allows("https://ex.com/blog/a"));
    }
}
