//! Configuration schema for brewse
//!
//! Configuration is stored at `~/.config/brewse/config.toml`

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Response cache settings
    pub cache: CacheConfig,

    /// Remote registry settings
    pub registry: RegistryConfig,

    /// Brewfile settings
    pub manifest: ManifestConfig,

    /// Homebrew binary settings
    pub brew: BrewConfig,
}

/// Response cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache directory (default: ~/.cache/brewse)
    pub dir: Option<PathBuf>,

    /// Hours before a cached registry response is refetched
    pub ttl_hours: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: None,
            ttl_hours: 24,
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Self::ttl_from_hours(self.ttl_hours)
    }

    /// Convert an hour count to a TTL, saturating on huge values
    pub fn ttl_from_hours(hours: u64) -> Duration {
        Duration::from_secs(hours.saturating_mul(60 * 60))
    }
}

/// Remote registry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// JSON endpoint listing all formulae
    pub formulae_url: String,

    /// JSON endpoint listing all casks
    pub casks_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            formulae_url: "https://formulae.brew.sh/api/formula.json".to_string(),
            casks_url: "https://formulae.brew.sh/api/cask.json".to_string(),
            timeout_secs: 30,
        }
    }
}

impl RegistryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Brewfile configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestConfig {
    /// Brewfile location (default: ~/Brewfile)
    pub path: Option<PathBuf>,
}

/// Homebrew binary configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrewConfig {
    /// Executable used for `bundle` and `install`
    pub binary: String,
}

impl Default for BrewConfig {
    fn default() -> Self {
        Self {
            binary: "brew".to_string(),
        }
    }
}

/// Filesystem locations derived from the config and the user's home directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub cache_dir: PathBuf,
    pub manifest: PathBuf,
}

impl Config {
    /// Resolve paths, falling back to locations under `home`
    pub fn resolve(&self, home: &Path) -> ResolvedPaths {
        ResolvedPaths {
            cache_dir: self
                .cache
                .dir
                .as_deref()
                .map(|p| expand_home(p, home))
                .unwrap_or_else(|| home.join(".cache").join("brewse")),
            manifest: self
                .manifest
                .path
                .as_deref()
                .map(|p| expand_home(p, home))
                .unwrap_or_else(|| home.join("Brewfile")),
        }
    }
}

/// Expand a leading `~` to the home directory
fn expand_home(path: &Path, home: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => home.join(rest),
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[cache]"));
        assert!(toml.contains("[registry]"));
        assert!(toml.contains("ttl_hours = 24"));
    }

    #[test]
    fn config_deserializes_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.cache.ttl(), Duration::from_secs(24 * 3600));
        assert_eq!(config.registry.timeout(), Duration::from_secs(30));
        assert_eq!(config.brew.binary, "brew");
    }

    #[test]
    fn huge_ttl_saturates() {
        let cache = CacheConfig {
            dir: None,
            ttl_hours: u64::MAX,
        };
        assert_eq!(cache.ttl(), Duration::from_secs(u64::MAX));

        let config: Config = toml::from_str(&format!("[cache]\nttl_hours = {}\n", i64::MAX)).unwrap();
        assert_eq!(config.cache.ttl(), Duration::from_secs(u64::MAX));
        assert_eq!(CacheConfig::ttl_from_hours(2), Duration::from_secs(7200));
    }

    #[test]
    fn config_deserializes_partial() {
        let toml = r#"
            [registry]
            timeout_secs = 5
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.registry.timeout_secs, 5);
        assert!(config.registry.casks_url.ends_with("cask.json")); // default preserved
    }

    #[test]
    fn resolve_defaults_under_home() {
        let paths = Config::default().resolve(Path::new("/home/u"));
        assert_eq!(paths.cache_dir, PathBuf::from("/home/u/.cache/brewse"));
        assert_eq!(paths.manifest, PathBuf::from("/home/u/Brewfile"));
    }

    #[test]
    fn resolve_expands_tilde() {
        let mut config = Config::default();
        config.manifest.path = Some(PathBuf::from("~/dotfiles/Brewfile"));
        config.cache.dir = Some(PathBuf::from("/tmp/brewse-cache"));

        let paths = config.resolve(Path::new("/home/u"));
        assert_eq!(paths.manifest, PathBuf::from("/home/u/dotfiles/Brewfile"));
        assert_eq!(paths.cache_dir, PathBuf::from("/tmp/brewse-cache"));
    }
}
