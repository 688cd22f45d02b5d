//! Registry client: cache-first fetching of formulae and casks

use super::package::Package;
use super::raw::{decode_collection, RawCask, RawFormula};
use super::transport::Transport;
use crate::cache::CacheStore;
use crate::config::schema::RegistryConfig;
use crate::error::{BrewseError, BrewseResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Cache key and error label for the formulae collection
pub const FORMULAE: &str = "formulae";
/// Cache key and error label for the casks collection
pub const CASKS: &str = "casks";

/// Fetches the full package catalog, consulting the cache first
pub struct RegistryClient {
    cache: CacheStore,
    transport: Box<dyn Transport>,
    formulae_url: String,
    casks_url: String,
    refresh: bool,
}

impl RegistryClient {
    /// Create a client over the given cache and transport
    pub fn new(cache: CacheStore, transport: Box<dyn Transport>, config: &RegistryConfig) -> Self {
        Self {
            cache,
            transport,
            formulae_url: config.formulae_url.clone(),
            casks_url: config.casks_url.clone(),
            refresh: false,
        }
    }

    /// Skip cache reads; fresh responses are still written back
    pub fn with_refresh(mut self, refresh: bool) -> Self {
        self.refresh = refresh;
        self
    }

    /// Fetch formulae and casks concurrently
    ///
    /// Formulae come first, then casks, each in registry order. Entries are
    /// not deduplicated across kinds. If either collection fails the whole
    /// call fails, naming the collection; formulae are reported first when
    /// both fail.
    pub async fn fetch_all(&self) -> BrewseResult<Vec<Package>> {
        let (formulae, casks) = tokio::join!(self.fetch_formulae(), self.fetch_casks());

        let mut packages = formulae.map_err(|e| BrewseError::fetch(FORMULAE, e))?;
        let casks = casks.map_err(|e| BrewseError::fetch(CASKS, e))?;
        packages.extend(casks);

        info!("Fetched {} packages", packages.len());
        Ok(packages)
    }

    /// Fetch and normalize the formulae collection
    pub async fn fetch_formulae(&self) -> BrewseResult<Vec<Package>> {
        let raw: Vec<RawFormula> = self.fetch_collection(FORMULAE, &self.formulae_url).await?;
        Ok(raw.into_iter().filter_map(RawFormula::into_package).collect())
    }

    /// Fetch and normalize the casks collection
    pub async fn fetch_casks(&self) -> BrewseResult<Vec<Package>> {
        let raw: Vec<RawCask> = self.fetch_collection(CASKS, &self.casks_url).await?;
        Ok(raw.into_iter().filter_map(RawCask::into_package).collect())
    }

    async fn fetch_collection<R>(&self, key: &str, url: &str) -> BrewseResult<Vec<R>>
    where
        R: DeserializeOwned + Serialize + Send + 'static,
    {
        if !self.refresh {
            match self.cache.get::<Vec<R>>(key).await {
                Ok(records) => {
                    debug!("Using {} cached {} records", records.len(), key);
                    return Ok(records);
                }
                Err(e) if e.is_cache_miss() => debug!("{}", e),
                Err(e) => warn!("Ignoring unreadable cache entry {}: {}", key, e),
            }
        }

        let body = self.transport.get(url).await?;
        let what = format!("{} response from {}", key, url);
        let records: Vec<R> = tokio::task::spawn_blocking(move || {
            decode_collection(&body).map_err(|e| BrewseError::decode(what, e))
        })
        .await
        .map_err(|e| BrewseError::Internal(format!("Decode task failed: {}", e)))??;
        debug!("Decoded {} {} records", records.len(), key);

        if let Err(e) = self.cache.set(key, &records).await {
            warn!("Failed to cache {}: {}", key, e);
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::DEFAULT_TTL;
    use crate::registry::transport::StaticTransport;
    use crate::registry::PackageKind;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tempfile::TempDir;

    const FORMULAE_URL: &str = "https://registry.test/formula.json";
    const CASKS_URL: &str = "https://registry.test/cask.json";

    fn registry_config() -> RegistryConfig {
        RegistryConfig {
            formulae_url: FORMULAE_URL.to_string(),
            casks_url: CASKS_URL.to_string(),
            timeout_secs: 30,
        }
    }

    fn client(dir: &TempDir, bodies: &[(&str, &str)]) -> (RegistryClient, Arc<AtomicUsize>) {
        let transport = StaticTransport::new(bodies);
        let calls = transport.calls();
        let cache = CacheStore::new(dir.path(), DEFAULT_TTL);
        (
            RegistryClient::new(cache, Box::new(transport), &registry_config()),
            calls,
        )
    }

    const FORMULAE_BODY: &str = r#"[
        {"name": "wget", "desc": "Internet file retriever", "versions": {"stable": "1.24.5"}},
        {"full_name": "nameless"},
        {"name": "htop", "versions": {"stable": "3.3.0"}}
    ]"#;

    const CASKS_BODY: &str = r#"[
        {"token": "vlc", "name": ["VLC media player"], "version": "3.0.20"},
        {"token": "wget", "version": "0"},
        {"version": "1"}
    ]"#;

    #[tokio::test]
    async fn fetch_all_orders_formulae_then_casks() {
        let temp = TempDir::new().unwrap();
        let (client, _) = client(&temp, &[(FORMULAE_URL, FORMULAE_BODY), (CASKS_URL, CASKS_BODY)]);

        let packages = client.fetch_all().await.unwrap();
        let ids: Vec<_> = packages
            .iter()
            .map(|p| (p.id.as_str(), p.kind))
            .collect();

        assert_eq!(
            ids,
            vec![
                ("wget", PackageKind::Formula),
                ("htop", PackageKind::Formula),
                ("vlc", PackageKind::Cask),
                ("wget", PackageKind::Cask),
            ]
        );
        assert_eq!(packages[2].full_name, "VLC media player");
    }

    #[tokio::test]
    async fn formulae_failure_fails_whole_fetch() {
        let temp = TempDir::new().unwrap();
        let (client, _) = client(&temp, &[(CASKS_URL, CASKS_BODY)]);

        let err = client.fetch_all().await.unwrap_err();
        assert!(matches!(err, BrewseError::Fetch { collection: "formulae", .. }));
        assert!(err.to_string().contains("formulae"));
    }

    #[tokio::test]
    async fn casks_failure_fails_whole_fetch() {
        let temp = TempDir::new().unwrap();
        let (client, _) = client(&temp, &[(FORMULAE_URL, FORMULAE_BODY)]);

        let err = client.fetch_all().await.unwrap_err();
        assert!(matches!(err, BrewseError::Fetch { collection: "casks", .. }));
    }

    #[tokio::test]
    async fn network_failure_is_not_cached() {
        let temp = TempDir::new().unwrap();
        let (client, _) = client(&temp, &[(FORMULAE_URL, FORMULAE_BODY)]);

        client.fetch_all().await.unwrap_err();
        assert!(temp.path().join("formulae.json").exists());
        assert!(!temp.path().join("casks.json").exists());
    }

    #[tokio::test]
    async fn malformed_top_level_is_decode_error() {
        let temp = TempDir::new().unwrap();
        let (client, _) = client(
            &temp,
            &[(FORMULAE_URL, r#"{"name": "wget"}"#), (CASKS_URL, CASKS_BODY)],
        );

        let err = client.fetch_all().await.unwrap_err();
        match err {
            BrewseError::Fetch { collection, source } => {
                assert_eq!(collection, "formulae");
                assert!(matches!(*source, BrewseError::Decode { .. }));
            }
            other => panic!("expected Fetch error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn null_records_are_dropped() {
        let temp = TempDir::new().unwrap();
        let (client, _) = client(
            &temp,
            &[
                (FORMULAE_URL, r#"[null, {"name": "wget"}]"#),
                (CASKS_URL, r#"[{"token": "vlc"}, null]"#),
            ],
        );

        let packages = client.fetch_all().await.unwrap();
        let ids: Vec<_> = packages.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["wget", "vlc"]);

        // The cached copy holds only the surviving records
        let cached = client.fetch_formulae().await.unwrap();
        assert_eq!(cached.len(), 1);
    }

    #[tokio::test]
    async fn second_fetch_is_served_from_cache() {
        let temp = TempDir::new().unwrap();
        let (client, calls) =
            client(&temp, &[(FORMULAE_URL, FORMULAE_BODY), (CASKS_URL, CASKS_BODY)]);

        let first = client.fetch_all().await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        let second = client.fetch_all().await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn refresh_bypasses_cache_reads() {
        let temp = TempDir::new().unwrap();
        let (client, calls) =
            client(&temp, &[(FORMULAE_URL, FORMULAE_BODY), (CASKS_URL, CASKS_BODY)]);
        client.fetch_all().await.unwrap();

        let client = client.with_refresh(true);
        client.fetch_all().await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn corrupt_cache_falls_back_to_network() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("casks.json"), "not json").unwrap();
        let (client, calls) = client(&temp, &[(CASKS_URL, CASKS_BODY)]);

        let casks = client.fetch_casks().await.unwrap();
        assert_eq!(casks.len(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
