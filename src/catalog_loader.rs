//! Catalog loading from local files or a remote URL with a local cache.
//!
//! Remote catalogs are downloaded once into the cache directory and reused on
//! later runs. A cached copy that fails to parse is deleted so the next load
//! downloads a fresh one. Files ending in `.gz` are decompressed transparently.

use crate::catalog::Catalog;
use crate::config;
use crate::error::{Result, StellarError};
use flate2::read::GzDecoder;
use reqwest::blocking::Client;
use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Loads a [`Catalog`] from disk or from a URL, caching downloads locally.
pub struct CatalogLoader {
    /// Directory where downloaded catalogs are cached.
    pub cache_dir: PathBuf,
    /// If true, never download (use cached files only).
    pub offline: bool,
    timeout: Duration,
    client: Option<Client>,
}

impl CatalogLoader {
    /// Create a new loader.
    ///
    /// If `cache_dir` is `None`, uses the platform-appropriate default cache directory.
    /// Creates the cache directory if it does not exist.
    pub fn new(cache_dir: Option<PathBuf>, offline: bool, timeout: Duration) -> Result<Self> {
        let dir = cache_dir.unwrap_or_else(config::default_cache_dir);
        fs::create_dir_all(&dir)?;
        Ok(Self {
            cache_dir: dir,
            offline,
            timeout,
            client: None,
        })
    }

    /// Lazy HTTP client, created on first use.
    fn client(&mut self) -> Result<Client> {
        if let Some(client) = &self.client {
            return Ok(client.clone());
        }
        let client = Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        self.client = Some(client.clone());
        Ok(client)
    }

    /// Path of the cached copy of a remote catalog.
    pub fn cached_path(&self, url: &str) -> PathBuf {
        let file = if url.ends_with(".gz") {
            format!("{}.gz", config::CATALOG_CACHE_FILE)
        } else {
            config::CATALOG_CACHE_FILE.to_string()
        };
        self.cache_dir.join(file)
    }

    /// Load and validate a catalog from a local JSON (or `.json.gz`) file.
    pub fn load_path<P: AsRef<Path>>(path: P) -> Result<Catalog> {
        let path = path.as_ref();
        let value = read_json(path)?;
        let catalog = Catalog::from_json(value)?;
        info!(
            path = %path.display(),
            packs = catalog.len(),
            cards = catalog.total_cards(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    /// Load a catalog from `url`, downloading it if no cached copy exists.
    pub fn load_url(&mut self, url: &str) -> Result<Catalog> {
        let local_path = self.ensure_cached(url)?;

        let value = match read_json(&local_path) {
            Ok(value) => value,
            Err(e) => {
                warn!(path = %local_path.display(), error = %e, "corrupt cached catalog, removing");
                let _ = fs::remove_file(&local_path);
                return Err(StellarError::NotFound(format!(
                    "Cached catalog '{}' was corrupt and has been removed. \
                     Retry to re-download. Original error: {}",
                    local_path
                        .file_name()
                        .and_then(|n| n.to_str())
                        .unwrap_or("unknown"),
                    e
                )));
            }
        };

        let catalog = Catalog::from_json(value)?;
        info!(url, packs = catalog.len(), "loaded remote catalog");
        Ok(catalog)
    }

    /// Make sure a cached copy of `url` exists, downloading if needed.
    pub fn ensure_cached(&mut self, url: &str) -> Result<PathBuf> {
        let local_path = self.cached_path(url);
        if local_path.exists() {
            return Ok(local_path);
        }
        if self.offline {
            return Err(StellarError::NotFound(format!(
                "Catalog {} not cached and offline mode is enabled",
                url
            )));
        }
        self.download_file(url, &local_path)?;
        Ok(local_path)
    }

    /// Download to a temp file first and rename on success, so an
    /// interrupted download never leaves a partial catalog behind.
    fn download_file(&mut self, url: &str, dest: &Path) -> Result<()> {
        info!(url, "downloading catalog");

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_dest = dest.with_extension(format!(
            "{}.tmp",
            dest.extension().and_then(|e| e.to_str()).unwrap_or("")
        ));

        let client = self.client()?;
        let result = (|| -> Result<()> {
            let resp = client.get(url).send()?.error_for_status()?;
            let bytes = resp.bytes()?;
            fs::write(&tmp_dest, &bytes)?;
            fs::rename(&tmp_dest, dest)?;
            Ok(())
        })();

        if result.is_err() {
            let _ = fs::remove_file(&tmp_dest);
        }

        result
    }

    /// Remove all cached files and recreate the cache directory.
    pub fn clear(&self) -> Result<()> {
        if self.cache_dir.exists() {
            fs::remove_dir_all(&self.cache_dir)?;
            fs::create_dir_all(&self.cache_dir)?;
        }
        Ok(())
    }
}

fn read_json(path: &Path) -> Result<serde_json::Value> {
    let contents = if path.extension().and_then(|e| e.to_str()) == Some("gz") {
        let file = fs::File::open(path)?;
        let mut reader = BufReader::new(GzDecoder::new(BufReader::new(file)));
        let mut contents = String::new();
        reader.read_to_string(&mut contents)?;
        contents
    } else {
        fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&contents)?)
}
