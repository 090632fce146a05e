//! Stellar Duel SDK for Rust.
//!
//! Provides the game's card catalog, the pack-opening draw, the merge of drawn
//! cards into a player's collection, and the statistics shown on player
//! dashboards. Player profiles live in a pluggable [`DocumentStore`]; a
//! DuckDB-backed store is used unless another one is supplied.
//!
//! # Quick start
//!
//! ```no_run
//! use stellar_duel_sdk::{PlayerProfile, StellarDuelSdk};
//!
//! let sdk = StellarDuelSdk::builder().build().unwrap();
//!
//! let mut profile = PlayerProfile::new("Kael");
//! profile.packs.insert("starter".to_string(), 1);
//! sdk.players().provision("uid-kael", &profile).unwrap();
//!
//! // Open a starter pack
//! let opening = sdk.open_pack("uid-kael", "starter").unwrap();
//! assert_eq!(opening.cards.len(), 2);
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod catalog;
pub mod catalog_loader;
pub mod config;
pub mod error;
pub mod gacha;
pub mod identity;
pub mod models;
pub mod queries;
pub mod sql_builder;
pub mod stats;
pub mod store;

#[cfg(feature = "async")]
pub use async_client::AsyncStellarDuelSdk;
pub use catalog::Catalog;
pub use catalog_loader::CatalogLoader;
pub use error::{Result, StellarError};
pub use gacha::{PackOpener, PackOpening};
pub use identity::{Identity, IdentityProvider, StaticIdentity};
pub use models::{Card, Pack, PlayerProfile, Rank, Rarity};
pub use sql_builder::SqlBuilder;
pub use stats::{CollectionEntry, CollectionProgress, Dashboard};
pub use store::{DocumentStore, DuckDbStore, MemoryStore, UpdateRequest};

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

// ---------------------------------------------------------------------------
// StellarDuelSdkBuilder
// ---------------------------------------------------------------------------

enum CatalogSource {
    Ready(Catalog),
    Path(PathBuf),
    Url(String),
}

/// Builder for configuring and constructing a [`StellarDuelSdk`] instance.
///
/// Use [`StellarDuelSdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](StellarDuelSdkBuilder::build) to create the SDK.
pub struct StellarDuelSdkBuilder {
    catalog: Option<CatalogSource>,
    cache_dir: Option<PathBuf>,
    offline: bool,
    timeout: Duration,
    store: Option<Arc<dyn DocumentStore>>,
    database_path: Option<PathBuf>,
    draw_count: usize,
}

impl Default for StellarDuelSdkBuilder {
    fn default() -> Self {
        Self {
            catalog: None,
            cache_dir: None,
            offline: false,
            timeout: Duration::from_secs(30),
            store: None,
            database_path: None,
            draw_count: config::DEFAULT_DRAW_COUNT,
        }
    }
}

impl StellarDuelSdkBuilder {
    /// Use an already constructed catalog.
    ///
    /// If no catalog source is set, the built-in catalog is used.
    pub fn catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(CatalogSource::Ready(catalog));
        self
    }

    /// Load the catalog from a local JSON (or `.json.gz`) file.
    pub fn catalog_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.catalog = Some(CatalogSource::Path(path.as_ref().to_path_buf()));
        self
    }

    /// Load the catalog from a URL, caching the download locally.
    pub fn catalog_url(mut self, url: &str) -> Self {
        self.catalog = Some(CatalogSource::Url(url.to_string()));
        self
    }

    /// Set a custom cache directory for downloaded catalogs.
    ///
    /// If not set, the platform-appropriate default cache directory is used
    /// (e.g. `~/.cache/stellar-duel-sdk` on Linux).
    pub fn cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.cache_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enable or disable offline mode.
    ///
    /// When offline, remote catalogs are only read from the local cache.
    /// Defaults to `false`.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Set the HTTP request timeout for catalog downloads.
    ///
    /// Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use the given document store for player profiles.
    pub fn store<S: DocumentStore + 'static>(mut self, store: S) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Use an already shared document store.
    pub fn shared_store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Persist profiles in a DuckDB file instead of an in-memory database.
    ///
    /// Ignored when a store is supplied with [`store`](Self::store).
    pub fn database_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.database_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Number of cards drawn per opened pack. Defaults to 2.
    pub fn draw_count(mut self, count: usize) -> Self {
        self.draw_count = count;
        self
    }

    /// Build the SDK, loading the catalog and opening the store.
    pub fn build(self) -> Result<StellarDuelSdk> {
        let catalog = match self.catalog {
            None => Catalog::builtin(),
            Some(CatalogSource::Ready(catalog)) => catalog,
            Some(CatalogSource::Path(path)) => CatalogLoader::load_path(path)?,
            Some(CatalogSource::Url(url)) => {
                CatalogLoader::new(self.cache_dir, self.offline, self.timeout)?.load_url(&url)?
            }
        };

        let store: Arc<dyn DocumentStore> = match (self.store, self.database_path) {
            (Some(store), _) => store,
            (None, Some(path)) => Arc::new(DuckDbStore::open(path)?),
            (None, None) => Arc::new(DuckDbStore::open_in_memory()?),
        };

        info!(
            packs = catalog.len(),
            cards = catalog.total_cards(),
            draw_count = self.draw_count,
            "stellar duel sdk ready"
        );

        Ok(StellarDuelSdk {
            catalog: Arc::new(catalog),
            store,
            draw_count: self.draw_count,
        })
    }
}

// ---------------------------------------------------------------------------
// StellarDuelSdk
// ---------------------------------------------------------------------------

/// The main entry point for the Stellar Duel SDK.
///
/// Holds the shared read-only [`Catalog`] and the [`DocumentStore`] handle,
/// and hands out lightweight borrowing wrappers for queries and pack
/// openings. Created via [`StellarDuelSdk::builder()`].
pub struct StellarDuelSdk {
    catalog: Arc<Catalog>,
    store: Arc<dyn DocumentStore>,
    draw_count: usize,
}

impl StellarDuelSdk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> StellarDuelSdkBuilder {
        StellarDuelSdkBuilder::default()
    }

    // -- Accessors -----------------------------------------------------------

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }

    pub fn draw_count(&self) -> usize {
        self.draw_count
    }

    /// Access the player query interface.
    pub fn players(&self) -> queries::PlayerQuery<'_> {
        queries::PlayerQuery::new(self.store.as_ref())
    }

    /// Access the pack opener.
    pub fn opener(&self) -> PackOpener<'_> {
        PackOpener::new(&self.catalog, self.store.as_ref(), self.draw_count)
    }

    // -- Operations ----------------------------------------------------------

    /// Open one pack of `pack_id` for player `uid`.
    pub fn open_pack(&self, uid: &str, pack_id: &str) -> Result<PackOpening> {
        self.opener().open_pack(uid, pack_id)
    }

    /// Open one pack for whoever is signed in with `identity`.
    pub fn open_pack_as(
        &self,
        identity: &dyn IdentityProvider,
        pack_id: &str,
    ) -> Result<PackOpening> {
        let who = identity
            .current_identity()
            .ok_or(StellarError::NotSignedIn)?;
        self.open_pack(&who.uid, pack_id)
    }

    /// Dashboard numbers (win rate, unopened packs) for a player.
    pub fn dashboard(&self, uid: &str) -> Result<Dashboard> {
        Ok(Dashboard::new(self.players().require(uid)?))
    }

    /// A pack's collection gallery for a player, with completion progress.
    pub fn collection(
        &self,
        uid: &str,
        pack_id: &str,
    ) -> Result<(CollectionProgress, Vec<CollectionEntry>)> {
        let pack = self.catalog.get_pack(pack_id)?;
        let profile = self.players().require(uid)?;
        Ok((
            stats::collection_progress(&profile, pack),
            stats::collection_view(&profile, pack),
        ))
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for StellarDuelSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "StellarDuelSdk(packs=[{}], cards={}, draw_count={})",
            self.catalog.pack_ids().join(", "),
            self.catalog.total_cards(),
            self.draw_count
        )
    }
}
