//! Shared test fixtures for the Stellar Duel SDK integration tests.
//!
//! Provides a small sample catalog, profile builders, SDK constructors over
//! the in-memory and DuckDB stores, and a store that fails every update.

#![allow(dead_code)]

use serde_json::Value;
use stellar_duel_sdk::store::UpdateRequest;
use stellar_duel_sdk::{
    Card, Catalog, DocumentStore, DuckDbStore, MemoryStore, Pack, PlayerProfile, Rarity, Result,
    StellarDuelSdk, StellarError,
};

pub const UID: &str = "uid-kael";

pub fn card(id: &str, rarity: Rarity) -> Card {
    Card::new(id, &format!("Card {id}"), rarity, &format!("{id}.png"))
}

pub fn pack(id: &str, cards: Vec<Card>) -> Pack {
    Pack {
        id: id.to_string(),
        name: format!("Pack {id}"),
        folder: id.to_string(),
        description: format!("The {id} pack"),
        cover_image: None,
        cards,
    }
}

/// Eight distinct cards across all rarities.
pub fn alpha_pack() -> Pack {
    pack(
        "alpha",
        vec![
            card("a1", Rarity::Comum),
            card("a2", Rarity::Rara),
            card("a3", Rarity::Epica),
            card("a4", Rarity::Lendaria),
            card("a5", Rarity::Comum),
            card("a6", Rarity::Rara),
            card("a7", Rarity::Epica),
            card("a8", Rarity::Comum),
        ],
    )
}

pub fn sample_catalog() -> Catalog {
    Catalog::new(vec![
        alpha_pack(),
        pack("tiny", vec![card("t1", Rarity::Rara)]),
        pack("void", Vec::new()),
    ])
    .unwrap()
}

/// A profile holding `count` packs of `pack_id` and nothing else.
pub fn profile_with_packs(pack_id: &str, count: u32) -> PlayerProfile {
    let mut profile = PlayerProfile::new("Kael");
    profile.packs.insert(pack_id.to_string(), count);
    profile
}

pub fn sdk_with_store<S: DocumentStore + 'static>(store: S) -> StellarDuelSdk {
    StellarDuelSdk::builder()
        .catalog(sample_catalog())
        .store(store)
        .build()
        .unwrap()
}

pub fn memory_sdk() -> StellarDuelSdk {
    sdk_with_store(MemoryStore::new())
}

pub fn duckdb_sdk() -> StellarDuelSdk {
    sdk_with_store(DuckDbStore::open_in_memory().unwrap())
}

/// Document store whose reads work but whose updates always fail, like a
/// backend that lost connectivity between the read and the write.
pub struct FailingStore {
    pub inner: MemoryStore,
}

impl FailingStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
        }
    }
}

impl DocumentStore for FailingStore {
    fn get_document(&self, collection: &str, id: &str) -> Result<Option<Value>> {
        self.inner.get_document(collection, id)
    }

    fn set_document(&self, collection: &str, id: &str, doc: Value) -> Result<()> {
        self.inner.set_document(collection, id, doc)
    }

    fn update_fields(&self, _collection: &str, _id: &str, _request: &UpdateRequest) -> Result<()> {
        Err(StellarError::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "connection reset",
        )))
    }

    fn find_by_name_prefix(
        &self,
        collection: &str,
        prefix: &str,
        limit: usize,
    ) -> Result<Vec<(String, Value)>> {
        self.inner.find_by_name_prefix(collection, prefix, limit)
    }
}
