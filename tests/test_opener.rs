//! Pack opening tests: the full draw, merge and persist path through the SDK.

mod common;

use common::{duckdb_sdk, memory_sdk, profile_with_packs, sdk_with_store, FailingStore, UID};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;
use stellar_duel_sdk::{
    DocumentStore, MemoryStore, PlayerProfile, StaticIdentity, StellarDuelSdk, StellarError,
};

fn provisioned(sdk: StellarDuelSdk, packs: u32) -> StellarDuelSdk {
    sdk.players()
        .provision(UID, &profile_with_packs("alpha", packs))
        .unwrap();
    sdk
}

// ---------------------------------------------------------------------------
// Happy path
// ---------------------------------------------------------------------------

#[test]
fn opening_persists_cards_and_consumes_one_pack() {
    for sdk in [provisioned(memory_sdk(), 3), provisioned(duckdb_sdk(), 3)] {
        let opening = sdk.open_pack(UID, "alpha").unwrap();

        assert_eq!(opening.pack_id, "alpha");
        assert_eq!(opening.cards.len(), 2);
        let unique: HashSet<_> = opening.cards.iter().map(|c| &c.id).collect();
        assert_eq!(unique.len(), 2);
        assert_eq!(opening.packs_remaining(), 2);

        let stored = sdk.players().require(UID).unwrap();
        assert_eq!(stored, opening.profile);
        for card in &opening.cards {
            assert_eq!(stored.quantity(&card.id), 1);
        }
    }
}

#[test]
fn repeated_openings_accumulate() {
    let sdk = provisioned(memory_sdk(), 8);
    let mut pulled = 0u32;
    for _ in 0..8 {
        pulled += sdk.open_pack(UID, "alpha").unwrap().cards.len() as u32;
    }
    let stored = sdk.players().require(UID).unwrap();
    assert_eq!(stored.pack_count("alpha"), 0);
    assert_eq!(stored.inventory.values().sum::<u32>(), pulled);
}

#[test]
fn seeded_openings_are_reproducible() {
    let a = provisioned(memory_sdk(), 1);
    let b = provisioned(memory_sdk(), 1);
    let first = a
        .opener()
        .open_pack_with(UID, "alpha", &mut StdRng::seed_from_u64(11))
        .unwrap();
    let second = b
        .opener()
        .open_pack_with(UID, "alpha", &mut StdRng::seed_from_u64(11))
        .unwrap();
    assert_eq!(first.cards, second.cards);
}

#[test]
fn small_pack_yields_what_it_has() {
    let sdk = memory_sdk();
    sdk.players()
        .provision(UID, &profile_with_packs("tiny", 1))
        .unwrap();
    let opening = sdk.open_pack(UID, "tiny").unwrap();
    assert_eq!(opening.cards.len(), 1);
    assert_eq!(opening.cards[0].id, "t1");
    assert_eq!(opening.packs_remaining(), 0);
}

#[test]
fn empty_pack_still_consumes_a_unit() {
    let sdk = memory_sdk();
    sdk.players()
        .provision(UID, &profile_with_packs("void", 2))
        .unwrap();
    let opening = sdk.open_pack(UID, "void").unwrap();
    assert!(opening.cards.is_empty());
    assert_eq!(opening.packs_remaining(), 1);
}

#[test]
fn custom_draw_count() {
    let sdk = StellarDuelSdk::builder()
        .catalog(common::sample_catalog())
        .store(MemoryStore::new())
        .draw_count(5)
        .build()
        .unwrap();
    let sdk = provisioned(sdk, 1);
    assert_eq!(sdk.open_pack(UID, "alpha").unwrap().cards.len(), 5);
}

#[test]
fn sdks_sharing_a_store_see_each_others_openings() {
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
    let build = || {
        StellarDuelSdk::builder()
            .catalog(common::sample_catalog())
            .shared_store(Arc::clone(&store))
            .build()
            .unwrap()
    };
    let first = provisioned(build(), 2);
    let second = build();

    first.open_pack(UID, "alpha").unwrap();
    assert_eq!(second.dashboard(UID).unwrap().total_packs, 1);
}

// ---------------------------------------------------------------------------
// Refusals
// ---------------------------------------------------------------------------

#[test]
fn unknown_pack_fails_before_reading_the_store() {
    // No profile exists; the pack lookup must fail first.
    let sdk = memory_sdk();
    let err = sdk.open_pack(UID, "omega").unwrap_err();
    assert!(matches!(err, StellarError::UnknownPack(id) if id == "omega"));
}

#[test]
fn opening_without_packs_is_refused() {
    let sdk = provisioned(memory_sdk(), 0);
    let err = sdk.open_pack(UID, "alpha").unwrap_err();
    assert!(matches!(
        err,
        StellarError::InsufficientPacks { ref pack_id, available: 0 } if pack_id == "alpha"
    ));
    assert!(sdk.players().require(UID).unwrap().inventory.is_empty());
}

#[test]
fn absent_pack_key_counts_as_zero() {
    let sdk = provisioned(memory_sdk(), 1);
    let err = sdk.open_pack(UID, "tiny").unwrap_err();
    assert!(matches!(err, StellarError::InsufficientPacks { .. }));
}

#[test]
fn missing_profile_is_not_found() {
    let sdk = memory_sdk();
    assert!(matches!(
        sdk.open_pack("nobody", "alpha").unwrap_err(),
        StellarError::NotFound(_)
    ));
}

#[test]
fn malformed_inventory_does_not_block_opening() {
    for sdk in [memory_sdk(), duckdb_sdk()] {
        sdk.store()
            .set_document(
                "players",
                UID,
                json!({"name": "Kael", "packs": {"alpha": 2}, "inventory": []}),
            )
            .unwrap();
        let before = sdk.players().require(UID).unwrap();
        assert_eq!(before.pack_count("alpha"), 2);
        assert!(before.inventory.is_empty());

        let opening = sdk.open_pack(UID, "alpha").unwrap();
        assert_eq!(opening.packs_remaining(), 1);
        for card in &opening.cards {
            assert_eq!(opening.profile.quantity(&card.id), 1);
        }
    }
}

#[test]
fn failed_persist_discards_the_draw() {
    let store = FailingStore::new();
    let profile = profile_with_packs("alpha", 1);
    store
        .set_document("players", UID, profile.to_document().unwrap())
        .unwrap();
    let sdk = sdk_with_store(store);

    let err = sdk.open_pack(UID, "alpha").unwrap_err();
    assert!(matches!(err, StellarError::PersistFailure(_)));

    let stored = sdk.players().require(UID).unwrap();
    assert_eq!(stored, profile);
}

#[test]
fn open_pack_as_requires_sign_in() {
    let sdk = provisioned(memory_sdk(), 1);
    let identity = StaticIdentity::signed_out();

    assert!(matches!(
        sdk.open_pack_as(&identity, "alpha").unwrap_err(),
        StellarError::NotSignedIn
    ));

    identity.sign_in(UID);
    let opening = sdk.open_pack_as(&identity, "alpha").unwrap();
    assert_eq!(opening.packs_remaining(), 0);
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

fn race_for_last_pack(sdk: StellarDuelSdk) {
    let sdk = Arc::new(provisioned(sdk, 1));
    let barrier = Arc::new(Barrier::new(2));

    let handles: Vec<_> = (0..2)
        .map(|_| {
            let sdk = Arc::clone(&sdk);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                sdk.open_pack(UID, "alpha")
            })
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let wins: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
    assert_eq!(wins.len(), 1, "exactly one opening should succeed");
    assert!(results.iter().any(|r| matches!(
        r,
        Err(StellarError::InsufficientPacks { .. })
    )));

    let stored: PlayerProfile = sdk.players().require(UID).unwrap();
    assert_eq!(stored.pack_count("alpha"), 0);
    assert_eq!(stored.inventory.values().sum::<u32>(), 2);
    for card in &wins[0].cards {
        assert_eq!(stored.quantity(&card.id), 1);
    }
}

#[test]
fn concurrent_openings_spend_last_pack_once_memory() {
    race_for_last_pack(memory_sdk());
}

#[test]
fn concurrent_openings_spend_last_pack_once_duckdb() {
    race_for_last_pack(duckdb_sdk());
}

#[test]
fn concurrent_openings_never_lose_cards() {
    let sdk = Arc::new(provisioned(memory_sdk(), 20));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let sdk = Arc::clone(&sdk);
            thread::spawn(move || {
                (0..5)
                    .map(|_| sdk.open_pack(UID, "alpha").unwrap().cards.len() as u32)
                    .sum::<u32>()
            })
        })
        .collect();
    let pulled: u32 = handles.into_iter().map(|h| h.join().unwrap()).sum();

    let stored = sdk.players().require(UID).unwrap();
    assert_eq!(stored.pack_count("alpha"), 0);
    assert_eq!(stored.inventory.values().sum::<u32>(), pulled);
}
