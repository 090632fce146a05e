//! Draw engine tests: sampling without replacement over a pack's pool.

mod common;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use stellar_duel_sdk::gacha::{draw, draw_random};
use stellar_duel_sdk::{Card, Pack, Rarity};

fn pack_of(n: usize) -> Pack {
    common::pack(
        "gen",
        (0..n)
            .map(|i| common::card(&format!("g{i}"), Rarity::Comum))
            .collect(),
    )
}

fn ids(cards: &[Card]) -> Vec<String> {
    cards.iter().map(|c| c.id.clone()).collect()
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn draws_never_repeat_a_card(n in 1usize..30, k in 0usize..30, seed in any::<u64>()) {
        let count = k.min(n);
        let pack = pack_of(n);
        let drawn = draw(&pack, count, &mut StdRng::seed_from_u64(seed));

        prop_assert_eq!(drawn.len(), count);
        let unique: HashSet<&str> = drawn.iter().map(|c| c.id.as_str()).collect();
        prop_assert_eq!(unique.len(), count);
    }

    #[test]
    fn oversized_draws_return_the_whole_pool(n in 0usize..20, extra in 1usize..10, seed in any::<u64>()) {
        let pack = pack_of(n);
        let drawn = draw(&pack, n + extra, &mut StdRng::seed_from_u64(seed));

        let mut got = ids(&drawn);
        got.sort();
        let mut all = ids(&pack.cards);
        all.sort();
        prop_assert_eq!(got, all);
    }

    #[test]
    fn empty_pool_always_yields_nothing(k in 0usize..50, seed in any::<u64>()) {
        let pack = pack_of(0);
        prop_assert!(draw(&pack, k, &mut StdRng::seed_from_u64(seed)).is_empty());
    }
}

// ---------------------------------------------------------------------------
// Deterministic behavior
// ---------------------------------------------------------------------------

#[test]
fn same_seed_same_draw() {
    let pack = common::alpha_pack();
    let a = draw(&pack, 4, &mut StdRng::seed_from_u64(99));
    let b = draw(&pack, 4, &mut StdRng::seed_from_u64(99));
    assert_eq!(a, b);
}

#[test]
fn first_pick_is_the_rng_index_into_the_pool() {
    let pack = common::alpha_pack();
    let expected_idx = StdRng::seed_from_u64(5).gen_range(0..pack.cards.len());

    let drawn = draw(&pack, 1, &mut StdRng::seed_from_u64(5));
    assert_eq!(drawn, vec![pack.cards[expected_idx].clone()]);
}

#[test]
fn draw_does_not_modify_the_pack() {
    let pack = common::alpha_pack();
    let before = pack.clone();
    let _ = draw(&pack, 8, &mut StdRng::seed_from_u64(3));
    assert_eq!(pack, before);
}

#[test]
fn pack_with_duplicate_ids_can_repeat_them() {
    let pack = common::pack(
        "dup",
        vec![
            common::card("d", Rarity::Comum),
            common::card("d", Rarity::Comum),
        ],
    );
    let drawn = draw(&pack, 2, &mut StdRng::seed_from_u64(0));
    assert_eq!(ids(&drawn), vec!["d", "d"]);
}

#[test]
fn draw_random_respects_length() {
    let pack = common::alpha_pack();
    assert_eq!(draw_random(&pack, 2).len(), 2);
    assert_eq!(draw_random(&pack, 20).len(), 8);
}
