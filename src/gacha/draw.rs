//! Uniform sampling without replacement from a pack's card pool.

use crate::models::{Card, Pack};
use rand::prelude::*;

/// Draw up to `count` cards from `pack` without replacement.
///
/// Each step picks a uniformly random index into the cards still left in a
/// working copy of the pool and removes the pick, so no card is drawn twice
/// in one call. When the pool runs out the draw stops early: the result has
/// `min(count, pack.cards.len())` cards and an empty pack yields an empty
/// draw. The catalog's pack is never modified.
pub fn draw<R: Rng + ?Sized>(pack: &Pack, count: usize, rng: &mut R) -> Vec<Card> {
    let mut pool: Vec<&Card> = pack.cards.iter().collect();
    let mut drawn = Vec::with_capacity(count.min(pool.len()));

    for _ in 0..count {
        if pool.is_empty() {
            break;
        }
        let idx = rng.gen_range(0..pool.len());
        drawn.push(pool.remove(idx).clone());
    }

    drawn
}

/// [`draw`] using the thread-local RNG.
pub fn draw_random(pack: &Pack, count: usize) -> Vec<Card> {
    draw(pack, count, &mut thread_rng())
}
