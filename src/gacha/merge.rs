//! Folding a draw into a player's holdings.
//!
//! Opening one pack consumes exactly one unit of `packs[pack_id]` regardless
//! of how many cards it yields, and adds one copy per drawn card to the
//! inventory.

use std::collections::BTreeMap;

use crate::models::{Card, PlayerProfile};
use crate::store::UpdateRequest;

/// Apply a draw to an in-memory profile.
///
/// Availability is not re-checked here; callers verify the pack count before
/// drawing. The pack counter saturates at zero.
pub fn apply_draw(profile: &PlayerProfile, pack_id: &str, drawn: &[Card]) -> PlayerProfile {
    let mut next = profile.clone();
    for card in drawn {
        *next.inventory.entry(card.id.clone()).or_insert(0) += 1;
    }
    let packs = next.packs.entry(pack_id.to_string()).or_insert(0);
    *packs = packs.saturating_sub(1);
    next
}

/// Express a draw as a store update.
///
/// The request guards on `packs.<pack_id> >= 1`, decrements that counter by
/// one and increments `inventory.<card_id>` once per distinct drawn id (by
/// the number of copies drawn). Only the touched keys are written, so
/// concurrent openings never overwrite each other's inventory.
pub fn draw_update(pack_id: &str, drawn: &[Card]) -> UpdateRequest {
    let pack_path = format!("packs.{}", pack_id);

    let mut copies: BTreeMap<&str, i64> = BTreeMap::new();
    for card in drawn {
        *copies.entry(card.id.as_str()).or_insert(0) += 1;
    }

    copies.into_iter().fold(
        UpdateRequest::new()
            .require_at_least(&pack_path, 1)
            .increment(&pack_path, -1),
        |req, (card_id, n)| req.increment(&format!("inventory.{}", card_id), n),
    )
}
