//! Derived, read-only views over a player profile and the catalog.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{Card, Pack, PlayerProfile, Rarity};

/// Owned/total completion of one pack's collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CollectionProgress {
    pub owned: usize,
    pub total: usize,
    /// Rounded percentage, `0` for an empty pack.
    pub percent: u8,
}

/// One card in a collection gallery together with the player's holdings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionEntry {
    pub card: Card,
    pub quantity: u32,
    pub owned: bool,
}

/// Headline numbers for a player's dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub profile: PlayerProfile,
    pub win_rate: u8,
    pub total_packs: u64,
}

impl Dashboard {
    pub fn new(profile: PlayerProfile) -> Self {
        Self {
            win_rate: win_rate(&profile),
            total_packs: total_packs(&profile),
            profile,
        }
    }
}

/// Wins as a rounded percentage of games played; `0` with no games.
pub fn win_rate(profile: &PlayerProfile) -> u8 {
    rounded_percent(profile.wins as u64, profile.wins as u64 + profile.losses as u64)
}

pub fn collection_progress(profile: &PlayerProfile, pack: &Pack) -> CollectionProgress {
    let owned = pack.cards.iter().filter(|c| profile.owns(&c.id)).count();
    let total = pack.cards.len();
    CollectionProgress {
        owned,
        total,
        percent: rounded_percent(owned as u64, total as u64),
    }
}

/// Stable sort by rarity, highest first.
pub fn sort_by_rarity_desc(cards: &[Card]) -> Vec<Card> {
    let mut sorted = cards.to_vec();
    sorted.sort_by(|a, b| b.rarity.rank().cmp(&a.rarity.rank()));
    sorted
}

/// Unopened packs across all pack types.
pub fn total_packs(profile: &PlayerProfile) -> u64 {
    profile.packs.values().map(|&n| n as u64).sum()
}

/// A pack's cards, highest rarity first, annotated with owned quantities.
pub fn collection_view(profile: &PlayerProfile, pack: &Pack) -> Vec<CollectionEntry> {
    sort_by_rarity_desc(&pack.cards)
        .into_iter()
        .map(|card| {
            let quantity = profile.quantity(&card.id);
            CollectionEntry {
                card,
                quantity,
                owned: quantity > 0,
            }
        })
        .collect()
}

/// Cards bucketed by rarity, each bucket in input order.
pub fn group_by_rarity(cards: &[Card]) -> BTreeMap<Rarity, Vec<Card>> {
    let mut groups: BTreeMap<Rarity, Vec<Card>> = BTreeMap::new();
    for card in cards {
        groups.entry(card.rarity).or_default().push(card.clone());
    }
    groups
}

fn rounded_percent(part: u64, whole: u64) -> u8 {
    if whole == 0 {
        return 0;
    }
    // Integer round-half-up of 100 * part / whole.
    ((200 * part + whole) / (2 * whole)).min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::rounded_percent;

    #[test]
    fn rounding_is_half_up() {
        assert_eq!(rounded_percent(1, 8), 13); // 12.5
        assert_eq!(rounded_percent(3, 8), 38); // 37.5
        assert_eq!(rounded_percent(10, 12), 83);
        assert_eq!(rounded_percent(2, 3), 67);
        assert_eq!(rounded_percent(0, 5), 0);
        assert_eq!(rounded_percent(5, 5), 100);
    }
}
