//! Read-only registry of packs and cards.
//!
//! A [`Catalog`] is validated once at construction and then shared by
//! reference (usually through an `Arc`) with every component that needs
//! game content. Card ids must be unique across the whole catalog so that
//! inventory keys resolve to exactly one card.

use crate::error::{Result, StellarError};
use crate::models::{Card, Pack, Rarity};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Immutable mapping from pack id to [`Pack`], in display order.
#[derive(Debug, Clone)]
pub struct Catalog {
    packs: Vec<Pack>,
    pack_index: HashMap<String, usize>,
    card_index: HashMap<String, (usize, usize)>,
}

impl Catalog {
    /// Build a catalog from packs, rejecting duplicate pack ids and any card
    /// id that appears more than once (within a pack or across packs).
    pub fn new(packs: Vec<Pack>) -> Result<Self> {
        let mut pack_index = HashMap::with_capacity(packs.len());
        let mut card_index = HashMap::new();

        for (pi, pack) in packs.iter().enumerate() {
            if !is_valid_key(&pack.id) {
                return Err(StellarError::CatalogConflict(format!(
                    "Pack '{}' has an invalid id '{}'",
                    pack.name, pack.id
                )));
            }
            if pack_index.insert(pack.id.clone(), pi).is_some() {
                return Err(StellarError::CatalogConflict(format!(
                    "Duplicate pack id '{}'",
                    pack.id
                )));
            }

            let mut seen_in_pack = HashSet::new();
            for (ci, card) in pack.cards.iter().enumerate() {
                if !is_valid_key(&card.id) {
                    return Err(StellarError::CatalogConflict(format!(
                        "Card '{}' in pack '{}' has an invalid id '{}'",
                        card.name, pack.id, card.id
                    )));
                }
                if !seen_in_pack.insert(card.id.as_str()) {
                    return Err(StellarError::CatalogConflict(format!(
                        "Card id '{}' appears twice in pack '{}'",
                        card.id, pack.id
                    )));
                }
                if let Some((other, _)) = card_index.insert(card.id.clone(), (pi, ci)) {
                    return Err(StellarError::CatalogConflict(format!(
                        "Card id '{}' is used by both '{}' and '{}'",
                        card.id, packs[other].id, pack.id
                    )));
                }
            }
        }

        debug!(
            packs = packs.len(),
            cards = card_index.len(),
            "catalog validated"
        );

        Ok(Self {
            packs,
            pack_index,
            card_index,
        })
    }

    /// Build a catalog from JSON.
    ///
    /// Accepts either an array of packs (kept in array order) or an object
    /// keyed by pack id (ordered by key). Each pack's own `id` is
    /// authoritative; object keys are not checked against it.
    pub fn from_json(value: Value) -> Result<Self> {
        let packs: Vec<Pack> = match value {
            Value::Array(_) => serde_json::from_value(value)?,
            Value::Object(map) => map
                .into_iter()
                .map(|(_, v)| serde_json::from_value(v))
                .collect::<std::result::Result<_, _>>()?,
            _ => {
                return Err(StellarError::InvalidArgument(
                    "Catalog JSON must be an array or an object of packs".to_string(),
                ))
            }
        };
        Self::new(packs)
    }

    /// The game's shipped content.
    pub fn builtin() -> Self {
        let starter = Pack {
            id: "starter".to_string(),
            name: "Starter Pack".to_string(),
            folder: "starter".to_string(),
            description: "O pacote essencial para iniciar sua jornada.".to_string(),
            cover_image: Some("starter-cover.png".to_string()),
            cards: vec![
                Card::new("st_001", "Augury", Rarity::Rara, "Augury.png"),
                Card::new("st_002", "Normal Summon", Rarity::Comum, "Normal_Summon.png"),
                Card::new("st_003", "Double Strike", Rarity::Epica, "Double_Strike.png"),
                Card::new("st_004", "Quick Thinking", Rarity::Rara, "Quick_Thinking.png"),
                Card::new("st_005", "Invocation damage", Rarity::Epica, "Invocation_damage.png"),
                Card::new("st_006", "Magic Weapon", Rarity::Epica, "Magic_Weapon.png"),
                Card::new("st_007", "Weak Summon", Rarity::Comum, "Weak_Summon.png"),
                Card::new("st_008", "Monster reborn", Rarity::Lendaria, "Monster_reborn.png"),
            ],
        };
        let nebulosa = Pack {
            id: "expansion1".to_string(),
            name: "Nebulosa Sombria".to_string(),
            folder: "nebulosa".to_string(),
            description: "Invoque criaturas poderosas e destrua seus inimigos.".to_string(),
            cover_image: Some("nebulosa-cover.png".to_string()),
            cards: vec![
                Card::new("nb_001", "Destroy", Rarity::Rara, "Destroy.png"),
                Card::new("nb_002", "Pot of Greed", Rarity::Epica, "Pot_of_greed.png"),
                Card::new("nb_003", "Heal", Rarity::Comum, "Heal.png"),
                Card::new("nb_004", "Reconsider", Rarity::Rara, "Reconsider.png"),
                Card::new("nb_005", "Silence", Rarity::Lendaria, "Silence.png"),
                Card::new("nb_006", "Strong Summon", Rarity::Epica, "Strong_Summon.png"),
                Card::new("nb_007", "Magical hats", Rarity::Comum, "Magical_hats.png"),
            ],
        };

        match Self::new(vec![starter, nebulosa]) {
            Ok(catalog) => catalog,
            Err(e) => unreachable!("built-in catalog is invalid: {e}"),
        }
    }

    /// Look up a pack by id.
    pub fn get_pack(&self, pack_id: &str) -> Result<&Pack> {
        self.pack_index
            .get(pack_id)
            .map(|&i| &self.packs[i])
            .ok_or_else(|| StellarError::UnknownPack(pack_id.to_string()))
    }

    /// Packs in display order.
    pub fn packs(&self) -> &[Pack] {
        &self.packs
    }

    pub fn pack_ids(&self) -> Vec<&str> {
        self.packs.iter().map(|p| p.id.as_str()).collect()
    }

    /// Find a card and the pack that owns it.
    pub fn find_card(&self, card_id: &str) -> Option<(&Pack, &Card)> {
        self.card_index.get(card_id).map(|&(pi, ci)| {
            let pack = &self.packs[pi];
            (pack, &pack.cards[ci])
        })
    }

    /// Asset path of any catalog card, resolved through its owning pack.
    pub fn card_image_path(&self, card_id: &str) -> Option<String> {
        self.find_card(card_id)
            .map(|(pack, card)| pack.card_image_path(card))
    }

    pub fn len(&self) -> usize {
        self.packs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
    }

    pub fn total_cards(&self) -> usize {
        self.card_index.len()
    }
}

/// Ids double as document field names (`inventory.<card_id>`), so they must
/// be non-empty and free of the `.` path separator.
fn is_valid_key(id: &str) -> bool {
    !id.is_empty() && !id.contains('.')
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
