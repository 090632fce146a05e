//! Pack opening: availability check, draw, and atomic persistence.
//!
//! The opener reads the player's profile to reject openings with no packs
//! left, draws the cards, then persists the merge as one conditional store
//! update. The condition is re-checked inside the store, so two concurrent
//! openings of a player's last pack yield one success and one
//! [`StellarError::InsufficientPacks`]. If persistence fails the draw is
//! discarded and never returned.

use rand::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use super::draw::draw;
use super::merge::{apply_draw, draw_update};
use crate::catalog::Catalog;
use crate::config;
use crate::error::{Result, StellarError};
use crate::models::{Card, PlayerProfile};
use crate::store::DocumentStore;

/// Outcome of a successfully persisted pack opening.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackOpening {
    pub pack_id: String,
    pub cards: Vec<Card>,
    /// The player's profile as stored after the opening.
    pub profile: PlayerProfile,
}

impl PackOpening {
    pub fn packs_remaining(&self) -> u32 {
        self.profile.pack_count(&self.pack_id)
    }
}

/// Opens packs on behalf of players.
pub struct PackOpener<'a> {
    catalog: &'a Catalog,
    store: &'a dyn DocumentStore,
    draw_count: usize,
}

impl<'a> PackOpener<'a> {
    /// Create a new `PackOpener` drawing `draw_count` cards per pack.
    pub fn new(catalog: &'a Catalog, store: &'a dyn DocumentStore, draw_count: usize) -> Self {
        Self {
            catalog,
            store,
            draw_count,
        }
    }

    pub fn draw_count(&self) -> usize {
        self.draw_count
    }

    /// Open one pack using the thread-local RNG.
    pub fn open_pack(&self, uid: &str, pack_id: &str) -> Result<PackOpening> {
        self.open_pack_with(uid, pack_id, &mut thread_rng())
    }

    /// Open one pack of `pack_id` for player `uid`, drawing with `rng`.
    pub fn open_pack_with<R: Rng + ?Sized>(
        &self,
        uid: &str,
        pack_id: &str,
        rng: &mut R,
    ) -> Result<PackOpening> {
        let pack = self.catalog.get_pack(pack_id)?;

        let profile = self.load_profile(uid)?;
        let available = profile.pack_count(pack_id);
        if available == 0 {
            return Err(StellarError::InsufficientPacks {
                pack_id: pack_id.to_string(),
                available,
            });
        }

        let cards = draw(pack, self.draw_count, rng);
        let request = draw_update(pack_id, &cards);

        match self
            .store
            .update_fields(config::PLAYERS_COLLECTION, uid, &request)
        {
            Ok(()) => {}
            Err(StellarError::PreconditionFailed(reason)) => {
                info!(uid, pack_id, %reason, "pack already consumed by a concurrent opening");
                return Err(StellarError::InsufficientPacks {
                    pack_id: pack_id.to_string(),
                    available: 0,
                });
            }
            Err(e) => {
                warn!(uid, pack_id, error = %e, "discarding draw after failed persist");
                return Err(StellarError::PersistFailure(e.to_string()));
            }
        }

        info!(
            uid,
            pack_id,
            cards = cards.len(),
            "opened pack"
        );

        let profile = match self.load_profile(uid) {
            Ok(stored) => stored,
            Err(e) => {
                warn!(uid, error = %e, "could not reload profile after opening");
                apply_draw(&profile, pack_id, &cards)
            }
        };

        Ok(PackOpening {
            pack_id: pack_id.to_string(),
            cards,
            profile,
        })
    }

    fn load_profile(&self, uid: &str) -> Result<PlayerProfile> {
        let doc = self
            .store
            .get_document(config::PLAYERS_COLLECTION, uid)?
            .ok_or_else(|| StellarError::NotFound(format!("Player '{}'", uid)))?;
        PlayerProfile::from_document(&doc)
    }
}
