//! Player profile queries against the document store.

use serde::Serialize;

use crate::config;
use crate::error::{Result, StellarError};
use crate::models::PlayerProfile;
use crate::store::DocumentStore;

/// A profile returned by a search, with the id that addresses it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSummary {
    pub uid: String,
    pub profile: PlayerProfile,
}

// ---------------------------------------------------------------------------
// PlayerQuery
// ---------------------------------------------------------------------------

/// Query interface for player profiles.
pub struct PlayerQuery<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> PlayerQuery<'a> {
    /// Create a new `PlayerQuery` bound to the given store.
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Fetch and normalize a player's profile.
    ///
    /// Returns `None` if the player has no profile document.
    pub fn get(&self, uid: &str) -> Result<Option<PlayerProfile>> {
        self.store
            .get_document(config::PLAYERS_COLLECTION, uid)?
            .map(|doc| PlayerProfile::from_document(&doc))
            .transpose()
    }

    /// Like [`get`](Self::get), but a missing profile is an error.
    pub fn require(&self, uid: &str) -> Result<PlayerProfile> {
        self.get(uid)?
            .ok_or_else(|| StellarError::NotFound(format!("Player '{}'", uid)))
    }

    /// Create or replace a player's profile document.
    pub fn provision(&self, uid: &str, profile: &PlayerProfile) -> Result<()> {
        if uid.is_empty() {
            return Err(StellarError::InvalidArgument(
                "Player id must not be empty".to_string(),
            ));
        }
        self.store
            .set_document(config::PLAYERS_COLLECTION, uid, profile.to_document()?)
    }

    /// Find players whose name starts with `term`.
    ///
    /// Names are stored capitalized, so the term is normalized the same way
    /// (first letter upper case, the rest lower case) before matching. Terms
    /// shorter than two characters return no results.
    pub fn search(&self, term: &str, limit: usize) -> Result<Vec<PlayerSummary>> {
        let prefix = capitalize_first(term.trim());
        if prefix.chars().count() < config::MIN_SEARCH_LEN {
            return Ok(Vec::new());
        }

        self.store
            .find_by_name_prefix(config::PLAYERS_COLLECTION, &prefix, limit)?
            .into_iter()
            .map(|(uid, doc)| {
                Ok(PlayerSummary {
                    uid,
                    profile: PlayerProfile::from_document(&doc)?,
                })
            })
            .collect()
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(|c| c.to_lowercase()))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::capitalize_first;

    #[test]
    fn capitalizes_only_the_first_letter() {
        assert_eq!(capitalize_first("kAEL"), "Kael");
        assert_eq!(capitalize_first("élise"), "Élise");
        assert_eq!(capitalize_first(""), "");
    }
}
