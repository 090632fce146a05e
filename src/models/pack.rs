use serde::{Deserialize, Serialize};

use super::card::Card;
use crate::config;

// ---------------------------------------------------------------------------
// Pack — Themed pool of cards a player can open
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pack {
    pub id: String,
    pub name: String,
    /// Asset folder holding this pack's card images.
    pub folder: String,
    pub description: String,
    pub cover_image: Option<String>,
    /// Cards in display order. Draws treat this as an unordered pool.
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl Pack {
    /// Public asset path of a card image, e.g. `/img/starter/Augury.png`.
    pub fn card_image_path(&self, card: &Card) -> String {
        format!("{}/{}/{}", config::IMAGE_ROOT, self.folder, card.image)
    }

    /// Public asset path of the pack cover, if the pack has one.
    pub fn cover_image_path(&self) -> Option<String> {
        self.cover_image.as_ref().map(|cover| {
            format!(
                "{}/{}/{}",
                config::IMAGE_ROOT,
                config::PACK_COVER_FOLDER,
                cover
            )
        })
    }
}
