use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Rarity — Ordered rarity tier
// ---------------------------------------------------------------------------

/// Rarity tier of a card, ordered `Comum < Rara < Epica < Lendaria`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Comum,
    Rara,
    Epica,
    Lendaria,
}

impl Rarity {
    /// Numeric rank used for display ordering (comum = 1 .. lendaria = 4).
    pub fn rank(self) -> u8 {
        match self {
            Rarity::Comum => 1,
            Rarity::Rara => 2,
            Rarity::Epica => 3,
            Rarity::Lendaria => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Rarity::Comum => "comum",
            Rarity::Rara => "rara",
            Rarity::Epica => "epica",
            Rarity::Lendaria => "lendaria",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Card — Immutable catalog entry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub name: String,
    pub rarity: Rarity,
    /// Image file name inside the owning pack's asset folder.
    pub image: String,
}

impl Card {
    pub fn new(id: &str, name: &str, rarity: Rarity, image: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            rarity,
            image: image.to_string(),
        }
    }
}
