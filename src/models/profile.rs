use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Result, StellarError};

// ---------------------------------------------------------------------------
// Rank — Player rank tier
// ---------------------------------------------------------------------------

/// Player rank. Unrecognized values are kept verbatim in `Unranked`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Rank {
    Iniciante,
    Regular,
    Promissor,
    Epico,
    Lenda,
    Icone,
    Fabula,
    Unranked(String),
}

impl Rank {
    /// Parse a rank label, ignoring case, surrounding whitespace and
    /// diacritics (`"Épico"` and `"epico"` are the same rank).
    pub fn parse(raw: &str) -> Self {
        match fold_diacritics(raw.trim()).to_lowercase().as_str() {
            "iniciante" => Rank::Iniciante,
            "regular" => Rank::Regular,
            "promissor" => Rank::Promissor,
            "epico" => Rank::Epico,
            "lenda" => Rank::Lenda,
            "icone" => Rank::Icone,
            "fabula" => Rank::Fabula,
            _ => Rank::Unranked(raw.to_string()),
        }
    }

    /// Label shown on the rank badge.
    pub fn label(&self) -> &str {
        match self {
            Rank::Iniciante => "Iniciante",
            Rank::Regular => "Regular",
            Rank::Promissor => "Promissor",
            Rank::Epico => "Épico",
            Rank::Lenda => "Lenda",
            Rank::Icone => "Ícone",
            Rank::Fabula => "Fábula",
            Rank::Unranked(raw) if !raw.trim().is_empty() => raw,
            Rank::Unranked(_) => "Sem Rank",
        }
    }
}

impl Default for Rank {
    fn default() -> Self {
        Rank::Unranked(String::new())
    }
}

impl From<String> for Rank {
    fn from(raw: String) -> Self {
        Rank::parse(&raw)
    }
}

impl From<Rank> for String {
    fn from(rank: Rank) -> Self {
        match rank {
            Rank::Unranked(raw) => raw,
            other => fold_diacritics(other.label()).to_lowercase(),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn fold_diacritics(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'A',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'É' | 'È' | 'Ê' | 'Ë' => 'E',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
            'ç' => 'c',
            'Ç' => 'C',
            other => other,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// PlayerProfile — Per-identity player document
// ---------------------------------------------------------------------------

/// A player's profile document.
///
/// Stored documents are loosely typed, so reads go through
/// [`PlayerProfile::from_document`], which applies the defaulting rules once
/// at the store boundary: absent or malformed counters become `0`, absent
/// maps become empty, and inventory entries that are not positive are
/// dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerProfile {
    pub name: String,
    pub image: Option<String>,
    pub rank: Rank,
    pub wins: u32,
    pub losses: u32,
    pub clan_name: Option<String>,
    pub clan_image: Option<String>,
    pub deck_name: Option<String>,
    pub card1: Option<String>,
    pub card2: Option<String>,
    pub card3: Option<String>,
    pub card4: Option<String>,
    /// Unopened pack count by pack id.
    pub packs: BTreeMap<String, u32>,
    /// Owned quantity by card id. Absent means not owned.
    pub inventory: BTreeMap<String, u32>,
    /// Global leaderboard position. Uniqueness is by convention only.
    pub global: Option<u32>,
}

impl PlayerProfile {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Normalize a raw store document into a profile.
    pub fn from_document(doc: &Value) -> Result<Self> {
        let obj = doc.as_object().ok_or_else(|| {
            StellarError::InvalidArgument("Player document is not an object".to_string())
        })?;

        let text = |key: &str| obj.get(key).and_then(as_text);

        Ok(Self {
            name: text("name").unwrap_or_default(),
            image: text("image"),
            rank: obj
                .get("rank")
                .and_then(|v| v.as_str())
                .map(Rank::parse)
                .unwrap_or_default(),
            wins: obj.get("wins").map(as_count).unwrap_or(0),
            losses: obj.get("losses").map(as_count).unwrap_or(0),
            clan_name: text("clanName"),
            clan_image: text("clanImage"),
            deck_name: text("deckName"),
            card1: text("card1"),
            card2: text("card2"),
            card3: text("card3"),
            card4: text("card4"),
            packs: counts_map(obj.get("packs"), true),
            inventory: counts_map(obj.get("inventory"), false),
            global: obj.get("global").and_then(|v| {
                if v.is_null() {
                    None
                } else {
                    Some(as_count(v))
                }
            }),
        })
    }

    /// Serialize into a store document.
    pub fn to_document(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Name shown to other players.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "Desconhecido"
        } else {
            &self.name
        }
    }

    pub fn deck_slots(&self) -> [Option<&str>; 4] {
        [
            self.card1.as_deref(),
            self.card2.as_deref(),
            self.card3.as_deref(),
            self.card4.as_deref(),
        ]
    }

    /// Unopened packs of the given id.
    pub fn pack_count(&self, pack_id: &str) -> u32 {
        self.packs.get(pack_id).copied().unwrap_or(0)
    }

    /// Owned copies of the given card.
    pub fn quantity(&self, card_id: &str) -> u32 {
        self.inventory.get(card_id).copied().unwrap_or(0)
    }

    pub fn owns(&self, card_id: &str) -> bool {
        self.quantity(card_id) > 0
    }
}

fn as_text(v: &Value) -> Option<String> {
    match v.as_str() {
        Some(s) if !s.trim().is_empty() => Some(s.to_string()),
        _ => None,
    }
}

/// Coerce a loosely typed counter to a non-negative integer.
fn as_count(v: &Value) -> u32 {
    let n = match v {
        Value::Number(n) => n
            .as_u64()
            .map(|u| u as f64)
            .or_else(|| n.as_f64())
            .unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if n.is_finite() && n > 0.0 {
        n.min(u32::MAX as f64) as u32
    } else {
        0
    }
}

fn counts_map(v: Option<&Value>, keep_zero: bool) -> BTreeMap<String, u32> {
    let Some(obj) = v.and_then(|v| v.as_object()) else {
        return BTreeMap::new();
    };
    obj.iter()
        .map(|(k, v)| (k.clone(), as_count(v)))
        .filter(|(_, n)| keep_zero || *n > 0)
        .collect()
}
