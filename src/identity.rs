//! Identity provider contract.
//!
//! Authentication itself happens elsewhere; the SDK only needs the stable id
//! of whoever is signed in, which addresses their profile document.

use std::sync::RwLock;

use crate::config;
use crate::error::{Result, StellarError};

/// An authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    pub uid: String,
}

impl Identity {
    pub fn new(uid: &str) -> Self {
        Self {
            uid: uid.to_string(),
        }
    }
}

pub trait IdentityProvider: Send + Sync {
    /// The signed-in identity, if any.
    fn current_identity(&self) -> Option<Identity>;
}

/// Identity provider with an explicitly set identity.
///
/// Suited to CLIs, servers that authenticate upstream, and tests.
#[derive(Debug, Default)]
pub struct StaticIdentity {
    current: RwLock<Option<Identity>>,
}

impl StaticIdentity {
    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn signed_in(uid: &str) -> Self {
        Self {
            current: RwLock::new(Some(Identity::new(uid))),
        }
    }

    pub fn sign_in(&self, uid: &str) {
        if let Ok(mut cur) = self.current.write() {
            *cur = Some(Identity::new(uid));
        }
    }

    pub fn sign_out(&self) {
        if let Ok(mut cur) = self.current.write() {
            *cur = None;
        }
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_identity(&self) -> Option<Identity> {
        self.current.read().ok().and_then(|cur| cur.clone())
    }
}

/// Login address for a character name: trimmed, lowercased, whitespace
/// removed, under the game's login domain (`"Kael Storm"` becomes
/// `kaelstorm@stellar.duel`).
pub fn login_email(character_name: &str) -> Result<String> {
    let local: String = character_name
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if local.is_empty() {
        return Err(StellarError::InvalidArgument(
            "Character name must not be empty".to_string(),
        ));
    }
    Ok(format!("{}@{}", local, config::LOGIN_EMAIL_DOMAIN))
}
