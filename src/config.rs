use std::path::PathBuf;

/// Document collection holding one profile per authenticated identity.
pub const PLAYERS_COLLECTION: &str = "players";

/// Cards yielded by opening a single pack.
pub const DEFAULT_DRAW_COUNT: usize = 2;

/// Domain appended to character names to form the identity provider login.
pub const LOGIN_EMAIL_DOMAIN: &str = "stellar.duel";

pub const IMAGE_ROOT: &str = "/img";
pub const PACK_COVER_FOLDER: &str = "packs";

/// Shortest player-search term that runs a query.
pub const MIN_SEARCH_LEN: usize = 2;

/// Upper bound for a name-prefix range scan (the last BMP private-use code point).
pub const PREFIX_RANGE_END: char = '\u{f8ff}';

/// File name used when a remote catalog is cached locally.
pub const CATALOG_CACHE_FILE: &str = "catalog.json";

pub fn default_cache_dir() -> PathBuf {
    if let Some(cache) = dirs::cache_dir() {
        cache.join("stellar-duel-sdk")
    } else {
        PathBuf::from(".stellar-duel-sdk-cache")
    }
}
