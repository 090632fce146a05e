//! Async wrapper around [`StellarDuelSdk`] for use in async runtimes (Tokio, etc.).
//!
//! Store access is blocking (DuckDB, file IO), so every operation runs on the
//! blocking thread pool via [`tokio::task::spawn_blocking`], keeping the async
//! event loop free.
//!
//! # Example
//!
//! ```no_run
//! use stellar_duel_sdk::{AsyncStellarDuelSdk, StellarDuelSdk};
//!
//! #[tokio::main]
//! async fn main() {
//!     let sdk = AsyncStellarDuelSdk::new(StellarDuelSdk::builder().build().unwrap());
//!
//!     let opening = sdk.open_pack("uid-kael", "starter").await.unwrap();
//!     println!("pulled {} cards", opening.cards.len());
//! }
//! ```

use std::sync::Arc;

use crate::error::{Result, StellarError};
use crate::gacha::PackOpening;
use crate::stats::Dashboard;
use crate::StellarDuelSdk;

/// Async wrapper around [`StellarDuelSdk`].
///
/// The SDK is shared behind an `Arc`; its store serializes conflicting
/// updates itself, so concurrent tasks need no extra locking here.
#[derive(Clone)]
pub struct AsyncStellarDuelSdk {
    inner: Arc<StellarDuelSdk>,
}

impl AsyncStellarDuelSdk {
    pub fn new(sdk: StellarDuelSdk) -> Self {
        Self {
            inner: Arc::new(sdk),
        }
    }

    /// Run a sync SDK operation on the blocking thread pool.
    ///
    /// The closure receives an `&StellarDuelSdk` reference and should return
    /// a `Result<T>`.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&StellarDuelSdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || f(sdk.as_ref()))
            .await
            .map_err(|e| StellarError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Open one pack asynchronously.
    ///
    /// Await the result before offering the same opening again; a draw is
    /// only received once this resolves to `Ok`.
    pub async fn open_pack(&self, uid: &str, pack_id: &str) -> Result<PackOpening> {
        let uid = uid.to_string();
        let pack_id = pack_id.to_string();
        self.run(move |s| s.open_pack(&uid, &pack_id)).await
    }

    /// Load a player's dashboard asynchronously.
    pub async fn dashboard(&self, uid: &str) -> Result<Dashboard> {
        let uid = uid.to_string();
        self.run(move |s| s.dashboard(&uid)).await
    }

    /// Borrow the wrapped sync SDK.
    pub fn inner(&self) -> &StellarDuelSdk {
        &self.inner
    }
}
