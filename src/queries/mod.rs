//! Query modules for the Stellar Duel SDK.
//!
//! Each module provides a query struct that borrows the SDK's
//! [`DocumentStore`](crate::store::DocumentStore) and exposes methods
//! returning `Result<T>`.

pub mod players;

pub use players::{PlayerQuery, PlayerSummary};
