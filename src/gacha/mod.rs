//! Pack opening ("gacha"): the draw engine, the inventory merge, and the
//! opener that ties them to a document store.

pub mod draw;
pub mod merge;
pub mod opener;

pub use draw::{draw, draw_random};
pub use merge::{apply_draw, draw_update};
pub use opener::{PackOpener, PackOpening};
