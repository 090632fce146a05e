pub mod card;
pub mod pack;
pub mod profile;

pub use card::*;
pub use pack::*;
pub use profile::*;
