pub mod competitions;
pub mod entries;
pub mod saved;
