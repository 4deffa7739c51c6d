pub mod competition;
pub mod entry;
pub mod filter;
