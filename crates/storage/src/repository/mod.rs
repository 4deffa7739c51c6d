pub mod competition;
pub mod entry;
