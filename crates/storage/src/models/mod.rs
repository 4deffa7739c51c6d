mod competition;
mod difficulty;
mod entry;

pub use competition::{Competition, ONGOING_DEADLINE};
pub use difficulty::{Difficulty, InvalidDifficulty};
pub use entry::{CompetitionEntry, SavedCompetition};
