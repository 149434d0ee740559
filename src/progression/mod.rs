pub mod experience;
pub mod rewards;

pub use experience::{level_for_experience, xp_for_next_level, xp_to_reach_level, MAX_LEVEL};
pub use rewards::experience_yield;
