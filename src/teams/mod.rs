mod balance;
pub mod balancer;
mod moves;

pub use balance::{average_skill, total_weight, BalanceReport, TeamBalance};
pub use balancer::{generate_teams, snake_draft, snake_slot, MAX_TEAM_COUNT, MIN_TEAM_COUNT};
pub use moves::move_player_between_teams;
