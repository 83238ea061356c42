pub mod export;
mod import;
pub mod operations;
mod stats;

pub use export::roster_text;
pub use import::BatchParser;
pub use operations::*;
pub use stats::{average_present_skill, RosterStats};
