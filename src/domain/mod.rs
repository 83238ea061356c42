mod capabilities;
pub mod models;
pub mod seed;
pub mod timestamps;

pub use capabilities::{Clock, FixedClock, IdGenerator, SequentialIds, SystemClock, UuidGenerator};
pub use models::*;
