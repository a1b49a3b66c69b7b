// Trust tier resolution and bet authorization

pub mod authorization;
pub mod tiers;

pub use authorization::*;
pub use tiers::*;
