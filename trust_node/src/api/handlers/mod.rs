pub mod bets;
pub mod devices;
pub mod status;
