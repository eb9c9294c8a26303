pub mod export;
pub mod model;
pub mod ranking;
pub mod roster;
pub mod schedule;
pub mod session;
pub mod state;
pub mod store;
