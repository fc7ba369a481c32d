pub mod attendance;
pub mod auth;
pub mod leaderboard;
pub mod leads;
pub mod stats;
