pub mod attendance;
pub mod auth;
pub mod dialer;
pub mod leaderboard;
pub mod leads;
pub mod stats;
pub mod webhook;
