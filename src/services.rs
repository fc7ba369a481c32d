pub mod attendance_service;
pub mod auth;
pub mod clock;
pub mod duration;
pub mod lead_service;
pub mod leaderboard_service;
pub mod salary_service;
pub mod shift;
pub mod telephony;
