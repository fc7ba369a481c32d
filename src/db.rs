pub mod user_repo;
pub use user_repo::UserRepository;
pub mod attendance_repo;
pub use attendance_repo::AttendanceRepository;
pub mod stats_repo;
pub use stats_repo::StatsRepository;
pub mod leads_repo;
pub use leads_repo::LeadsRepository;
pub mod leaderboard_repo;
pub use leaderboard_repo::LeaderboardRepository;
