//! Zero-sized repository structs, one per table, operating on a `&PgPool`.

pub mod achievement_repo;
pub mod challenge_repo;
pub mod fasting_repo;
pub mod group_repo;
pub mod membership_repo;
pub mod prayer_repo;
pub mod quote_repo;
pub mod quran_reading_repo;
pub mod sync_record_repo;
pub mod user_repo;

pub use achievement_repo::AchievementRepo;
pub use challenge_repo::ChallengeRepo;
pub use fasting_repo::FastingRepo;
pub use group_repo::GroupRepo;
pub use membership_repo::MembershipRepo;
pub use prayer_repo::PrayerRepo;
pub use quote_repo::QuoteRepo;
pub use quran_reading_repo::QuranReadingRepo;
pub use sync_record_repo::SyncRecordRepo;
pub use user_repo::UserRepo;
