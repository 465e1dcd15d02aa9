//! The storage abstraction shared by the in-memory and PostgreSQL backends.
//!
//! Ordering guarantees (identical in both backends):
//! - activity listings (prayers, fastings, readings): newest date first, then newest id
//! - groups: newest first
//! - members, achievements, quotes, sync records: oldest first (insertion order)
//! - challenges: latest start date first

use async_trait::async_trait;
use noor_core::types::{DbId, Timestamp};

use crate::error::StorageResult;
use crate::models::achievement::{Achievement, CreateAchievement};
use crate::models::challenge::{Challenge, CreateChallenge, UpdateChallenge};
use crate::models::fasting::{CreateFasting, Fasting, UpdateFasting};
use crate::models::group::{CreateGroup, CreateMembership, Group, GroupMembership, UpdateGroup};
use crate::models::prayer::{CreatePrayer, Prayer, UpdatePrayer};
use crate::models::quote::{CreateQuote, Quote};
use crate::models::quran::{CreateQuranReading, QuranReading, UpdateQuranReading};
use crate::models::sync_record::{CreateSyncRecord, SyncRecord, SyncTransition};
use crate::models::user::{CreateUser, UpdateUser, User};
use crate::models::DateRange;

/// Persistence operations for every entity type.
///
/// Create DTOs are expected to be validated by the caller; storage only
/// enforces uniqueness. Updates apply every `Some` field and keep the rest.
/// `update_*` returns `None` and `delete_*` returns `false` when no row has
/// the given id.
#[async_trait]
pub trait Storage: Send + Sync + 'static {
    /// Verify the backend is reachable.
    async fn health_check(&self) -> StorageResult<()>;

    /// Short backend name for logs (`"memory"` or `"postgres"`).
    fn backend_name(&self) -> &'static str;

    // --- users ---
    async fn create_user(&self, input: &CreateUser) -> StorageResult<User>;
    async fn find_user_by_id(&self, id: DbId) -> StorageResult<Option<User>>;
    async fn find_user_by_username(&self, username: &str) -> StorageResult<Option<User>>;
    async fn find_user_by_email(&self, email: &str) -> StorageResult<Option<User>>;
    async fn update_user(&self, id: DbId, input: &UpdateUser) -> StorageResult<Option<User>>;

    // --- prayers ---
    async fn create_prayer(&self, user_id: DbId, input: &CreatePrayer) -> StorageResult<Prayer>;
    async fn find_prayer(&self, id: DbId) -> StorageResult<Option<Prayer>>;
    async fn list_prayers(&self, user_id: DbId, range: DateRange) -> StorageResult<Vec<Prayer>>;
    async fn update_prayer(&self, id: DbId, input: &UpdatePrayer)
        -> StorageResult<Option<Prayer>>;
    async fn delete_prayer(&self, id: DbId) -> StorageResult<bool>;

    // --- fastings ---
    async fn create_fasting(&self, user_id: DbId, input: &CreateFasting)
        -> StorageResult<Fasting>;
    async fn find_fasting(&self, id: DbId) -> StorageResult<Option<Fasting>>;
    async fn list_fastings(&self, user_id: DbId, range: DateRange)
        -> StorageResult<Vec<Fasting>>;
    async fn update_fasting(
        &self,
        id: DbId,
        input: &UpdateFasting,
    ) -> StorageResult<Option<Fasting>>;
    async fn delete_fasting(&self, id: DbId) -> StorageResult<bool>;

    // --- quran readings ---
    async fn create_quran_reading(
        &self,
        user_id: DbId,
        input: &CreateQuranReading,
    ) -> StorageResult<QuranReading>;
    async fn find_quran_reading(&self, id: DbId) -> StorageResult<Option<QuranReading>>;
    async fn list_quran_readings(
        &self,
        user_id: DbId,
        range: DateRange,
    ) -> StorageResult<Vec<QuranReading>>;
    async fn update_quran_reading(
        &self,
        id: DbId,
        input: &UpdateQuranReading,
    ) -> StorageResult<Option<QuranReading>>;
    async fn delete_quran_reading(&self, id: DbId) -> StorageResult<bool>;

    // --- achievements ---
    async fn create_achievement(&self, input: &CreateAchievement) -> StorageResult<Achievement>;
    async fn list_achievements(&self, user_id: DbId) -> StorageResult<Vec<Achievement>>;

    // --- groups ---
    /// Create a group and make `owner_id` its owner in one atomic step.
    async fn create_group_with_owner(
        &self,
        owner_id: DbId,
        input: &CreateGroup,
    ) -> StorageResult<(Group, GroupMembership)>;
    async fn find_group(&self, id: DbId) -> StorageResult<Option<Group>>;
    /// Public groups plus every group `user_id` belongs to.
    async fn list_visible_groups(&self, user_id: DbId) -> StorageResult<Vec<Group>>;
    async fn update_group(&self, id: DbId, input: &UpdateGroup) -> StorageResult<Option<Group>>;
    /// Deletes the group together with its memberships and challenges.
    async fn delete_group(&self, id: DbId) -> StorageResult<bool>;

    // --- memberships ---
    async fn add_member(&self, input: &CreateMembership) -> StorageResult<GroupMembership>;
    async fn find_membership(
        &self,
        group_id: DbId,
        user_id: DbId,
    ) -> StorageResult<Option<GroupMembership>>;
    async fn list_members(&self, group_id: DbId) -> StorageResult<Vec<GroupMembership>>;
    async fn list_user_memberships(&self, user_id: DbId) -> StorageResult<Vec<GroupMembership>>;
    async fn remove_member(&self, group_id: DbId, user_id: DbId) -> StorageResult<bool>;

    // --- challenges ---
    async fn create_challenge(
        &self,
        group_id: DbId,
        created_by: DbId,
        input: &CreateChallenge,
    ) -> StorageResult<Challenge>;
    async fn find_challenge(&self, id: DbId) -> StorageResult<Option<Challenge>>;
    async fn list_challenges(&self, group_id: DbId) -> StorageResult<Vec<Challenge>>;
    async fn update_challenge(
        &self,
        id: DbId,
        input: &UpdateChallenge,
    ) -> StorageResult<Option<Challenge>>;
    async fn delete_challenge(&self, id: DbId) -> StorageResult<bool>;

    // --- sync records ---
    async fn create_sync_record(
        &self,
        user_id: DbId,
        input: &CreateSyncRecord,
    ) -> StorageResult<SyncRecord>;
    async fn find_sync_record(&self, id: DbId) -> StorageResult<Option<SyncRecord>>;
    async fn list_sync_records(
        &self,
        user_id: DbId,
        status: Option<&str>,
    ) -> StorageResult<Vec<SyncRecord>>;
    /// Apply `transition` only if the record still has `transition.from_status`.
    /// Returns `None` when the record is missing or its status has moved on.
    async fn transition_sync_record(
        &self,
        id: DbId,
        transition: &SyncTransition,
    ) -> StorageResult<Option<SyncRecord>>;
    async fn delete_sync_record(&self, id: DbId) -> StorageResult<bool>;
    /// Remove `synced` records last updated before `cutoff`. Returns the count.
    async fn purge_synced_before(&self, cutoff: Timestamp) -> StorageResult<u64>;

    // --- quotes ---
    async fn create_quote(&self, input: &CreateQuote) -> StorageResult<Quote>;
    async fn find_quote(&self, id: DbId) -> StorageResult<Option<Quote>>;
    async fn list_quotes(&self, category: Option<&str>) -> StorageResult<Vec<Quote>>;
    async fn delete_quote(&self, id: DbId) -> StorageResult<bool>;
}
