//! PostgreSQL [`Storage`] backend, delegating to the per-table repositories.

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
use crate::repositories::{
    AchievementRepo, ChallengeRepo, FastingRepo, GroupRepo, MembershipRepo, PrayerRepo,
    QuoteRepo, QuranReadingRepo, SyncRecordRepo, UserRepo,
};
use crate::storage::Storage;
use crate::DbPool;

/// Storage backed by a PostgreSQL connection pool.
#[derive(Clone)]
pub struct PgStorage {
    pool: DbPool,
}

impl PgStorage {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl Storage for PgStorage {
    async fn health_check(&self) -> StorageResult<()> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    // --- users ---

    async fn create_user(&self, input: &CreateUser) -> StorageResult<User> {
        Ok(UserRepo::create(&self.pool, input).await?)
    }

    async fn find_user_by_id(&self, id: DbId) -> StorageResult<Option<User>> {
        Ok(UserRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_user_by_username(&self, username: &str) -> StorageResult<Option<User>> {
        Ok(UserRepo::find_by_username(&self.pool, username).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> StorageResult<Option<User>> {
        Ok(UserRepo::find_by_email(&self.pool, email).await?)
    }

    async fn update_user(&self, id: DbId, input: &UpdateUser) -> StorageResult<Option<User>> {
        Ok(UserRepo::update(&self.pool, id, input).await?)
    }

    // --- prayers ---

    async fn create_prayer(&self, user_id: DbId, input: &CreatePrayer) -> StorageResult<Prayer> {
        Ok(PrayerRepo::create(&self.pool, user_id, input).await?)
    }

    async fn find_prayer(&self, id: DbId) -> StorageResult<Option<Prayer>> {
        Ok(PrayerRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_prayers(&self, user_id: DbId, range: DateRange) -> StorageResult<Vec<Prayer>> {
        Ok(PrayerRepo::list_for_user(&self.pool, user_id, range).await?)
    }

    async fn update_prayer(
        &self,
        id: DbId,
        input: &UpdatePrayer,
    ) -> StorageResult<Option<Prayer>> {
        Ok(PrayerRepo::update(&self.pool, id, input).await?)
    }

    async fn delete_prayer(&self, id: DbId) -> StorageResult<bool> {
        Ok(PrayerRepo::delete(&self.pool, id).await?)
    }

    // --- fastings ---

    async fn create_fasting(
        &self,
        user_id: DbId,
        input: &CreateFasting,
    ) -> StorageResult<Fasting> {
        Ok(FastingRepo::create(&self.pool, user_id, input).await?)
    }

    async fn find_fasting(&self, id: DbId) -> StorageResult<Option<Fasting>> {
        Ok(FastingRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_fastings(
        &self,
        user_id: DbId,
        range: DateRange,
    ) -> StorageResult<Vec<Fasting>> {
        Ok(FastingRepo::list_for_user(&self.pool, user_id, range).await?)
    }

    async fn update_fasting(
        &self,
        id: DbId,
        input: &UpdateFasting,
    ) -> StorageResult<Option<Fasting>> {
        Ok(FastingRepo::update(&self.pool, id, input).await?)
    }

    async fn delete_fasting(&self, id: DbId) -> StorageResult<bool> {
        Ok(FastingRepo::delete(&self.pool, id).await?)
    }

    // --- quran readings ---

    async fn create_quran_reading(
        &self,
        user_id: DbId,
        input: &CreateQuranReading,
    ) -> StorageResult<QuranReading> {
        Ok(QuranReadingRepo::create(&self.pool, user_id, input).await?)
    }

    async fn find_quran_reading(&self, id: DbId) -> StorageResult<Option<QuranReading>> {
        Ok(QuranReadingRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_quran_readings(
        &self,
        user_id: DbId,
        range: DateRange,
    ) -> StorageResult<Vec<QuranReading>> {
        Ok(QuranReadingRepo::list_for_user(&self.pool, user_id, range).await?)
    }

    async fn update_quran_reading(
        &self,
        id: DbId,
        input: &UpdateQuranReading,
    ) -> StorageResult<Option<QuranReading>> {
        Ok(QuranReadingRepo::update(&self.pool, id, input).await?)
    }

    async fn delete_quran_reading(&self, id: DbId) -> StorageResult<bool> {
        Ok(QuranReadingRepo::delete(&self.pool, id).await?)
    }

    // --- achievements ---

    async fn create_achievement(&self, input: &CreateAchievement) -> StorageResult<Achievement> {
        Ok(AchievementRepo::create(&self.pool, input).await?)
    }

    async fn list_achievements(&self, user_id: DbId) -> StorageResult<Vec<Achievement>> {
        Ok(AchievementRepo::list_for_user(&self.pool, user_id).await?)
    }

    // --- groups ---

    async fn create_group_with_owner(
        &self,
        owner_id: DbId,
        input: &CreateGroup,
    ) -> StorageResult<(Group, GroupMembership)> {
        Ok(GroupRepo::create_with_owner(&self.pool, owner_id, input).await?)
    }

    async fn find_group(&self, id: DbId) -> StorageResult<Option<Group>> {
        Ok(GroupRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_visible_groups(&self, user_id: DbId) -> StorageResult<Vec<Group>> {
        Ok(GroupRepo::list_visible(&self.pool, user_id).await?)
    }

    async fn update_group(&self, id: DbId, input: &UpdateGroup) -> StorageResult<Option<Group>> {
        Ok(GroupRepo::update(&self.pool, id, input).await?)
    }

    async fn delete_group(&self, id: DbId) -> StorageResult<bool> {
        Ok(GroupRepo::delete(&self.pool, id).await?)
    }

    // --- memberships ---

    async fn add_member(&self, input: &CreateMembership) -> StorageResult<GroupMembership> {
        Ok(MembershipRepo::create(&self.pool, input).await?)
    }

    async fn find_membership(
        &self,
        group_id: DbId,
        user_id: DbId,
    ) -> StorageResult<Option<GroupMembership>> {
        Ok(MembershipRepo::find(&self.pool, group_id, user_id).await?)
    }

    async fn list_members(&self, group_id: DbId) -> StorageResult<Vec<GroupMembership>> {
        Ok(MembershipRepo::list_for_group(&self.pool, group_id).await?)
    }

    async fn list_user_memberships(&self, user_id: DbId) -> StorageResult<Vec<GroupMembership>> {
        Ok(MembershipRepo::list_for_user(&self.pool, user_id).await?)
    }

    async fn remove_member(&self, group_id: DbId, user_id: DbId) -> StorageResult<bool> {
        Ok(MembershipRepo::delete(&self.pool, group_id, user_id).await?)
    }

    // --- challenges ---

    async fn create_challenge(
        &self,
        group_id: DbId,
        created_by: DbId,
        input: &CreateChallenge,
    ) -> StorageResult<Challenge> {
        Ok(ChallengeRepo::create(&self.pool, group_id, created_by, input).await?)
    }

    async fn find_challenge(&self, id: DbId) -> StorageResult<Option<Challenge>> {
        Ok(ChallengeRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_challenges(&self, group_id: DbId) -> StorageResult<Vec<Challenge>> {
        Ok(ChallengeRepo::list_for_group(&self.pool, group_id).await?)
    }

    async fn update_challenge(
        &self,
        id: DbId,
        input: &UpdateChallenge,
    ) -> StorageResult<Option<Challenge>> {
        Ok(ChallengeRepo::update(&self.pool, id, input).await?)
    }

    async fn delete_challenge(&self, id: DbId) -> StorageResult<bool> {
        Ok(ChallengeRepo::delete(&self.pool, id).await?)
    }

    // --- sync records ---

    async fn create_sync_record(
        &self,
        user_id: DbId,
        input: &CreateSyncRecord,
    ) -> StorageResult<SyncRecord> {
        Ok(SyncRecordRepo::create(&self.pool, user_id, input).await?)
    }

    async fn find_sync_record(&self, id: DbId) -> StorageResult<Option<SyncRecord>> {
        Ok(SyncRecordRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_sync_records(
        &self,
        user_id: DbId,
        status: Option<&str>,
    ) -> StorageResult<Vec<SyncRecord>> {
        Ok(SyncRecordRepo::list_for_user(&self.pool, user_id, status).await?)
    }

    async fn transition_sync_record(
        &self,
        id: DbId,
        transition: &SyncTransition,
    ) -> StorageResult<Option<SyncRecord>> {
        Ok(SyncRecordRepo::transition(&self.pool, id, transition).await?)
    }

    async fn delete_sync_record(&self, id: DbId) -> StorageResult<bool> {
        Ok(SyncRecordRepo::delete(&self.pool, id).await?)
    }

    async fn purge_synced_before(&self, cutoff: Timestamp) -> StorageResult<u64> {
        Ok(SyncRecordRepo::purge_synced_before(&self.pool, cutoff).await?)
    }

    // --- quotes ---

    async fn create_quote(&self, input: &CreateQuote) -> StorageResult<Quote> {
        Ok(QuoteRepo::create(&self.pool, input).await?)
    }

    async fn find_quote(&self, id: DbId) -> StorageResult<Option<Quote>> {
        Ok(QuoteRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_quotes(&self, category: Option<&str>) -> StorageResult<Vec<Quote>> {
        Ok(QuoteRepo::list(&self.pool, category).await?)
    }

    async fn delete_quote(&self, id: DbId) -> StorageResult<bool> {
        Ok(QuoteRepo::delete(&self.pool, id).await?)
    }
}
