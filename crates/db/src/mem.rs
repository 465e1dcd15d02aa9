//! In-memory [`Storage`] backend.
//!
//! One map per entity type, keyed by an auto-incrementing id, all behind a
//! single async `RwLock`. Uniqueness rules and the group delete cascade mirror
//! the SQL schema so both backends behave the same to callers.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use noor_core::roles::MEMBER_ROLE_OWNER;
use noor_core::types::{DbId, Timestamp};
use tokio::sync::RwLock;

use crate::error::{
    StorageError, StorageResult, UQ_ACHIEVEMENTS_USER_KIND, UQ_FASTINGS_USER_DATE,
    UQ_MEMBERSHIPS_GROUP_USER, UQ_PRAYERS_USER_DATE_NAME, UQ_USERS_EMAIL, UQ_USERS_USERNAME,
};
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
use crate::storage::Storage;

/// Rows of one entity type plus its id sequence.
struct Table<T> {
    rows: BTreeMap<DbId, T>,
    last_id: DbId,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T: Clone> Table<T> {
    fn next_id(&mut self) -> DbId {
        self.last_id += 1;
        self.last_id
    }

    fn get(&self, id: DbId) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    fn values(&self) -> impl DoubleEndedIterator<Item = &T> {
        self.rows.values()
    }

    fn remove(&mut self, id: DbId) -> bool {
        self.rows.remove(&id).is_some()
    }
}

#[derive(Default)]
struct Tables {
    users: Table<User>,
    prayers: Table<Prayer>,
    fastings: Table<Fasting>,
    quran_readings: Table<QuranReading>,
    achievements: Table<Achievement>,
    groups: Table<Group>,
    memberships: Table<GroupMembership>,
    challenges: Table<Challenge>,
    sync_records: Table<SyncRecord>,
    quotes: Table<Quote>,
}

/// In-memory storage. Cheap to construct; intended for development and tests.
#[derive(Default)]
pub struct MemStorage {
    tables: RwLock<Tables>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn now() -> Timestamp {
    Utc::now()
}

/// Sort activity rows newest date first, then newest id.
fn sort_by_day_desc<T>(rows: &mut [T], key: impl Fn(&T) -> (chrono::NaiveDate, DbId)) {
    rows.sort_by(|a, b| key(b).cmp(&key(a)));
}

#[async_trait]
impl Storage for MemStorage {
    async fn health_check(&self) -> StorageResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }

    // -----------------------------------------------------------------------
    // Users
    // -----------------------------------------------------------------------

    async fn create_user(&self, input: &CreateUser) -> StorageResult<User> {
        let mut t = self.tables.write().await;
        if t.users.values().any(|u| u.username == input.username) {
            return Err(StorageError::UniqueViolation(UQ_USERS_USERNAME));
        }
        if t.users.values().any(|u| u.email == input.email) {
            return Err(StorageError::UniqueViolation(UQ_USERS_EMAIL));
        }
        let id = t.users.next_id();
        let ts = now();
        let user = User {
            id,
            username: input.username.clone(),
            email: input.email.clone(),
            password_hash: input.password_hash.clone(),
            display_name: input.display_name.clone(),
            role: input.role.clone(),
            created_at: ts,
            updated_at: ts,
        };
        t.users.rows.insert(id, user.clone());
        Ok(user)
    }

    async fn find_user_by_id(&self, id: DbId) -> StorageResult<Option<User>> {
        Ok(self.tables.read().await.users.get(id))
    }

    async fn find_user_by_username(&self, username: &str) -> StorageResult<Option<User>> {
        let t = self.tables.read().await;
        let found = t.users.values().find(|u| u.username == username).cloned();
        Ok(found)
    }

    async fn find_user_by_email(&self, email: &str) -> StorageResult<Option<User>> {
        let t = self.tables.read().await;
        let found = t.users.values().find(|u| u.email == email).cloned();
        Ok(found)
    }

    async fn update_user(&self, id: DbId, input: &UpdateUser) -> StorageResult<Option<User>> {
        let mut t = self.tables.write().await;
        if let Some(email) = &input.email {
            if t.users.values().any(|u| u.id != id && &u.email == email) {
                return Err(StorageError::UniqueViolation(UQ_USERS_EMAIL));
            }
        }
        let Some(user) = t.users.rows.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(email) = &input.email {
            user.email = email.clone();
        }
        if let Some(display_name) = &input.display_name {
            user.display_name = Some(display_name.clone());
        }
        user.updated_at = now();
        Ok(Some(user.clone()))
    }

    // -----------------------------------------------------------------------
    // Prayers
    // -----------------------------------------------------------------------

    async fn create_prayer(&self, user_id: DbId, input: &CreatePrayer) -> StorageResult<Prayer> {
        let mut t = self.tables.write().await;
        if t.prayers.values().any(|p| {
            p.user_id == user_id && p.prayer_date == input.prayer_date && p.name == input.name
        }) {
            return Err(StorageError::UniqueViolation(UQ_PRAYERS_USER_DATE_NAME));
        }
        let id = t.prayers.next_id();
        let ts = now();
        let prayer = Prayer {
            id,
            user_id,
            name: input.name.clone(),
            prayer_date: input.prayer_date,
            status: input
                .status
                .clone()
                .unwrap_or_else(|| noor_core::prayer::DEFAULT_STATUS.to_string()),
            in_congregation: input.in_congregation,
            notes: input.notes.clone(),
            created_at: ts,
            updated_at: ts,
        };
        t.prayers.rows.insert(id, prayer.clone());
        Ok(prayer)
    }

    async fn find_prayer(&self, id: DbId) -> StorageResult<Option<Prayer>> {
        Ok(self.tables.read().await.prayers.get(id))
    }

    async fn list_prayers(&self, user_id: DbId, range: DateRange) -> StorageResult<Vec<Prayer>> {
        let t = self.tables.read().await;
        let mut rows: Vec<Prayer> = t
            .prayers
            .values()
            .filter(|p| p.user_id == user_id && range.contains(p.prayer_date))
            .cloned()
            .collect();
        sort_by_day_desc(&mut rows, |p| (p.prayer_date, p.id));
        Ok(rows)
    }

    async fn update_prayer(
        &self,
        id: DbId,
        input: &UpdatePrayer,
    ) -> StorageResult<Option<Prayer>> {
        let mut t = self.tables.write().await;
        let Some(current) = t.prayers.get(id) else {
            return Ok(None);
        };
        let name = input.name.clone().unwrap_or(current.name.clone());
        let date = input.prayer_date.unwrap_or(current.prayer_date);
        if t.prayers.values().any(|p| {
            p.id != id && p.user_id == current.user_id && p.prayer_date == date && p.name == name
        }) {
            return Err(StorageError::UniqueViolation(UQ_PRAYERS_USER_DATE_NAME));
        }
        let Some(prayer) = t.prayers.rows.get_mut(&id) else {
            return Ok(None);
        };
        prayer.name = name;
        prayer.prayer_date = date;
        if let Some(status) = &input.status {
            prayer.status = status.clone();
        }
        if let Some(in_congregation) = input.in_congregation {
            prayer.in_congregation = in_congregation;
        }
        if let Some(notes) = &input.notes {
            prayer.notes = Some(notes.clone());
        }
        prayer.updated_at = now();
        Ok(Some(prayer.clone()))
    }

    async fn delete_prayer(&self, id: DbId) -> StorageResult<bool> {
        Ok(self.tables.write().await.prayers.remove(id))
    }

    // -----------------------------------------------------------------------
    // Fastings
    // -----------------------------------------------------------------------

    async fn create_fasting(
        &self,
        user_id: DbId,
        input: &CreateFasting,
    ) -> StorageResult<Fasting> {
        let mut t = self.tables.write().await;
        if t.fastings
            .values()
            .any(|f| f.user_id == user_id && f.fast_date == input.fast_date)
        {
            return Err(StorageError::UniqueViolation(UQ_FASTINGS_USER_DATE));
        }
        let id = t.fastings.next_id();
        let ts = now();
        let fasting = Fasting {
            id,
            user_id,
            fast_date: input.fast_date,
            fast_type: input.fast_type.clone(),
            completed: input.completed.unwrap_or(true),
            notes: input.notes.clone(),
            created_at: ts,
            updated_at: ts,
        };
        t.fastings.rows.insert(id, fasting.clone());
        Ok(fasting)
    }

    async fn find_fasting(&self, id: DbId) -> StorageResult<Option<Fasting>> {
        Ok(self.tables.read().await.fastings.get(id))
    }

    async fn list_fastings(
        &self,
        user_id: DbId,
        range: DateRange,
    ) -> StorageResult<Vec<Fasting>> {
        let t = self.tables.read().await;
        let mut rows: Vec<Fasting> = t
            .fastings
            .values()
            .filter(|f| f.user_id == user_id && range.contains(f.fast_date))
            .cloned()
            .collect();
        sort_by_day_desc(&mut rows, |f| (f.fast_date, f.id));
        Ok(rows)
    }

    async fn update_fasting(
        &self,
        id: DbId,
        input: &UpdateFasting,
    ) -> StorageResult<Option<Fasting>> {
        let mut t = self.tables.write().await;
        let Some(current) = t.fastings.get(id) else {
            return Ok(None);
        };
        let date = input.fast_date.unwrap_or(current.fast_date);
        if t.fastings
            .values()
            .any(|f| f.id != id && f.user_id == current.user_id && f.fast_date == date)
        {
            return Err(StorageError::UniqueViolation(UQ_FASTINGS_USER_DATE));
        }
        let Some(fasting) = t.fastings.rows.get_mut(&id) else {
            return Ok(None);
        };
        fasting.fast_date = date;
        if let Some(fast_type) = &input.fast_type {
            fasting.fast_type = fast_type.clone();
        }
        if let Some(completed) = input.completed {
            fasting.completed = completed;
        }
        if let Some(notes) = &input.notes {
            fasting.notes = Some(notes.clone());
        }
        fasting.updated_at = now();
        Ok(Some(fasting.clone()))
    }

    async fn delete_fasting(&self, id: DbId) -> StorageResult<bool> {
        Ok(self.tables.write().await.fastings.remove(id))
    }

    // -----------------------------------------------------------------------
    // Quran readings
    // -----------------------------------------------------------------------

    async fn create_quran_reading(
        &self,
        user_id: DbId,
        input: &CreateQuranReading,
    ) -> StorageResult<QuranReading> {
        let mut t = self.tables.write().await;
        let id = t.quran_readings.next_id();
        let ts = now();
        let reading = QuranReading {
            id,
            user_id,
            reading_date: input.reading_date,
            surah: input.surah,
            start_ayah: input.start_ayah,
            end_ayah: input.end_ayah,
            pages: input.pages,
            duration_minutes: input.duration_minutes,
            notes: input.notes.clone(),
            created_at: ts,
            updated_at: ts,
        };
        t.quran_readings.rows.insert(id, reading.clone());
        Ok(reading)
    }

    async fn find_quran_reading(&self, id: DbId) -> StorageResult<Option<QuranReading>> {
        Ok(self.tables.read().await.quran_readings.get(id))
    }

    async fn list_quran_readings(
        &self,
        user_id: DbId,
        range: DateRange,
    ) -> StorageResult<Vec<QuranReading>> {
        let t = self.tables.read().await;
        let mut rows: Vec<QuranReading> = t
            .quran_readings
            .values()
            .filter(|r| r.user_id == user_id && range.contains(r.reading_date))
            .cloned()
            .collect();
        sort_by_day_desc(&mut rows, |r| (r.reading_date, r.id));
        Ok(rows)
    }

    async fn update_quran_reading(
        &self,
        id: DbId,
        input: &UpdateQuranReading,
    ) -> StorageResult<Option<QuranReading>> {
        let mut t = self.tables.write().await;
        let Some(reading) = t.quran_readings.rows.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(date) = input.reading_date {
            reading.reading_date = date;
        }
        if let Some(surah) = input.surah {
            reading.surah = surah;
        }
        if let Some(start) = input.start_ayah {
            reading.start_ayah = start;
        }
        if let Some(end) = input.end_ayah {
            reading.end_ayah = end;
        }
        if let Some(pages) = input.pages {
            reading.pages = Some(pages);
        }
        if let Some(minutes) = input.duration_minutes {
            reading.duration_minutes = Some(minutes);
        }
        if let Some(notes) = &input.notes {
            reading.notes = Some(notes.clone());
        }
        reading.updated_at = now();
        Ok(Some(reading.clone()))
    }

    async fn delete_quran_reading(&self, id: DbId) -> StorageResult<bool> {
        Ok(self.tables.write().await.quran_readings.remove(id))
    }

    // -----------------------------------------------------------------------
    // Achievements
    // -----------------------------------------------------------------------

    async fn create_achievement(&self, input: &CreateAchievement) -> StorageResult<Achievement> {
        let mut t = self.tables.write().await;
        if t.achievements
            .values()
            .any(|a| a.user_id == input.user_id && a.kind == input.kind)
        {
            return Err(StorageError::UniqueViolation(UQ_ACHIEVEMENTS_USER_KIND));
        }
        let id = t.achievements.next_id();
        let achievement = Achievement {
            id,
            user_id: input.user_id,
            kind: input.kind.clone(),
            title: input.title.clone(),
            description: input.description.clone(),
            earned_at: now(),
        };
        t.achievements.rows.insert(id, achievement.clone());
        Ok(achievement)
    }

    async fn list_achievements(&self, user_id: DbId) -> StorageResult<Vec<Achievement>> {
        let t = self.tables.read().await;
        Ok(t.achievements
            .values()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect())
    }

    // -----------------------------------------------------------------------
    // Groups
    // -----------------------------------------------------------------------

    async fn create_group_with_owner(
        &self,
        owner_id: DbId,
        input: &CreateGroup,
    ) -> StorageResult<(Group, GroupMembership)> {
        let mut t = self.tables.write().await;
        let ts = now();
        let group = Group {
            id: t.groups.next_id(),
            name: input.name.clone(),
            description: input.description.clone(),
            created_by: owner_id,
            is_public: input.is_public.unwrap_or(true),
            created_at: ts,
            updated_at: ts,
        };
        let owner = GroupMembership {
            id: t.memberships.next_id(),
            group_id: group.id,
            user_id: owner_id,
            role: MEMBER_ROLE_OWNER.to_string(),
            joined_at: ts,
        };
        t.groups.rows.insert(group.id, group.clone());
        t.memberships.rows.insert(owner.id, owner.clone());
        Ok((group, owner))
    }

    async fn find_group(&self, id: DbId) -> StorageResult<Option<Group>> {
        Ok(self.tables.read().await.groups.get(id))
    }

    async fn list_visible_groups(&self, user_id: DbId) -> StorageResult<Vec<Group>> {
        let t = self.tables.read().await;
        let member_of: Vec<DbId> = t
            .memberships
            .values()
            .filter(|m| m.user_id == user_id)
            .map(|m| m.group_id)
            .collect();
        Ok(t.groups
            .values()
            .rev()
            .filter(|g| g.is_public || member_of.contains(&g.id))
            .cloned()
            .collect())
    }

    async fn update_group(&self, id: DbId, input: &UpdateGroup) -> StorageResult<Option<Group>> {
        let mut t = self.tables.write().await;
        let Some(group) = t.groups.rows.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = &input.name {
            group.name = name.clone();
        }
        if let Some(description) = &input.description {
            group.description = Some(description.clone());
        }
        if let Some(is_public) = input.is_public {
            group.is_public = is_public;
        }
        group.updated_at = now();
        Ok(Some(group.clone()))
    }

    async fn delete_group(&self, id: DbId) -> StorageResult<bool> {
        let mut t = self.tables.write().await;
        if !t.groups.remove(id) {
            return Ok(false);
        }
        t.memberships.rows.retain(|_, m| m.group_id != id);
        t.challenges.rows.retain(|_, c| c.group_id != id);
        Ok(true)
    }

    // -----------------------------------------------------------------------
    // Memberships
    // -----------------------------------------------------------------------

    async fn add_member(&self, input: &CreateMembership) -> StorageResult<GroupMembership> {
        let mut t = self.tables.write().await;
        if t.memberships
            .values()
            .any(|m| m.group_id == input.group_id && m.user_id == input.user_id)
        {
            return Err(StorageError::UniqueViolation(UQ_MEMBERSHIPS_GROUP_USER));
        }
        let id = t.memberships.next_id();
        let membership = GroupMembership {
            id,
            group_id: input.group_id,
            user_id: input.user_id,
            role: input.role.clone(),
            joined_at: now(),
        };
        t.memberships.rows.insert(id, membership.clone());
        Ok(membership)
    }

    async fn find_membership(
        &self,
        group_id: DbId,
        user_id: DbId,
    ) -> StorageResult<Option<GroupMembership>> {
        let t = self.tables.read().await;
        let found = t
            .memberships
            .values()
            .find(|m| m.group_id == group_id && m.user_id == user_id)
            .cloned();
        Ok(found)
    }

    async fn list_members(&self, group_id: DbId) -> StorageResult<Vec<GroupMembership>> {
        let t = self.tables.read().await;
        Ok(t.memberships
            .values()
            .filter(|m| m.group_id == group_id)
            .cloned()
            .collect())
    }

    async fn list_user_memberships(&self, user_id: DbId) -> StorageResult<Vec<GroupMembership>> {
        let t = self.tables.read().await;
        Ok(t.memberships
            .values()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn remove_member(&self, group_id: DbId, user_id: DbId) -> StorageResult<bool> {
        let mut t = self.tables.write().await;
        let before = t.memberships.rows.len();
        t.memberships
            .rows
            .retain(|_, m| !(m.group_id == group_id && m.user_id == user_id));
        Ok(t.memberships.rows.len() < before)
    }

    // -----------------------------------------------------------------------
    // Challenges
    // -----------------------------------------------------------------------

    async fn create_challenge(
        &self,
        group_id: DbId,
        created_by: DbId,
        input: &CreateChallenge,
    ) -> StorageResult<Challenge> {
        let mut t = self.tables.write().await;
        let id = t.challenges.next_id();
        let ts = now();
        let challenge = Challenge {
            id,
            group_id,
            created_by,
            title: input.title.clone(),
            description: input.description.clone(),
            kind: input.kind.clone(),
            target: input.target,
            start_date: input.start_date,
            end_date: input.end_date,
            created_at: ts,
            updated_at: ts,
        };
        t.challenges.rows.insert(id, challenge.clone());
        Ok(challenge)
    }

    async fn find_challenge(&self, id: DbId) -> StorageResult<Option<Challenge>> {
        Ok(self.tables.read().await.challenges.get(id))
    }

    async fn list_challenges(&self, group_id: DbId) -> StorageResult<Vec<Challenge>> {
        let t = self.tables.read().await;
        let mut rows: Vec<Challenge> = t
            .challenges
            .values()
            .filter(|c| c.group_id == group_id)
            .cloned()
            .collect();
        sort_by_day_desc(&mut rows, |c| (c.start_date, c.id));
        Ok(rows)
    }

    async fn update_challenge(
        &self,
        id: DbId,
        input: &UpdateChallenge,
    ) -> StorageResult<Option<Challenge>> {
        let mut t = self.tables.write().await;
        let Some(challenge) = t.challenges.rows.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(title) = &input.title {
            challenge.title = title.clone();
        }
        if let Some(description) = &input.description {
            challenge.description = Some(description.clone());
        }
        if let Some(target) = input.target {
            challenge.target = target;
        }
        if let Some(start) = input.start_date {
            challenge.start_date = start;
        }
        if let Some(end) = input.end_date {
            challenge.end_date = end;
        }
        challenge.updated_at = now();
        Ok(Some(challenge.clone()))
    }

    async fn delete_challenge(&self, id: DbId) -> StorageResult<bool> {
        Ok(self.tables.write().await.challenges.remove(id))
    }

    // -----------------------------------------------------------------------
    // Sync records
    // -----------------------------------------------------------------------

    async fn create_sync_record(
        &self,
        user_id: DbId,
        input: &CreateSyncRecord,
    ) -> StorageResult<SyncRecord> {
        let mut t = self.tables.write().await;
        let id = t.sync_records.next_id();
        let ts = now();
        let record = SyncRecord {
            id,
            user_id,
            endpoint: input.endpoint.clone(),
            method: input.method.clone(),
            payload: input.payload.clone(),
            status: noor_core::sync::STATUS_PENDING.to_string(),
            attempts: 0,
            last_error: None,
            created_at: ts,
            updated_at: ts,
        };
        t.sync_records.rows.insert(id, record.clone());
        Ok(record)
    }

    async fn find_sync_record(&self, id: DbId) -> StorageResult<Option<SyncRecord>> {
        Ok(self.tables.read().await.sync_records.get(id))
    }

    async fn list_sync_records(
        &self,
        user_id: DbId,
        status: Option<&str>,
    ) -> StorageResult<Vec<SyncRecord>> {
        let t = self.tables.read().await;
        Ok(t.sync_records
            .values()
            .filter(|r| r.user_id == user_id && status.map_or(true, |s| r.status == s))
            .cloned()
            .collect())
    }

    async fn transition_sync_record(
        &self,
        id: DbId,
        transition: &SyncTransition,
    ) -> StorageResult<Option<SyncRecord>> {
        let mut t = self.tables.write().await;
        let Some(record) = t.sync_records.rows.get_mut(&id) else {
            return Ok(None);
        };
        if record.status != transition.from_status {
            return Ok(None);
        }
        record.status = transition.status.clone();
        record.last_error = transition.last_error.clone();
        if transition.attempted {
            record.attempts += 1;
        }
        record.updated_at = now();
        Ok(Some(record.clone()))
    }

    async fn delete_sync_record(&self, id: DbId) -> StorageResult<bool> {
        Ok(self.tables.write().await.sync_records.remove(id))
    }

    async fn purge_synced_before(&self, cutoff: Timestamp) -> StorageResult<u64> {
        let mut t = self.tables.write().await;
        let before = t.sync_records.rows.len();
        t.sync_records.rows.retain(|_, r| {
            !(r.status == noor_core::sync::STATUS_SYNCED && r.updated_at < cutoff)
        });
        Ok((before - t.sync_records.rows.len()) as u64)
    }

    // -----------------------------------------------------------------------
    // Quotes
    // -----------------------------------------------------------------------

    async fn create_quote(&self, input: &CreateQuote) -> StorageResult<Quote> {
        let mut t = self.tables.write().await;
        let id = t.quotes.next_id();
        let quote = Quote {
            id,
            text: input.text.clone(),
            source: input.source.clone(),
            category: input.category.clone(),
            created_at: now(),
        };
        t.quotes.rows.insert(id, quote.clone());
        Ok(quote)
    }

    async fn find_quote(&self, id: DbId) -> StorageResult<Option<Quote>> {
        Ok(self.tables.read().await.quotes.get(id))
    }

    async fn list_quotes(&self, category: Option<&str>) -> StorageResult<Vec<Quote>> {
        let t = self.tables.read().await;
        Ok(t.quotes
            .values()
            .filter(|q| category.map_or(true, |c| q.category.as_deref() == Some(c)))
            .cloned()
            .collect())
    }

    async fn delete_quote(&self, id: DbId) -> StorageResult<bool> {
        Ok(self.tables.write().await.quotes.remove(id))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::NaiveDate;

    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn new_user(name: &str) -> CreateUser {
        CreateUser {
            username: name.to_string(),
            email: format!("{name}@example.com"),
            password_hash: "hash".to_string(),
            display_name: None,
            role: noor_core::roles::ROLE_USER.to_string(),
        }
    }

    fn new_prayer(name: &str, date: NaiveDate) -> CreatePrayer {
        CreatePrayer {
            name: name.to_string(),
            prayer_date: date,
            status: None,
            in_congregation: false,
            notes: None,
        }
    }

    #[tokio::test]
    async fn ids_auto_increment_per_table() {
        let store = MemStorage::new();
        let a = store.create_user(&new_user("amina")).await.unwrap();
        let b = store.create_user(&new_user("bilal")).await.unwrap();
        let p = store.create_prayer(a.id, &new_prayer("fajr", day(1))).await.unwrap();
        assert_eq!((a.id, b.id, p.id), (1, 2, 1));
    }

    #[tokio::test]
    async fn duplicate_username_is_unique_violation() {
        let store = MemStorage::new();
        store.create_user(&new_user("amina")).await.unwrap();
        let mut dup = new_user("amina");
        dup.email = "other@example.com".into();
        assert_matches!(
            store.create_user(&dup).await,
            Err(StorageError::UniqueViolation(UQ_USERS_USERNAME))
        );
    }

    #[tokio::test]
    async fn users_found_by_username_and_email() {
        let store = MemStorage::new();
        let amina = store.create_user(&new_user("amina")).await.unwrap();
        store.create_user(&new_user("bilal")).await.unwrap();

        let by_name = store.find_user_by_username("amina").await.unwrap().unwrap();
        assert_eq!(by_name.id, amina.id);
        let by_email = store.find_user_by_email("amina@example.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, amina.id);
        assert!(store.find_user_by_username("omar").await.unwrap().is_none());
        assert!(store.find_user_by_email("omar@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn prayer_defaults_and_uniqueness() {
        let store = MemStorage::new();
        let p = store.create_prayer(1, &new_prayer("asr", day(2))).await.unwrap();
        assert_eq!(p.status, "on_time");

        let err = store.create_prayer(1, &new_prayer("asr", day(2))).await.unwrap_err();
        assert!(err.is_unique_violation());

        // Different user, same day and prayer: fine.
        assert!(store.create_prayer(2, &new_prayer("asr", day(2))).await.is_ok());
    }

    #[tokio::test]
    async fn update_merges_only_given_fields() {
        let store = MemStorage::new();
        let mut input = new_prayer("isha", day(3));
        input.notes = Some("at home".into());
        let p = store.create_prayer(1, &input).await.unwrap();

        let update = UpdatePrayer {
            status: Some("late".into()),
            ..Default::default()
        };
        let updated = store.update_prayer(p.id, &update).await.unwrap().unwrap();
        assert_eq!(updated.status, "late");
        assert_eq!(updated.name, "isha");
        assert_eq!(updated.notes.as_deref(), Some("at home"));

        assert!(store.update_prayer(999, &update).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_filters_by_range_and_sorts_newest_first() {
        let store = MemStorage::new();
        for d in [1, 5, 3, 9] {
            store.create_prayer(1, &new_prayer("fajr", day(d))).await.unwrap();
        }
        let rows = store
            .list_prayers(1, DateRange::between(day(2), day(5)))
            .await
            .unwrap();
        let days: Vec<NaiveDate> = rows.iter().map(|p| p.prayer_date).collect();
        assert_eq!(days, vec![day(5), day(3)]);
    }

    #[tokio::test]
    async fn deleting_group_cascades() {
        let store = MemStorage::new();
        let (group, owner) = store
            .create_group_with_owner(
                1,
                &CreateGroup {
                    name: "Halaqa".into(),
                    description: None,
                    is_public: None,
                },
            )
            .await
            .unwrap();
        assert!(group.is_public);
        assert_eq!(owner.role, "owner");
        assert_eq!(owner.group_id, group.id);
        let found = store.find_membership(group.id, 1).await.unwrap().unwrap();
        assert_eq!(found.id, owner.id);
        store
            .add_member(&CreateMembership {
                group_id: group.id,
                user_id: 2,
                role: "member".into(),
            })
            .await
            .unwrap();
        assert_eq!(store.list_members(group.id).await.unwrap().len(), 2);
        store
            .create_challenge(
                group.id,
                1,
                &CreateChallenge {
                    title: "Read daily".into(),
                    description: None,
                    kind: "quran".into(),
                    target: 30,
                    start_date: day(1),
                    end_date: day(30),
                },
            )
            .await
            .unwrap();

        assert!(store.delete_group(group.id).await.unwrap());
        assert!(store.list_members(group.id).await.unwrap().is_empty());
        assert!(store.list_challenges(group.id).await.unwrap().is_empty());
        assert!(!store.delete_group(group.id).await.unwrap());
    }

    #[tokio::test]
    async fn private_groups_visible_only_to_members() {
        let store = MemStorage::new();
        store
            .create_group_with_owner(
                1,
                &CreateGroup {
                    name: "Family".into(),
                    description: None,
                    is_public: Some(false),
                },
            )
            .await
            .unwrap();

        assert_eq!(store.list_visible_groups(1).await.unwrap().len(), 1);
        assert!(store.list_visible_groups(2).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn stale_sync_transition_is_not_applied() {
        let store = MemStorage::new();
        let record = store
            .create_sync_record(
                1,
                &CreateSyncRecord {
                    endpoint: "/api/prayers".into(),
                    method: "POST".into(),
                    payload: serde_json::json!({}),
                },
            )
            .await
            .unwrap();
        let synced = SyncTransition {
            from_status: "pending".into(),
            status: "synced".into(),
            last_error: None,
            attempted: true,
        };
        store.transition_sync_record(record.id, &synced).await.unwrap().unwrap();

        // A second writer that validated against the old `pending` status.
        let failed = SyncTransition {
            from_status: "pending".into(),
            status: "failed".into(),
            last_error: Some("offline".into()),
            attempted: true,
        };
        assert!(store.transition_sync_record(record.id, &failed).await.unwrap().is_none());

        let stored = store.find_sync_record(record.id).await.unwrap().unwrap();
        assert_eq!(stored.status, "synced");
        assert_eq!(stored.attempts, 1);
        assert_eq!(stored.last_error, None);
    }

    #[tokio::test]
    async fn sync_transition_and_purge() {
        let store = MemStorage::new();
        let record = store
            .create_sync_record(
                1,
                &CreateSyncRecord {
                    endpoint: "/api/prayers".into(),
                    method: "POST".into(),
                    payload: serde_json::json!({"name": "fajr"}),
                },
            )
            .await
            .unwrap();
        assert_eq!(record.status, "pending");
        assert_eq!(record.attempts, 0);

        let synced = store
            .transition_sync_record(
                record.id,
                &SyncTransition {
                    from_status: "pending".into(),
                    status: "synced".into(),
                    last_error: None,
                    attempted: true,
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(synced.attempts, 1);

        let purged = store
            .purge_synced_before(Utc::now() + chrono::Duration::seconds(1))
            .await
            .unwrap();
        assert_eq!(purged, 1);
        assert!(store.find_sync_record(record.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn quotes_filter_by_category() {
        let store = MemStorage::new();
        for seed in noor_core::quotes::SEED_QUOTES {
            store.create_quote(&seed.into()).await.unwrap();
        }
        let hadith = store.list_quotes(Some("hadith")).await.unwrap();
        assert!(!hadith.is_empty());
        assert!(hadith.iter().all(|q| q.category.as_deref() == Some("hadith")));
        assert_eq!(
            store.list_quotes(None).await.unwrap().len(),
            noor_core::quotes::SEED_QUOTES.len()
        );
    }
}
