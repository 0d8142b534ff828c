use async_trait::async_trait;

use crate::application::app_error::AppResult;
use crate::domain::entities::account::Account;
use crate::domain::entities::id::Id;
use crate::domain::entities::profile::Profile;

#[async_trait]
pub trait ProfileWriter: Send + Sync {
    async fn insert(&self, profile: Profile) -> AppResult<Id<Profile>>;
    async fn update(&self, profile: Profile) -> AppResult<Id<Profile>>;
}

#[async_trait]
pub trait ProfileReader: Send + Sync {
    async fn find_by_account(&self, account_id: &Id<Account>) -> AppResult<Option<Profile>>;
    /// Same as `find_by_account`, but holds a row lock until the session ends.
    async fn lock_by_account(&self, account_id: &Id<Account>) -> AppResult<Option<Profile>>;
    async fn exists_for_account(&self, account_id: &Id<Account>) -> AppResult<bool>;
}
