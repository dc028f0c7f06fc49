use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::subscriptions::{InsertSubscriptionEntity, SubscriptionEntity};

/// Data access for the `subscriptions` table. Every call is a single
/// round trip; nothing spans more than one statement.
#[async_trait]
#[automock]
pub trait SubscriptionRepository {
    async fn find_all(&self) -> Result<Vec<SubscriptionEntity>>;

    async fn find_by_id(&self, subscription_id: i32) -> Result<Option<SubscriptionEntity>>;

    async fn find_by_user_id(&self, user_id: i32) -> Result<Vec<SubscriptionEntity>>;

    async fn insert(
        &self,
        insert_subscription_entity: InsertSubscriptionEntity,
    ) -> Result<SubscriptionEntity>;

    /// Overwrites the row at `subscription_id`. Fails when no such row exists.
    async fn update(
        &self,
        subscription_id: i32,
        update_subscription_entity: InsertSubscriptionEntity,
    ) -> Result<SubscriptionEntity>;

    /// Updates the row at `subscription_id` when given, inserts otherwise.
    async fn upsert(
        &self,
        subscription_id: Option<i32>,
        subscription_entity: InsertSubscriptionEntity,
    ) -> Result<SubscriptionEntity>;

    async fn delete(&self, subscription_id: i32) -> Result<bool>;
}
