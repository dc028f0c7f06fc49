use anyhow::Result;
use async_trait::async_trait;
use diesel::{PgConnection, RunQueryDsl, delete, insert_into, prelude::*, update};
use std::sync::Arc;

use crate::{
    domain,
    infra::db::postgres::{postgres_connection::PgPoolSquad, schema::subscriptions},
};
use domain::{
    entities::subscriptions::{InsertSubscriptionEntity, SubscriptionEntity},
    repositories::subscriptions::SubscriptionRepository,
};

pub struct SubscriptionPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl SubscriptionPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }

    fn insert_row(
        conn: &mut PgConnection,
        insert_subscription_entity: &InsertSubscriptionEntity,
    ) -> QueryResult<SubscriptionEntity> {
        insert_into(subscriptions::table)
            .values(insert_subscription_entity)
            .returning(SubscriptionEntity::as_returning())
            .get_result::<SubscriptionEntity>(conn)
    }

    fn update_row(
        conn: &mut PgConnection,
        subscription_id: i32,
        update_subscription_entity: &InsertSubscriptionEntity,
    ) -> QueryResult<SubscriptionEntity> {
        update(subscriptions::table)
            .filter(subscriptions::id.eq(subscription_id))
            .set(update_subscription_entity)
            .returning(SubscriptionEntity::as_returning())
            .get_result::<SubscriptionEntity>(conn)
    }
}

#[async_trait]
impl SubscriptionRepository for SubscriptionPostgres {
    async fn find_all(&self) -> Result<Vec<SubscriptionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = subscriptions::table
            .order(subscriptions::id.asc())
            .select(SubscriptionEntity::as_select())
            .load::<SubscriptionEntity>(&mut conn)?;

        Ok(results)
    }

    async fn find_by_id(&self, subscription_id: i32) -> Result<Option<SubscriptionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = subscriptions::table
            .filter(subscriptions::id.eq(subscription_id))
            .select(SubscriptionEntity::as_select())
            .first::<SubscriptionEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn find_by_user_id(&self, user_id: i32) -> Result<Vec<SubscriptionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = subscriptions::table
            .filter(subscriptions::user_id.eq(user_id))
            .order(subscriptions::id.asc())
            .select(SubscriptionEntity::as_select())
            .load::<SubscriptionEntity>(&mut conn)?;

        Ok(results)
    }

    async fn insert(
        &self,
        insert_subscription_entity: InsertSubscriptionEntity,
    ) -> Result<SubscriptionEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = Self::insert_row(&mut conn, &insert_subscription_entity)?;

        Ok(result)
    }

    async fn update(
        &self,
        subscription_id: i32,
        update_subscription_entity: InsertSubscriptionEntity,
    ) -> Result<SubscriptionEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = Self::update_row(&mut conn, subscription_id, &update_subscription_entity)?;

        Ok(result)
    }

    async fn upsert(
        &self,
        subscription_id: Option<i32>,
        subscription_entity: InsertSubscriptionEntity,
    ) -> Result<SubscriptionEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = match subscription_id {
            Some(subscription_id) => {
                Self::update_row(&mut conn, subscription_id, &subscription_entity)?
            }
            None => Self::insert_row(&mut conn, &subscription_entity)?,
        };

        Ok(result)
    }

    async fn delete(&self, subscription_id: i32) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let deleted = delete(subscriptions::table)
            .filter(subscriptions::id.eq(subscription_id))
            .execute(&mut conn)?;

        Ok(deleted > 0)
    }
}
