use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::infra::db::postgres::schema::subscriptions;

#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable)]
#[diesel(table_name = subscriptions)]
pub struct SubscriptionEntity {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub provider: String,
    pub expiration_date: DateTime<Utc>,
    pub status: String,
}

/// Row content without identity. Used both to insert a new row and to
/// overwrite every column of an existing one.
#[derive(Debug, Clone, PartialEq, Insertable, AsChangeset)]
#[diesel(table_name = subscriptions)]
pub struct InsertSubscriptionEntity {
    pub user_id: i32,
    pub name: String,
    pub provider: String,
    pub expiration_date: DateTime<Utc>,
    pub status: String,
}
