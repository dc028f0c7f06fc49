use anyhow::{Result, anyhow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::subscriptions::{InsertSubscriptionEntity, SubscriptionEntity},
    value_objects::enums::{providers::Provider, subscription_statuses::SubscriptionStatus},
};

/// Untrusted creation input. Every field may be missing; `provider` is the
/// raw name and is only resolved to a [`Provider`] after validation.
/// JSON keys are camelCase (`userId`, `expirationDate`).
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubscriptionModel {
    pub user_id: Option<i32>,
    pub name: Option<String>,
    pub provider: Option<String>,
    pub expiration_date: Option<DateTime<Utc>>,
}

/// Output of mapping a [`CreateSubscriptionModel`]. Fields the request left
/// out stay `None`, as does a provider name that matched nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubscriptionModel {
    pub user_id: Option<i32>,
    pub name: Option<String>,
    pub provider: Option<Provider>,
    pub expiration_date: Option<DateTime<Utc>>,
    pub status: SubscriptionStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionModel {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub provider: Provider,
    pub expiration_date: DateTime<Utc>,
    pub status: SubscriptionStatus,
}

impl TryFrom<SubscriptionEntity> for SubscriptionModel {
    type Error = anyhow::Error;

    fn try_from(entity: SubscriptionEntity) -> Result<Self> {
        let provider = entity
            .provider
            .parse::<Provider>()
            .map_err(|err| anyhow!("subscription {}: {}", entity.id, err))?;
        let status = entity
            .status
            .parse::<SubscriptionStatus>()
            .map_err(|err| anyhow!("subscription {}: {}", entity.id, err))?;

        Ok(Self {
            id: entity.id,
            user_id: entity.user_id,
            name: entity.name,
            provider,
            expiration_date: entity.expiration_date,
            status,
        })
    }
}

impl From<&SubscriptionModel> for InsertSubscriptionEntity {
    fn from(model: &SubscriptionModel) -> Self {
        Self {
            user_id: model.user_id,
            name: model.name.clone(),
            provider: model.provider.to_string(),
            expiration_date: model.expiration_date,
            status: model.status.to_string(),
        }
    }
}

impl TryFrom<NewSubscriptionModel> for InsertSubscriptionEntity {
    type Error = anyhow::Error;

    fn try_from(model: NewSubscriptionModel) -> Result<Self> {
        Ok(Self {
            user_id: model
                .user_id
                .ok_or_else(|| anyhow!("subscription user_id is missing"))?,
            name: model
                .name
                .ok_or_else(|| anyhow!("subscription name is missing"))?,
            provider: model
                .provider
                .ok_or_else(|| anyhow!("subscription provider is missing"))?
                .to_string(),
            expiration_date: model
                .expiration_date
                .ok_or_else(|| anyhow!("subscription expiration_date is missing"))?,
            status: model.status.to_string(),
        })
    }
}
