use std::sync::Arc;

use anyhow::anyhow;
use subscription_core::domain::{
    clock::{Clock, to_storage_precision},
    entities::subscriptions::{InsertSubscriptionEntity, SubscriptionEntity},
    mappers::create_subscription::CreateSubscriptionMapper,
    repositories::subscriptions::SubscriptionRepository,
    validators::create_subscription::CreateSubscriptionValidator,
    value_objects::{
        enums::subscription_statuses::SubscriptionStatus,
        subscriptions::{CreateSubscriptionModel, SubscriptionModel},
        validation::ValidationResult,
    },
};
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum SubscriptionError {
    #[error("validation failed with {} error(s)", .0.errors().len())]
    Validation(ValidationResult),
    #[error("{0}")]
    IllegalArgument(String),
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl SubscriptionError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            SubscriptionError::Validation(_) => StatusCode::BAD_REQUEST,
            SubscriptionError::IllegalArgument(_) => StatusCode::NOT_FOUND,
            SubscriptionError::Conflict(_) => StatusCode::CONFLICT,
            SubscriptionError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, SubscriptionError>;

/// Lifecycle transitions a subscription can be asked to make.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    Cancel,
    Expire,
}

impl Transition {
    fn verb(self) -> &'static str {
        match self {
            Transition::Cancel => "canceled",
            Transition::Expire => "expired",
        }
    }
}

pub struct SubscriptionUseCase<R, C>
where
    R: SubscriptionRepository + Send + Sync + 'static,
    C: Clock + 'static,
{
    subscription_repository: Arc<R>,
    validator: Arc<CreateSubscriptionValidator<C>>,
    mapper: Arc<CreateSubscriptionMapper>,
    clock: Arc<C>,
}

impl<R, C> SubscriptionUseCase<R, C>
where
    R: SubscriptionRepository + Send + Sync + 'static,
    C: Clock + 'static,
{
    pub fn new(
        subscription_repository: Arc<R>,
        validator: Arc<CreateSubscriptionValidator<C>>,
        mapper: Arc<CreateSubscriptionMapper>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            subscription_repository,
            validator,
            mapper,
            clock,
        }
    }

    /// Creates the user's subscription, or overwrites the one they already
    /// have. Existing rows are matched by user id only.
    pub async fn upsert(
        &self,
        create_subscription_model: CreateSubscriptionModel,
    ) -> UseCaseResult<SubscriptionModel> {
        info!(
            user_id = ?create_subscription_model.user_id,
            provider = ?create_subscription_model.provider,
            "subscriptions: upsert requested"
        );

        let validation_result = self.validator.validate(&create_subscription_model);
        if validation_result.has_errors() {
            let err = SubscriptionError::Validation(validation_result);
            warn!(
                user_id = ?create_subscription_model.user_id,
                status = err.status_code().as_u16(),
                error = %err,
                "subscriptions: upsert request rejected"
            );
            return Err(err);
        }

        let user_id = create_subscription_model
            .user_id
            .ok_or_else(|| anyhow!("validated request is missing user_id"))?;

        let existing = self
            .subscription_repository
            .find_by_user_id(user_id)
            .await
            .map_err(|err| {
                error!(
                    user_id,
                    db_error = ?err,
                    "subscriptions: failed to load subscriptions for user"
                );
                SubscriptionError::Storage(err)
            })?;

        let new_subscription = self.mapper.map(&create_subscription_model);
        let existing_id = existing.first().map(|subscription| subscription.id);

        if let Some(subscription_id) = existing_id {
            info!(
                user_id,
                subscription_id,
                "subscriptions: overwriting existing subscription"
            );
        } else {
            info!(user_id, "subscriptions: creating new subscription");
        }

        let subscription_entity = InsertSubscriptionEntity::try_from(new_subscription)?;

        let stored = self
            .subscription_repository
            .upsert(existing_id, subscription_entity)
            .await
            .map_err(|err| {
                error!(
                    user_id,
                    subscription_id = ?existing_id,
                    db_error = ?err,
                    "subscriptions: failed to persist subscription"
                );
                SubscriptionError::Storage(err)
            })?;

        let subscription = SubscriptionModel::try_from(stored)?;
        info!(
            user_id,
            subscription_id = subscription.id,
            "subscriptions: subscription upserted"
        );

        Ok(subscription)
    }

    pub async fn cancel(&self, subscription_id: i32) -> UseCaseResult<SubscriptionModel> {
        info!(subscription_id, "subscriptions: cancel requested");
        self.transition(subscription_id, Transition::Cancel).await
    }

    pub async fn expire(&self, subscription_id: i32) -> UseCaseResult<SubscriptionModel> {
        info!(subscription_id, "subscriptions: expire requested");
        self.transition(subscription_id, Transition::Expire).await
    }

    pub async fn find_all(&self) -> UseCaseResult<Vec<SubscriptionModel>> {
        let subscriptions = self
            .subscription_repository
            .find_all()
            .await
            .map_err(|err| {
                error!(db_error = ?err, "subscriptions: failed to list subscriptions");
                SubscriptionError::Storage(err)
            })?;

        Self::into_models(subscriptions)
    }

    pub async fn find_by_user_id(&self, user_id: i32) -> UseCaseResult<Vec<SubscriptionModel>> {
        let subscriptions = self
            .subscription_repository
            .find_by_user_id(user_id)
            .await
            .map_err(|err| {
                error!(
                    user_id,
                    db_error = ?err,
                    "subscriptions: failed to list subscriptions for user"
                );
                SubscriptionError::Storage(err)
            })?;

        Self::into_models(subscriptions)
    }

    pub async fn find_by_id(&self, subscription_id: i32) -> UseCaseResult<SubscriptionModel> {
        self.load_subscription(subscription_id).await
    }

    pub async fn delete(&self, subscription_id: i32) -> UseCaseResult<bool> {
        let deleted = self
            .subscription_repository
            .delete(subscription_id)
            .await
            .map_err(|err| {
                error!(
                    subscription_id,
                    db_error = ?err,
                    "subscriptions: failed to delete subscription"
                );
                SubscriptionError::Storage(err)
            })?;

        info!(subscription_id, deleted, "subscriptions: delete finished");
        Ok(deleted)
    }

    async fn transition(
        &self,
        subscription_id: i32,
        transition: Transition,
    ) -> UseCaseResult<SubscriptionModel> {
        let mut subscription = self.load_subscription(subscription_id).await?;

        match subscription.status {
            SubscriptionStatus::Active => {}
            SubscriptionStatus::Expired | SubscriptionStatus::Canceled => {
                let err = SubscriptionError::Conflict(format!(
                    "only ACTIVE subscription {} can be {}",
                    subscription_id,
                    transition.verb()
                ));
                warn!(
                    subscription_id,
                    current_status = %subscription.status,
                    status = err.status_code().as_u16(),
                    "subscriptions: transition rejected"
                );
                return Err(err);
            }
        }

        match transition {
            Transition::Cancel => {
                subscription.status = SubscriptionStatus::Canceled;
            }
            Transition::Expire => {
                subscription.status = SubscriptionStatus::Expired;
                subscription.expiration_date = to_storage_precision(self.clock.now());
            }
        }

        let stored = self
            .subscription_repository
            .update(subscription_id, InsertSubscriptionEntity::from(&subscription))
            .await
            .map_err(|err| {
                error!(
                    subscription_id,
                    db_error = ?err,
                    "subscriptions: failed to persist transition"
                );
                SubscriptionError::Storage(err)
            })?;

        let subscription = SubscriptionModel::try_from(stored)?;
        info!(
            subscription_id,
            new_status = %subscription.status,
            "subscriptions: subscription {}",
            transition.verb()
        );

        Ok(subscription)
    }

    async fn load_subscription(&self, subscription_id: i32) -> UseCaseResult<SubscriptionModel> {
        let subscription = self
            .subscription_repository
            .find_by_id(subscription_id)
            .await
            .map_err(|err| {
                error!(
                    subscription_id,
                    db_error = ?err,
                    "subscriptions: failed to load subscription"
                );
                SubscriptionError::Storage(err)
            })?
            .ok_or_else(|| {
                let err = SubscriptionError::IllegalArgument(format!(
                    "subscription {} is not exist",
                    subscription_id
                ));
                warn!(
                    subscription_id,
                    status = err.status_code().as_u16(),
                    "subscriptions: subscription not found"
                );
                err
            })?;

        Ok(SubscriptionModel::try_from(subscription)?)
    }

    fn into_models(subscriptions: Vec<SubscriptionEntity>) -> UseCaseResult<Vec<SubscriptionModel>> {
        subscriptions
            .into_iter()
            .map(|subscription| SubscriptionModel::try_from(subscription).map_err(Into::into))
            .collect()
    }
}
