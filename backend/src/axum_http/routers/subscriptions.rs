use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use subscription_core::{
    domain::{
        clock::{Clock, SystemClock},
        mappers::create_subscription::CreateSubscriptionMapper,
        repositories::subscriptions::SubscriptionRepository,
        validators::create_subscription::CreateSubscriptionValidator,
        value_objects::subscriptions::CreateSubscriptionModel,
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::subscriptions::SubscriptionPostgres,
    },
};

use crate::usecases::subscriptions::{SubscriptionError, SubscriptionUseCase};

type PostgresSubscriptionUseCase = SubscriptionUseCase<SubscriptionPostgres, SystemClock>;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSubscriptionsQuery {
    pub user_id: Option<i32>,
}

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let subscription_repository = SubscriptionPostgres::new(Arc::clone(&db_pool));
    let clock = Arc::new(SystemClock);
    let subscriptions_usecase: PostgresSubscriptionUseCase = SubscriptionUseCase::new(
        Arc::new(subscription_repository),
        Arc::new(CreateSubscriptionValidator::new(Arc::clone(&clock))),
        Arc::new(CreateSubscriptionMapper::new()),
        clock,
    );

    Router::new()
        .route(
            "/",
            get(list::<SubscriptionPostgres, SystemClock>)
                .put(upsert::<SubscriptionPostgres, SystemClock>),
        )
        .route(
            "/:subscription_id",
            get(find_by_id::<SubscriptionPostgres, SystemClock>)
                .delete(delete::<SubscriptionPostgres, SystemClock>),
        )
        .route(
            "/:subscription_id/cancel",
            post(cancel::<SubscriptionPostgres, SystemClock>),
        )
        .route(
            "/:subscription_id/expire",
            post(expire::<SubscriptionPostgres, SystemClock>),
        )
        .with_state(Arc::new(subscriptions_usecase))
}

pub async fn list<R, C>(
    State(subscriptions_usecase): State<Arc<SubscriptionUseCase<R, C>>>,
    Query(query): Query<ListSubscriptionsQuery>,
) -> Result<impl IntoResponse, SubscriptionError>
where
    R: SubscriptionRepository + Send + Sync + 'static,
    C: Clock + 'static,
{
    let subscriptions = match query.user_id {
        Some(user_id) => subscriptions_usecase.find_by_user_id(user_id).await?,
        None => subscriptions_usecase.find_all().await?,
    };

    Ok((StatusCode::OK, Json(subscriptions)))
}

pub async fn find_by_id<R, C>(
    State(subscriptions_usecase): State<Arc<SubscriptionUseCase<R, C>>>,
    Path(subscription_id): Path<i32>,
) -> Result<impl IntoResponse, SubscriptionError>
where
    R: SubscriptionRepository + Send + Sync + 'static,
    C: Clock + 'static,
{
    let subscription = subscriptions_usecase.find_by_id(subscription_id).await?;

    Ok((StatusCode::OK, Json(subscription)))
}

pub async fn upsert<R, C>(
    State(subscriptions_usecase): State<Arc<SubscriptionUseCase<R, C>>>,
    Json(create_subscription_model): Json<CreateSubscriptionModel>,
) -> Result<impl IntoResponse, SubscriptionError>
where
    R: SubscriptionRepository + Send + Sync + 'static,
    C: Clock + 'static,
{
    let subscription = subscriptions_usecase
        .upsert(create_subscription_model)
        .await?;

    Ok((StatusCode::OK, Json(subscription)))
}

pub async fn cancel<R, C>(
    State(subscriptions_usecase): State<Arc<SubscriptionUseCase<R, C>>>,
    Path(subscription_id): Path<i32>,
) -> Result<impl IntoResponse, SubscriptionError>
where
    R: SubscriptionRepository + Send + Sync + 'static,
    C: Clock + 'static,
{
    let subscription = subscriptions_usecase.cancel(subscription_id).await?;

    Ok((StatusCode::OK, Json(subscription)))
}

pub async fn expire<R, C>(
    State(subscriptions_usecase): State<Arc<SubscriptionUseCase<R, C>>>,
    Path(subscription_id): Path<i32>,
) -> Result<impl IntoResponse, SubscriptionError>
where
    R: SubscriptionRepository + Send + Sync + 'static,
    C: Clock + 'static,
{
    let subscription = subscriptions_usecase.expire(subscription_id).await?;

    Ok((StatusCode::OK, Json(subscription)))
}

pub async fn delete<R, C>(
    State(subscriptions_usecase): State<Arc<SubscriptionUseCase<R, C>>>,
    Path(subscription_id): Path<i32>,
) -> Result<impl IntoResponse, SubscriptionError>
where
    R: SubscriptionRepository + Send + Sync + 'static,
    C: Clock + 'static,
{
    if subscriptions_usecase.delete(subscription_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(SubscriptionError::IllegalArgument(format!(
            "subscription {} is not exist",
            subscription_id
        )))
    }
}
