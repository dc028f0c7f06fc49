use crate::domain::{
    clock::to_storage_precision,
    value_objects::{
        enums::{providers::Provider, subscription_statuses::SubscriptionStatus},
        subscriptions::{CreateSubscriptionModel, NewSubscriptionModel},
    },
};

#[derive(Debug, Default, Clone, Copy)]
pub struct CreateSubscriptionMapper;

impl CreateSubscriptionMapper {
    pub fn new() -> Self {
        Self
    }

    /// New subscriptions always start `Active`, whatever the expiration date.
    /// The expiration date is cut to microseconds, the precision it is stored at.
    pub fn map(&self, model: &CreateSubscriptionModel) -> NewSubscriptionModel {
        NewSubscriptionModel {
            user_id: model.user_id,
            name: model.name.clone(),
            provider: model.provider.as_deref().and_then(Provider::find_by_name),
            expiration_date: model.expiration_date.map(to_storage_precision),
            status: SubscriptionStatus::Active,
        }
    }
}
