use std::sync::Arc;

use crate::domain::{
    clock::Clock,
    value_objects::{
        enums::providers::Provider,
        subscriptions::CreateSubscriptionModel,
        validation::{ValidationError, ValidationResult},
    },
};

pub const USER_ID_INVALID: u16 = 100;
pub const NAME_INVALID: u16 = 101;
pub const PROVIDER_INVALID: u16 = 102;
pub const EXPIRATION_DATE_INVALID: u16 = 103;

/// Checks a creation request field by field. Every rule runs, so the result
/// lists all violations in field order.
pub struct CreateSubscriptionValidator<C>
where
    C: Clock,
{
    clock: Arc<C>,
}

impl<C> CreateSubscriptionValidator<C>
where
    C: Clock,
{
    pub fn new(clock: Arc<C>) -> Self {
        Self { clock }
    }

    pub fn validate(&self, model: &CreateSubscriptionModel) -> ValidationResult {
        let mut result = ValidationResult::default();

        if model.user_id.is_none() {
            result.add(ValidationError::of(USER_ID_INVALID, "userId is invalid"));
        }

        if model.name.as_deref().is_none_or(str::is_empty) {
            result.add(ValidationError::of(NAME_INVALID, "name is invalid"));
        }

        if model
            .provider
            .as_deref()
            .and_then(Provider::find_by_name)
            .is_none()
        {
            result.add(ValidationError::of(PROVIDER_INVALID, "provider is invalid"));
        }

        let now = self.clock.now();
        if !model
            .expiration_date
            .is_some_and(|expiration_date| expiration_date > now)
        {
            result.add(ValidationError::of(
                EXPIRATION_DATE_INVALID,
                "expirationDate is invalid",
            ));
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::FixedClock;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap()
    }

    fn validator() -> CreateSubscriptionValidator<FixedClock> {
        CreateSubscriptionValidator::new(Arc::new(FixedClock::new(now())))
    }

    fn valid_model() -> CreateSubscriptionModel {
        CreateSubscriptionModel {
            user_id: Some(1),
            name: Some("name".to_string()),
            provider: Some(Provider::Google.to_string()),
            expiration_date: Some(now() + Duration::days(365)),
        }
    }

    fn assert_single(result: &ValidationResult, code: u16, message: &str) {
        assert_eq!(result.errors().len(), 1, "got: {:?}", result.errors());
        assert_eq!(result.errors()[0].code, code);
        assert_eq!(result.errors()[0].message, message);
    }

    #[test]
    fn valid_model_has_no_errors() {
        assert!(!validator().validate(&valid_model()).has_errors());

        let apple = CreateSubscriptionModel {
            provider: Some("APPLE".to_string()),
            ..valid_model()
        };
        assert!(!validator().validate(&apple).has_errors());
    }

    #[test]
    fn missing_user_id_is_reported() {
        let model = CreateSubscriptionModel {
            user_id: None,
            ..valid_model()
        };

        assert_single(&validator().validate(&model), 100, "userId is invalid");
    }

    #[test]
    fn missing_or_empty_name_is_reported() {
        for name in [None, Some(String::new())] {
            let model = CreateSubscriptionModel {
                name,
                ..valid_model()
            };

            assert_single(&validator().validate(&model), 101, "name is invalid");
        }
    }

    #[test]
    fn unknown_or_miscased_provider_is_reported() {
        for provider in [None, Some("something"), Some("google"), Some("")] {
            let model = CreateSubscriptionModel {
                provider: provider.map(str::to_string),
                ..valid_model()
            };

            assert_single(&validator().validate(&model), 102, "provider is invalid");
        }
    }

    #[test]
    fn expiration_date_must_be_strictly_in_the_future() {
        for expiration_date in [None, Some(now()), Some(now() - Duration::seconds(1))] {
            let model = CreateSubscriptionModel {
                expiration_date,
                ..valid_model()
            };

            assert_single(
                &validator().validate(&model),
                103,
                "expirationDate is invalid",
            );
        }
    }

    #[test]
    fn all_violations_are_collected_in_field_order() {
        let result = validator().validate(&CreateSubscriptionModel::default());

        assert_eq!(result.codes(), vec![100, 101, 102, 103]);
        let messages: Vec<&str> = result
            .errors()
            .iter()
            .map(|error| error.message.as_str())
            .collect();
        assert_eq!(
            messages,
            vec![
                "userId is invalid",
                "name is invalid",
                "provider is invalid",
                "expirationDate is invalid",
            ]
        );
    }
}
