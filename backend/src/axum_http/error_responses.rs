use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use subscription_core::domain::value_objects::validation::ValidationError;
use tracing::error;

use crate::usecases::subscriptions::SubscriptionError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ValidationError>,
}

impl IntoResponse for SubscriptionError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (message, errors) = match self {
            SubscriptionError::Validation(result) => {
                ("validation failed".to_string(), result.errors().to_vec())
            }
            SubscriptionError::IllegalArgument(msg) | SubscriptionError::Conflict(msg) => {
                (msg, Vec::new())
            }
            SubscriptionError::Storage(err) => {
                // Don't leak storage detail to client
                error!(db_error = ?err, "subscriptions: storage failure surfaced to client");
                (
                    StatusCode::INTERNAL_SERVER_ERROR
                        .canonical_reason()
                        .unwrap_or("Internal server error")
                        .to_string(),
                    Vec::new(),
                )
            }
        };

        let body = Json(ErrorResponse {
            code: status.as_u16(),
            message,
            errors,
        });

        (status, body).into_response()
    }
}
