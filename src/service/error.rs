use axum::http::StatusCode;
use thiserror::Error;
use uuid::Uuid;

use crate::{error::HttpError, models::requestmodel::RequestStatus};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Request {0} cannot change state from {1:?} on this action")]
    InvalidTransition(Uuid, RequestStatus),

    #[error("Request not found or not available for bidding")]
    BiddingClosed,

    #[error("Chat is only available for assigned requests")]
    ChatUnavailable,

    #[error("Access denied")]
    AccessDenied,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::InvalidTransition(_, _)
            | ServiceError::BiddingClosed
            | ServiceError::ChatUnavailable => HttpError::bad_request(error.to_string()),

            ServiceError::AccessDenied => {
                HttpError::new(error.to_string(), StatusCode::FORBIDDEN)
            }

            ServiceError::Database(_) => HttpError::server_error(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_expected_statuses() {
        let id = Uuid::new_v4();
        let cases = [
            (
                HttpError::from(ServiceError::InvalidTransition(id, RequestStatus::Completed)),
                StatusCode::BAD_REQUEST,
            ),
            (
                HttpError::from(ServiceError::BiddingClosed),
                StatusCode::BAD_REQUEST,
            ),
            (
                HttpError::from(ServiceError::ChatUnavailable),
                StatusCode::BAD_REQUEST,
            ),
            (
                HttpError::from(ServiceError::AccessDenied),
                StatusCode::FORBIDDEN,
            ),
            (
                HttpError::from(ServiceError::Database(sqlx::Error::PoolClosed)),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (error, status) in cases {
            assert_eq!(error.status, status);
        }
    }

    #[test]
    fn bidding_closed_keeps_the_public_message() {
        assert_eq!(
            ServiceError::BiddingClosed.to_string(),
            "Request not found or not available for bidding"
        );
        assert_eq!(
            ServiceError::ChatUnavailable.to_string(),
            "Chat is only available for assigned requests"
        );
    }
}
