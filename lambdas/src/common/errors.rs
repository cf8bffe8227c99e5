use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use lambda_http::{Error as LambdaError, Response};
use std::fmt::Debug;

pub const UNKNOWN_ERROR: &str = "An unknown error occurred";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A response that is already built and only has to be returned.
    #[error("http error: {}", .0.status())]
    HttpError(Response<String>),
    #[error("{0}")]
    LambdaError(LambdaError),
}

impl From<LambdaError> for Error {
    fn from(err: LambdaError) -> Self {
        Error::LambdaError(err)
    }
}

impl From<lambda_http::http::Error> for Error {
    fn from(err: lambda_http::http::Error) -> Self {
        Error::LambdaError(Box::new(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::LambdaError(Box::new(err))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing id, task, or isCompleted field in the request body")]
    MissingFields,
}

/// Failure of the single downstream call a handler makes. The display string
/// is what callers see in the `error` field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    Downstream(String),
    #[error("{}", UNKNOWN_ERROR)]
    Unknown,
}

impl StoreError {
    pub fn from_sdk<E, R>(err: SdkError<E, R>) -> Self
    where
        E: ProvideErrorMetadata + std::error::Error + 'static,
        R: Debug,
    {
        if let Some(message) = err.message().filter(|val| !val.is_empty()) {
            return StoreError::Downstream(message.to_string());
        }

        match err {
            SdkError::ServiceError(_) => StoreError::Unknown,
            other => StoreError::Downstream(DisplayErrorContext(&other).to_string()),
        }
    }
}
