//! Standardized rendering of AWS SDK failures

use crate::error::CleanupError;
use aws_sdk_ecr::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use std::error::Error as StdError;
use std::fmt::Debug;

/// Turns SDK errors into short messages instead of their verbose Debug output
pub struct SdkErrorHandler;

impl SdkErrorHandler {
    /// Describe an SDK error, preferring the service's error code and message
    pub fn describe<E, R>(err: &SdkError<E, R>) -> String
    where
        E: ProvideErrorMetadata + StdError + 'static,
        R: Debug,
    {
        match err {
            SdkError::ServiceError(context) => {
                let service_err = context.err();
                match (service_err.code(), service_err.message()) {
                    (Some(code), Some(message)) => format!("{}: {}", code, message),
                    (Some(code), None) => code.to_string(),
                    _ => DisplayErrorContext(err).to_string(),
                }
            }
            SdkError::TimeoutError(_) => "request timed out".to_string(),
            SdkError::DispatchFailure(failure) if failure.is_io() => {
                format!("connection error: {}", DisplayErrorContext(err))
            }
            _ => DisplayErrorContext(err).to_string(),
        }
    }

    /// Wrap a failed listing call
    pub fn handle_fetch_error<E, R>(err: &SdkError<E, R>, context: &str) -> CleanupError
    where
        E: ProvideErrorMetadata + StdError + 'static,
        R: Debug,
    {
        CleanupError::Fetch(format!("{}: {}", context, Self::describe(err)))
    }
}
