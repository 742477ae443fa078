//! Result helper extensions for HTTP handlers.

use std::fmt::Display;

use salvo::prelude::StatusError;
use tracing::{debug, error};

pub(crate) trait ResultExt<T> {
    /// Log the error and answer with a generic 500.
    fn or_500(self, context: &str) -> Result<T, StatusError>;

    /// Answer with a 400 that explains what was wrong with the input.
    fn or_400(self, context: &str) -> Result<T, StatusError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Display,
{
    fn or_500(self, context: &str) -> Result<T, StatusError> {
        self.map_err(|error| {
            error!("{context}: {error}");

            StatusError::internal_server_error()
        })
    }

    fn or_400(self, context: &str) -> Result<T, StatusError> {
        self.map_err(|error| {
            debug!("{context}: {error}");

            StatusError::bad_request().brief(format!("{context}: {error}"))
        })
    }
}
