//! Depot helper extensions.

use std::sync::Arc;

use salvo::prelude::{Depot, StatusError};
use tracing::error;

use crate::state::State;

/// Shared-state lookup that fails as an HTTP error.
pub(crate) trait DepotExt {
    fn state_or_500(&self) -> Result<&Arc<State>, StatusError>;
}

impl DepotExt for Depot {
    fn state_or_500(&self) -> Result<&Arc<State>, StatusError> {
        self.obtain::<Arc<State>>().map_err(|_missing| {
            error!("application state was not injected");

            StatusError::internal_server_error()
        })
    }
}
