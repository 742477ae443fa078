//! State

use std::sync::Arc;

use northwind_app::context::AppContext;

/// Services injected into every request's depot.
#[derive(Clone, Debug)]
pub(crate) struct State {
    pub(crate) app: AppContext,
}

impl State {
    #[must_use]
    pub(crate) fn from_app_context(app: AppContext) -> Arc<Self> {
        Arc::new(Self { app })
    }
}
