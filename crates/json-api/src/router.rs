//! App Router

use salvo::{affix_state::inject, prelude::*, trailing_slash::remove_slash};

use northwind_app::context::AppContext;

use crate::{categories, healthcheck, observability, products, state::State};

/// Every route the server answers, behind the shared hoops.
pub(crate) fn app_router(app: AppContext) -> Router {
    Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(observability::request_logging)
        .hoop(inject(State::from_app_context(app)))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(
            Router::with_path("api/products")
                .get(products::index::handler)
                .post(products::create::handler)
                .push(
                    Router::with_path("{id}")
                        .get(products::get::handler)
                        .put(products::update::handler)
                        .delete(products::delete::handler),
                ),
        )
        .push(
            Router::with_path("api/categories")
                .get(categories::index::handler)
                .post(categories::create::handler)
                .push(
                    Router::with_path("{id}")
                        .get(categories::get::handler)
                        .put(categories::update::handler)
                        .delete(categories::delete::handler),
                ),
        )
}
