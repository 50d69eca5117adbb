mod account_routes;
mod profile_routes;

use crate::app::App;

use axum::routing::Router;
use entrait::Impl;

/// Axum API router for the real app.
pub fn api_router() -> axum::Router {
    Router::new().nest(
        "/api",
        Router::new()
            .merge(account_routes::AccountRoutes::<Impl<App>>::router())
            .merge(profile_routes::ProfileRoutes::<Impl<App>>::router()),
    )
}
