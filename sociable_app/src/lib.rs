pub mod app;
pub mod auth;
pub mod config;
pub mod routes;

#[cfg(test)]
mod test_util;

use app::App;

use anyhow::Context;
use entrait::Impl;
use tower::ServiceBuilder;

pub async fn serve(app: App) -> anyhow::Result<()> {
    let listen_addr = app.config.listen_addr;

    let router = routes::api_router().layer(
        ServiceBuilder::new()
            .layer(axum::extract::Extension(Impl::new(app)))
            // Enables request logging. Use `RUST_LOG=tower_http=debug`.
            .layer(tower_http::trace::TraceLayer::new_for_http()),
    );

    axum::Server::bind(&listen_addr)
        .serve(router.into_make_service())
        .await
        .context("error running HTTP server")
}
