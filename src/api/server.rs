use crate::api::routes;
use crate::config::SharedConfig;
use crate::engine::UpsertEngine;
use std::future::Future;
use std::net::SocketAddr;

#[derive(Clone)]
pub(super) struct AppState {
    pub config: SharedConfig,
    pub engine: UpsertEngine,
}

pub fn new(
    config: SharedConfig,
    engine: UpsertEngine,
) -> impl Future<Output = hyper::Result<()>> {
    axum::Server::bind(&config.api_bind_addr).serve(
        routes::new(AppState { config, engine })
            .into_make_service_with_connect_info::<SocketAddr>(),
    )
}
