mod account;
mod auth;
mod config;
mod cron;
mod error;
mod middleware;

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};

use crate::app::SatwatchApp;

pub use account::{AccountDto, ListAccountsResponse};
pub use auth::API_KEY_HEADER;
pub use config::*;
pub use cron::SuccessResponse;
pub use error::*;
pub use middleware::REQUEST_ID_HEADER;

pub fn router(app: SatwatchApp) -> Router {
    let admin = Router::new()
        .route("/account", get(account::list).post(account::create))
        .route_layer(from_fn_with_state(app.clone(), auth::require_admin_key));
    let cron = Router::new()
        .route("/cron/account-balance", post(cron::sync_balances))
        .route_layer(from_fn_with_state(app.clone(), auth::require_cron_key));

    Router::new()
        .merge(admin)
        .merge(cron)
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(not_found)
        .layer(from_fn(middleware::request_log))
        .layer(from_fn(middleware::request_id))
        .with_state(app)
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Not found".to_string())
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

pub async fn run(config: ServerConfig, app: SatwatchApp) -> anyhow::Result<()> {
    let router = router(app);

    tracing::info!(port = config.port, "starting satwatch server");
    let listener =
        tokio::net::TcpListener::bind(&std::net::SocketAddr::from(([0, 0, 0, 0], config.port)))
            .await?;
    axum::serve(listener, router.into_make_service()).await?;
    Ok(())
}
