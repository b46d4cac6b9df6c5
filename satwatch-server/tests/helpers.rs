#![allow(dead_code)]
use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use rand::{
    distr::{Alphanumeric, SampleString},
    Rng,
};
use serde::de::DeserializeOwned;
use sqlx::{postgres::PgPoolOptions, Executor};
use tower::ServiceExt;

use satwatch::{balance_source::BalanceSourceConfig, AccountBook, AccountBookConfig};
use satwatch_server::{app::*, server};

pub const ADMIN_KEY: &str = "admin-secret";
pub const CRON_KEY: &str = "cron-secret";

const BASE58: &[u8] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

pub async fn init_pool() -> anyhow::Result<sqlx::PgPool> {
    let pg_host = std::env::var("PG_HOST").unwrap_or("localhost".to_string());
    let pg_con = format!("postgres://user:password@{pg_host}:5432/pg");
    let schema = format!(
        "test_{}",
        Alphanumeric
            .sample_string(&mut rand::rng(), 16)
            .to_lowercase()
    );
    let admin = sqlx::PgPool::connect(&pg_con).await?;
    admin
        .execute(format!("CREATE SCHEMA {schema}").as_str())
        .await?;
    admin.close().await;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .after_connect(move |conn, _meta| {
            let set_search_path = format!("SET search_path TO {schema}");
            Box::pin(async move {
                conn.execute(set_search_path.as_str()).await?;
                Ok(())
            })
        })
        .connect(&pg_con)
        .await?;
    Ok(pool)
}

/// Router over a fresh schema, fetching balances from `balance_url`.
pub async fn init_router(balance_url: &str) -> anyhow::Result<(Router, SatwatchApp)> {
    let pool = init_pool().await?;
    let balance_source = BalanceSourceConfig {
        url: balance_url.to_string(),
        ..Default::default()
    };
    let book_config = AccountBookConfig::builder()
        .pool(pool)
        .exec_migrations(true)
        .balance_source(balance_source.clone())
        .build()?;
    let book = AccountBook::init(book_config).await?;
    let app = SatwatchApp::run(
        book,
        AppConfig {
            admin_api_key: ADMIN_KEY.to_string(),
            cron_api_key: CRON_KEY.to_string(),
            balance_source,
            ..Default::default()
        },
    )
    .await?;
    Ok((server::router(app.clone()), app))
}

pub fn test_address() -> String {
    let mut rng = rand::rng();
    let mut address = String::from("1");
    for _ in 0..33 {
        address.push(BASE58[rng.random_range(0..BASE58.len())] as char);
    }
    address
}

pub fn get(uri: &str, api_key: Option<&str>) -> Request<Body> {
    let mut req = Request::builder().method("GET").uri(uri);
    if let Some(key) = api_key {
        req = req.header(server::API_KEY_HEADER, key);
    }
    req.body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, api_key: Option<&str>, body: &serde_json::Value) -> Request<Body> {
    post_raw(uri, api_key, body.to_string())
}

pub fn post_raw(uri: &str, api_key: Option<&str>, body: String) -> Request<Body> {
    let mut req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(key) = api_key {
        req = req.header(server::API_KEY_HEADER, key);
    }
    req.body(Body::from(body)).unwrap()
}

pub async fn send(router: &Router, req: Request<Body>) -> anyhow::Result<Response<Body>> {
    Ok(router.clone().oneshot(req).await?)
}

pub async fn read_json<T: DeserializeOwned>(res: Response<Body>) -> anyhow::Result<T> {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}
