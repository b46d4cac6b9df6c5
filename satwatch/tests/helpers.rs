#![allow(dead_code)]
use rand::{
    distr::{Alphanumeric, SampleString},
    Rng,
};
use sqlx::{postgres::PgPoolOptions, Executor};

use satwatch::{account::*, *};

const BASE58: &[u8] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

fn pg_con() -> String {
    let pg_host = std::env::var("PG_HOST").unwrap_or("localhost".to_string());
    format!("postgres://user:password@{pg_host}:5432/pg")
}

/// Pool whose connections all resolve tables in a freshly created schema.
pub async fn init_pool() -> anyhow::Result<sqlx::PgPool> {
    let pg_con = pg_con();
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

pub async fn init_book() -> anyhow::Result<AccountBook> {
    init_book_with(AccountBookConfig::builder()).await
}

pub async fn init_book_with(mut builder: AccountBookConfigBuilder) -> anyhow::Result<AccountBook> {
    let pool = init_pool().await?;
    let config = builder.pool(pool).exec_migrations(true).build()?;
    Ok(AccountBook::init(config).await?)
}

pub fn test_address() -> String {
    let mut rng = rand::rng();
    let mut address = String::from("1");
    for _ in 0..33 {
        address.push(BASE58[rng.random_range(0..BASE58.len())] as char);
    }
    address
}

pub fn test_account() -> NewAccount {
    let name = Alphanumeric.sample_string(&mut rand::rng(), 16);
    NewAccount::builder()
        .address(test_address())
        .name(format!("Test Account {name}"))
        .rank(50)
        .build()
        .unwrap()
}

pub fn test_account_named(name: &str, status: AccountStatus) -> NewAccount {
    NewAccount::builder()
        .address(test_address())
        .name(name)
        .rank(10)
        .status(status)
        .build()
        .unwrap()
}
