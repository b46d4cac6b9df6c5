mod helpers;

use async_trait::async_trait;
use rust_decimal_macros::dec;
use serde_json::json;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

use std::{sync::Arc, time::Duration};

use satwatch::{
    balance_source::{error::BalanceSourceError, *},
    balance_sync::*,
    currency::to_satoshi,
    *,
};

struct FixedBalance(i64);

#[async_trait]
impl BalanceSource for FixedBalance {
    async fn confirmed_balance(&self, _address: &str) -> Result<i64, BalanceSourceError> {
        Ok(self.0)
    }
}

#[tokio::test]
async fn syncs_active_accounts_and_isolates_failures() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    let mut builder = AccountBookConfig::builder();
    builder.balance_source(BalanceSourceConfig {
        url: server.uri(),
        ..Default::default()
    });
    let book = helpers::init_book_with(builder).await?;

    let healthy = book.accounts().create(helpers::test_account()).await?;
    let broken = book.accounts().create(helpers::test_account()).await?;
    let off = book
        .accounts()
        .create(helpers::test_account_named("Paused", AccountStatus::Off))
        .await?;

    Mock::given(method("GET"))
        .and(path(format!("/address/{}/balance", healthy.address())))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "confirmed": 96224397,
            "unconfirmed": 0,
            "balance": 96224397
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/address/{}/balance", broken.address())))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/address/{}/balance", off.address())))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "confirmed": 1 })))
        .expect(0)
        .mount(&server)
        .await;

    let summary = book.balance_sync().execute().await?;
    assert_eq!(
        summary,
        BalanceSyncSummary {
            selected: 2,
            updated: 1,
            failed: 1
        }
    );

    let healthy_after = book.accounts().find_by_id(healthy.id()).await?;
    assert_eq!(healthy_after.balance(), dec!(0.96224397));
    assert!(healthy_after.updated_at() >= healthy.updated_at());

    let broken_after = book.accounts().find_by_id(broken.id()).await?;
    assert_eq!(broken_after.balance(), dec!(0));
    assert_eq!(broken_after.updated_at(), broken.updated_at());

    let off_after = book.accounts().find_by_id(off.id()).await?;
    assert_eq!(off_after.balance(), dec!(0));
    assert_eq!(off_after.updated_at(), off.updated_at());
    Ok(())
}

#[tokio::test]
async fn failing_source_and_stale_off_account() -> anyhow::Result<()> {
    let mut builder = AccountBookConfig::builder();
    builder.balance_source(BalanceSourceConfig {
        url: "http://127.0.0.1:9".to_string(),
        request_timeout: Duration::from_secs(2),
    });
    let book = helpers::init_book_with(builder).await?;

    // created first, so it has the oldest `updated_at`
    let off = book
        .accounts()
        .create(helpers::test_account_named("Dormant", AccountStatus::Off))
        .await?;
    let a = book.accounts().create(helpers::test_account()).await?;
    let b = book.accounts().create(helpers::test_account()).await?;

    let batch = book.accounts().list_for_sync(5).await?;
    assert_eq!(
        batch.iter().map(|a| a.id()).collect::<Vec<_>>(),
        vec![a.id(), b.id()]
    );

    let summary = book.balance_sync().execute().await?;
    assert_eq!(summary.selected, 2);
    assert_eq!(summary.updated, 0);
    assert_eq!(summary.failed, summary.selected);

    for account in [&off, &a, &b] {
        let reloaded = book.accounts().find_by_id(account.id()).await?;
        assert_eq!(reloaded.balance(), dec!(0));
        assert_eq!(reloaded.updated_at(), account.updated_at());
    }
    Ok(())
}

#[tokio::test]
async fn batches_rotate_through_stale_accounts() -> anyhow::Result<()> {
    let book = helpers::init_book().await?;
    let a = book.accounts().create(helpers::test_account()).await?;
    let b = book.accounts().create(helpers::test_account()).await?;
    let c = book.accounts().create(helpers::test_account()).await?;

    let sync = BalanceSync::new(
        book.accounts(),
        Arc::new(FixedBalance(to_satoshi(dec!(1.5)).unwrap())),
        BalanceSyncConfig { batch_size: 2 },
    );

    let summary = sync.execute().await?;
    assert_eq!(summary.selected, 2);
    assert_eq!(summary.updated, 2);
    assert_eq!(
        book.accounts().find_by_id(a.id()).await?.balance(),
        dec!(1.5)
    );
    assert_eq!(
        book.accounts().find_by_id(b.id()).await?.balance(),
        dec!(1.5)
    );
    assert_eq!(book.accounts().find_by_id(c.id()).await?.balance(), dec!(0));

    // `c` is now the stalest account and goes first
    let batch = book.accounts().list_for_sync(2).await?;
    assert_eq!(batch[0].id(), c.id());
    sync.execute().await?;
    assert_eq!(
        book.accounts().find_by_id(c.id()).await?.balance(),
        dec!(1.5)
    );
    Ok(())
}

#[tokio::test]
async fn empty_book_is_a_no_op() -> anyhow::Result<()> {
    let book = helpers::init_book().await?;
    let summary = book.balance_sync().execute().await?;
    assert_eq!(summary, BalanceSyncSummary::default());
    Ok(())
}
