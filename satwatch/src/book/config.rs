use derive_builder::Builder;

use crate::{balance_source::BalanceSourceConfig, balance_sync::BalanceSyncConfig};

#[derive(Builder)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct AccountBookConfig {
    #[builder(setter(into, strip_option), default)]
    pub(super) pg_con: Option<String>,
    #[builder(setter(into, strip_option), default)]
    pub(super) max_connections: Option<u32>,
    #[builder(default)]
    pub(super) exec_migrations: bool,
    #[builder(setter(into, strip_option), default)]
    pub(super) pool: Option<sqlx::PgPool>,
    #[builder(default)]
    pub(super) balance_sync: BalanceSyncConfig,
    #[builder(default)]
    pub(super) balance_source: BalanceSourceConfig,
}

impl AccountBookConfig {
    pub fn builder() -> AccountBookConfigBuilder {
        AccountBookConfigBuilder::default()
    }
}

impl AccountBookConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match (self.pg_con.as_ref(), self.pool.as_ref()) {
            (None, None) | (Some(None), None) | (None, Some(None)) => {
                return Err("One of pg_con or pool must be set".to_string())
            }
            (Some(Some(_)), Some(Some(_))) => {
                return Err("Only one of pg_con or pool must be set".to_string())
            }
            _ => (),
        }
        if let Some(balance_sync) = self.balance_sync.as_ref() {
            if balance_sync.batch_size == 0 {
                return Err("balance_sync.batch_size must be at least 1".to_string());
            }
        }
        Ok(())
    }
}
