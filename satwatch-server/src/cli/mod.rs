pub mod config;
mod db;

use clap::Parser;
use std::path::PathBuf;

use self::config::{Config, EnvOverride};

#[derive(Parser)]
#[clap(long_about = None)]
struct Cli {
    #[clap(short, long, env = "SATWATCH_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,
    #[clap(env = "PG_CON")]
    pg_con: String,
    #[clap(long, env = "ADMIN_API_KEY", hide_env_values = true)]
    admin_api_key: Option<String>,
    #[clap(long, env = "CRON_API_KEY", hide_env_values = true)]
    cron_api_key: Option<String>,
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load_config(
        cli.config,
        EnvOverride {
            db_con: cli.pg_con,
            admin_api_key: cli.admin_api_key,
            cron_api_key: cli.cron_api_key,
        },
    )?;

    run_cmd(config).await?;

    Ok(())
}

async fn run_cmd(config: Config) -> anyhow::Result<()> {
    use satwatch::{AccountBook, AccountBookConfig};
    satwatch_tracing::init_tracer(config.tracing)?;
    let book_config = AccountBookConfig::builder()
        .pg_con(config.db.pg_con.clone())
        .max_connections(config.db.pool_size)
        .exec_migrations(config.db.exec_migrations)
        .balance_sync(config.app.balance_sync.clone())
        .balance_source(config.app.balance_source.clone())
        .build()?;
    let book = AccountBook::init(book_config).await?;
    let app = crate::app::SatwatchApp::run(book, config.app).await?;
    crate::server::run(config.server, app).await?;
    Ok(())
}
