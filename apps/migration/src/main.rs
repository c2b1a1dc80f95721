//! Migration CLI tool.
//!
//! Reads `DATABASE_URL` and accepts the standard SeaORM subcommands
//! (`up`, `down`, `status`, `fresh`, ...).

use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt().with_env_filter("info").init();
    tracing::info!(
        migrations = quill_migration::Migrator::migrations().len(),
        "Running quill migrations"
    );

    cli::run_cli(quill_migration::Migrator).await;
}
