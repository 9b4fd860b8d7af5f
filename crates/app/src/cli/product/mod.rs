use std::time::Duration;

use aura_app::{
    database::{self, Db},
    domain::products::PgProductsService,
};
use clap::{Args, Subcommand};

mod create;
mod tester;

#[derive(Debug, Args)]
pub(crate) struct ProductCommand {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: ProductSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductSubcommand {
    Create(create::CreateProductArgs),
    Tester(tester::AddTesterArgs),
}

pub(crate) async fn run(command: ProductCommand) -> Result<(), String> {
    let database_url = command
        .database_url
        .ok_or_else(|| "--database-url or DATABASE_URL is required".to_string())?;

    let pool = database::connect(&database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    // Seeding is a one-shot process; nothing is read back through the cache.
    let service = PgProductsService::new(Db::new(pool), Duration::ZERO);

    match command.command {
        ProductSubcommand::Create(args) => create::run(&service, args).await,
        ProductSubcommand::Tester(args) => tester::run(&service, args).await,
    }
}
