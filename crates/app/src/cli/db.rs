use clap::{Args, Subcommand};
use mensa_app::database;

const SCHEMA_SQL: &str = include_str!("../../schema.sql");

#[derive(Debug, Args)]
pub(crate) struct DbCommand {
    #[command(subcommand)]
    command: DbSubcommand,
}

#[derive(Debug, Subcommand)]
enum DbSubcommand {
    /// Apply the schema. Statements are idempotent; re-running is safe.
    Migrate(MigrateArgs),
}

#[derive(Debug, Args)]
struct MigrateArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(command: DbCommand) -> Result<(), String> {
    match command.command {
        DbSubcommand::Migrate(args) => migrate(args).await,
    }
}

async fn migrate(args: MigrateArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url, database::CLI_POOL_SIZE)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    sqlx::raw_sql(SCHEMA_SQL)
        .execute(&pool)
        .await
        .map_err(|error| format!("failed to apply schema: {error}"))?;

    println!("schema applied");

    Ok(())
}
