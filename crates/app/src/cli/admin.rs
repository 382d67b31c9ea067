use clap::{Args, Subcommand};
use mensa_app::{
    auth::{PgAuthService, models::NewUser},
    database::{self, Db},
};

#[derive(Debug, Args)]
pub(crate) struct AdminCommand {
    #[command(subcommand)]
    command: AdminSubcommand,
}

#[derive(Debug, Subcommand)]
enum AdminSubcommand {
    Create(CreateAdminArgs),
}

#[derive(Debug, Args)]
struct CreateAdminArgs {
    /// Admin display name
    #[arg(long)]
    name: String,

    /// Admin email address
    #[arg(long)]
    email: String,

    /// Admin password
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    password: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(command: AdminCommand) -> Result<(), String> {
    match command.command {
        AdminSubcommand::Create(args) => create_admin(args).await,
    }
}

async fn create_admin(args: CreateAdminArgs) -> Result<(), String> {
    if args.password.trim().is_empty() {
        return Err("password cannot be empty".to_string());
    }

    let pool = database::connect(&args.database_url, database::CLI_POOL_SIZE)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgAuthService::new(Db::new(pool));

    let admin = service
        .create_admin(NewUser {
            name: args.name,
            email: args.email,
            password: args.password,
        })
        .await
        .map_err(|error| format!("failed to create admin: {error}"))?;

    println!("admin_uuid: {}", admin.uuid);
    println!("admin_email: {}", admin.email);

    Ok(())
}
