use clap::{Parser, Subcommand};

mod admin;
mod db;
mod seed;

#[derive(Debug, Parser)]
#[command(name = "mensa-app", about = "Mensa CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Admin(admin::AdminCommand),
    Db(db::DbCommand),
    Seed(seed::SeedArgs),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Admin(command) => admin::run(command).await,
            Commands::Db(command) => db::run(command).await,
            Commands::Seed(args) => seed::run(args).await,
        }
    }
}
