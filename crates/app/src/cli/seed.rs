use clap::Args;
use mensa_app::database;
use sqlx::query;

const SEED_MENU_ITEM_SQL: &str = "INSERT INTO menu_items \
    (uuid, name, description, price, image_url, category, availability) \
    VALUES ($1, $2, $3, $4, $5, $6, $7) \
    ON CONFLICT (uuid) DO NOTHING";

/// Load the demo menu. Existing rows keep their stored values.
#[derive(Debug, Args)]
pub(crate) struct SeedArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: SeedArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url, database::CLI_POOL_SIZE)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let mut seeded = 0_u64;

    for item in mensa::fixtures::demo_menu() {
        let result = query(SEED_MENU_ITEM_SQL)
            .bind(item.uuid)
            .bind(&item.name)
            .bind(&item.description)
            .bind(item.price)
            .bind(&item.image_url)
            .bind(&item.category)
            .bind(item.availability)
            .execute(&pool)
            .await
            .map_err(|error| format!("failed to seed `{}`: {error}", item.name))?;

        seeded += result.rows_affected();
    }

    println!("seeded {seeded} menu items");

    Ok(())
}
