use clap::Args;
use recipes_app::bootstrap;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct SeedArgs {
    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: SeedArgs) -> Result<(), String> {
    let pool = args.database.connect().await?;

    let inserted = bootstrap::seed(&pool)
        .await
        .map_err(|error| format!("failed to seed database: {error}"))?;

    println!("role permissions inserted: {inserted}");

    Ok(())
}
