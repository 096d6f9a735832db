use clap::Args;
use recipes_app::bootstrap;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct MigrateArgs {
    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: MigrateArgs) -> Result<(), String> {
    let pool = args.database.connect().await?;

    bootstrap::migrate(&pool)
        .await
        .map_err(|error| format!("failed to migrate database: {error}"))?;

    println!("migrations applied");

    Ok(())
}
