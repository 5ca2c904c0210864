use migration::config::load_config;
use migration::runner::verify_ordering;
use migration::Migrator;
use sea_orm_migration::prelude::*;
use std::env;

#[tokio::main]
async fn main() {
    if let Err(err) = verify_ordering::<Migrator>() {
        eprintln!("refusing to run migrations: {err}");
        std::process::exit(1);
    }

    // `--database-url` on the command line still wins over both of these.
    if env::var("DATABASE_URL").is_err() {
        match load_config() {
            Ok(cfg) => env::set_var("DATABASE_URL", cfg.database_url),
            Err(err) => eprintln!("no database url from configuration: {err}"),
        }
    }
    cli::run_cli(Migrator).await;
}
