#![forbid(unsafe_code)]

use std::path::PathBuf;

use clap::Parser;
use db::store::PgPocketLinks;
use dotenvy::dotenv;
use env_logger::{Env, Target};

/// Import a Pocket CSV export (title,url,time_added,tags,status) into the database
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Opts {
    /// Path to the exported CSV file
    csv_file: PathBuf,
    /// Postgres connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Stdout)
        .init();

    let opts = Opts::parse();
    log::info!("Starting Pocket data ingestion from {}", opts.csv_file.display());

    let db_pool = db::pool(&opts.database_url, 1)?;
    let mut store = PgPocketLinks::acquire(&db_pool).await?;
    db::migrations::run_migrations(store.connection()).await?;
    log::info!("Database tables ready");

    let rows = pocket::read_rows(&opts.csv_file)?;
    let summary = pocket::import(&mut store, rows).await?;

    println!();
    println!("Ingestion complete!");
    println!("Records processed: {}", summary.processed);
    println!("Records skipped: {}", summary.skipped);
    if summary.ignored > 0 {
        println!("Duplicate records ignored on insert: {}", summary.ignored);
    }

    Ok(())
}
