mod catalog;
mod config;
mod data;
mod error;
mod http;
mod images;
mod seeder;

use config::Config;
use seeder::Seeder;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    if let Err(err) = run().await {
        error!(target = "seeder.run", "seeding failed: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::from_env();

    let data = data::load_from_dir(&config.data_dir)?;
    info!(
        target = "seeder.run",
        categories = data.categories.len(),
        products = data.products.len(),
        "loaded seed data"
    );

    let mut seeder = Seeder::new(&config);
    seeder.run(&data).await?;

    info!(target = "seeder.run", "demo data seeding completed");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}
