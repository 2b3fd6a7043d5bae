use anyhow::Result;
use clap::Parser;
use hotel_etl::{
    config::{DatabaseConfig, PipelineConfig},
    pipeline,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Clean a hotel-bookings CSV and load it into a SQL table named after the file"
)]
struct Args {
    /// CSV file to load
    #[arg(env = "CSV_FILE_PATH", default_value = "data/hotel_bookings.csv")]
    csv_path: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) environment + logging ────────────────────────────────────
    dotenvy::dotenv().ok();
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();

    // ─── 2) configuration ────────────────────────────────────────────
    let args = Args::parse();
    let config = PipelineConfig {
        csv_path: args.csv_path,
        database: DatabaseConfig::from_env()?,
    };
    info!(?config, "startup");

    // ─── 3) load → clean → persist ───────────────────────────────────
    let report = pipeline::run(&config).await?;
    println!(
        "Data from {} uploaded successfully to table '{}'.",
        config.csv_path.display(),
        report.table
    );
    Ok(())
}
