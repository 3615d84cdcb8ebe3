use std::io;

use anyhow::Context;
use chrono::Local;
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod shell;

use clinic_cell::Clinic;
use shared_config::AppConfig;
use shell::Shell;

fn main() -> anyhow::Result<()> {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing on stderr so logs stay out of the menu
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    info!("Starting clinic appointment system");

    // Load configuration
    let config = AppConfig::from_env();

    let mut clinic = Clinic::from_config(&config, Local::now().date_naive())
        .context("failed to load demo data")?;

    println!("============================================================");
    println!("WELCOME TO THE APPOINTMENT MANAGEMENT SYSTEM");
    println!("Clinic '{}'", config.clinic_name);
    println!("============================================================");

    let stdin = io::stdin();
    let stdout = io::stdout();
    Shell::new(&mut clinic, config.clinic_name.clone(), stdin.lock(), stdout.lock())
        .run()
        .context("terminal I/O failed")?;

    info!("Clinic appointment system stopped");
    Ok(())
}
