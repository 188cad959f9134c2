use anyhow::Context;
use tracing_subscriber::EnvFilter;

use rentaldesk::config::AppConfig;
use rentaldesk::state::AppState;

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::from_env();
    tracing::info!(
        overpayment = ?config.overpayment,
        transitions = ?config.transitions,
        "starting rentaldesk"
    );

    let state = AppState::from_config(config)?;
    let today = state.today();

    for booking in state.store.overdue_payments(today) {
        tracing::warn!(
            booking_id = %booking.id,
            customer = %booking.customer_name,
            remaining = booking.remaining_amount(),
            end_date = %booking.end_date,
            "payment overdue"
        );
    }

    let stats = state.store.dashboard(today);
    let json = serde_json::to_string_pretty(&stats).context("failed to serialize dashboard")?;
    println!("{json}");

    Ok(())
}
