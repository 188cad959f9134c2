use chrono::{NaiveDate, Utc};

use crate::config::AppConfig;
use crate::source::{BookingSource, JsonFileSource, SeedSource};
use crate::store::BookingStore;

pub struct AppState {
    pub config: AppConfig,
    pub store: BookingStore,
}

impl AppState {
    pub fn from_config(config: AppConfig) -> anyhow::Result<Self> {
        let today = reference_date(&config);
        let source: Box<dyn BookingSource> = match &config.seed_file {
            Some(path) => {
                tracing::info!("loading bookings from {path}");
                Box::new(JsonFileSource::new(path))
            }
            None => {
                tracing::info!("no SEED_FILE set, using built-in seed data");
                Box::new(SeedSource::new(today))
            }
        };

        let store = BookingStore::load(source.as_ref(), config.ledger_policy())?;
        Ok(Self { config, store })
    }

    /// The date dashboard figures are computed for.
    pub fn today(&self) -> NaiveDate {
        reference_date(&self.config)
    }
}

fn reference_date(config: &AppConfig) -> NaiveDate {
    config
        .report_date
        .unwrap_or_else(|| Utc::now().date_naive())
}
