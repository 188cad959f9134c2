use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use anyhow::Context;

use crate::models::Booking;
use crate::source::BookingSource;

/// Reads a JSON array of bookings from disk.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl BookingSource for JsonFileSource {
    fn load(&self) -> anyhow::Result<Vec<Booking>> {
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read booking file: {}", self.path.display()))?;

        let bookings: Vec<Booking> = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse booking file: {}", self.path.display()))?;

        let mut ids = HashSet::new();
        for booking in &bookings {
            anyhow::ensure!(
                ids.insert(booking.id.as_str()),
                "duplicate booking id in {}: {}",
                self.path.display(),
                booking.id
            );
        }

        tracing::info!(
            path = %self.path.display(),
            count = bookings.len(),
            "loaded bookings from file"
        );
        Ok(bookings)
    }
}
