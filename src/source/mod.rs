pub mod json;
pub mod seed;

use crate::models::Booking;

pub use json::JsonFileSource;
pub use seed::SeedSource;

/// Supplies the session's starting booking list in one call.
pub trait BookingSource {
    fn load(&self) -> anyhow::Result<Vec<Booking>>;
}
