use chrono::NaiveDate;

use crate::models::BookingStatus;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BookingError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("end date {end} is before start date {start}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("invalid payment amount: {0:?}")]
    InvalidAmount(String),

    #[error("booking not found: {0}")]
    NotFound(String),

    #[error("cannot move booking from {from} to {to}")]
    IllegalTransition {
        from: BookingStatus,
        to: BookingStatus,
    },

    #[error("payment of {amount} exceeds remaining balance {remaining}")]
    Overpayment { amount: f64, remaining: f64 },
}
