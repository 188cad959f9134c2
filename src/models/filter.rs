use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Queue tabs. Each maps to a status or payment predicate.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BookingTab {
    #[default]
    All,
    Pending,
    InProgress,
    Completed,
    AwaitingPayment,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingFilter {
    #[serde(default)]
    pub tab: BookingTab,
    #[serde(default)]
    pub search: String,
    pub start_from: Option<NaiveDate>,
    pub end_until: Option<NaiveDate>,
    #[serde(default)]
    pub service: String,
}
