use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    pub id: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub service_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: BookingStatus,
    pub total_price: f64,
    #[serde(default)]
    pub paid_amount: f64,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Booking {
    /// Balance still owed, to the satang; never negative, even after an
    /// overpayment.
    pub fn remaining_amount(&self) -> f64 {
        let remaining = round_money(self.total_price - self.paid_amount);
        if remaining > 0.0 {
            remaining
        } else {
            0.0
        }
    }

    pub fn payment_status(&self) -> PaymentStatus {
        PaymentStatus::derive(self.paid_amount, self.remaining_amount())
    }

    pub fn is_paid(&self) -> bool {
        self.payment_status() == PaymentStatus::Paid
    }

    pub fn rental_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }
}

/// Rounds to two decimal places, the smallest currency unit.
pub fn round_money(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 5] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::InProgress,
        BookingStatus::Completed,
        BookingStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::InProgress => "in-progress",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(BookingStatus::Pending),
            "confirmed" => Some(BookingStatus::Confirmed),
            "in-progress" => Some(BookingStatus::InProgress),
            "completed" => Some(BookingStatus::Completed),
            "cancelled" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Unpaid,
    Partial,
    Paid,
}

impl PaymentStatus {
    pub fn derive(paid_amount: f64, remaining_amount: f64) -> Self {
        if remaining_amount <= 0.0 {
            PaymentStatus::Paid
        } else if paid_amount > 0.0 {
            PaymentStatus::Partial
        } else {
            PaymentStatus::Unpaid
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Partial => "partial",
            PaymentStatus::Paid => "paid",
        }
    }
}

/// Form input for a new booking. Dates and price arrive as the form holds
/// them: possibly unset, price as raw text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewBooking {
    pub customer_name: String,
    pub customer_phone: String,
    pub service_name: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub total_price: String,
    pub notes: Option<String>,
}

/// Booking as handed to the presentation layer, derived fields included.
#[derive(Debug, Clone, Serialize)]
pub struct BookingView {
    pub id: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub service_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub rental_days: i64,
    pub status: BookingStatus,
    pub total_price: f64,
    pub paid_amount: f64,
    pub remaining_amount: f64,
    pub payment_status: PaymentStatus,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<&Booking> for BookingView {
    fn from(b: &Booking) -> Self {
        BookingView {
            id: b.id.clone(),
            customer_name: b.customer_name.clone(),
            customer_phone: b.customer_phone.clone(),
            service_name: b.service_name.clone(),
            start_date: b.start_date,
            end_date: b.end_date,
            rental_days: b.rental_days(),
            status: b.status,
            total_price: b.total_price,
            paid_amount: b.paid_amount,
            remaining_amount: b.remaining_amount(),
            payment_status: b.payment_status(),
            notes: b.notes.clone(),
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}
