use chrono::{NaiveDate, NaiveDateTime, Utc};

use crate::errors::BookingError;
use crate::models::{Booking, BookingFilter, BookingStatus, DashboardStats, NewBooking};
use crate::services::lifecycle::{self, LedgerPolicy};
use crate::services::{dashboard, filter};
use crate::source::BookingSource;

/// The session's booking list.
///
/// Every mutation builds a new list through the lifecycle functions and swaps
/// it in only on success, so a failed call leaves the store untouched.
#[derive(Debug, Clone, Default)]
pub struct BookingStore {
    bookings: Vec<Booking>,
    policy: LedgerPolicy,
}

impl BookingStore {
    pub fn new(bookings: Vec<Booking>, policy: LedgerPolicy) -> Self {
        Self { bookings, policy }
    }

    pub fn load(source: &dyn BookingSource, policy: LedgerPolicy) -> anyhow::Result<Self> {
        let bookings = source.load()?;
        tracing::info!(count = bookings.len(), "booking store loaded");
        Ok(Self::new(bookings, policy))
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn policy(&self) -> LedgerPolicy {
        self.policy
    }

    pub fn get(&self, id: &str) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.id == id)
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    pub fn add(&mut self, input: &NewBooking) -> Result<&Booking, BookingError> {
        let booking = lifecycle::create_booking(input, now()).inspect_err(|e| {
            tracing::debug!(error = %e, "booking not created");
        })?;

        tracing::info!(
            booking_id = %booking.id,
            service = %booking.service_name,
            total_price = booking.total_price,
            "booking created"
        );

        let id = booking.id.clone();
        let mut next = self.bookings.clone();
        next.push(booking);
        self.replace(next);
        self.expect_present(&id)
    }

    pub fn update_status(&mut self, id: &str, status: BookingStatus) -> Result<&Booking, BookingError> {
        let next = lifecycle::update_status(&self.bookings, id, status, self.policy.transitions, now())
            .inspect_err(|e| {
                tracing::warn!(booking_id = id, error = %e, "status update refused");
            })?;

        tracing::info!(booking_id = id, status = status.as_str(), "booking status updated");
        self.replace(next);
        self.expect_present(id)
    }

    /// Applies a payment typed into the payment form.
    pub fn apply_payment(&mut self, id: &str, amount_text: &str) -> Result<&Booking, BookingError> {
        let amount = lifecycle::parse_amount(amount_text)?;
        let next = lifecycle::apply_payment(&self.bookings, id, amount, self.policy.overpayment, now())
            .inspect_err(|e| {
                tracing::warn!(booking_id = id, error = %e, "payment refused");
            })?;

        self.replace(next);
        let booking = self.expect_present(id)?;
        tracing::info!(
            booking_id = id,
            amount,
            paid_amount = booking.paid_amount,
            remaining = booking.remaining_amount(),
            payment_status = booking.payment_status().as_str(),
            "payment applied"
        );
        Ok(booking)
    }

    pub fn remove(&mut self, id: &str) -> Result<Booking, BookingError> {
        let removed = self
            .get(id)
            .cloned()
            .ok_or_else(|| BookingError::NotFound(id.to_string()))?;
        let next = lifecycle::remove_booking(&self.bookings, id)?;

        tracing::info!(booking_id = id, "booking removed");
        self.replace(next);
        Ok(removed)
    }

    pub fn filtered(&self, criteria: &BookingFilter) -> Vec<Booking> {
        filter::filter_bookings(&self.bookings, criteria)
    }

    pub fn service_names(&self) -> Vec<String> {
        filter::service_names(&self.bookings)
    }

    pub fn overdue_payments(&self, today: NaiveDate) -> Vec<Booking> {
        filter::overdue_payments(&self.bookings, today)
    }

    pub fn dashboard(&self, today: NaiveDate) -> DashboardStats {
        dashboard::build_dashboard(&self.bookings, today)
    }

    fn replace(&mut self, next: Vec<Booking>) {
        self.bookings = next;
    }

    fn expect_present(&self, id: &str) -> Result<&Booking, BookingError> {
        self.get(id)
            .ok_or_else(|| BookingError::NotFound(id.to_string()))
    }
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}
