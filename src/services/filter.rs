use std::collections::HashSet;

use chrono::NaiveDate;

use crate::models::{Booking, BookingFilter, BookingStatus, BookingTab};

impl BookingTab {
    pub fn matches(&self, booking: &Booking) -> bool {
        match self {
            BookingTab::All => true,
            BookingTab::Pending => booking.status == BookingStatus::Pending,
            BookingTab::InProgress => matches!(
                booking.status,
                BookingStatus::Confirmed | BookingStatus::InProgress
            ),
            BookingTab::Completed => booking.status == BookingStatus::Completed,
            BookingTab::AwaitingPayment => !booking.is_paid(),
        }
    }
}

impl BookingFilter {
    pub fn matches(&self, booking: &Booking) -> bool {
        self.tab.matches(booking)
            && self.matches_search(booking)
            && self.start_from.map_or(true, |from| booking.start_date >= from)
            && self.end_until.map_or(true, |until| booking.end_date <= until)
            && (self.service.is_empty() || booking.service_name == self.service)
    }

    fn matches_search(&self, booking: &Booking) -> bool {
        let needle = self.search.to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [
            &booking.customer_name,
            &booking.customer_phone,
            &booking.service_name,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Bookings passing every criterion, in their original order.
pub fn filter_bookings(bookings: &[Booking], criteria: &BookingFilter) -> Vec<Booking> {
    bookings
        .iter()
        .filter(|b| criteria.matches(b))
        .cloned()
        .collect()
}

/// Distinct service names, first-seen order.
pub fn service_names(bookings: &[Booking]) -> Vec<String> {
    let mut seen = HashSet::new();
    bookings
        .iter()
        .filter(|b| seen.insert(b.service_name.as_str()))
        .map(|b| b.service_name.clone())
        .collect()
}

/// Finished-but-unpaid jobs: end date passed, not cancelled, balance still open.
pub fn overdue_payments(bookings: &[Booking], today: NaiveDate) -> Vec<Booking> {
    bookings
        .iter()
        .filter(|b| !b.is_paid() && b.end_date < today && b.status != BookingStatus::Cancelled)
        .cloned()
        .collect()
}
