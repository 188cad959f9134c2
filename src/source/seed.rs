use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::models::{Booking, BookingStatus};
use crate::source::BookingSource;

/// Built-in demo data: sound and lighting rental jobs spread around `today`.
pub struct SeedSource {
    today: NaiveDate,
}

impl SeedSource {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

struct SeedJob {
    customer: &'static str,
    phone: &'static str,
    service: &'static str,
    // start offset from today, in days
    starts_in: i64,
    days: i64,
    status: BookingStatus,
    price: f64,
    paid: f64,
    notes: Option<&'static str>,
}

const JOBS: &[SeedJob] = &[
    SeedJob { customer: "Somchai Jaidee", phone: "081-234-5678", service: "Wedding Sound Package", starts_in: -400, days: 1, status: BookingStatus::Completed, price: 18000.0, paid: 18000.0, notes: None },
    SeedJob { customer: "Wichai Thongdee", phone: "089-555-0101", service: "PA System", starts_in: -330, days: 2, status: BookingStatus::Completed, price: 9000.0, paid: 9000.0, notes: None },
    SeedJob { customer: "Malee Sukjai", phone: "086-777-1212", service: "Concert Line Array", starts_in: -120, days: 3, status: BookingStatus::Completed, price: 45000.0, paid: 45000.0, notes: Some("outdoor stage, generator on site") },
    SeedJob { customer: "Anan Boonmee", phone: "082-333-4455", service: "PA System", starts_in: -75, days: 1, status: BookingStatus::Completed, price: 7500.0, paid: 7500.0, notes: None },
    SeedJob { customer: "Somying Rakdee", phone: "091-111-2233", service: "Stage Lighting", starts_in: -45, days: 2, status: BookingStatus::Completed, price: 12000.0, paid: 6000.0, notes: Some("balance due on pickup") },
    SeedJob { customer: "Preecha Wongsa", phone: "084-888-9900", service: "Wedding Sound Package", starts_in: -20, days: 1, status: BookingStatus::Completed, price: 15000.0, paid: 15000.0, notes: None },
    SeedJob { customer: "Kanya Srisuk", phone: "095-246-8101", service: "DJ Booth", starts_in: -12, days: 1, status: BookingStatus::InProgress, price: 8000.0, paid: 3000.0, notes: Some("equipment not yet returned") },
    SeedJob { customer: "Nattapong Chaiyo", phone: "087-135-7911", service: "LED Screen", starts_in: -9, days: 2, status: BookingStatus::Confirmed, price: 22000.0, paid: 0.0, notes: None },
    SeedJob { customer: "Ratana Meesuk", phone: "080-864-2000", service: "PA System", starts_in: -6, days: 1, status: BookingStatus::Cancelled, price: 5000.0, paid: 0.0, notes: Some("event postponed") },
    SeedJob { customer: "Surachai Kaewmanee", phone: "083-222-1100", service: "Stage Lighting", starts_in: -1, days: 3, status: BookingStatus::InProgress, price: 14000.0, paid: 7000.0, notes: None },
    SeedJob { customer: "Pimchanok Dee", phone: "090-909-0909", service: "Wedding Sound Package", starts_in: 10, days: 1, status: BookingStatus::Confirmed, price: 16000.0, paid: 5000.0, notes: Some("ceremony 16:00, reception 18:30") },
    SeedJob { customer: "Thanakorn Ruang", phone: "088-765-4321", service: "PA System", starts_in: 25, days: 2, status: BookingStatus::Pending, price: 8500.0, paid: 0.0, notes: None },
];

impl BookingSource for SeedSource {
    fn load(&self) -> anyhow::Result<Vec<Booking>> {
        let bookings = JOBS
            .iter()
            .enumerate()
            .map(|(i, job)| {
                let start_date = self.today + Duration::days(job.starts_in);
                let booked_at = booked_at(start_date);
                Booking {
                    id: format!("seed-{:02}", i + 1),
                    customer_name: job.customer.to_string(),
                    customer_phone: job.phone.to_string(),
                    service_name: job.service.to_string(),
                    start_date,
                    end_date: start_date + Duration::days(job.days),
                    status: job.status,
                    total_price: job.price,
                    paid_amount: job.paid,
                    notes: job.notes.map(str::to_string),
                    created_at: booked_at,
                    updated_at: booked_at,
                }
            })
            .collect::<Vec<_>>();

        tracing::debug!(count = bookings.len(), today = %self.today, "built seed bookings");
        Ok(bookings)
    }
}

// Two weeks ahead of the job, at 10:00.
fn booked_at(start_date: NaiveDate) -> NaiveDateTime {
    let day = start_date - Duration::days(14);
    day.and_hms_opt(10, 0, 0).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::dashboard;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    #[test]
    fn test_seed_is_deterministic() {
        let a = SeedSource::new(today()).load().unwrap();
        let b = SeedSource::new(today()).load().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), JOBS.len());
    }

    #[test]
    fn test_seed_dates_are_ordered() {
        for booking in SeedSource::new(today()).load().unwrap() {
            assert!(booking.end_date >= booking.start_date);
            assert!(booking.paid_amount <= booking.total_price);
        }
    }

    #[test]
    fn test_seed_covers_dashboard_cases() {
        let bookings = SeedSource::new(today()).load().unwrap();
        assert!(!dashboard::overdue_bookings(&bookings, today()).is_empty());
        assert!(dashboard::revenue_for_year(&bookings, 2025) > 0.0);
        assert!(dashboard::revenue_for_year(&bookings, 2024) > 0.0);
        assert!(dashboard::outstanding_for_year(&bookings, 2025) > 0.0);
    }
}
