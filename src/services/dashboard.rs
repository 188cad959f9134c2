//! Revenue dashboard figures.
//!
//! Everything here is recomputed from the booking list on each call; nothing
//! is cached. Revenue counts only completed bookings and is attributed to the
//! month of the booking's end date.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};

use crate::models::{
    Booking, BookingStatus, BookingView, DashboardStats, MonthRevenue, ServiceStat, StatusCounts,
};

const TOP_N: usize = 5;

fn ends_in(booking: &Booking, year: i32, month: Option<u32>) -> bool {
    booking.end_date.year() == year && month.map_or(true, |m| booking.end_date.month() == m)
}

fn completed_revenue(bookings: &[Booking], year: i32, month: Option<u32>) -> f64 {
    bookings
        .iter()
        .filter(|b| b.status == BookingStatus::Completed && ends_in(b, year, month))
        .map(|b| b.total_price)
        .sum()
}

/// Completed revenue per month of `year`; index 0 is January.
pub fn monthly_revenue(bookings: &[Booking], year: i32) -> [f64; 12] {
    let mut months = [0.0; 12];
    for booking in bookings {
        if booking.status == BookingStatus::Completed && booking.end_date.year() == year {
            months[booking.end_date.month0() as usize] += booking.total_price;
        }
    }
    months
}

pub fn revenue_for_month(bookings: &[Booking], year: i32, month: u32) -> f64 {
    completed_revenue(bookings, year, Some(month))
}

pub fn revenue_for_year(bookings: &[Booking], year: i32) -> f64 {
    completed_revenue(bookings, year, None)
}

/// Percentage change from `previous` to `current`. A zero baseline reports 0
/// rather than an undefined ratio.
pub fn growth_percent(current: f64, previous: f64) -> f64 {
    if previous > 0.0 {
        (current - previous) / previous * 100.0
    } else {
        0.0
    }
}

/// (year, month) of the calendar month before `today`'s.
fn previous_month(today: NaiveDate) -> (i32, u32) {
    match today.month() {
        1 => (today.year() - 1, 12),
        m => (today.year(), m - 1),
    }
}

pub fn month_growth(bookings: &[Booking], today: NaiveDate) -> f64 {
    let (prev_year, prev_month) = previous_month(today);
    growth_percent(
        revenue_for_month(bookings, today.year(), today.month()),
        revenue_for_month(bookings, prev_year, prev_month),
    )
}

pub fn year_growth(bookings: &[Booking], today: NaiveDate) -> f64 {
    growth_percent(
        revenue_for_year(bookings, today.year()),
        revenue_for_year(bookings, today.year() - 1),
    )
}

fn outstanding(bookings: &[Booking], year: i32, month: Option<u32>) -> f64 {
    bookings
        .iter()
        .filter(|b| ends_in(b, year, month))
        .map(Booking::remaining_amount)
        .filter(|r| *r > 0.0)
        .sum()
}

pub fn outstanding_for_month(bookings: &[Booking], year: i32, month: u32) -> f64 {
    outstanding(bookings, year, Some(month))
}

pub fn outstanding_for_year(bookings: &[Booking], year: i32) -> f64 {
    outstanding(bookings, year, None)
}

/// Jobs past their end date that were never closed out.
pub fn overdue_bookings(bookings: &[Booking], today: NaiveDate) -> Vec<Booking> {
    bookings
        .iter()
        .filter(|b| b.end_date < today && !b.status.is_terminal())
        .cloned()
        .collect()
}

/// Services ranked by how often they are booked. Revenue only counts
/// completed jobs. Equal counts keep first-seen order.
pub fn popular_services(bookings: &[Booking]) -> Vec<ServiceStat> {
    let mut stats: Vec<ServiceStat> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for booking in bookings {
        let slot = *index.entry(booking.service_name.as_str()).or_insert_with(|| {
            stats.push(ServiceStat {
                service: booking.service_name.clone(),
                count: 0,
                revenue: 0.0,
            });
            stats.len() - 1
        });

        let stat = &mut stats[slot];
        stat.count += 1;
        if booking.status == BookingStatus::Completed {
            stat.revenue += booking.total_price;
        }
    }

    // stable: ties stay in first-seen order
    stats.sort_by(|a, b| b.count.cmp(&a.count));
    stats.truncate(TOP_N);
    stats
}

/// The highest-earning months. Equal revenue keeps calendar order.
pub fn top_revenue_months(monthly: &[f64; 12]) -> Vec<MonthRevenue> {
    let mut months: Vec<MonthRevenue> = monthly
        .iter()
        .enumerate()
        .map(|(i, revenue)| MonthRevenue {
            month: i as u32 + 1,
            revenue: *revenue,
        })
        .collect();

    months.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    months.truncate(TOP_N);
    months
}

pub fn status_counts(bookings: &[Booking]) -> StatusCounts {
    let mut counts = StatusCounts {
        total: bookings.len(),
        ..Default::default()
    };
    for booking in bookings {
        match booking.status {
            BookingStatus::Pending => counts.pending += 1,
            BookingStatus::Confirmed => counts.confirmed += 1,
            BookingStatus::InProgress => counts.in_progress += 1,
            BookingStatus::Completed => counts.completed += 1,
            BookingStatus::Cancelled => counts.cancelled += 1,
        }
    }
    counts
}

/// Bookings whose rental starts in the given month.
pub fn new_bookings_in_month(bookings: &[Booking], year: i32, month: u32) -> usize {
    bookings
        .iter()
        .filter(|b| b.start_date.year() == year && b.start_date.month() == month)
        .count()
}

/// Share of all bookings that are completed, as a whole percentage.
pub fn completion_rate(counts: &StatusCounts) -> f64 {
    if counts.total == 0 {
        return 0.0;
    }
    (counts.completed as f64 / counts.total as f64 * 100.0).round()
}

pub fn average_revenue_per_job(year_revenue: f64, completed: usize) -> f64 {
    if completed == 0 {
        return 0.0;
    }
    (year_revenue / completed as f64).round()
}

/// Every dashboard figure for the period containing `today`.
pub fn build_dashboard(bookings: &[Booking], today: NaiveDate) -> DashboardStats {
    let year = today.year();
    let month = today.month();
    let (prev_year, prev_month) = previous_month(today);

    let monthly = monthly_revenue(bookings, year);
    let current_month_revenue = monthly[today.month0() as usize];
    let previous_month_revenue = revenue_for_month(bookings, prev_year, prev_month);
    let current_year_revenue: f64 = monthly.iter().sum();
    let previous_year_revenue = revenue_for_year(bookings, year - 1);
    let counts = status_counts(bookings);

    DashboardStats {
        as_of: today,
        year,
        month,
        monthly_revenue: monthly,
        current_month_revenue,
        previous_month_revenue,
        month_growth: growth_percent(current_month_revenue, previous_month_revenue),
        current_year_revenue,
        previous_year_revenue,
        year_growth: growth_percent(current_year_revenue, previous_year_revenue),
        current_month_outstanding: outstanding_for_month(bookings, year, month),
        current_year_outstanding: outstanding_for_year(bookings, year),
        status_counts: counts,
        new_bookings_this_month: new_bookings_in_month(bookings, year, month),
        overdue: overdue_bookings(bookings, today)
            .iter()
            .map(BookingView::from)
            .collect(),
        popular_services: popular_services(bookings),
        top_months: top_revenue_months(&monthly),
        completion_rate: completion_rate(&counts),
        average_revenue_per_job: average_revenue_per_job(current_year_revenue, counts.completed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn job(service: &str, end: &str, status: BookingStatus, price: f64, paid: f64) -> Booking {
        let now = NaiveDateTime::parse_from_str("2025-01-01 00:00", "%Y-%m-%d %H:%M").unwrap();
        let end_date = date(end);
        Booking {
            id: format!("{service}-{end}"),
            customer_name: "Customer".to_string(),
            customer_phone: "0800000000".to_string(),
            service_name: service.to_string(),
            start_date: end_date - chrono::Duration::days(1),
            end_date,
            status,
            total_price: price,
            paid_amount: paid,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn sample() -> Vec<Booking> {
        use BookingStatus::*;
        vec![
            job("PA System", "2025-01-15", Completed, 10000.0, 10000.0),
            job("PA System", "2025-03-02", Completed, 4000.0, 4000.0),
            job("Stage Lighting", "2025-03-20", Completed, 6000.0, 3000.0),
            job("DJ Booth", "2025-03-25", Confirmed, 8000.0, 0.0),
            job("Stage Lighting", "2025-02-10", Cancelled, 2000.0, 0.0),
            job("PA System", "2024-12-31", Completed, 5000.0, 5000.0),
            job("LED Screen", "2024-06-01", Completed, 15000.0, 15000.0),
        ]
    }

    #[test]
    fn test_monthly_revenue_has_twelve_entries() {
        let months = monthly_revenue(&sample(), 2025);
        assert_eq!(months.len(), 12);
        assert_eq!(months[0], 10000.0);
        assert_eq!(months[1], 0.0);
        assert_eq!(months[2], 10000.0);
        assert_eq!(months.iter().sum::<f64>(), revenue_for_year(&sample(), 2025));
    }

    #[test]
    fn test_monthly_revenue_ignores_other_years_and_statuses() {
        let months = monthly_revenue(&sample(), 2024);
        assert_eq!(months[5], 15000.0);
        assert_eq!(months[11], 5000.0);
        assert_eq!(months.iter().sum::<f64>(), 20000.0);
    }

    #[test]
    fn test_growth_percent() {
        assert_eq!(growth_percent(150.0, 100.0), 50.0);
        assert_eq!(growth_percent(50.0, 100.0), -50.0);
        assert_eq!(growth_percent(500.0, 0.0), 0.0);
    }

    #[test]
    fn test_month_growth_january_compares_previous_december() {
        // Jan 2025: 10000 against Dec 2024: 5000
        assert_eq!(month_growth(&sample(), date("2025-01-20")), 100.0);
    }

    #[test]
    fn test_year_growth() {
        // 2025: 20000 against 2024: 20000
        assert_eq!(year_growth(&sample(), date("2025-03-28")), 0.0);
        assert_eq!(year_growth(&sample(), date("2024-03-28")), 0.0);
    }

    #[test]
    fn test_outstanding() {
        let all = sample();
        // Stage Lighting owes 3000, DJ Booth 8000, cancelled Stage Lighting 2000
        assert_eq!(outstanding_for_month(&all, 2025, 3), 11000.0);
        assert_eq!(outstanding_for_year(&all, 2025), 13000.0);
        assert_eq!(outstanding_for_year(&all, 2024), 0.0);
    }

    #[test]
    fn test_overdue_bookings() {
        let overdue = overdue_bookings(&sample(), date("2025-03-28"));
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].service_name, "DJ Booth");
        assert!(overdue_bookings(&sample(), date("2025-03-25")).is_empty());
    }

    #[test]
    fn test_popular_services_sorted_by_count() {
        let services = popular_services(&sample());
        let names: Vec<&str> = services.iter().map(|s| s.service.as_str()).collect();
        assert_eq!(names, vec!["PA System", "Stage Lighting", "DJ Booth", "LED Screen"]);
        assert_eq!(services[0].count, 3);
        assert_eq!(services[0].revenue, 19000.0);
        assert_eq!(services[1].revenue, 6000.0);
    }

    #[test]
    fn test_popular_services_count_beats_revenue() {
        use BookingStatus::Completed;
        let bookings = vec![
            job("A", "2025-01-01", Completed, 1000.0, 0.0),
            job("B", "2025-01-02", Completed, 5000.0, 0.0),
            job("A", "2025-01-03", Completed, 1000.0, 0.0),
        ];
        let services = popular_services(&bookings);
        assert_eq!(services[0].service, "A");
        assert_eq!(services[0].count, 2);
        assert_eq!(services[1].service, "B");
    }

    #[test]
    fn test_popular_services_ties_keep_insertion_order() {
        use BookingStatus::Pending;
        let bookings: Vec<Booking> = ["F", "E", "D", "C", "B", "A"]
            .iter()
            .map(|s| job(s, "2025-01-01", Pending, 100.0, 0.0))
            .collect();
        let names: Vec<String> = popular_services(&bookings)
            .into_iter()
            .map(|s| s.service)
            .collect();
        assert_eq!(names, vec!["F", "E", "D", "C", "B"]);
    }

    #[test]
    fn test_top_revenue_months() {
        let mut monthly = [0.0; 12];
        monthly[2] = 500.0;
        monthly[7] = 900.0;
        monthly[10] = 500.0;
        let top = top_revenue_months(&monthly);
        assert_eq!(top.len(), 5);
        let months: Vec<u32> = top.iter().map(|m| m.month).collect();
        assert_eq!(months, vec![8, 3, 11, 1, 2]);
    }

    #[test]
    fn test_completion_and_average() {
        let counts = status_counts(&sample());
        assert_eq!(counts.total, 7);
        assert_eq!(counts.completed, 5);
        assert_eq!(counts.cancelled, 1);
        assert_eq!(completion_rate(&counts), 71.0);
        assert_eq!(completion_rate(&StatusCounts::default()), 0.0);
        assert_eq!(average_revenue_per_job(20000.0, 3), 6667.0);
        assert_eq!(average_revenue_per_job(20000.0, 0), 0.0);
    }

    #[test]
    fn test_build_dashboard() {
        let stats = build_dashboard(&sample(), date("2025-03-28"));
        assert_eq!(stats.year, 2025);
        assert_eq!(stats.month, 3);
        assert_eq!(stats.current_month_revenue, 10000.0);
        assert_eq!(stats.previous_month_revenue, 0.0);
        assert_eq!(stats.month_growth, 0.0);
        assert_eq!(stats.current_year_revenue, 20000.0);
        assert_eq!(stats.previous_year_revenue, 20000.0);
        assert_eq!(stats.current_month_outstanding, 11000.0);
        assert_eq!(stats.new_bookings_this_month, 3);
        assert_eq!(stats.overdue.len(), 1);
        assert_eq!(stats.top_months[0].month, 1);
        assert_eq!(stats.average_revenue_per_job, 4000.0);
    }
}
