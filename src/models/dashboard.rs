use chrono::NaiveDate;
use serde::Serialize;

use crate::models::BookingView;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ServiceStat {
    pub service: String,
    pub count: usize,
    pub revenue: f64,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct MonthRevenue {
    /// 1 = January
    pub month: u32,
    pub revenue: f64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct StatusCounts {
    pub total: usize,
    pub pending: usize,
    pub confirmed: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub cancelled: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub as_of: NaiveDate,
    pub year: i32,
    pub month: u32,
    pub monthly_revenue: [f64; 12],
    pub current_month_revenue: f64,
    pub previous_month_revenue: f64,
    pub month_growth: f64,
    pub current_year_revenue: f64,
    pub previous_year_revenue: f64,
    pub year_growth: f64,
    pub current_month_outstanding: f64,
    pub current_year_outstanding: f64,
    pub status_counts: StatusCounts,
    pub new_bookings_this_month: usize,
    pub overdue: Vec<BookingView>,
    pub popular_services: Vec<ServiceStat>,
    pub top_months: Vec<MonthRevenue>,
    pub completion_rate: f64,
    pub average_revenue_per_job: f64,
}
