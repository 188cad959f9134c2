pub mod booking;
pub mod dashboard;
pub mod filter;

pub use booking::{round_money, Booking, BookingStatus, BookingView, NewBooking, PaymentStatus};
pub use dashboard::{DashboardStats, MonthRevenue, ServiceStat, StatusCounts};
pub use filter::{BookingFilter, BookingTab};
