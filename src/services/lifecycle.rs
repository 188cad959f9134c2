use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::errors::BookingError;
use crate::models::{round_money, Booking, BookingStatus, NewBooking};

/// Which status changes `update_status` accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransitionPolicy {
    /// Any status may follow any other.
    #[default]
    Permissive,
    /// pending -> confirmed/cancelled, confirmed -> in-progress/pending/cancelled,
    /// in-progress -> completed/cancelled. Completed and cancelled are final.
    Strict,
}

impl TransitionPolicy {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "strict" => TransitionPolicy::Strict,
            _ => TransitionPolicy::Permissive,
        }
    }

    pub fn allows(&self, from: BookingStatus, to: BookingStatus) -> bool {
        use BookingStatus::*;

        if from == to {
            return true;
        }
        match self {
            TransitionPolicy::Permissive => true,
            TransitionPolicy::Strict => matches!(
                (from, to),
                (Pending, Confirmed)
                    | (Pending, Cancelled)
                    | (Confirmed, InProgress)
                    | (Confirmed, Pending)
                    | (Confirmed, Cancelled)
                    | (InProgress, Completed)
                    | (InProgress, Cancelled)
            ),
        }
    }
}

/// What happens when a payment is larger than the remaining balance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverpaymentPolicy {
    /// Paid amount keeps growing past the price; remaining floors at zero.
    #[default]
    Allow,
    /// Paid amount stops at the total price.
    Cap,
    /// The payment is refused.
    Reject,
}

impl OverpaymentPolicy {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "cap" => OverpaymentPolicy::Cap,
            "reject" => OverpaymentPolicy::Reject,
            _ => OverpaymentPolicy::Allow,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedgerPolicy {
    pub transitions: TransitionPolicy,
    pub overpayment: OverpaymentPolicy,
}

/// Builds a fresh pending, unpaid booking from form input.
///
/// Start date, end date and price text are required. Price text that does
/// not parse to a non-negative number (including whitespace) is taken as 0.
pub fn create_booking(input: &NewBooking, now: NaiveDateTime) -> Result<Booking, BookingError> {
    let start_date = input
        .start_date
        .ok_or(BookingError::MissingField("start_date"))?;
    let end_date = input.end_date.ok_or(BookingError::MissingField("end_date"))?;
    if input.total_price.is_empty() {
        return Err(BookingError::MissingField("total_price"));
    }
    if end_date < start_date {
        return Err(BookingError::InvalidDateRange {
            start: start_date,
            end: end_date,
        });
    }

    let notes = input
        .notes
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string);

    Ok(Booking {
        id: Uuid::new_v4().to_string(),
        customer_name: input.customer_name.clone(),
        customer_phone: input.customer_phone.clone(),
        service_name: input.service_name.clone(),
        start_date,
        end_date,
        status: BookingStatus::Pending,
        total_price: parse_price(&input.total_price),
        paid_amount: 0.0,
        notes,
        created_at: now,
        updated_at: now,
    })
}

pub fn parse_price(text: &str) -> f64 {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite() && *p >= 0.0)
        .unwrap_or(0.0)
}

/// Parses a payment entered as text. Only finite, positive amounts pass.
pub fn parse_amount(text: &str) -> Result<f64, BookingError> {
    let amount = text
        .trim()
        .parse::<f64>()
        .map_err(|_| BookingError::InvalidAmount(text.to_string()))?;
    check_amount(amount)?;
    Ok(amount)
}

fn check_amount(amount: f64) -> Result<(), BookingError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(BookingError::InvalidAmount(amount.to_string()))
    }
}

pub fn update_status(
    bookings: &[Booking],
    id: &str,
    status: BookingStatus,
    policy: TransitionPolicy,
    now: NaiveDateTime,
) -> Result<Vec<Booking>, BookingError> {
    replace_by_id(bookings, id, |booking| {
        if !policy.allows(booking.status, status) {
            return Err(BookingError::IllegalTransition {
                from: booking.status,
                to: status,
            });
        }
        Ok(Booking {
            status,
            updated_at: now,
            ..booking.clone()
        })
    })
}

/// Adds `amount` to a single booking's ledger.
pub fn settle(
    booking: &Booking,
    amount: f64,
    policy: OverpaymentPolicy,
    now: NaiveDateTime,
) -> Result<Booking, BookingError> {
    check_amount(amount)?;

    let remaining = booking.remaining_amount();
    let mut paid_amount = booking.paid_amount + amount;
    if round_money(amount) > remaining {
        match policy {
            OverpaymentPolicy::Allow => {}
            OverpaymentPolicy::Cap => {
                paid_amount = booking.total_price.max(booking.paid_amount);
            }
            OverpaymentPolicy::Reject => {
                return Err(BookingError::Overpayment { amount, remaining });
            }
        }
    }

    Ok(Booking {
        paid_amount,
        updated_at: now,
        ..booking.clone()
    })
}

pub fn apply_payment(
    bookings: &[Booking],
    id: &str,
    amount: f64,
    policy: OverpaymentPolicy,
    now: NaiveDateTime,
) -> Result<Vec<Booking>, BookingError> {
    replace_by_id(bookings, id, |booking| settle(booking, amount, policy, now))
}

pub fn remove_booking(bookings: &[Booking], id: &str) -> Result<Vec<Booking>, BookingError> {
    if !bookings.iter().any(|b| b.id == id) {
        return Err(BookingError::NotFound(id.to_string()));
    }
    Ok(bookings.iter().filter(|b| b.id != id).cloned().collect())
}

// Copy of `bookings` with the record matching `id` swapped for `update`'s output.
fn replace_by_id<F>(bookings: &[Booking], id: &str, update: F) -> Result<Vec<Booking>, BookingError>
where
    F: FnOnce(&Booking) -> Result<Booking, BookingError>,
{
    let idx = bookings
        .iter()
        .position(|b| b.id == id)
        .ok_or_else(|| BookingError::NotFound(id.to_string()))?;

    let updated = update(&bookings[idx])?;
    let mut next = bookings.to_vec();
    next[idx] = updated;
    Ok(next)
}
