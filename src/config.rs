use std::env;

use chrono::NaiveDate;

use crate::services::lifecycle::{LedgerPolicy, OverpaymentPolicy, TransitionPolicy};

#[derive(Clone, Debug, Default)]
pub struct AppConfig {
    pub seed_file: Option<String>,
    pub report_date: Option<NaiveDate>,
    pub overpayment: OverpaymentPolicy,
    pub transitions: TransitionPolicy,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            seed_file: env::var("SEED_FILE").ok().filter(|v| !v.is_empty()),
            report_date: env::var("REPORT_DATE")
                .ok()
                .and_then(|v| NaiveDate::parse_from_str(&v, "%Y-%m-%d").ok()),
            overpayment: env::var("OVERPAYMENT_POLICY")
                .map(|v| OverpaymentPolicy::parse(&v))
                .unwrap_or_default(),
            transitions: env::var("STATUS_TRANSITIONS")
                .map(|v| TransitionPolicy::parse(&v))
                .unwrap_or_default(),
        }
    }

    pub fn ledger_policy(&self) -> LedgerPolicy {
        LedgerPolicy {
            transitions: self.transitions,
            overpayment: self.overpayment,
        }
    }
}
