//! Credit entity
//!
//! A credit line requested by a customer. Credits are immutable once
//! created; only the repository assigns their surrogate id.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::{Amount, DomainError};

/// Installments allowed per credit
pub const MIN_INSTALLMENTS: i32 = 1;
pub const MAX_INSTALLMENTS: i32 = 48;

/// How far ahead the first installment may be scheduled
pub const MAX_FIRST_INSTALLMENT_MONTHS: u32 = 3;

/// Credit analysis status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    InProgress,
    Approved,
    Reject,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::InProgress => "IN_PROGRESS",
            Status::Approved => "APPROVED",
            Status::Reject => "REJECT",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IN_PROGRESS" => Ok(Status::InProgress),
            "APPROVED" => Ok(Status::Approved),
            "REJECT" => Ok(Status::Reject),
            other => Err(format!("unknown credit status: {}", other)),
        }
    }
}

/// Number of installments, always within `MIN_INSTALLMENTS..=MAX_INSTALLMENTS`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct InstallmentCount(i32);

impl InstallmentCount {
    pub fn new(value: i32) -> Result<Self, DomainError> {
        if !(MIN_INSTALLMENTS..=MAX_INSTALLMENTS).contains(&value) {
            return Err(DomainError::InvalidInstallments(value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

/// Persisted credit record
#[derive(Debug, Clone, PartialEq)]
pub struct Credit {
    pub id: Option<i64>,
    pub credit_code: Uuid,
    pub credit_value: Amount,
    pub day_first_installment: NaiveDate,
    pub number_of_installments: InstallmentCount,
    pub status: Status,
    pub customer_id: i64,
}

impl Credit {
    /// New credit request with a fresh code, awaiting analysis
    pub fn new(
        credit_value: Amount,
        day_first_installment: NaiveDate,
        number_of_installments: InstallmentCount,
        customer_id: i64,
    ) -> Self {
        Self {
            id: None,
            credit_code: Uuid::new_v4(),
            credit_value,
            day_first_installment,
            number_of_installments,
            status: Status::InProgress,
            customer_id,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn belongs_to(&self, customer_id: i64) -> bool {
        self.customer_id == customer_id
    }

    /// The first installment must fall after `today` and no later than
    /// three months from it.
    pub fn check_first_installment(day: NaiveDate, today: NaiveDate) -> Result<(), DomainError> {
        let latest = today
            .checked_add_months(Months::new(MAX_FIRST_INSTALLMENT_MONTHS))
            .ok_or(DomainError::InvalidFirstInstallment(day))?;

        if day <= today || day > latest {
            return Err(DomainError::InvalidFirstInstallment(day));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_credit_is_in_progress_with_code() {
        let credit = Credit::new(
            Amount::new(Decimal::new(100, 0)).unwrap(),
            date(2026, 12, 16),
            InstallmentCount::new(15).unwrap(),
            1,
        );

        assert_eq!(credit.id, None);
        assert_eq!(credit.status, Status::InProgress);
        assert!(!credit.credit_code.is_nil());
        assert!(credit.belongs_to(1));
        assert!(!credit.belongs_to(2));
    }

    #[test]
    fn test_credit_codes_are_unique() {
        let make = || {
            Credit::new(
                Amount::new(Decimal::new(100, 0)).unwrap(),
                date(2026, 12, 16),
                InstallmentCount::new(15).unwrap(),
                1,
            )
        };
        assert_ne!(make().credit_code, make().credit_code);
    }

    #[test]
    fn test_installment_bounds() {
        assert!(InstallmentCount::new(1).is_ok());
        assert!(InstallmentCount::new(48).is_ok());
        assert_eq!(
            InstallmentCount::new(0),
            Err(DomainError::InvalidInstallments(0))
        );
        assert_eq!(
            InstallmentCount::new(49),
            Err(DomainError::InvalidInstallments(49))
        );
    }

    #[test]
    fn test_first_installment_window() {
        let today = date(2026, 10, 16);

        assert!(Credit::check_first_installment(date(2026, 10, 17), today).is_ok());
        assert!(Credit::check_first_installment(date(2026, 12, 16), today).is_ok());
        assert!(Credit::check_first_installment(date(2027, 1, 16), today).is_ok());

        assert!(Credit::check_first_installment(today, today).is_err());
        assert!(Credit::check_first_installment(date(2026, 10, 1), today).is_err());
        assert!(Credit::check_first_installment(date(2027, 1, 17), today).is_err());
    }

    #[test]
    fn test_first_installment_window_end_of_month() {
        // Nov 30 + 3 months clamps to the last day of February
        let today = date(2026, 11, 30);
        assert!(Credit::check_first_installment(date(2027, 2, 28), today).is_ok());
        assert!(Credit::check_first_installment(date(2027, 3, 1), today).is_err());
    }

    #[test]
    fn test_status_round_trip_through_text() {
        for status in [Status::InProgress, Status::Approved, Status::Reject] {
            assert_eq!(status.as_str().parse::<Status>().unwrap(), status);
        }
        assert!("PENDING".parse::<Status>().is_err());
    }

    #[test]
    fn test_status_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&Status::InProgress).unwrap();
        assert_eq!(json, "\"IN_PROGRESS\"");
    }
}
