//! Request/Response types
//!
//! Requests are validated field by field before any handler runs; every
//! failing field is reported at once.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::credit::{MAX_INSTALLMENTS, MIN_INSTALLMENTS};
use crate::domain::customer::{MAX_TEXT_LEN, MAX_ZIP_CODE_LEN};
use crate::domain::{fit_money_column, Address, Amount, Cpf, Credit, Customer, CustomerChanges, InstallmentCount, Status};
use crate::error::{AppError, FieldErrors};
use crate::handlers::{CreateCreditCommand, CreateCustomerCommand, UpdateCustomerCommand};

// =========================================================================
// Requests
// =========================================================================

/// Credit request body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditDto {
    #[serde(with = "rust_decimal::serde::float")]
    pub credit_value: Decimal,
    pub day_first_of_installment: NaiveDate,
    pub number_of_installments: i32,
    pub customer_id: i64,
}

impl CreditDto {
    /// Field checks that need no stored data. `today` anchors the
    /// future-date rule.
    pub fn into_command(self, today: NaiveDate) -> Result<CreateCreditCommand, AppError> {
        let mut errors = FieldErrors::new();

        let credit_value = Amount::new(self.credit_value)
            .map_err(|e| errors.insert("creditValue".to_string(), e.to_string()))
            .ok();

        if self.day_first_of_installment <= today {
            errors.insert(
                "dayFirstOfInstallment".to_string(),
                "must be a future date".to_string(),
            );
        }

        let number_of_installments = InstallmentCount::new(self.number_of_installments)
            .map_err(|_| {
                errors.insert(
                    "numberOfInstallments".to_string(),
                    format!("must be between {} and {}", MIN_INSTALLMENTS, MAX_INSTALLMENTS),
                )
            })
            .ok();

        match (credit_value, number_of_installments) {
            (Some(credit_value), Some(number_of_installments)) if errors.is_empty() => {
                Ok(CreateCreditCommand {
                    credit_value,
                    day_first_installment: self.day_first_of_installment,
                    number_of_installments,
                    customer_id: self.customer_id,
                })
            }
            _ => Err(AppError::Validation(errors)),
        }
    }
}

/// Customer signup body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    pub first_name: String,
    pub last_name: String,
    pub cpf: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub income: Decimal,
    pub email: String,
    pub password: String,
    pub zip_code: String,
    pub street: String,
}

impl CustomerDto {
    pub fn into_command(self) -> Result<CreateCustomerCommand, AppError> {
        let mut errors = FieldErrors::new();

        require_text(&mut errors, "firstName", &self.first_name, MAX_TEXT_LEN);
        require_text(&mut errors, "lastName", &self.last_name, MAX_TEXT_LEN);
        require_text(&mut errors, "password", &self.password, MAX_TEXT_LEN);
        require_text(&mut errors, "zipCode", &self.zip_code, MAX_ZIP_CODE_LEN);
        require_text(&mut errors, "street", &self.street, MAX_TEXT_LEN);
        let income = require_income(&mut errors, self.income);

        if !is_valid_email(&self.email) {
            errors.insert(
                "email".to_string(),
                "must be a well-formed email address".to_string(),
            );
        } else if self.email.trim().chars().count() > MAX_TEXT_LEN {
            errors.insert(
                "email".to_string(),
                format!("must be at most {} characters", MAX_TEXT_LEN),
            );
        }

        let cpf = Cpf::parse(&self.cpf)
            .map_err(|e| errors.insert("cpf".to_string(), format!("invalid CPF: {}", e)))
            .ok();

        match (cpf, income) {
            (Some(cpf), Some(income)) if errors.is_empty() => Ok(CreateCustomerCommand {
                first_name: self.first_name.trim().to_string(),
                last_name: self.last_name.trim().to_string(),
                cpf,
                email: self.email.trim().to_string(),
                password: self.password,
                income,
                address: Address {
                    zip_code: self.zip_code.trim().to_string(),
                    street: self.street.trim().to_string(),
                },
            }),
            _ => Err(AppError::Validation(errors)),
        }
    }
}

/// Customer update body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerUpdateDto {
    pub first_name: String,
    pub last_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub income: Decimal,
    pub zip_code: String,
    pub street: String,
}

impl CustomerUpdateDto {
    pub fn into_command(self, customer_id: i64) -> Result<UpdateCustomerCommand, AppError> {
        let mut errors = FieldErrors::new();

        require_text(&mut errors, "firstName", &self.first_name, MAX_TEXT_LEN);
        require_text(&mut errors, "lastName", &self.last_name, MAX_TEXT_LEN);
        require_text(&mut errors, "zipCode", &self.zip_code, MAX_ZIP_CODE_LEN);
        require_text(&mut errors, "street", &self.street, MAX_TEXT_LEN);
        let income = require_income(&mut errors, self.income);

        let income = match income {
            Some(income) if errors.is_empty() => income,
            _ => return Err(AppError::Validation(errors)),
        };

        Ok(UpdateCustomerCommand {
            customer_id,
            changes: CustomerChanges {
                first_name: self.first_name.trim().to_string(),
                last_name: self.last_name.trim().to_string(),
                income,
                address: Address {
                    zip_code: self.zip_code.trim().to_string(),
                    street: self.street.trim().to_string(),
                },
            },
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerIdQuery {
    pub customer_id: i64,
}

fn require_text(errors: &mut FieldErrors, field: &str, value: &str, max_len: usize) {
    if value.trim().is_empty() {
        errors.insert(field.to_string(), "must not be empty".to_string());
    } else if value.chars().count() > max_len {
        errors.insert(field.to_string(), format!("must be at most {} characters", max_len));
    }
}

/// Non-negative and storable without rounding
fn require_income(errors: &mut FieldErrors, income: Decimal) -> Option<Decimal> {
    if income < Decimal::ZERO {
        errors.insert("income".to_string(), "must not be negative".to_string());
        return None;
    }
    fit_money_column(income)
        .map_err(|e| errors.insert("income".to_string(), e.to_string()))
        .ok()
}

/// `local@domain.tld`, no whitespace
fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && domain.split('.').all(|label| !label.is_empty())
        }
        None => false,
    }
}

// =========================================================================
// Responses
// =========================================================================

/// Full credit details, including the owner's contact and income
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditView {
    pub credit_code: Uuid,
    #[serde(with = "rust_decimal::serde::float")]
    pub credit_value: Decimal,
    pub number_of_installment: i32,
    pub status: Status,
    pub email_customer: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub income_customer: Decimal,
}

impl CreditView {
    pub fn new(credit: &Credit, customer: &Customer) -> Self {
        Self {
            credit_code: credit.credit_code,
            credit_value: credit.credit_value.value(),
            number_of_installment: credit.number_of_installments.value(),
            status: credit.status,
            email_customer: customer.email.clone(),
            income_customer: customer.income,
        }
    }
}

/// Credit summary used in listings
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditViewList {
    pub credit_code: Uuid,
    #[serde(with = "rust_decimal::serde::float")]
    pub credit_value: Decimal,
    pub number_of_installments: i32,
}

impl From<&Credit> for CreditViewList {
    fn from(credit: &Credit) -> Self {
        Self {
            credit_code: credit.credit_code,
            credit_value: credit.credit_value.value(),
            number_of_installments: credit.number_of_installments.value(),
        }
    }
}

/// Customer as returned to clients; the password is never echoed
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerView {
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub cpf: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub income: Decimal,
    pub email: String,
    pub zip_code: String,
    pub street: String,
}

impl From<Customer> for CustomerView {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            first_name: customer.first_name,
            last_name: customer.last_name,
            cpf: customer.cpf.into(),
            income: customer.income,
            email: customer.email,
            zip_code: customer.address.zip_code,
            street: customer.address.street,
        }
    }
}
