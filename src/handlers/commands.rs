//! Command definitions
//!
//! Commands carry already-validated input from the HTTP layer to handlers.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::{Address, Amount, Cpf, Customer, CustomerChanges, InstallmentCount};

/// Command to request a new credit for an existing customer
#[derive(Debug, Clone)]
pub struct CreateCreditCommand {
    pub credit_value: Amount,
    pub day_first_installment: NaiveDate,
    pub number_of_installments: InstallmentCount,
    pub customer_id: i64,
}

/// Command to register a customer
#[derive(Debug, Clone)]
pub struct CreateCustomerCommand {
    pub first_name: String,
    pub last_name: String,
    pub cpf: Cpf,
    pub email: String,
    pub password: String,
    pub income: Decimal,
    pub address: Address,
}

impl CreateCustomerCommand {
    pub fn into_customer(self) -> Customer {
        Customer {
            id: None,
            first_name: self.first_name,
            last_name: self.last_name,
            cpf: self.cpf,
            email: self.email,
            password: self.password,
            income: self.income,
            address: self.address,
        }
    }
}

/// Command to change a customer's editable fields
#[derive(Debug, Clone)]
pub struct UpdateCustomerCommand {
    pub customer_id: i64,
    pub changes: CustomerChanges,
}
