//! Customer entity
//!
//! A customer owns exactly one address and any number of credits.

use rust_decimal::Decimal;

use super::Cpf;

/// Longest name, email, password or street the schema stores
pub const MAX_TEXT_LEN: usize = 255;

/// Longest zip code the schema stores
pub const MAX_ZIP_CODE_LEN: usize = 20;

/// Postal address, owned by a single customer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub zip_code: String,
    pub street: String,
}

/// Persisted customer record
///
/// `id` is `None` until the repository assigns one.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub cpf: Cpf,
    pub email: String,
    pub password: String,
    pub income: Decimal,
    pub address: Address,
}

/// Fields a customer may change after signup
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerChanges {
    pub first_name: String,
    pub last_name: String,
    pub income: Decimal,
    pub address: Address,
}

impl Customer {
    /// Apply an update in place; identity, cpf, email and password are kept
    pub fn apply(&mut self, changes: CustomerChanges) {
        self.first_name = changes.first_name;
        self.last_name = changes.last_name;
        self.income = changes.income;
        self.address = changes.address;
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}
