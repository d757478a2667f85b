//! Domain module
//!
//! Core domain types and business rules.

pub mod amount;
pub mod cpf;
pub mod credit;
pub mod customer;
pub mod error;

pub use amount::{fit_money_column, Amount, AmountError};
pub use cpf::{Cpf, CpfError};
pub use credit::{Credit, InstallmentCount, Status};
pub use customer::{Address, Customer, CustomerChanges};
pub use error::DomainError;
