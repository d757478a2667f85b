//! Customer Handler
//!
//! Customer signup, lookup, update and removal.

use std::sync::Arc;

use crate::domain::{Customer, DomainError};
use crate::error::AppError;
use crate::repository::CustomerRepository;

use super::{CreateCustomerCommand, UpdateCustomerCommand};

/// Handler for customer operations
#[derive(Clone)]
pub struct CustomerHandler {
    customers: Arc<dyn CustomerRepository>,
}

impl CustomerHandler {
    pub fn new(customers: Arc<dyn CustomerRepository>) -> Self {
        Self { customers }
    }

    /// Register a customer. Duplicate cpf or email surfaces as a conflict.
    pub async fn save(&self, command: CreateCustomerCommand) -> Result<Customer, AppError> {
        let customer = self.customers.save(command.into_customer()).await?;
        tracing::info!(customer_id = ?customer.id, "Customer registered");
        Ok(customer)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Customer, AppError> {
        let customer = self
            .customers
            .find_by_id(id)
            .await?
            .ok_or(DomainError::CustomerNotFound(id))?;
        Ok(customer)
    }

    pub async fn update(&self, command: UpdateCustomerCommand) -> Result<Customer, AppError> {
        let mut customer = self.find_by_id(command.customer_id).await?;
        customer.apply(command.changes);

        let customer = self.customers.save(customer).await?;
        tracing::info!(customer_id = command.customer_id, "Customer updated");
        Ok(customer)
    }

    /// Remove a customer together with their credits
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.customers.delete_by_id(id).await? {
            return Err(DomainError::CustomerNotFound(id).into());
        }
        tracing::info!(customer_id = id, "Customer deleted");
        Ok(())
    }
}
