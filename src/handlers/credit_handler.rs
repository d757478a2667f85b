//! Credit Handler
//!
//! Creates credits and answers credit queries for a customer.

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{Credit, Customer, DomainError};
use crate::error::AppError;
use crate::repository::{CreditRepository, CustomerRepository};

use super::CreateCreditCommand;

/// Handler for credit operations
#[derive(Clone)]
pub struct CreditHandler {
    customers: Arc<dyn CustomerRepository>,
    credits: Arc<dyn CreditRepository>,
}

impl CreditHandler {
    pub fn new(customers: Arc<dyn CustomerRepository>, credits: Arc<dyn CreditRepository>) -> Self {
        Self { customers, credits }
    }

    /// Persist a new credit.
    ///
    /// The customer must exist and the first installment must fall within
    /// the window allowed relative to `today`. Nothing is written otherwise.
    pub async fn save(
        &self,
        command: CreateCreditCommand,
        today: NaiveDate,
    ) -> Result<(Credit, Customer), AppError> {
        let customer = self
            .customers
            .find_by_id(command.customer_id)
            .await?
            .ok_or(DomainError::CustomerNotFound(command.customer_id))?;

        Credit::check_first_installment(command.day_first_installment, today)?;

        let credit = Credit::new(
            command.credit_value,
            command.day_first_installment,
            command.number_of_installments,
            command.customer_id,
        );
        let credit = self.credits.save(credit).await?;

        tracing::info!(
            credit_code = %credit.credit_code,
            customer_id = command.customer_id,
            credit_value = %credit.credit_value,
            "Credit saved"
        );

        Ok((credit, customer))
    }

    /// All credits of a customer, oldest first. Unknown customers have none.
    pub async fn find_all_by_customer(&self, customer_id: i64) -> Result<Vec<Credit>, AppError> {
        Ok(self.credits.find_all_by_customer_id(customer_id).await?)
    }

    /// Look up a credit by code on behalf of its owner
    pub async fn find_by_credit_code(
        &self,
        customer_id: i64,
        credit_code: Uuid,
    ) -> Result<(Credit, Customer), AppError> {
        let credit = self
            .credits
            .find_by_credit_code(credit_code)
            .await?
            .ok_or(DomainError::CreditNotFound(credit_code))?;

        if !credit.belongs_to(customer_id) {
            tracing::warn!(
                credit_code = %credit_code,
                customer_id,
                "Credit requested by a customer who does not own it"
            );
            return Err(DomainError::CreditOwnershipMismatch.into());
        }

        let customer = self
            .customers
            .find_by_id(customer_id)
            .await?
            .ok_or(DomainError::CustomerNotFound(customer_id))?;

        Ok((credit, customer))
    }
}
