//! Repository module
//!
//! Persistence ports for customers and credits, with a PostgreSQL adapter
//! and an in-process adapter.

mod error;
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Credit, Customer};

pub use error::RepositoryError;
pub use memory::InMemoryStore;
pub use postgres::{PgCreditRepository, PgCustomerRepository};

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Customer persistence
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Insert a customer without id, or upsert one that carries an id.
    /// Returns the stored record with its id.
    async fn save(&self, customer: Customer) -> RepositoryResult<Customer>;

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Customer>>;

    /// Delete a customer and their credits. Returns false if nothing matched.
    async fn delete_by_id(&self, id: i64) -> RepositoryResult<bool>;

    async fn delete_all(&self) -> RepositoryResult<()>;
}

/// Credit persistence
#[async_trait]
pub trait CreditRepository: Send + Sync {
    /// Persist a credit. Fails with `RepositoryError::MissingReference` if
    /// the owning customer does not exist.
    async fn save(&self, credit: Credit) -> RepositoryResult<Credit>;

    /// Credits of one customer, oldest first
    async fn find_all_by_customer_id(&self, customer_id: i64) -> RepositoryResult<Vec<Credit>>;

    async fn find_by_credit_code(&self, credit_code: Uuid) -> RepositoryResult<Option<Credit>>;

    async fn delete_all(&self) -> RepositoryResult<()>;
}
