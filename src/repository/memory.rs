//! In-memory repositories
//!
//! A single store backing both repository traits, with the same uniqueness,
//! foreign key and cascade rules as the PostgreSQL schema. Used with
//! `STORAGE_BACKEND=memory` and by the test suite.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{Credit, Customer};

use super::{CreditRepository, CustomerRepository, RepositoryError, RepositoryResult};

#[derive(Debug, Default)]
struct Tables {
    // BTreeMap keeps id order, which is insertion order for generated ids
    customers: BTreeMap<i64, Customer>,
    credits: BTreeMap<i64, Credit>,
    next_customer_id: i64,
    next_credit_id: i64,
}

impl Tables {
    fn check_customer_unique(&self, customer: &Customer) -> RepositoryResult<()> {
        for (id, existing) in &self.customers {
            if Some(*id) == customer.id {
                continue;
            }
            if existing.cpf == customer.cpf {
                return Err(RepositoryError::Conflict("customers_cpf_key".to_string()));
            }
            if existing.email == customer.email {
                return Err(RepositoryError::Conflict("customers_email_key".to_string()));
            }
        }
        Ok(())
    }
}

/// Cheaply cloneable handle; clones share the same tables
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryStore {
    async fn save(&self, customer: Customer) -> RepositoryResult<Customer> {
        let mut guard = self.tables.write().await;
        let tables = &mut *guard;
        tables.check_customer_unique(&customer)?;

        let id = match customer.id {
            Some(id) => id,
            None => {
                // Skip ids taken by explicit upserts
                let mut id = tables.next_customer_id + 1;
                while tables.customers.contains_key(&id) {
                    id += 1;
                }
                id
            }
        };
        tables.next_customer_id = tables.next_customer_id.max(id);

        let stored = customer.with_id(id);
        tables.customers.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Customer>> {
        Ok(self.tables.read().await.customers.get(&id).cloned())
    }

    async fn delete_by_id(&self, id: i64) -> RepositoryResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.customers.remove(&id).is_none() {
            return Ok(false);
        }
        tables.credits.retain(|_, credit| credit.customer_id != id);
        Ok(true)
    }

    async fn delete_all(&self) -> RepositoryResult<()> {
        let mut tables = self.tables.write().await;
        tables.customers.clear();
        tables.credits.clear();
        Ok(())
    }
}

#[async_trait]
impl CreditRepository for InMemoryStore {
    async fn save(&self, credit: Credit) -> RepositoryResult<Credit> {
        let mut guard = self.tables.write().await;
        let tables = &mut *guard;

        if !tables.customers.contains_key(&credit.customer_id) {
            return Err(RepositoryError::MissingReference(
                "credits_customer_id_fkey".to_string(),
            ));
        }
        if tables
            .credits
            .values()
            .any(|existing| existing.credit_code == credit.credit_code)
        {
            return Err(RepositoryError::Conflict("credits_credit_code_key".to_string()));
        }

        tables.next_credit_id += 1;
        let id = tables.next_credit_id;
        let stored = credit.with_id(id);
        tables.credits.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_all_by_customer_id(&self, customer_id: i64) -> RepositoryResult<Vec<Credit>> {
        let tables = self.tables.read().await;
        Ok(tables
            .credits
            .values()
            .filter(|credit| credit.belongs_to(customer_id))
            .cloned()
            .collect())
    }

    async fn find_by_credit_code(&self, credit_code: Uuid) -> RepositoryResult<Option<Credit>> {
        let tables = self.tables.read().await;
        Ok(tables
            .credits
            .values()
            .find(|credit| credit.credit_code == credit_code)
            .cloned())
    }

    async fn delete_all(&self) -> RepositoryResult<()> {
        self.tables.write().await.credits.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Address, Amount, Cpf, InstallmentCount};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn customer(cpf: &str, email: &str) -> Customer {
        Customer {
            id: None,
            first_name: "Cami".to_string(),
            last_name: "Cavalcante".to_string(),
            cpf: Cpf::parse(cpf).unwrap(),
            email: email.to_string(),
            password: "12345".to_string(),
            income: Decimal::new(1000, 0),
            address: Address {
                zip_code: "12345".to_string(),
                street: "Rua da Cami".to_string(),
            },
        }
    }

    fn credit(customer_id: i64) -> Credit {
        Credit::new(
            Amount::new(Decimal::new(100, 0)).unwrap(),
            NaiveDate::from_ymd_opt(2026, 12, 16).unwrap(),
            InstallmentCount::new(15).unwrap(),
            customer_id,
        )
    }

    #[tokio::test]
    async fn test_customer_ids_are_sequential() {
        let store = InMemoryStore::new();

        let first = CustomerRepository::save(&store, customer("28475934625", "a@test.com"))
            .await
            .unwrap();
        let second = CustomerRepository::save(&store, customer("52998224725", "b@test.com"))
            .await
            .unwrap();

        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
    }

    #[tokio::test]
    async fn test_explicit_id_upserts() {
        let store = InMemoryStore::new();

        let saved = CustomerRepository::save(&store, customer("28475934625", "a@test.com").with_id(1))
            .await
            .unwrap();
        assert_eq!(saved.id, Some(1));

        let mut changed = saved.clone();
        changed.first_name = "Camila".to_string();
        CustomerRepository::save(&store, changed).await.unwrap();

        let found = store.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(found.first_name, "Camila");

        let next = CustomerRepository::save(&store, customer("52998224725", "b@test.com"))
            .await
            .unwrap();
        assert_eq!(next.id, Some(2));
    }

    #[tokio::test]
    async fn test_duplicate_cpf_conflicts() {
        let store = InMemoryStore::new();
        CustomerRepository::save(&store, customer("28475934625", "a@test.com"))
            .await
            .unwrap();

        let result = CustomerRepository::save(&store, customer("28475934625", "b@test.com")).await;
        assert!(matches!(result, Err(RepositoryError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_credit_requires_customer() {
        let store = InMemoryStore::new();

        let result = CreditRepository::save(&store, credit(99)).await;
        assert!(matches!(result, Err(RepositoryError::MissingReference(_))));
        assert!(store.find_all_by_customer_id(99).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_credits_listed_in_insertion_order() {
        let store = InMemoryStore::new();
        let owner = CustomerRepository::save(&store, customer("28475934625", "a@test.com"))
            .await
            .unwrap();
        let owner_id = owner.id.unwrap();

        let a = CreditRepository::save(&store, credit(owner_id)).await.unwrap();
        let b = CreditRepository::save(&store, credit(owner_id)).await.unwrap();
        let c = CreditRepository::save(&store, credit(owner_id)).await.unwrap();

        let codes: Vec<Uuid> = store
            .find_all_by_customer_id(owner_id)
            .await
            .unwrap()
            .into_iter()
            .map(|credit| credit.credit_code)
            .collect();
        assert_eq!(codes, vec![a.credit_code, b.credit_code, c.credit_code]);

        let found = store.find_by_credit_code(b.credit_code).await.unwrap();
        assert_eq!(found.and_then(|credit| credit.id), b.id);
    }

    #[tokio::test]
    async fn test_delete_customer_cascades() {
        let store = InMemoryStore::new();
        let owner = CustomerRepository::save(&store, customer("28475934625", "a@test.com"))
            .await
            .unwrap();
        let owner_id = owner.id.unwrap();
        CreditRepository::save(&store, credit(owner_id)).await.unwrap();

        assert!(store.delete_by_id(owner_id).await.unwrap());
        assert!(!store.delete_by_id(owner_id).await.unwrap());
        assert!(store.find_all_by_customer_id(owner_id).await.unwrap().is_empty());
    }
}
