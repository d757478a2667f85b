//! PostgreSQL repositories
//!
//! Tables are created by `migrations/0001_create_customer_and_credit.sql`.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{Address, Amount, Cpf, Credit, Customer, InstallmentCount, Status};

use super::{CreditRepository, CustomerRepository, RepositoryError, RepositoryResult};

#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: i64,
    first_name: String,
    last_name: String,
    cpf: String,
    email: String,
    password: String,
    income: Decimal,
    zip_code: String,
    street: String,
}

impl TryFrom<CustomerRow> for Customer {
    type Error = RepositoryError;

    fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
        let cpf = Cpf::parse(&row.cpf)
            .map_err(|e| RepositoryError::CorruptRow(format!("customer {} cpf {}", row.id, e)))?;

        Ok(Customer {
            id: Some(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            cpf,
            email: row.email,
            password: row.password,
            income: row.income,
            address: Address {
                zip_code: row.zip_code,
                street: row.street,
            },
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CreditRow {
    id: i64,
    credit_code: Uuid,
    credit_value: Decimal,
    day_first_installment: NaiveDate,
    number_of_installments: i32,
    status: String,
    customer_id: i64,
}

impl TryFrom<CreditRow> for Credit {
    type Error = RepositoryError;

    fn try_from(row: CreditRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let corrupt = |what: String| RepositoryError::CorruptRow(format!("credit {} {}", id, what));

        let credit_value = Amount::new(row.credit_value).map_err(|e| corrupt(e.to_string()))?;
        let number_of_installments =
            InstallmentCount::new(row.number_of_installments).map_err(|e| corrupt(e.to_string()))?;
        let status: Status = row.status.parse().map_err(corrupt)?;

        Ok(Credit {
            id: Some(id),
            credit_code: row.credit_code,
            credit_value,
            day_first_installment: row.day_first_installment,
            number_of_installments,
            status,
            customer_id: row.customer_id,
        })
    }
}

const CUSTOMER_COLUMNS: &str =
    "id, first_name, last_name, cpf, email, password, income, zip_code, street";

const CREDIT_COLUMNS: &str = "id, credit_code, credit_value, day_first_installment, \
     number_of_installments, status, customer_id";

// =========================================================================
// Customers
// =========================================================================

#[derive(Debug, Clone)]
pub struct PgCustomerRepository {
    pool: PgPool,
}

impl PgCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerRepository for PgCustomerRepository {
    async fn save(&self, customer: Customer) -> RepositoryResult<Customer> {
        let row: CustomerRow = match customer.id {
            None => {
                sqlx::query_as(&format!(
                    r#"
                    INSERT INTO customers (first_name, last_name, cpf, email, password, income, zip_code, street)
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                    RETURNING {CUSTOMER_COLUMNS}
                    "#
                ))
                .bind(&customer.first_name)
                .bind(&customer.last_name)
                .bind(customer.cpf.as_str())
                .bind(&customer.email)
                .bind(&customer.password)
                .bind(customer.income)
                .bind(&customer.address.zip_code)
                .bind(&customer.address.street)
                .fetch_one(&self.pool)
                .await?
            }
            Some(id) => {
                let row: CustomerRow = sqlx::query_as(&format!(
                    r#"
                    INSERT INTO customers (id, first_name, last_name, cpf, email, password, income, zip_code, street)
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                    ON CONFLICT (id) DO UPDATE SET
                        first_name = EXCLUDED.first_name,
                        last_name = EXCLUDED.last_name,
                        cpf = EXCLUDED.cpf,
                        email = EXCLUDED.email,
                        password = EXCLUDED.password,
                        income = EXCLUDED.income,
                        zip_code = EXCLUDED.zip_code,
                        street = EXCLUDED.street
                    RETURNING {CUSTOMER_COLUMNS}
                    "#
                ))
                .bind(id)
                .bind(&customer.first_name)
                .bind(&customer.last_name)
                .bind(customer.cpf.as_str())
                .bind(&customer.email)
                .bind(&customer.password)
                .bind(customer.income)
                .bind(&customer.address.zip_code)
                .bind(&customer.address.street)
                .fetch_one(&self.pool)
                .await?;

                // Explicit ids bypass the sequence; move it past them
                sqlx::query(
                    "SELECT setval(pg_get_serial_sequence('customers', 'id'), GREATEST((SELECT MAX(id) FROM customers), 1))",
                )
                .execute(&self.pool)
                .await?;

                row
            }
        };

        tracing::debug!(customer_id = row.id, "Customer saved");
        row.try_into()
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Customer>> {
        let row: Option<CustomerRow> =
            sqlx::query_as(&format!("SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        row.map(Customer::try_from).transpose()
    }

    async fn delete_by_id(&self, id: i64) -> RepositoryResult<bool> {
        // credits.customer_id is ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_all(&self) -> RepositoryResult<()> {
        sqlx::query("DELETE FROM customers").execute(&self.pool).await?;
        Ok(())
    }
}

// =========================================================================
// Credits
// =========================================================================

#[derive(Debug, Clone)]
pub struct PgCreditRepository {
    pool: PgPool,
}

impl PgCreditRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CreditRepository for PgCreditRepository {
    async fn save(&self, credit: Credit) -> RepositoryResult<Credit> {
        let row: CreditRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO credits (credit_code, credit_value, day_first_installment, number_of_installments, status, customer_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {CREDIT_COLUMNS}
            "#
        ))
        .bind(credit.credit_code)
        .bind(credit.credit_value.value())
        .bind(credit.day_first_installment)
        .bind(credit.number_of_installments.value())
        .bind(credit.status.as_str())
        .bind(credit.customer_id)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(credit_id = row.id, credit_code = %row.credit_code, "Credit saved");
        row.try_into()
    }

    async fn find_all_by_customer_id(&self, customer_id: i64) -> RepositoryResult<Vec<Credit>> {
        let rows: Vec<CreditRow> = sqlx::query_as(&format!(
            "SELECT {CREDIT_COLUMNS} FROM credits WHERE customer_id = $1 ORDER BY id"
        ))
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Credit::try_from).collect()
    }

    async fn find_by_credit_code(&self, credit_code: Uuid) -> RepositoryResult<Option<Credit>> {
        let row: Option<CreditRow> = sqlx::query_as(&format!(
            "SELECT {CREDIT_COLUMNS} FROM credits WHERE credit_code = $1"
        ))
        .bind(credit_code)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Credit::try_from).transpose()
    }

    async fn delete_all(&self) -> RepositoryResult<()> {
        sqlx::query("DELETE FROM credits").execute(&self.pool).await?;
        Ok(())
    }
}
