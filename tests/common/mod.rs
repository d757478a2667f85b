//! Common test utilities

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, Response},
    Router,
};
use chrono::{Local, Months, NaiveDate};
use credit_application_system::api::{self, AppState};
use credit_application_system::domain::{Address, Amount, Cpf, Credit, Customer, InstallmentCount};
use credit_application_system::repository::{CreditRepository, CustomerRepository, InMemoryStore};
use rust_decimal_macros::dec;
use serde_json::Value;

pub const CUSTOMER_CPF: &str = "28475934625";
pub const OTHER_CPF: &str = "52998224725";

/// Fresh store and the full application router on top of it
pub fn setup_app() -> (InMemoryStore, Router) {
    let store = InMemoryStore::new();
    let app = api::build_router(AppState::in_memory(store.clone()));
    (store, app)
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// First installment date inside the accepted window
pub fn in_two_months() -> NaiveDate {
    today() + Months::new(2)
}

pub fn build_customer() -> Customer {
    Customer {
        id: Some(1),
        first_name: "Cami".to_string(),
        last_name: "Cavalcante".to_string(),
        cpf: Cpf::parse(CUSTOMER_CPF).unwrap(),
        email: "camila@gmail.com".to_string(),
        password: "12345".to_string(),
        income: dec!(1000.0),
        address: Address {
            zip_code: "12345".to_string(),
            street: "Rua da Cami, 123".to_string(),
        },
    }
}

/// Store the default customer with id 1
pub async fn seed_customer(store: &InMemoryStore) -> Customer {
    CustomerRepository::save(store, build_customer()).await.unwrap()
}

/// Store a credit of 100.00 in 15 installments directly, bypassing the API
pub async fn seed_credit(store: &InMemoryStore, customer_id: i64) -> Credit {
    let credit = Credit::new(
        Amount::new(dec!(100.00)).unwrap(),
        in_two_months(),
        InstallmentCount::new(15).unwrap(),
        customer_id,
    );
    CreditRepository::save(store, credit).await.unwrap()
}

pub fn build_credit_dto(customer_id: i64) -> Value {
    serde_json::json!({
        "creditValue": 100.0,
        "dayFirstOfInstallment": in_two_months().to_string(),
        "numberOfInstallments": 15,
        "customerId": customer_id,
    })
}

pub fn build_customer_dto(cpf: &str, email: &str) -> Value {
    serde_json::json!({
        "firstName": "Cami",
        "lastName": "Cavalcante",
        "cpf": cpf,
        "income": 1000.0,
        "email": email,
        "password": "1234",
        "zipCode": "000000",
        "street": "Rua da Cami, 123",
    })
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Connect to `DATABASE_URL` and empty both tables. Only used by the
/// `#[ignore]`d PostgreSQL tests.
pub async fn setup_test_db() -> sqlx::PgPool {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to DB");

    sqlx::query("TRUNCATE TABLE credits, customers RESTART IDENTITY CASCADE")
        .execute(&pool)
        .await
        .expect("Failed to clean up DB");

    pool
}
