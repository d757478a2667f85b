//! Credit Application System Library
//!
//! Re-exports modules for integration testing and the server binary.

pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod handlers;
pub mod repository;

mod error;

pub use config::Config;
pub use domain::{Address, Amount, Cpf, Credit, Customer, DomainError, Status};
pub use error::{AppError, AppResult, ErrorResponse, FieldErrors};
