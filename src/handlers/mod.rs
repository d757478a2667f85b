//! Command Handlers module
//!
//! Business operations on customers and credits. Each handler is built from
//! the repositories it needs and enforces the rules the HTTP layer cannot
//! check on its own (references, dates relative to today, ownership).

mod commands;
mod credit_handler;
mod customer_handler;

pub use commands::*;
pub use credit_handler::CreditHandler;
pub use customer_handler::CustomerHandler;
