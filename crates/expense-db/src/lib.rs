//! # expense-db
//!
//! PostgreSQL adapters for the ports defined in `expense-core`, via SQLx.
//!
//! ## Overview
//!
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - `PgExpenseStore`, whose units of work lock rows with `SELECT … FOR UPDATE`
//! - `PgAuditLogRepository` and `PgUserDirectory`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use expense_common::AppConfig;
//! use expense_db::pool::{create_pool, DatabaseConfig};
//! use expense_db::PgExpenseStore;
//! use expense_core::traits::ExpenseStore;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::from_env()?;
//!     let pool = create_pool(&DatabaseConfig::from(&config.database)).await?;
//!     let store = PgExpenseStore::new(pool);
//!
//!     let mut uow = store.begin().await?;
//!     // lock, mutate, commit...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, DatabaseConfig, PgPool};
pub use repositories::{PgAuditLogRepository, PgExpenseStore, PgUnitOfWork, PgUserDirectory};
