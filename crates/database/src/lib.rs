//! # PropTech Database Crate
//!
//! This crate acts as a high-level, application-specific interface to the
//! PostgreSQL property store. It only reads.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** This crate encapsulates all database-specific logic. It hides
//!   the SQL and the stored row shapes behind resolve-by-id methods that return
//!   `core_types` records.
//! - **Absent vs. Missing:** A unit that does not resolve is an error
//!   (`DbError::UnitNotFound`). A missing permit, title, meter or reading is not:
//!   those methods return `None` or an empty `Vec`.
//! - **Asynchronous & Pooled:** All operations are asynchronous and share a
//!   connection pool (`PgPool`).
//!
//! ## Public API
//!
//! - `connect`: The async function to establish the database connection pool.
//! - `DbRepository`: Holds the pool and provides the fetch methods.
//! - `DbError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use connection::connect;
pub use error::DbError;
pub use repository::DbRepository;
