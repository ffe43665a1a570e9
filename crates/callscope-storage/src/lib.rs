//! Persistence layer for the quality-management core.
//!
//! [`QmStore`] wraps a SeaORM connection (SQLite or PostgreSQL URL) and
//! exposes typed access to rule configurations, call analyses, and alerts.

pub mod entities;
pub mod error;
pub mod store;

#[cfg(test)]
mod tests;

pub use store::QmStore;
