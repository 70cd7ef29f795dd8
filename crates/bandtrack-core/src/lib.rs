//! bandtrack-core — Score ledger, persistence, and statistics.
//!
//! This crate defines the tracker data model, the JSON store it is saved to,
//! and the aggregation logic the dashboard is built from.

pub mod config;
pub mod error;
pub mod ledger;
pub mod model;
pub mod quotes;
pub mod statistics;
pub mod store;
