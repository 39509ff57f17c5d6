//! pftracker - terminal client and analytics engine for a personal-finance API
//!
//! The finance API owns the records (transactions, categories, budgets and
//! savings goals). This crate fetches them, derives the dashboard analytics
//! and reports, and offers a CLI for recording income and expenses.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `api`: the finance API collaborator (HTTP and in-memory)
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, categories, budgets, goals)
//! - `reports`: Pure derivations, including [`reports::compute_analytics`]
//! - `services`: Business logic layer over the API
//! - `storage`: Settings and login session files
//! - `display`, `export`, `cli`: terminal output, file formats, commands
//!
//! # Example
//!
//! ```rust,ignore
//! use pftracker::models::RecordSet;
//! use pftracker::reports::AnalyticsSnapshot;
//!
//! let records: RecordSet = serde_json::from_str(&bundle)?;
//! let snapshot = AnalyticsSnapshot::generate(&records, today);
//! println!("{}", snapshot.format_terminal("$"));
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{PfError, PfResult};
