//! Clients and their phone numbers, kept in Postgres.
//!
//! [`db::Database`] is the store access layer: it creates the schema and exposes the
//! add / update / delete / search operations over `clients` and `phones`.

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod ui;

pub use error::{Error, Result};
