//! Core types and trait definitions for the Rolodex directory.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The storage backend and the API layer both depend on it.

pub mod company;
pub mod error;
pub mod membership;
pub mod person;
pub mod store;
pub mod validate;
pub mod view;

pub use error::{Error, Result};
