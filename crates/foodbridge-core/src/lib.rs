//! # foodbridge-core
//!
//! Core crate for Foodbridge. Contains typed identifiers, configuration
//! schemas, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Foodbridge crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
